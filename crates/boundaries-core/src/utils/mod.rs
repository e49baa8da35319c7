//! Small pure helpers shared by the domain types.

pub mod slug;
