//! Reverse URL resolution port.
//!
//! Entities link to each other in API responses. The routing table lives in
//! the HTTP layer, so projections only see this trait.

use crate::contracts::http::{BOUNDARIES_PATH, BOUNDARY_SETS_PATH, SHAPE_SUFFIX};

/// A named API route with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// One boundary set.
    SetDetail { slug: &'a str },
    /// All boundaries of a set.
    BoundaryList { set_slug: &'a str },
    /// One boundary.
    BoundaryDetail { set_slug: &'a str, slug: &'a str },
    /// Geometry of one boundary.
    BoundaryShape { set_slug: &'a str, slug: &'a str },
}

impl Route<'_> {
    /// Stable route name, for resolvers backed by a name-keyed table.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetDetail { .. } => "set_detail",
            Self::BoundaryList { .. } => "boundary_list",
            Self::BoundaryDetail { .. } => "boundary_detail",
            Self::BoundaryShape { .. } => "boundary_shape",
        }
    }
}

/// Maps a route plus parameters to its canonical URL.
pub trait UrlResolver: Send + Sync {
    fn reverse(&self, route: &Route<'_>) -> String;
}

/// Resolver for the standard path layout, optionally mounted under a prefix.
///
/// ```rust
/// use boundaries_core::{PathUrlResolver, Route, UrlResolver};
///
/// let urls = PathUrlResolver::new("/api");
/// assert_eq!(urls.reverse(&Route::SetDetail { slug: "wards" }), "/api/boundary-sets/wards/");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathUrlResolver {
    prefix: String,
}

impl PathUrlResolver {
    /// Create a resolver mounted at `prefix` (trailing slashes are ignored).
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl UrlResolver for PathUrlResolver {
    fn reverse(&self, route: &Route<'_>) -> String {
        let prefix = &self.prefix;
        match route {
            Route::SetDetail { slug } => format!("{prefix}{BOUNDARY_SETS_PATH}/{slug}/"),
            Route::BoundaryList { set_slug } => format!("{prefix}{BOUNDARIES_PATH}/{set_slug}/"),
            Route::BoundaryDetail { set_slug, slug } => {
                format!("{prefix}{BOUNDARIES_PATH}/{set_slug}/{slug}/")
            }
            Route::BoundaryShape { set_slug, slug } => {
                format!("{prefix}{BOUNDARIES_PATH}/{set_slug}/{slug}/{SHAPE_SUFFIX}/")
            }
        }
    }
}
