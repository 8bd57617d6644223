//! Route composition.
//!
//! A resource wrapper owns a base route (`/locks`) and each call adds a
//! sub-route (`{lockId}/freeze`). [`compose_route`] joins the two into an
//! absolute path that starts with a single `/`, has no trailing `/` and
//! never contains `//`.

/// A resource base route paired with a call-specific sub-route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    /// Base route of the resource wrapper.
    pub base_route: String,
    /// Route of the individual call.
    pub sub_route: String,
}

impl RouteContext {
    /// Creates a new route context.
    pub fn new(base_route: impl Into<String>, sub_route: impl Into<String>) -> Self {
        Self {
            base_route: base_route.into(),
            sub_route: sub_route.into(),
        }
    }

    /// Returns the normalized absolute path.
    pub fn path(&self) -> String {
        compose_route(&self.base_route, &self.sub_route)
    }
}

/// Joins a base route and a sub-route into a normalized absolute path.
///
/// Empty segments contribute nothing, so `compose_route("", "")` is the empty
/// path (the API root). Slash-only input never collapses below `/`.
///
/// ```
/// use chaster_client::routing::compose_route;
///
/// assert_eq!(compose_route("locks/", "/123/freeze/"), "/locks/123/freeze");
/// assert_eq!(compose_route("", "files"), "/files");
/// ```
pub fn compose_route(base: &str, sub: &str) -> String {
    let mut path = normalize_segment(base);
    path.push_str(&normalize_segment(sub));
    if path.is_empty() && (base.contains('/') || sub.contains('/')) {
        path.push('/');
    }
    path
}

/// Normalizes one segment to `/a/b` form, or `""` when it has no content.
fn normalize_segment(segment: &str) -> String {
    let mut normalized = String::with_capacity(segment.len() + 1);
    for part in segment.split('/').filter(|part| !part.is_empty()) {
        normalized.push('/');
        normalized.push_str(part);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("locks/", "/123/freeze/", "/locks/123/freeze" ; "slashes on both sides")]
    #[test_case("locks", "123/freeze", "/locks/123/freeze" ; "no slashes")]
    #[test_case("/locks", "", "/locks" ; "empty sub route")]
    #[test_case("", "files", "/files" ; "empty base route")]
    #[test_case("", "", "" ; "both empty")]
    #[test_case("/", "/", "/" ; "bare slashes")]
    #[test_case("/", "", "/" ; "bare slash base")]
    #[test_case("conversations", "by-user/42", "/conversations/by-user/42" ; "nested sub route")]
    #[test_case("//locks//", "//shared-locks//abc//", "/locks/shared-locks/abc" ; "repeated slashes")]
    fn test_compose_route(base: &str, sub: &str, expected: &str) {
        assert_eq!(compose_route(base, sub), expected);
    }

    #[test]
    fn test_composed_routes_are_slash_safe() {
        let segments = ["", "/", "//", "a", "/a", "a/", "/a/", "a//b", "/a/b/"];
        for base in segments {
            for sub in segments {
                let path = compose_route(base, sub);
                assert!(!path.contains("//"), "{path:?} from {base:?} + {sub:?}");
                assert!(path == "/" || !path.ends_with('/'), "{path:?} from {base:?} + {sub:?}");
                if !path.is_empty() {
                    assert!(path.starts_with('/'));
                }
                assert_eq!(compose_route(&path, ""), path);
            }
        }
    }

    #[test]
    fn test_route_context_path() {
        let context = RouteContext::new("community-event", "categories");
        assert_eq!(context.path(), "/community-event/categories");
    }
}
