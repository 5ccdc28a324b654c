//! Navigation between views, gated by the authentication guard

use std::fmt;
use std::sync::RwLock;

use log::debug;

use crate::session::SharedTokenStore;

/// Navigable views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Public landing view
    #[default]
    Home,
    Login,
    Register,
    /// Student list (guarded)
    Students,
    /// Student list with the creation form open (guarded)
    StudentsCreate,
}

impl Route {
    /// Route entered for unknown paths
    pub const DEFAULT: Route = Route::Home;

    /// Resolve a path such as `/students` or `students/create`.
    ///
    /// Unknown paths resolve to [`Route::DEFAULT`].
    pub fn parse(path: &str) -> Route {
        match path.trim().trim_matches('/') {
            "" | "home" => Route::Home,
            "login" => Route::Login,
            "register" => Route::Register,
            "students" => Route::Students,
            "students/create" => Route::StudentsCreate,
            other => {
                debug!("Unknown route '{}', redirecting to default", other);
                Route::DEFAULT
            }
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/home",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Students => "/students",
            Route::StudentsCreate => "/students/create",
        }
    }

    /// Whether entering this route requires a session token
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Students | Route::StudentsCreate)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(Route),
}

/// Allows protected routes only while a session token is stored.
///
/// The token is not inspected: any non-empty value grants access.
pub struct AuthGuard {
    store: SharedTokenStore,
}

impl AuthGuard {
    pub fn new(store: SharedTokenStore) -> Self {
        Self { store }
    }

    pub fn check(&self) -> GuardOutcome {
        if self.store.has_token() {
            GuardOutcome::Allow
        } else {
            GuardOutcome::Redirect(Route::Login)
        }
    }
}

/// Navigation sink handed to views
pub trait Navigator: Send + Sync {
    /// Request navigation to `route`; returns the route actually entered
    fn navigate(&self, route: Route) -> Route;
}

/// Tracks the current route and runs the guard ahead of protected routes
pub struct Router {
    guard: AuthGuard,
    current: RwLock<Route>,
}

impl Router {
    pub fn new(store: SharedTokenStore) -> Self {
        Self {
            guard: AuthGuard::new(store),
            current: RwLock::new(Route::DEFAULT),
        }
    }

    /// Route currently entered
    pub fn current(&self) -> Route {
        self.current.read().map(|r| *r).unwrap_or_default()
    }

    /// Navigate by path, resolving unknown paths to the default route
    pub fn navigate_to_path(&self, path: &str) -> Route {
        self.navigate(Route::parse(path))
    }

    /// Where a navigation to `route` would land, without entering it
    pub fn resolve(&self, route: Route) -> Route {
        if !route.is_protected() {
            return route;
        }
        match self.guard.check() {
            GuardOutcome::Allow => route,
            GuardOutcome::Redirect(target) => {
                debug!("Guard redirected {} to {}", route, target);
                target
            }
        }
    }
}

impl Navigator for Router {
    fn navigate(&self, route: Route) -> Route {
        let entered = self.resolve(route);
        if let Ok(mut current) = self.current.write() {
            *current = entered;
        }
        entered
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryTokenStore, TokenStore};
    use std::sync::Arc;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("register"), Route::Register);
        assert_eq!(Route::parse("/students/"), Route::Students);
        assert_eq!(Route::parse("students/create"), Route::StudentsCreate);
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn test_unknown_path_resolves_to_default() {
        assert_eq!(Route::parse("/admin"), Route::DEFAULT);
        assert_eq!(Route::parse("students/7/edit"), Route::DEFAULT);
    }

    #[test]
    fn test_protected_routes() {
        assert!(Route::Students.is_protected());
        assert!(Route::StudentsCreate.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::Home.is_protected());
    }

    #[test]
    fn test_guard_without_token_redirects_to_login() {
        let guard = AuthGuard::new(Arc::new(MemoryTokenStore::new()));
        assert_eq!(guard.check(), GuardOutcome::Redirect(Route::Login));
    }

    #[test]
    fn test_guard_with_any_token_allows() {
        for token in ["abc", "not-a-jwt", "x.y.z"] {
            let guard = AuthGuard::new(Arc::new(MemoryTokenStore::with_token(token)));
            assert_eq!(guard.check(), GuardOutcome::Allow, "token {:?}", token);
        }
    }

    #[test]
    fn test_guard_with_empty_token_redirects() {
        let guard = AuthGuard::new(Arc::new(MemoryTokenStore::with_token("")));
        assert_eq!(guard.check(), GuardOutcome::Redirect(Route::Login));
    }

    #[test]
    fn test_router_applies_guard_to_protected_routes() {
        let store = Arc::new(MemoryTokenStore::new());
        let router = Router::new(store.clone());

        assert_eq!(router.navigate(Route::Students), Route::Login);
        assert_eq!(router.current(), Route::Login);

        store.set("abc").unwrap();
        assert_eq!(router.navigate(Route::Students), Route::Students);
        assert_eq!(router.current(), Route::Students);

        store.clear().unwrap();
        assert_eq!(router.navigate_to_path("students/create"), Route::Login);
    }

    #[test]
    fn test_router_public_routes_ignore_guard() {
        let router = Router::new(Arc::new(MemoryTokenStore::new()));
        assert_eq!(router.navigate(Route::Register), Route::Register);
        assert_eq!(router.navigate_to_path("/nowhere"), Route::Home);
    }
}
