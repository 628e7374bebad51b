//! Navigation routes

use std::fmt;

/// Top-level views of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Orders,
    Menu,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Dashboard, Route::Orders, Route::Menu];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "dashboard",
            Route::Orders => "orders",
            Route::Menu => "menu",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Orders => "Orders",
            Route::Menu => "Menu",
        }
    }

    /// Resolve a path. The empty path redirects to the dashboard; unknown paths are `None`.
    pub fn resolve(path: &str) -> Option<Route> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Some(Route::Dashboard);
        }
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
