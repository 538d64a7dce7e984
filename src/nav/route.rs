use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("No route matches '{path}'")]
    UnknownPath { path: String },
}

/// Every location the application can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, the entry point. Always reachable.
    Login,
    /// `/dashboard`
    Dashboard,
    /// `/dashboard/post/:postId`
    PostDetail { post_id: String },
    /// `/dashboard/about`
    About,
}

const DASHBOARD: &str = "/dashboard";

impl Route {
    /// Match `path` against the route table.
    ///
    /// Query strings and a trailing slash are ignored.
    pub fn parse(path: &str) -> Result<Self, NavError> {
        let unknown = || NavError::UnknownPath {
            path: path.to_string(),
        };

        let bare = path.split(['?', '#']).next().unwrap_or_default();
        let bare = match bare.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        if bare == "/" {
            return Ok(Route::Login);
        }
        let Some(rest) = bare.strip_prefix(DASHBOARD) else {
            return Err(unknown());
        };
        if rest.is_empty() {
            return Ok(Route::Dashboard);
        }
        let Some(rest) = rest.strip_prefix('/') else {
            // e.g. "/dashboards"
            return Err(unknown());
        };

        if rest == "about" {
            return Ok(Route::About);
        }
        match rest.strip_prefix("post/") {
            Some(post_id) if !post_id.is_empty() && !post_id.contains('/') => {
                Ok(Route::PostDetail {
                    post_id: post_id.to_string(),
                })
            }
            _ => Err(unknown()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".to_string(),
            Route::Dashboard => DASHBOARD.to_string(),
            Route::PostDetail { post_id } => format!("{}/post/{}", DASHBOARD, post_id),
            Route::About => format!("{}/about", DASHBOARD),
        }
    }

    /// Whether entering this route requires an authenticated session.
    pub fn is_guarded(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
