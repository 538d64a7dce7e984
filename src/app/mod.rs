//! The application shell: navigation, access control and the mounted view.
//!
//! ```text
//! open(path) ──→ Route::parse ──→ gate::decide ──┬─ Granted ──→ mount view
//!                                                └─ Denied  ──→ replace with `/`
//! ```

mod render;
mod views;

use std::sync::Arc;

pub use render::render;
pub use views::{DashboardView, PostDetailView, View, QUEST_COUNT_KEY};

use crate::config::ApiConfig;
use crate::fetch::Transport;
use crate::gate::{self, GateDecision};
use crate::nav::{NavError, NavMode, Navigator, Route};
use crate::session::{ContextHandle, ContextProvider, Theme};
use crate::storage::{self, DurableStore};

/// Name used when a hero logs in without entering one.
pub const DEFAULT_HERO_NAME: &str = "Adventurer";

/// Collaborators shared by every view.
#[derive(Clone)]
pub struct Services {
    pub api: ApiConfig,
    pub transport: Arc<dyn Transport>,
    pub store: Arc<dyn DurableStore>,
}

pub struct App {
    services: Services,
    view: View,
    navigator: Navigator,
    context: ContextProvider,
}

impl App {
    /// Start at the entry point with nobody logged in.
    pub fn new(services: Services, context: ContextProvider) -> Self {
        Self {
            services,
            view: View::Login,
            navigator: Navigator::default(),
            context,
        }
    }

    pub fn context(&self) -> ContextHandle {
        self.context.handle()
    }

    pub fn route(&self) -> &Route {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Navigate to `path`, pushing a history entry.
    pub fn open(&mut self, path: &str) -> Result<&Route, NavError> {
        let route = Route::parse(path)?;
        self.navigate(route, NavMode::Push);
        Ok(self.route())
    }

    pub fn navigate(&mut self, route: Route, mode: NavMode) {
        self.navigator.go(route, mode);
        self.enforce_gate();
        self.mount();
    }

    /// Step back in history. The gate is evaluated again for the entry
    /// that becomes current.
    pub fn back(&mut self) -> bool {
        if self.navigator.back().is_none() {
            return false;
        }
        self.enforce_gate();
        self.mount();
        true
    }

    /// Log in and head to the quest board.
    pub fn login(&mut self, name: &str) {
        let name = match name.trim() {
            "" => DEFAULT_HERO_NAME,
            trimmed => trimmed,
        };
        self.context.handle().login(name);
        self.navigate(Route::Dashboard, NavMode::Push);
    }

    pub fn logout(&mut self) {
        self.context.handle().logout();
        self.navigate(Route::Login, NavMode::Push);
    }

    pub fn toggle_theme(&self) -> Theme {
        self.context.handle().toggle_theme()
    }

    /// Quest count as last persisted by the dashboard.
    pub fn quest_count(&self) -> u64 {
        storage::read(self.services.store.as_ref(), QUEST_COUNT_KEY, 0)
    }

    /// Wait for every request of the mounted view to settle.
    pub async fn settle(&self) {
        match &self.view {
            View::Dashboard(view) => view.settle().await,
            View::PostDetail(view) => view.settle().await,
            View::Login | View::About => {}
        }
    }

    fn enforce_gate(&mut self) {
        let session = self.context.handle().session();
        let target = self.navigator.current().clone();

        match gate::decide(&session, &target) {
            GateDecision::Granted => {
                // The login page sends authenticated heroes straight on.
                if target == Route::Login && session.is_authenticated() {
                    self.navigator.go(Route::Dashboard, NavMode::Push);
                }
            }
            GateDecision::Denied { redirect } => {
                tracing::info!(route = %target, redirect = %redirect, "Access denied, redirecting");
                self.navigator.go(redirect, NavMode::Replace);
            }
        }
    }

    fn mount(&mut self) {
        let route = self.navigator.current();
        let reused = match (&mut self.view, route) {
            (View::PostDetail(view), Route::PostDetail { post_id }) => {
                view.show(&self.services.api, post_id);
                true
            }
            (View::Dashboard(_), Route::Dashboard)
            | (View::About, Route::About)
            | (View::Login, Route::Login) => true,
            _ => false,
        };
        if !reused {
            // Replacing the view drops the old one and its fetchers.
            self.view = View::mount(&self.services, route);
        }
    }
}
