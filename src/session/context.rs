use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use super::identity::{EntropyRoller, Identity, Session, StatRoller};
use super::theme::{Theme, ThemeSink};

struct ContextInner {
    session: RwLock<Session>,
    theme: RwLock<Theme>,
    roller: Mutex<Box<dyn StatRoller>>,
    sink: Arc<dyn ThemeSink>,
}

/// Owner of the session and theme state.
///
/// Lives as long as the application instance. Dropping it ends the scope:
/// every [`ContextHandle`] handed out becomes unusable.
pub struct ContextProvider {
    inner: Arc<ContextInner>,
}

impl ContextProvider {
    /// Create the provider and push the initial theme to `sink`.
    pub fn new(initial_theme: Theme, sink: Arc<dyn ThemeSink>) -> Self {
        Self::with_roller(initial_theme, sink, Box::new(EntropyRoller))
    }

    /// Like [`ContextProvider::new`] with a custom stat source for logins.
    pub fn with_roller(
        initial_theme: Theme,
        sink: Arc<dyn ThemeSink>,
        roller: Box<dyn StatRoller>,
    ) -> Self {
        sink.apply(initial_theme);
        Self {
            inner: Arc::new(ContextInner {
                session: RwLock::new(Session::Anonymous),
                theme: RwLock::new(initial_theme),
                roller: Mutex::new(roller),
                sink,
            }),
        }
    }

    /// Handle for consumers inside this provider's scope.
    pub fn handle(&self) -> ContextHandle {
        ContextHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Consumer access to the session and theme.
///
/// Using a handle after its [`ContextProvider`] has been dropped is a
/// programming error and panics.
#[derive(Clone)]
pub struct ContextHandle {
    inner: Weak<ContextInner>,
}

impl ContextHandle {
    fn scope(&self) -> Arc<ContextInner> {
        match self.inner.upgrade() {
            Some(inner) => inner,
            None => panic!("session context used outside of an active ContextProvider"),
        }
    }

    pub fn session(&self) -> Session {
        self.scope().session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.scope().session.read().is_authenticated()
    }

    /// Authenticate as `name` with a freshly generated identity.
    pub fn login(&self, name: &str) {
        let scope = self.scope();
        let identity = {
            let mut roller = scope.roller.lock();
            Identity::generate(name, &mut **roller)
        };
        tracing::info!(
            name = %identity.name,
            level = identity.level,
            class = %identity.class,
            "Hero logged in"
        );
        *scope.session.write() = Session::Authenticated(identity);
    }

    pub fn logout(&self) {
        let scope = self.scope();
        let previous = std::mem::take(&mut *scope.session.write());
        if let Some(identity) = previous.identity() {
            tracing::info!(name = %identity.name, "Hero logged out");
        }
    }

    pub fn theme(&self) -> Theme {
        *self.scope().theme.read()
    }

    /// Flip the theme, notify the sink and return the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let scope = self.scope();
        let mut theme = scope.theme.write();
        *theme = theme.toggled();
        scope.sink.apply(*theme);
        *theme
    }
}
