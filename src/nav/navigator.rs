use super::route::Route;

/// How a navigation affects history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    /// Add an entry; back returns to the previous location.
    Push,
    /// Overwrite the current entry; it can no longer be reached via back.
    Replace,
}

/// Browser-style history stack.
#[derive(Debug, Clone)]
pub struct Navigator {
    entries: Vec<Route>,
    index: usize,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Route {
        &self.entries[self.index]
    }

    pub fn go(&mut self, route: Route, mode: NavMode) {
        match mode {
            NavMode::Push => {
                self.entries.truncate(self.index + 1);
                self.entries.push(route);
                self.index += 1;
            }
            NavMode::Replace => self.entries[self.index] = route,
        }
    }

    /// Step back one entry. Returns `None` at the start of history.
    pub fn back(&mut self) -> Option<&Route> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Entries up to and including the current one.
    pub fn history(&self) -> &[Route] {
        &self.entries[..=self.index]
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}
