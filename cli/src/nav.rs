//! Terminal stand-in for the browser router.
//!
//! The "current route" starts at `--path` and moves whenever the guard
//! navigates. Navigations are logged and recorded so commands can report
//! where the session would have taken a browser.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::cell::RefCell;

use session::Navigator;

#[derive(Debug)]
pub struct TerminalNavigator {
    location: RefCell<String>,
    visits: RefCell<Vec<String>>,
}

impl TerminalNavigator {
    #[must_use]
    pub fn new(start: &str) -> Self {
        let start = if start.starts_with('/') { start.to_owned() } else { format!("/{start}") };
        Self { location: RefCell::new(start), visits: RefCell::new(Vec::new()) }
    }

    /// Every navigation so far, oldest first.
    #[must_use]
    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for TerminalNavigator {
    fn current_path(&self) -> String {
        self.location.borrow().clone()
    }

    fn navigate(&self, to: &str) {
        tracing::info!(from = %self.location.borrow(), %to, "navigate");
        *self.location.borrow_mut() = to.to_owned();
        self.visits.borrow_mut().push(to.to_owned());
    }
}
