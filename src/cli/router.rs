//! Path-based dispatch between screens.

use super::{AppContext, HOME};
use crate::ui::{Console, screens};
use crate::{Error, Result};
use std::collections::HashMap;

/// Where to go after a handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Continue at this route.
    To(String),
    /// Leave the application.
    Quit,
}

impl Navigation {
    /// Navigation to `path`.
    #[must_use]
    pub fn to(path: &str) -> Self {
        Self::To(path.to_string())
    }
}

/// A screen handler.
pub type Handler<C> = fn(&mut AppContext<C>) -> Result<Navigation>;

/// Route table.
pub struct Router<C: Console> {
    routes: HashMap<String, Handler<C>>,
}

impl<C: Console> Default for Router<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Console> Router<C> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registers `handler` under `path`, replacing any previous one.
    pub fn add_path(&mut self, path: &str, handler: Handler<C>) -> &mut Self {
        self.routes.insert(path.to_string(), handler);
        self
    }

    /// Returns true if `path` has a handler.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Registered paths, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Runs handlers starting at `start` until one returns
    /// [`Navigation::Quit`] or console input closes.
    ///
    /// A failing handler is reported to the operator and navigation
    /// resumes at the main menu.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when navigating to an unregistered path,
    /// or a console error other than [`Error::InputClosed`].
    pub fn navigate(&self, ctx: &mut AppContext<C>, start: &str) -> Result<()> {
        let mut path = start.to_string();
        loop {
            let handler = self.routes.get(&path).ok_or_else(|| Error::NotFound {
                kind: "route",
                id: path.clone(),
            })?;
            tracing::debug!(route = %path, "Navigating");

            match handler(ctx) {
                Ok(Navigation::To(next)) => path = next,
                Ok(Navigation::Quit) => return Ok(()),
                Err(Error::InputClosed) => {
                    tracing::info!(route = %path, "Console input closed");
                    return Ok(());
                },
                Err(e) => {
                    tracing::warn!(route = %path, error = %e, "Handler failed");
                    match screens::notice("Erreur", &e.to_string()).display(&mut ctx.console) {
                        Err(Error::InputClosed) => return Ok(()),
                        other => other?,
                    }
                    path = HOME.to_string();
                },
            }
        }
    }
}
