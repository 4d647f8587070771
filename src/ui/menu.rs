//! Numbered-choice prompt.

use super::{Console, View};
use crate::Result;

/// Prompt shown while waiting for a menu selection.
pub const CHOICE_PROMPT: &str = "Veuillez saisir votre choix : ";

/// A numbered list of labelled choices.
///
/// The operator selects by typing the 1-based position; the associated
/// value is returned. Anything else re-prompts, without limit.
#[derive(Debug, Clone)]
pub struct Menu<T> {
    view: View,
    values: Vec<T>,
}

impl<T: Clone> Menu<T> {
    /// Creates a menu from `(label, value)` pairs, in display order.
    #[must_use]
    pub fn new(title: &str, choices: Vec<(String, T)>) -> Self {
        let content = choices
            .iter()
            .enumerate()
            .map(|(i, (label, _))| format!("{} : {label}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        let values = choices.into_iter().map(|(_, value)| value).collect();
        Self {
            view: View::new(title, content),
            values,
        }
    }

    /// The underlying view.
    #[must_use]
    pub const fn view(&self) -> &View {
        &self.view
    }

    /// Number of choices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there is nothing to choose from.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolves raw input to a choice.
    ///
    /// Only a string of ASCII digits naming a listed position matches; no
    /// whitespace or sign is tolerated.
    #[must_use]
    pub fn select(&self, input: &str) -> Option<&T> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let position: usize = input.parse().ok()?;
        self.values.get(position.checked_sub(1)?)
    }

    /// Prints the menu and loops until a valid position is entered.
    ///
    /// # Errors
    ///
    /// Only console errors escape; invalid selections are re-prompted.
    pub fn display(&self, console: &mut dyn Console) -> Result<T> {
        self.view.display(console)?;
        loop {
            let input = console.read_line(CHOICE_PROMPT)?;
            if let Some(value) = self.select(&input) {
                return Ok(value.clone());
            }
            tracing::trace!(input = %input, "Ignored menu input");
        }
    }
}
