//! Titled block of text.

use super::Console;
use crate::Result;

/// A titled, read-only block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    title: String,
    content: String,
    blocking: bool,
}

impl View {
    /// Creates a non-blocking view. The title is shown uppercased.
    #[must_use]
    pub fn new(title: &str, content: impl Into<String>) -> Self {
        Self {
            title: title.to_uppercase(),
            content: content.into(),
            blocking: false,
        }
    }

    /// Makes the view wait for a line of input after printing.
    #[must_use]
    pub const fn blocking(mut self) -> Self {
        self.blocking = true;
        self
    }

    /// Uppercased title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rendered content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether display waits for acknowledgement.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        self.blocking
    }

    /// Prints the view.
    ///
    /// A non-empty title clears the screen first and is underlined with
    /// `*`. A blocking view then waits for one line of input.
    ///
    /// # Errors
    ///
    /// Returns a console error, including [`InputClosed`](crate::Error::InputClosed)
    /// while waiting for acknowledgement.
    pub fn display(&self, console: &mut dyn Console) -> Result<()> {
        if !self.title.is_empty() {
            console.clear()?;
            console.write_line(&self.title)?;
            console.write_line(&"*".repeat(self.title.chars().count()))?;
        }
        console.write_line(&self.content)?;
        if self.blocking {
            console.read_line("")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::ui::ScriptedConsole;

    #[test]
    fn test_title_uppercased_and_underlined() {
        let mut console = ScriptedConsole::default();
        View::new("Rapport", "ligne").display(&mut console).unwrap();

        assert_eq!(console.transcript(), "RAPPORT\n*******\nligne\n");
        assert_eq!(console.clears(), 1);
    }

    #[test]
    fn test_untitled_view_does_not_clear() {
        let mut console = ScriptedConsole::default();
        View::new("", "just content").display(&mut console).unwrap();

        assert_eq!(console.transcript(), "just content\n");
        assert_eq!(console.clears(), 0);
    }

    #[test]
    fn test_blocking_waits_for_a_line() {
        let mut console = ScriptedConsole::new(["", "left over"]);
        let view = View::new("Liste", "a\nb").blocking();
        assert!(view.is_blocking());
        view.display(&mut console).unwrap();
        assert_eq!(console.remaining(), 1);

        let mut console = ScriptedConsole::default();
        assert!(matches!(view.display(&mut console), Err(Error::InputClosed)));
    }
}
