//! Line-oriented console abstraction.
//!
//! Views never touch stdin/stdout directly. They go through a [`Console`],
//! which the binary backs with the terminal and tests back with a script.

use crate::{Error, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// ANSI sequence clearing the screen and homing the cursor.
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Source and sink of interactive text.
pub trait Console {
    /// Clears the screen.
    fn clear(&mut self) -> Result<()>;

    /// Writes one line of output.
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Writes `prompt`, then blocks until one line of input is available.
    ///
    /// The line terminator is stripped; nothing else is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Console over a reader and a writer, usually the process terminal.
pub struct TerminalConsole<R, W> {
    reader: R,
    writer: W,
    clear_screen: bool,
}

impl TerminalConsole<io::StdinLock<'static>, io::Stdout> {
    /// Creates a console over the process stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    /// Creates a console over arbitrary streams.
    pub const fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            clear_screen: true,
        }
    }

    /// Enables or disables screen clearing.
    #[must_use]
    pub const fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Consumes the console, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn clear(&mut self) -> Result<()> {
        if self.clear_screen {
            write!(self.writer, "{CLEAR_SCREEN}").map_err(write_error)?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}").map_err(write_error)
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt}").map_err(write_error)?;
        self.writer.flush().map_err(write_error)?;

        // Undecodable bytes become U+FFFD, which no prompt accepts.
        let mut raw = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut raw)
            .map_err(|e| Error::OperationFailed {
                operation: "read_console".to_string(),
                cause: e.to_string(),
            })?;
        if read == 0 {
            return Err(Error::InputClosed);
        }
        Ok(strip_terminator(String::from_utf8_lossy(&raw).into_owned()))
    }
}

/// Console fed from a fixed list of input lines, recording all output.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: String,
    clears: usize,
}

impl ScriptedConsole {
    /// Creates a console that will answer prompts with `inputs`, in order.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: String::new(),
            clears: 0,
        }
    }

    /// Queues more input lines.
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.inputs.push_back(line.into());
    }

    /// Everything written so far, prompts included.
    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Number of input lines not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    /// Number of times the screen was cleared.
    #[must_use]
    pub const fn clears(&self) -> usize {
        self.clears
    }

    /// Number of times `prompt` was written.
    #[must_use]
    pub fn prompt_count(&self, prompt: &str) -> usize {
        self.transcript.matches(prompt).count()
    }
}

impl Console for ScriptedConsole {
    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.transcript.push_str(line);
        self.transcript.push('\n');
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.transcript.push_str(prompt);
        let line = self.inputs.pop_front().ok_or(Error::InputClosed)?;
        self.transcript.push_str(&line);
        self.transcript.push('\n');
        Ok(line)
    }
}

fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[allow(clippy::needless_pass_by_value)]
fn write_error(e: io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_console".to_string(),
        cause: e.to_string(),
    }
}
