//! Interactive console views.
//!
//! - [`View`]: prints a titled block, optionally waiting for acknowledgement.
//! - [`Menu`]: numbered choices, re-prompting until a valid position is typed.
//! - [`Form`]: typed fields prompted in order, each retried until it
//!   coerces, then an optional post-processing step.
//!
//! Every prompt blocks on the [`Console`] and retries without limit; invalid
//! input never escapes the prompt that received it.

mod console;
mod form;
mod menu;
pub mod screens;
mod view;

pub use console::{Console, ScriptedConsole, TerminalConsole};
pub use form::{Field, FieldKind, Form, FormData, INVALID_VALUE, PostProcess};
pub use menu::{CHOICE_PROMPT, Menu};
pub use view::View;
