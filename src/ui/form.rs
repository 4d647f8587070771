//! Ordered, validated data entry.

use super::{Console, Menu, View};
use crate::Result;
use crate::models::Fields;
use serde_json::Value;
use std::fmt;
use std::ops::RangeInclusive;

/// Message printed when a field value is rejected.
pub const INVALID_VALUE: &str = "Valeur spécifiée incorrecte";

/// Data collected by a form, keyed by field name.
pub type FormData = Fields;

/// Post-processing step run after every field has been collected.
///
/// It receives the console so it can run further menus or forms, one after
/// the other.
pub type PostProcess = Box<dyn Fn(&mut dyn Console, FormData) -> Result<FormData>>;

/// What a field accepts.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Any non-empty line, kept as typed.
    Text,
    /// A signed integer; surrounding whitespace is ignored.
    Integer,
    /// An integer within the range.
    Bounded(RangeInclusive<i64>),
    /// A value picked from a sub-menu.
    Choice(Menu<Value>),
}

impl FieldKind {
    /// Coerces one input line, or rejects it.
    ///
    /// Choice fields are not typed in and never coerce.
    #[must_use]
    pub fn coerce(&self, raw: &str) -> Option<Value> {
        match self {
            Self::Text => (!raw.is_empty()).then(|| Value::from(raw)),
            Self::Integer => raw.trim().parse::<i64>().ok().map(Value::from),
            Self::Bounded(range) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|n| range.contains(n))
                .map(Value::from),
            Self::Choice(_) => None,
        }
    }
}

/// One form field.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    description: String,
    kind: FieldKind,
}

impl Field {
    /// Creates a field.
    #[must_use]
    pub fn new(name: &str, description: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
        }
    }

    /// Creates a text field.
    #[must_use]
    pub fn text(name: &str, description: &str) -> Self {
        Self::new(name, description, FieldKind::Text)
    }

    /// Creates an integer field.
    #[must_use]
    pub fn integer(name: &str, description: &str) -> Self {
        Self::new(name, description, FieldKind::Integer)
    }

    /// Creates an integer field accepting only values in `range`.
    #[must_use]
    pub fn bounded(name: &str, description: &str, range: RangeInclusive<i64>) -> Self {
        Self::new(name, description, FieldKind::Bounded(range))
    }

    /// Creates a field answered through `menu`.
    #[must_use]
    pub fn choice(name: &str, menu: Menu<Value>) -> Self {
        Self::new(name, "", FieldKind::Choice(menu))
    }

    /// Key under which the value is stored.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepted input.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    fn prompt(&self) -> String {
        format!("Veuillez saisir {}\n", self.description)
    }

    fn collect(&self, console: &mut dyn Console) -> Result<Value> {
        if let FieldKind::Choice(menu) = &self.kind {
            return menu.display(console);
        }
        loop {
            let raw = console.read_line(&self.prompt())?;
            match self.kind.coerce(&raw) {
                Some(value) => return Ok(value),
                None => console.write_line(INVALID_VALUE)?,
            }
        }
    }
}

/// A titled sequence of fields followed by an optional post-processing step.
pub struct Form {
    view: View,
    fields: Vec<Field>,
    post_process: Option<PostProcess>,
}

impl Form {
    /// Creates a form. Fields are prompted in the given order.
    #[must_use]
    pub fn new(title: &str, fields: Vec<Field>) -> Self {
        Self {
            view: View::new(title, ""),
            fields,
            post_process: None,
        }
    }

    /// Sets the step deriving the final data from the collected fields.
    #[must_use]
    pub fn with_post_process<F>(mut self, post_process: F) -> Self
    where
        F: Fn(&mut dyn Console, FormData) -> Result<FormData> + 'static,
    {
        self.post_process = Some(Box::new(post_process));
        self
    }

    /// The form fields.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Prints the form, collects every field, then post-processes.
    ///
    /// Each typed field loops until its input coerces; choice fields
    /// delegate to their menu.
    ///
    /// # Errors
    ///
    /// Returns console errors, and whatever the post-processing step
    /// returns. Rejected input is never an error.
    pub fn display(&self, console: &mut dyn Console) -> Result<FormData> {
        self.view.display(console)?;
        let mut data = FormData::new();
        for field in &self.fields {
            let value = field.collect(console)?;
            data.insert(field.name.clone(), value);
        }
        match &self.post_process {
            Some(post_process) => post_process(console, data),
            None => Ok(data),
        }
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("view", &self.view)
            .field("fields", &self.fields)
            .field("post_process", &self.post_process.is_some())
            .finish()
    }
}
