//! The calculator screen: builds the text handed to the pipeline one key
//! press at a time.

use std::fmt::Display;

use crate::{CalcError, calculate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Digits, parentheses and anything else that is appended as typed.
    Input(char),
    Operator(char),
    Dot,
    Delete,
    Cancel,
    Equals,
}

impl Key {
    #[must_use]
    pub const fn from_char(c: char) -> Self {
        match c {
            '=' => Self::Equals,
            'C' | 'c' => Self::Cancel,
            '<' => Self::Delete,
            '.' => Self::Dot,
            '+' | '-' | '*' | '/' => Self::Operator(c),
            _ => Self::Input(c),
        }
    }
}

/// Pending input, kept as the entries that were pressed so `Delete` can undo
/// exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    entries: Vec<String>,

    /// the number being typed already has its decimal point
    has_dot: bool,
}

impl InputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.entries.concat()
    }

    /// Applies one key. Only [`Key::Equals`] can fail, and a failure leaves
    /// the buffer as it was.
    pub fn press(&mut self, key: Key) -> Result<(), CalcError> {
        match key {
            Key::Cancel => {
                self.entries.clear();
                self.has_dot = false;
            }
            Key::Delete => {
                if self.entries.pop().is_some_and(|last| last.contains('.')) {
                    self.has_dot = false;
                }
            }
            Key::Equals => self.equals()?,
            Key::Dot => self.dot(),
            Key::Operator(op) => {
                self.has_dot = false;
                self.entries.push(op.to_string());
            }
            Key::Input(c) => self.entries.push(c.to_string()),
        }
        Ok(())
    }

    /// Presses every key in `keys` in order, stopping at the first failure.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) -> Result<(), CalcError> {
        keys.into_iter().try_for_each(|key| self.press(key))
    }

    fn dot(&mut self) {
        if self.has_dot {
            return;
        }
        self.has_dot = true;

        let after_digit = self
            .entries
            .last()
            .is_some_and(|last| last.ends_with(|c: char| c.is_ascii_digit()));
        let entry = if after_digit { "." } else { "0." };
        self.entries.push(entry.to_owned());
    }

    fn equals(&mut self) -> Result<(), CalcError> {
        if self.is_empty() {
            return Ok(());
        }

        let text = self.text();
        match calculate(&text).map(|calculation| calculation.value) {
            Ok(Some(value)) => {
                let result = format_number(value);
                tracing::debug!(input = %text, %result, "evaluated buffer");
                self.has_dot = result.contains('.');
                self.entries = vec![result];
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => {
                tracing::debug!(input = %text, %err, "buffer left unevaluated");
                Err(err)
            }
        }
    }
}

impl Display for InputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.entries.iter().try_for_each(|entry| f.write_str(entry))
    }
}

/// Renders a result the way the screen shows it.
#[must_use]
pub fn format_number(value: f64) -> String {
    // `-0` could not be typed back in
    if value == 0.0 {
        "0".to_owned()
    } else if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        format!("{sign}Infinity")
    } else {
        value.to_string()
    }
}
