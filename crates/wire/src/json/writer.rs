//! Streaming JSON writer
//!
//! [`JsonWriter`] is the push contract codecs encode against. [`TextWriter`]
//! implements it into an owned string, inserting separators from a scope
//! stack and rejecting out-of-order use.

use smallvec::SmallVec;

use super::error::{ProtocolViolation, Result};

/// Streaming JSON writer contract.
///
/// Typed scalar writes are delegated to nested codecs. A `name` must precede
/// every value inside an object; the writer enforces this.
pub trait JsonWriter {
    /// Emit a `{`.
    fn begin_object(&mut self) -> Result<()>;
    /// Emit a `}`.
    fn end_object(&mut self) -> Result<()>;
    /// Emit a `[`.
    fn begin_array(&mut self) -> Result<()>;
    /// Emit a `]`.
    fn end_array(&mut self) -> Result<()>;
    /// Emit a field name.
    fn name(&mut self, name: &str) -> Result<()>;
    /// Emit a `null`.
    fn null_value(&mut self) -> Result<()>;
    /// Emit a boolean.
    fn bool_value(&mut self, value: bool) -> Result<()>;
    /// Emit an integer.
    fn int_value(&mut self, value: i64) -> Result<()>;
    /// Emit a float. Non-finite values have no JSON representation.
    fn float_value(&mut self, value: f64) -> Result<()>;
    /// Emit a string.
    fn string_value(&mut self, value: &str) -> Result<()>;
}

#[derive(Debug)]
enum Scope {
    Object { has_entries: bool, name_pending: bool },
    Array { has_entries: bool },
}

/// JSON writer into an owned string.
pub struct TextWriter {
    out: String,
    scopes: SmallVec<[Scope; 8]>,
    doc_written: bool,
}

impl TextWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        TextWriter {
            out: String::new(),
            scopes: SmallVec::new(),
            doc_written: false,
        }
    }

    /// Finish the document, asserting it is complete, and return the text.
    pub fn finish(self) -> Result<String> {
        if !self.scopes.is_empty() {
            return Err(ProtocolViolation::InvalidWrite {
                detail: "document finished inside an open container",
            });
        }
        if !self.doc_written {
            return Err(ProtocolViolation::InvalidWrite {
                detail: "document finished before any value was written",
            });
        }
        Ok(self.out)
    }

    /// The text written so far, without completeness checks.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    fn before_value(&mut self) -> Result<()> {
        match self.scopes.last_mut() {
            None => {
                if self.doc_written {
                    return Err(ProtocolViolation::InvalidWrite {
                        detail: "second top-level value",
                    });
                }
            }
            Some(Scope::Object { name_pending, .. }) => {
                if !*name_pending {
                    return Err(ProtocolViolation::InvalidWrite {
                        detail: "value inside object without a preceding name",
                    });
                }
            }
            Some(Scope::Array { has_entries }) => {
                if *has_entries {
                    self.out.push(',');
                }
            }
        }
        Ok(())
    }

    fn after_value(&mut self) {
        match self.scopes.last_mut() {
            None => self.doc_written = true,
            Some(Scope::Object {
                has_entries,
                name_pending,
            }) => {
                *has_entries = true;
                *name_pending = false;
            }
            Some(Scope::Array { has_entries }) => *has_entries = true,
        }
    }
}

impl Default for TextWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWriter for TextWriter {
    fn begin_object(&mut self) -> Result<()> {
        self.before_value()?;
        self.out.push('{');
        self.scopes.push(Scope::Object {
            has_entries: false,
            name_pending: false,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        match self.scopes.last() {
            Some(Scope::Object {
                name_pending: false,
                ..
            }) => {}
            _ => {
                return Err(ProtocolViolation::InvalidWrite {
                    detail: "end_object outside an object or after a dangling name",
                });
            }
        }
        self.out.push('}');
        self.scopes.pop();
        self.after_value();
        Ok(())
    }

    fn begin_array(&mut self) -> Result<()> {
        self.before_value()?;
        self.out.push('[');
        self.scopes.push(Scope::Array { has_entries: false });
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        if !matches!(self.scopes.last(), Some(Scope::Array { .. })) {
            return Err(ProtocolViolation::InvalidWrite {
                detail: "end_array outside an array",
            });
        }
        self.out.push(']');
        self.scopes.pop();
        self.after_value();
        Ok(())
    }

    fn name(&mut self, name: &str) -> Result<()> {
        let has_entries = match self.scopes.last() {
            Some(Scope::Object {
                has_entries,
                name_pending: false,
            }) => *has_entries,
            _ => {
                return Err(ProtocolViolation::InvalidWrite {
                    detail: "name outside an object or after another name",
                });
            }
        };
        if has_entries {
            self.out.push(',');
        }
        escape_into(&mut self.out, name);
        self.out.push(':');
        if let Some(Scope::Object { name_pending, .. }) = self.scopes.last_mut() {
            *name_pending = true;
        }
        Ok(())
    }

    fn null_value(&mut self) -> Result<()> {
        self.before_value()?;
        self.out.push_str("null");
        self.after_value();
        Ok(())
    }

    fn bool_value(&mut self, value: bool) -> Result<()> {
        self.before_value()?;
        self.out.push_str(if value { "true" } else { "false" });
        self.after_value();
        Ok(())
    }

    fn int_value(&mut self, value: i64) -> Result<()> {
        self.before_value()?;
        self.out.push_str(&value.to_string());
        self.after_value();
        Ok(())
    }

    fn float_value(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(ProtocolViolation::NonFiniteNumber);
        }
        self.before_value()?;
        self.out.push_str(&format_float(value));
        self.after_value();
        Ok(())
    }

    fn string_value(&mut self, value: &str) -> Result<()> {
        self.before_value()?;
        escape_into(&mut self.out, value);
        self.after_value();
        Ok(())
    }
}

/// Format a finite float, ensuring whole numbers keep a decimal point.
fn format_float(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Append a string literal with JSON escaping.
fn escape_into(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
