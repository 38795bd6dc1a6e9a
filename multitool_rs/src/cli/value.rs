//! Argument value kinds and the token cursor they read from.
//!
//! A [`ValueKind`] is the type descriptor of one option parameter: it names
//! the placeholder shown in usage pages, decodes tokens, and tells the
//! completion driver what kind of value is expected next.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Cursor over the tokens of one command line.
///
/// Tokens are consumed left to right and never revisited.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [String],
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [String]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Option<&'t str> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token.as_str())
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Number of tokens consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }
}

/// The built-in parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Text,
    Int,
    Uint,
    Float,
    File,
    Directory,
}

impl ValueKind {
    /// Placeholder name used in usage pages, e.g. `<int>`.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Int => "int",
            ValueKind::Uint => "uint",
            ValueKind::Float => "float",
            ValueKind::File => "file",
            ValueKind::Directory => "directory",
        }
    }

    /// Noun used in error messages.
    fn noun(self) -> &'static str {
        match self {
            ValueKind::Text => "string",
            ValueKind::Int => "integer",
            ValueKind::Uint => "unsigned integer",
            ValueKind::Float => "floating point",
            ValueKind::File => "file name",
            ValueKind::Directory => "directory name",
        }
    }

    pub fn is_path(self) -> bool {
        matches!(self, ValueKind::File | ValueKind::Directory)
    }

    /// Decode one value from the cursor.
    ///
    /// The token is consumed even when it fails to convert.
    pub fn parse(self, cursor: &mut TokenCursor<'_>) -> Result<Value, ArgError> {
        let token = cursor.next_token().ok_or(ArgError::Missing { kind: self })?;

        let invalid = || ArgError::Invalid {
            kind: self,
            token: token.to_string(),
        };

        Ok(match self {
            ValueKind::Text => Value::Text(token.to_string()),
            ValueKind::Int => Value::Int(token.parse().map_err(|_| invalid())?),
            ValueKind::Uint => Value::Uint(token.parse().map_err(|_| invalid())?),
            ValueKind::Float => {
                let value: f64 = token.parse().map_err(|_| invalid())?;
                if !value.is_finite() {
                    return Err(invalid());
                }
                Value::Float(value)
            }
            ValueKind::File => Value::File(PathBuf::from(token)),
            ValueKind::Directory => Value::Directory(PathBuf::from(token)),
        })
    }

    /// Completion hint for a parameter of this kind, asked for only once the
    /// cursor is exhausted.
    pub fn suggest(self) -> Hint {
        let priority = match self {
            ValueKind::File => 1,
            ValueKind::Directory => 2,
            _ => 0,
        };
        Hint {
            priority,
            kind: self,
            candidates: Vec::new(),
        }
    }
}

impl Hint {
    /// The highest-priority hint; ties keep the earliest one.
    pub fn best(hints: impl IntoIterator<Item = Hint>) -> Option<Hint> {
        hints
            .into_iter()
            .reduce(|best, hint| if hint.priority > best.priority { hint } else { best })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded option parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i32),
    Uint(u32),
    Float(f64),
    File(PathBuf),
    Directory(PathBuf),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Int(_) => ValueKind::Int,
            Value::Uint(_) => ValueKind::Uint,
            Value::Float(_) => ValueKind::Float,
            Value::File(_) => ValueKind::File,
            Value::Directory(_) => ValueKind::Directory,
        }
    }
}

/// Conversion out of a decoded [`Value`], used by [`Args::get`](super::option::Args::get).
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for u32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Uint(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for PathBuf {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::File(p) | Value::Directory(p) => Some(p.clone()),
            _ => None,
        }
    }
}

/// Failure to decode one parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgError {
    #[error("missing {} argument", .kind.noun())]
    Missing { kind: ValueKind },

    #[error("invalid {} argument '{token}'", .kind.noun())]
    Invalid { kind: ValueKind, token: String },
}

/// Ranked description of the value expected next.
///
/// A higher `priority` marks a more specific hint: primitives are 0, paths
/// rank above them so a front end can delegate to filesystem listing.
/// Hints order by `priority` first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hint {
    pub priority: u8,
    pub kind: ValueKind,
    pub candidates: Vec<String>,
}

/// What the completion driver offers for the next word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Literal next-token candidates.
    Literal(Vec<String>),
    /// The next word is a value of some kind.
    Hint(Hint),
}

impl Completion {
    /// Output lines for the shell hook.
    ///
    /// Path hints start with a `<file>` or `<directory>` directive so the
    /// completion script can fall back to filesystem listing.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Completion::Literal(candidates) => candidates,
            Completion::Hint(hint) => {
                let mut lines = Vec::with_capacity(hint.candidates.len() + 1);
                if hint.kind.is_path() {
                    lines.push(format!("<{}>", hint.kind.name()));
                }
                lines.extend(hint.candidates);
                lines
            }
        }
    }
}
