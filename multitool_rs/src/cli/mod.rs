//! Option-parsing and dispatch engine.
//!
//! ```text
//! argv ──► AppletRegistry::dispatch ──► Applet::run ──► OptionParser::process ──► handlers
//!                 │
//!                 └─► _autocomplete ──► registry listing
//!                                   └─► Applet::autocomplete (dry run) ──► OptionParser::complete
//! ```
//!
//! # Module Structure
//!
//! - [`value`] - parameter kinds, token cursor, completion hints
//! - [`option`] - one registered option and its decoded [`Args`]
//! - [`parser`] - per-applet option registry and usage page
//! - [`applet`] - the [`Applet`] trait and [`Invocation`] context
//! - [`registry`] - applet registry and top-level dispatch
//! - [`autocomplete`] - the hidden shell completion helper

pub mod applet;
pub mod autocomplete;
pub mod option;
pub mod parser;
pub mod registry;
pub mod value;

pub use applet::{Applet, Invocation, Mode};
pub use autocomplete::{AUTOCOMPLETE_APPLET, Autocompleter, CompletionError};
pub use option::{Args, Handler, OptionSpec};
pub use parser::{HELP_KEYS, OptionError, OptionParser, Stop};
pub use registry::{AppletRegistry, RegistryBuilder};
pub use value::{ArgError, Completion, FromValue, Hint, TokenCursor, Value, ValueKind};
