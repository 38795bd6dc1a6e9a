//! # multitool
//!
//! Framework for multi-command binaries: one executable, many named
//! **applets**, each with its own typed options, usage page and shell
//! completion.
//!
//! ## Quick Start
//!
//! ```rust
//! use multitool::cli::{Applet, AppletRegistry, Invocation, ValueKind};
//! use multitool::types::{EXIT_FAILURE, EXIT_SUCCESS};
//! use std::cell::Cell;
//!
//! struct Count;
//!
//! impl Applet for Count {
//!     fn name(&self) -> &'static str {
//!         "count"
//!     }
//!
//!     fn description(&self) -> &'static str {
//!         "Counts to a number"
//!     }
//!
//!     fn run(&self, invocation: &mut Invocation<'_>) -> i32 {
//!         let limit = Cell::new(3i32);
//!         let mut parser = invocation.option_parser();
//!         parser.add_options(&["-n", "--count"], "Upper bound", &[ValueKind::Int], |args| {
//!             limit.set(args.get(0)?);
//!             Ok(())
//!         });
//!
//!         let Some(_leftovers) = invocation.process_command_line(&mut parser) else {
//!             return EXIT_FAILURE;
//!         };
//!         drop(parser);
//!
//!         for i in 1..=limit.get() {
//!             println!("{}", i);
//!         }
//!         EXIT_SUCCESS
//!     }
//! }
//!
//! let registry = AppletRegistry::builder("demo").register(Count).build();
//! let status = registry.dispatch(&["count".to_string(), "-n".to_string(), "2".to_string()]);
//! assert_eq!(status, EXIT_SUCCESS);
//! ```
//!
//! ## Shell completion
//!
//! Every registry carries the hidden `_autocomplete` applet. It replays an
//! applet's `run` in dry-run mode: options get declared, no handler fires,
//! and the option keys (or a `<file>`/`<directory>` hint) are printed.

/// Option-parsing and dispatch engine.
pub mod cli;

/// Terminal color helpers for diagnostics.
pub mod colors;

/// Optional TOML config plus environment overrides.
pub mod config;

/// Edit distance for "did you mean" suggestions.
pub mod similarity;

/// Shared constants and small types.
pub mod types;

/// Demonstration applets wired into the `multitool` binary.
pub mod applets;

pub use cli::{Applet, AppletRegistry, Invocation, OptionParser, ValueKind};
pub use config::CliConfig;
