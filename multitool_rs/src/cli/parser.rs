//! Option parser and usage page generator for one applet.
//!
//! Options are declared with an explicit parameter schema (`&[ValueKind]`).
//! The same declarations drive three things:
//!
//! - [`OptionParser::process`] decodes a command line and fires handlers,
//! - [`OptionParser::usage`] renders the `-h`/`--help` page,
//! - [`OptionParser::complete`] tells the completion driver what comes next.
//!
//! Every parser starts with `-h`/`--help` installed.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use super::option::{Action, Args, OptionSpec, ParseFailure, Parsed};
use super::value::{ArgError, Completion, TokenCursor, ValueKind};
use crate::colors::Painter;
use crate::similarity::closest_match;

/// Keys of the built-in usage option.
pub const HELP_KEYS: [&str; 2] = ["-h", "--help"];

const HELP_DESCRIPTION: &str = "Displays information about available options";

/// User-facing parse failure.
#[derive(Debug, Error)]
pub enum OptionError {
    #[error("Unknown option: {key}")]
    UnknownOption {
        key: String,
        suggestion: Option<String>,
    },

    #[error("Could not process option {key}: {source}")]
    Argument {
        key: String,
        #[source]
        source: ArgError,
    },

    #[error("Could not process option {key}: {error:#}")]
    Handler { key: String, error: anyhow::Error },
}

/// Why [`OptionParser::process`] stopped before producing leftovers.
#[derive(Debug)]
pub enum Stop {
    /// The usage page was requested; nothing else was done.
    Help,
    Failed(OptionError),
}

/// Option registry of one applet.
pub struct OptionParser<'a> {
    header: String,
    options: Vec<OptionSpec<'a>>,
    keys: BTreeMap<String, usize>,
    painter: Painter,
}

impl<'a> OptionParser<'a> {
    /// Create a parser with `-h`/`--help` pre-installed.
    pub fn new(header: impl Into<String>) -> Self {
        let mut parser = Self {
            header: header.into(),
            options: Vec::new(),
            keys: BTreeMap::new(),
            painter: Painter::plain(),
        };
        parser.insert(
            &HELP_KEYS,
            OptionSpec::new(HELP_DESCRIPTION.to_string(), Vec::new(), Action::Help),
        );
        parser
    }

    /// Painter used for diagnostics written by [`process_args`](Self::process_args).
    pub fn with_painter(mut self, painter: Painter) -> Self {
        self.painter = painter;
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Register `handler` under a single key.
    ///
    /// # Panics
    ///
    /// If `key` is already registered.
    pub fn add_option<F>(&mut self, key: &str, description: &str, kinds: &[ValueKind], handler: F)
    where
        F: FnMut(&Args) -> anyhow::Result<()> + 'a,
    {
        self.add_options(&[key], description, kinds, handler);
    }

    /// Register `handler` under several aliases (e.g. `-o` and `--output`).
    ///
    /// # Panics
    ///
    /// If any key is already registered, or `keys` is empty.
    pub fn add_options<F>(
        &mut self,
        keys: &[&str],
        description: &str,
        kinds: &[ValueKind],
        handler: F,
    ) where
        F: FnMut(&Args) -> anyhow::Result<()> + 'a,
    {
        self.insert(
            keys,
            OptionSpec::new(
                description.to_string(),
                kinds.to_vec(),
                Action::handler(handler),
            ),
        );
    }

    /// Register a parameterless option.
    pub fn add_flag<F>(&mut self, keys: &[&str], description: &str, mut handler: F)
    where
        F: FnMut() -> anyhow::Result<()> + 'a,
    {
        self.add_options(keys, description, &[], move |_| handler());
    }

    fn insert(&mut self, keys: &[&str], spec: OptionSpec<'a>) {
        assert!(!keys.is_empty(), "option registered without any key");
        for (i, key) in keys.iter().enumerate() {
            assert!(
                !self.keys.contains_key(*key) && !keys[..i].contains(key),
                "option key '{}' registered twice",
                key
            );
        }

        let index = self.options.len();
        self.options.push(spec);
        for key in keys {
            self.keys.insert((*key).to_string(), index);
        }
    }

    /// All registered keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Option registered under `key`.
    pub fn option(&self, key: &str) -> Option<&OptionSpec<'a>> {
        self.keys.get(key).map(|&index| &self.options[index])
    }

    /// Scan `tokens`, firing the handler of every matched option.
    ///
    /// Returns the non-option tokens in their original order. A token that
    /// matches no key fails as an unknown option only when it is flag-like:
    /// `-` alone and negative numbers such as `-5` or `-.5` are kept as
    /// positional tokens.
    pub fn process(&mut self, tokens: &[String]) -> Result<Vec<String>, Stop> {
        let mut cursor = TokenCursor::new(tokens);
        let mut leftovers = Vec::new();

        while let Some(token) = cursor.next_token() {
            let Some(&index) = self.keys.get(token) else {
                if is_flag_like(token) {
                    let suggestion = closest_match(token, self.keys()).map(str::to_string);
                    return Err(Stop::Failed(OptionError::UnknownOption {
                        key: token.to_string(),
                        suggestion,
                    }));
                }
                leftovers.push(token.to_string());
                continue;
            };

            debug!(option = token, "matched option");
            match self.options[index].parse(&mut cursor) {
                Ok(Parsed::Applied) => {}
                Ok(Parsed::Help) => return Err(Stop::Help),
                Err(ParseFailure::Argument(source)) => {
                    return Err(Stop::Failed(OptionError::Argument {
                        key: token.to_string(),
                        source,
                    }));
                }
                Err(ParseFailure::Handler(error)) => {
                    return Err(Stop::Failed(OptionError::Handler {
                        key: token.to_string(),
                        error,
                    }));
                }
            }
        }

        Ok(leftovers)
    }

    /// [`process`](Self::process), reporting to stderr.
    ///
    /// `None` means the caller must stop: either the usage page was shown or
    /// an error was printed.
    pub fn process_args(&mut self, tokens: &[String]) -> Option<Vec<String>> {
        match self.process(tokens) {
            Ok(leftovers) => Some(leftovers),
            Err(Stop::Help) => {
                eprint!("{}", self.usage());
                None
            }
            Err(Stop::Failed(err)) => {
                eprintln!("{}", self.painter.error(&err.to_string()));
                if let OptionError::UnknownOption {
                    suggestion: Some(suggestion),
                    ..
                } = &err
                {
                    eprintln!(
                        "\nDid you mean: {}?",
                        self.painter.suggestion(suggestion)
                    );
                }
                None
            }
        }
    }

    /// Dry walk over `tokens` for shell completion.
    ///
    /// If the tokens end while an option still waits for parameters, the
    /// best-ranked hint among its missing parameters is returned; otherwise
    /// every key.
    /// Unknown tokens are skipped and no handler runs.
    pub fn complete(&self, tokens: &[String]) -> Completion {
        let mut cursor = TokenCursor::new(tokens);

        while let Some(token) = cursor.next_token() {
            let Some(spec) = self.option(token) else {
                continue;
            };
            if let Some(hint) = spec.suggest(&mut cursor) {
                return Completion::Hint(hint);
            }
        }

        Completion::Literal(self.keys().map(str::to_string).collect())
    }

    /// Render the usage page.
    pub fn usage(&self) -> String {
        let mut rows: Vec<(String, String, &str)> = self
            .options
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let mut names: Vec<&str> = self
                    .keys
                    .iter()
                    .filter(|&(_, &i)| i == index)
                    .map(|(key, _)| key.as_str())
                    .collect();
                names.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

                let names = names
                    .iter()
                    .fold(String::from("   "), |acc, &name| acc + " " + name);
                let params: String = spec
                    .kinds()
                    .iter()
                    .map(|kind| format!(" <{}>", kind.name()))
                    .collect();

                (names, params, spec.description())
            })
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        let name_width = rows.iter().map(|row| row.0.len()).max().unwrap_or(0);
        let param_width = rows.iter().map(|row| row.1.len()).max().unwrap_or(0);

        let mut page = format!("{}\n\nOptions:\n", self.header);
        for (names, params, description) in rows {
            page.push_str(&format!(
                "{:<name_width$} {:<param_width$} {}\n",
                names,
                params,
                description,
                name_width = name_width,
                param_width = param_width
            ));
        }
        page
    }
}

/// A token that looks like an option key rather than a value.
///
/// Negative numbers (`-5`, `-.5`) stay positional.
fn is_flag_like(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some('-'), Some(second)) => !(second.is_ascii_digit() || second == '.'),
        _ => false,
    }
}
