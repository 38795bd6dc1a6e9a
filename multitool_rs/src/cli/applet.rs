//! The applet interface and the per-run invocation context.

use tracing::debug;

use super::parser::OptionParser;
use super::registry::AppletRegistry;
use super::value::Completion;

/// One named sub-command of the binary.
///
/// Applets are plain values owned by the [`AppletRegistry`]; anything that
/// changes during a run lives in locals of [`run`](Applet::run).
///
/// A typical `run` declares its options on [`Invocation::option_parser`],
/// then calls [`Invocation::process_command_line`] and returns early on
/// `None`. Keeping side effects after that call is what lets completion
/// reuse `run` in dry-run mode.
pub trait Applet {
    /// Unique name the applet is invoked by.
    fn name(&self) -> &'static str;

    /// One-line description for listings.
    fn description(&self) -> &'static str;

    /// Whether the applet shows up in listings and suggestions without
    /// the show-all override.
    fn visible_by_default(&self) -> bool {
        true
    }

    /// Entry point; returns the process status.
    fn run(&self, invocation: &mut Invocation<'_>) -> i32;

    /// Completion candidates for the word after `words`.
    ///
    /// The default runs the applet in dry-run mode and reports what its
    /// option parser expects next.
    fn autocomplete(&self, registry: &AppletRegistry, words: &[String]) -> Vec<String> {
        let mut invocation = Invocation::dry_run(registry, self.name(), self.description(), words);
        self.run(&mut invocation);
        invocation
            .into_completion()
            .map(Completion::into_lines)
            .unwrap_or_default()
    }
}

/// How an [`Invocation`] treats `process_command_line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Parse the arguments and fire handlers.
    Run,
    /// Record completion data; never fire handlers.
    DryRun { completion: Option<Completion> },
}

/// Arguments and context of one applet run.
pub struct Invocation<'r> {
    registry: &'r AppletRegistry,
    name: &'static str,
    description: &'static str,
    args: Vec<String>,
    mode: Mode,
}

impl<'r> Invocation<'r> {
    /// A real run over `args` (the tokens after the applet name).
    pub fn new(
        registry: &'r AppletRegistry,
        name: &'static str,
        description: &'static str,
        args: &[String],
    ) -> Self {
        Self {
            registry,
            name,
            description,
            args: args.to_vec(),
            mode: Mode::Run,
        }
    }

    /// A completion run over the words typed so far.
    pub fn dry_run(
        registry: &'r AppletRegistry,
        name: &'static str,
        description: &'static str,
        words: &[String],
    ) -> Self {
        Self {
            mode: Mode::DryRun { completion: None },
            ..Self::new(registry, name, description, words)
        }
    }

    pub fn registry(&self) -> &'r AppletRegistry {
        self.registry
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self.mode, Mode::DryRun { .. })
    }

    /// Parser with the applet's usage header:
    /// `"<description>\nUsage: <binary> <applet> [options]"`.
    pub fn option_parser<'a>(&self) -> OptionParser<'a> {
        OptionParser::new(format!(
            "{}\nUsage: {} {} [options]",
            self.description,
            self.registry.binary(),
            self.name
        ))
        .with_painter(self.registry.painter())
    }

    /// Apply the command line to `parser`.
    ///
    /// In a real run this is [`OptionParser::process_args`]. In dry-run mode
    /// nothing is consumed and no handler fires: the parser's completion for
    /// the typed words is recorded and `None` is returned.
    pub fn process_command_line(&mut self, parser: &mut OptionParser<'_>) -> Option<Vec<String>> {
        match &mut self.mode {
            Mode::Run => parser.process_args(&self.args),
            Mode::DryRun { completion } => {
                debug!(applet = self.name, "dry run, recording completion");
                *completion = Some(parser.complete(&self.args));
                None
            }
        }
    }

    /// Completion recorded by a dry run.
    pub fn into_completion(self) -> Option<Completion> {
        match self.mode {
            Mode::DryRun { completion } => completion,
            Mode::Run => None,
        }
    }
}
