//! Shell completion helper applet.
//!
//! A completion hook calls
//!
//! ```text
//! <binary> _autocomplete <cword> <binary> [words...]
//! ```
//!
//! where `cword` is the 1-based index of the word being completed (bash's
//! `COMP_CWORD`) and `words` are the words typed after the binary name, up
//! to but excluding the one being completed. Candidates are printed to
//! stdout one per line. Malformed input, unknown applets and panics all end
//! in a silent failure status so a shell session never sees noise.

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

use super::applet::{Applet, Invocation};
use super::registry::AppletRegistry;
use crate::types::{EXIT_FAILURE, EXIT_SUCCESS};

/// Name of the hidden completion applet.
pub const AUTOCOMPLETE_APPLET: &str = "_autocomplete";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("missing word index")]
    MissingIndex,

    #[error("invalid word index '{0}'")]
    InvalidIndex(String),

    #[error("missing binary name")]
    MissingBinary,

    #[error("expected {expected} words before the cursor, got {got}")]
    TooFewWords { expected: usize, got: usize },

    #[error("unknown applet '{0}'")]
    UnknownApplet(String),

    #[error("applet panicked while completing")]
    Panicked,
}

/// Decoded completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// 1-based index of the word being completed.
    pub word_index: usize,
    pub binary: String,
    /// The `word_index - 1` words before the cursor.
    pub words: Vec<String>,
}

impl Request {
    pub fn parse(args: &[String]) -> Result<Self, CompletionError> {
        let raw_index = args.first().ok_or(CompletionError::MissingIndex)?;
        let word_index = match raw_index.parse::<usize>() {
            Ok(index) if index > 0 => index,
            _ => return Err(CompletionError::InvalidIndex(raw_index.clone())),
        };
        let binary = args.get(1).ok_or(CompletionError::MissingBinary)?;

        let typed = &args[2..];
        let expected = word_index - 1;
        if typed.len() < expected {
            return Err(CompletionError::TooFewWords {
                expected,
                got: typed.len(),
            });
        }

        Ok(Self {
            word_index,
            binary: binary.clone(),
            words: typed[..expected].to_vec(),
        })
    }
}

/// Candidates for a raw `_autocomplete` argument list.
pub fn complete(registry: &AppletRegistry, args: &[String]) -> Result<Vec<String>, CompletionError> {
    let request = Request::parse(args)?;

    let Some((name, rest)) = request.words.split_first() else {
        return Ok(registry.visible_names().map(str::to_string).collect());
    };

    let applet = registry
        .get(name)
        .ok_or_else(|| CompletionError::UnknownApplet(name.clone()))?;
    silently(|| applet.autocomplete(registry, rest))
}

/// Serializes swaps of the process-wide panic hook.
static HOOK_SWAP: Mutex<()> = Mutex::new(());

/// Run `f`, turning a panic into [`CompletionError::Panicked`] without
/// printing the panic message.
///
/// The hook swap is held under [`HOOK_SWAP`] so concurrent callers always
/// restore the hook they found. `f` must not call `silently` again.
fn silently<T>(f: impl FnOnce() -> T) -> Result<T, CompletionError> {
    let _swap = HOOK_SWAP.lock().unwrap_or_else(PoisonError::into_inner);
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous);
    result.map_err(|_| CompletionError::Panicked)
}

/// The hidden `_autocomplete` applet.
pub struct Autocompleter;

impl Applet for Autocompleter {
    fn name(&self) -> &'static str {
        AUTOCOMPLETE_APPLET
    }

    fn description(&self) -> &'static str {
        "Autocomplete helper"
    }

    fn visible_by_default(&self) -> bool {
        false
    }

    fn run(&self, invocation: &mut Invocation<'_>) -> i32 {
        let candidates = match complete(invocation.registry(), invocation.args()) {
            Ok(candidates) => candidates,
            Err(err) => {
                debug!(%err, "completion request rejected");
                return EXIT_FAILURE;
            }
        };

        let mut out = std::io::stdout().lock();
        for candidate in &candidates {
            if writeln!(out, "{}", candidate).is_err() {
                return EXIT_FAILURE;
            }
        }
        EXIT_SUCCESS
    }

    fn autocomplete(&self, _registry: &AppletRegistry, _words: &[String]) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ValueKind;
    use crate::types::ColorMode;
    use std::cell::Cell;
    use std::rc::Rc;

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    /// Counts real handler invocations.
    struct Touch {
        fired: Rc<Cell<usize>>,
    }

    impl Applet for Touch {
        fn name(&self) -> &'static str {
            "touch"
        }

        fn description(&self) -> &'static str {
            "Touch a file"
        }

        fn run(&self, invocation: &mut Invocation<'_>) -> i32 {
            let mut parser = invocation.option_parser();
            parser.add_options(&["-f", "--file"], "Target", &[ValueKind::File], |_| {
                self.fired.set(self.fired.get() + 1);
                Ok(())
            });
            parser.add_option("--mode", "Mode", &[ValueKind::Uint], |_| Ok(()));

            match invocation.process_command_line(&mut parser) {
                Some(_) => EXIT_SUCCESS,
                None => EXIT_FAILURE,
            }
        }
    }

    struct Explodes;

    impl Applet for Explodes {
        fn name(&self) -> &'static str {
            "explodes"
        }

        fn description(&self) -> &'static str {
            "Panics while declaring options"
        }

        fn run(&self, _invocation: &mut Invocation<'_>) -> i32 {
            panic!("boom");
        }
    }

    fn registry(fired: Rc<Cell<usize>>) -> AppletRegistry {
        AppletRegistry::builder("tool")
            .color(ColorMode::Never)
            .register(Touch { fired })
            .register(Explodes)
            .build()
    }

    #[test]
    fn test_request_parse() {
        let request = Request::parse(&words(&["3", "tool", "touch", "-f", "ignored"])).unwrap();
        assert_eq!(request.word_index, 3);
        assert_eq!(request.binary, "tool");
        assert_eq!(request.words, ["touch", "-f"]);
    }

    #[test]
    fn test_request_rejects_malformed_input() {
        assert_eq!(Request::parse(&[]), Err(CompletionError::MissingIndex));
        assert_eq!(
            Request::parse(&words(&["x", "tool"])),
            Err(CompletionError::InvalidIndex("x".into()))
        );
        assert_eq!(
            Request::parse(&words(&["0", "tool"])),
            Err(CompletionError::InvalidIndex("0".into()))
        );
        assert_eq!(
            Request::parse(&words(&["1"])),
            Err(CompletionError::MissingBinary)
        );
        assert_eq!(
            Request::parse(&words(&["3", "tool", "touch"])),
            Err(CompletionError::TooFewWords {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_first_word_lists_visible_applets() {
        let registry = registry(Rc::default());
        let candidates = complete(&registry, &words(&["1", "tool"])).unwrap();
        assert_eq!(candidates, ["explodes", "touch"]);
    }

    #[test]
    fn test_unknown_applet_fails() {
        let registry = registry(Rc::default());
        assert_eq!(
            complete(&registry, &words(&["2", "tool", "nope"])),
            Err(CompletionError::UnknownApplet("nope".into()))
        );
    }

    #[test]
    fn test_option_keys_offered_without_side_effects() {
        let fired = Rc::new(Cell::new(0));
        let registry = registry(fired.clone());

        let candidates = complete(&registry, &words(&["2", "tool", "touch"])).unwrap();
        assert_eq!(candidates, ["--file", "--help", "--mode", "-f", "-h"]);

        let after_value =
            complete(&registry, &words(&["4", "tool", "touch", "-f", "a.txt"])).unwrap();
        assert_eq!(after_value, candidates);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_pending_value_yields_hint() {
        let registry = registry(Rc::default());
        let file = complete(&registry, &words(&["3", "tool", "touch", "--file"])).unwrap();
        assert_eq!(file, ["<file>"]);

        let mode = complete(&registry, &words(&["3", "tool", "touch", "--mode"])).unwrap();
        assert!(mode.is_empty());
    }

    #[test]
    fn test_panicking_applet_fails_silently() {
        let registry = registry(Rc::default());
        assert_eq!(
            complete(&registry, &words(&["2", "tool", "explodes"])),
            Err(CompletionError::Panicked)
        );
    }

    const WORKER_PANIC: &str = "worker panic";
    const LATE_PANIC: &str = "late panic";

    fn worker_panic() -> usize {
        panic!("worker panic")
    }

    fn late_panic() -> usize {
        panic!("late panic")
    }

    #[test]
    fn test_concurrent_completions_restore_panic_hook() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let reported = Arc::new(AtomicUsize::new(0));
        let original = {
            let _swap = HOOK_SWAP.lock().unwrap_or_else(PoisonError::into_inner);
            let original = panic::take_hook();
            let counter = Arc::clone(&reported);
            panic::set_hook(Box::new(move |info| {
                let message = info.payload().downcast_ref::<&str>().copied();
                if matches!(message, Some(WORKER_PANIC) | Some(LATE_PANIC)) {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }));
            original
        };

        let workers: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    for _ in 0..16 {
                        assert_eq!(silently(worker_panic), Err(CompletionError::Panicked));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(reported.load(Ordering::SeqCst), 0);

        let _swap = HOOK_SWAP.lock().unwrap_or_else(PoisonError::into_inner);
        let outcome = panic::catch_unwind(late_panic);
        drop(panic::take_hook());
        panic::set_hook(original);

        assert!(outcome.is_err());
        assert_eq!(reported.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_helper_never_listed_by_default() {
        let registry = registry(Rc::default());
        assert!(registry.get(AUTOCOMPLETE_APPLET).is_some());
        assert!(!registry.visible_names().any(|name| name == AUTOCOMPLETE_APPLET));
    }

    #[test]
    fn test_run_reports_status() {
        let registry = registry(Rc::default());
        assert_eq!(
            registry.dispatch(&words(&[AUTOCOMPLETE_APPLET, "1", "tool"])),
            EXIT_SUCCESS
        );
        assert_eq!(
            registry.dispatch(&words(&[AUTOCOMPLETE_APPLET, "bogus"])),
            EXIT_FAILURE
        );
        assert_eq!(
            registry.dispatch(&words(&[AUTOCOMPLETE_APPLET, "2", "tool", "nope"])),
            EXIT_FAILURE
        );
    }
}
