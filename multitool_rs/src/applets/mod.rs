//! Applets shipped with the `multitool` binary.
//!
//! [`registry`] is the single startup step that constructs every applet and
//! registers it; nothing registers itself.

mod echo;
mod sum;
mod write;

pub use echo::Echo;
pub use sum::Sum;
pub use write::WriteFile;

use crate::cli::AppletRegistry;
use crate::config::CliConfig;

/// Build the registry of built-in applets.
pub fn registry(binary: &str, config: &CliConfig) -> AppletRegistry {
    AppletRegistry::builder(binary)
        .config(config)
        .register(Echo)
        .register(Sum)
        .register(WriteFile)
        .build()
}
