//! Applet registry and top-level dispatch.
//!
//! The registry is built once at startup through [`RegistryBuilder`] and is
//! read-only afterwards. Applets are kept in an ordered map, so listings are
//! alphabetical and suggestion ties resolve to the smallest name.

use std::collections::BTreeMap;

use tracing::debug;

use super::applet::{Applet, Invocation};
use super::autocomplete::Autocompleter;
use crate::colors::Painter;
use crate::config::CliConfig;
use crate::similarity::closest_match;
use crate::types::{ColorMode, EXIT_FAILURE};

/// Process-wide table of applets, keyed by name.
pub struct AppletRegistry {
    binary: String,
    applets: BTreeMap<&'static str, Box<dyn Applet>>,
    show_all: bool,
    painter: Painter,
}

/// Explicit, ordered registration of every applet.
pub struct RegistryBuilder {
    binary: String,
    applets: Vec<Box<dyn Applet>>,
    show_all: bool,
    color: ColorMode,
}

impl RegistryBuilder {
    /// Take `show_all` and color settings from the loaded config.
    pub fn config(mut self, config: &CliConfig) -> Self {
        self.show_all = config.show_all;
        self.color = config.color;
        self
    }

    pub fn show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    pub fn color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn register(self, applet: impl Applet + 'static) -> Self {
        self.register_boxed(Box::new(applet))
    }

    pub fn register_boxed(mut self, applet: Box<dyn Applet>) -> Self {
        self.applets.push(applet);
        self
    }

    /// Finish registration; the `_autocomplete` helper is added here.
    ///
    /// # Panics
    ///
    /// If two applets share a name.
    pub fn build(self) -> AppletRegistry {
        let mut applets: BTreeMap<&'static str, Box<dyn Applet>> = BTreeMap::new();
        let builtin: Box<dyn Applet> = Box::new(Autocompleter);

        for applet in self.applets.into_iter().chain(std::iter::once(builtin)) {
            let name = applet.name();
            assert!(
                !applets.contains_key(name),
                "applet '{}' registered twice",
                name
            );
            applets.insert(name, applet);
        }

        debug!(count = applets.len(), "applet registry built");
        AppletRegistry {
            binary: self.binary,
            applets,
            show_all: self.show_all,
            painter: Painter::new(self.color),
        }
    }
}

impl AppletRegistry {
    pub fn builder(binary: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder {
            binary: binary.into(),
            applets: Vec::new(),
            show_all: false,
            color: ColorMode::default(),
        }
    }

    /// Binary name used in usage lines.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn painter(&self) -> Painter {
        self.painter
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn get(&self, name: &str) -> Option<&dyn Applet> {
        self.applets.get(name).map(|applet| applet.as_ref())
    }

    pub fn is_visible(&self, applet: &dyn Applet) -> bool {
        self.show_all || applet.visible_by_default()
    }

    /// Visible applets in name order.
    pub fn visible(&self) -> impl Iterator<Item = &dyn Applet> {
        self.applets
            .values()
            .map(|applet| applet.as_ref())
            .filter(|applet| self.is_visible(*applet))
    }

    pub fn visible_names(&self) -> impl Iterator<Item = &'static str> {
        self.visible().map(|applet| applet.name())
    }

    /// Closest visible applet name to `requested`.
    pub fn suggest(&self, requested: &str) -> Option<&'static str> {
        closest_match(requested, self.visible_names())
    }

    /// Column-aligned `name  -  description` lines of the visible applets.
    pub fn listing(&self) -> String {
        let width = self.visible_names().map(str::len).max().unwrap_or(0) + 6;

        self.visible()
            .map(|applet| {
                format!(
                    "{:>width$}  -  {}\n",
                    applet.name(),
                    applet.description(),
                    width = width
                )
            })
            .collect()
    }

    /// Page shown when no applet is named.
    pub fn usage_banner(&self) -> String {
        format!(
            "No operation requested.\n\nUsage: {} <operation> [options]\n\n{}\n\n{}\n\n",
            self.binary,
            self.painter.header("Available operations:"),
            self.listing()
        )
    }

    /// Run the applet named by `args[0]` with the remaining arguments.
    ///
    /// `args` excludes the binary name. Returns the applet's status, or
    /// `EXIT_FAILURE` after printing the listing or a suggestion.
    pub fn dispatch(&self, args: &[String]) -> i32 {
        let Some((requested, rest)) = args.split_first() else {
            eprint!("{}", self.usage_banner());
            return EXIT_FAILURE;
        };

        match self.get(requested) {
            Some(applet) => {
                debug!(applet = applet.name(), args = rest.len(), "dispatching");
                let mut invocation =
                    Invocation::new(self, applet.name(), applet.description(), rest);
                applet.run(&mut invocation)
            }
            None => {
                let message = format!("Unknown operation: '{}'", requested);
                eprintln!("{}", self.painter.error(&message));
                if let Some(suggestion) = self.suggest(requested) {
                    eprintln!("\nDid you mean: {}?", self.painter.suggestion(suggestion));
                }
                EXIT_FAILURE
            }
        }
    }
}
