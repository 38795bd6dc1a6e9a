use serde::Deserialize;

/// Status returned by applets and the dispatcher on success.
pub const EXIT_SUCCESS: i32 = 0;

/// Status returned on any failure, including an explicit `--help`.
pub const EXIT_FAILURE: i32 = -1;

/// Environment variable that makes hidden applets visible.
pub const SHOW_ALL_ENV: &str = "SHOW_ALL";

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "MULTITOOL_CONFIG";

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV: &str = "MULTITOOL_LOG";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}
