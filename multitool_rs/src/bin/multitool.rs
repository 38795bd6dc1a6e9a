use std::any::Any;
use std::panic;
use std::path::Path;

use multitool::CliConfig;
use multitool::applets;
use multitool::types::LOG_ENV;
use tracing_subscriber::EnvFilter;

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Quietly exit when downstream closes the pipe (e.g. piping to `head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    install_broken_pipe_handler();
    init_tracing();

    let argv: Vec<String> = std::env::args().collect();
    let binary = argv
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or(env!("CARGO_PKG_NAME"))
        .to_string();

    let config = CliConfig::load();
    let registry = applets::registry(&binary, &config);
    let status = registry.dispatch(argv.get(1..).unwrap_or_default());

    std::process::exit(status);
}
