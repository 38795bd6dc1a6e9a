use std::cell::{Cell, RefCell};
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::cli::{Applet, Invocation, ValueKind};
use crate::types::{EXIT_FAILURE, EXIT_SUCCESS};

/// Writes its positional arguments to a file.
pub struct WriteFile;

impl WriteFile {
    fn write_line(path: &Path, line: &str, append: bool) -> anyhow::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        writeln!(file, "{}", line).with_context(|| format!("cannot write {}", path.display()))
    }
}

impl Applet for WriteFile {
    fn name(&self) -> &'static str {
        "write"
    }

    fn description(&self) -> &'static str {
        "Write the given words to a file"
    }

    fn run(&self, invocation: &mut Invocation<'_>) -> i32 {
        let output = RefCell::new(None::<PathBuf>);
        let append = Cell::new(false);

        let mut parser = invocation.option_parser();
        parser.add_options(
            &["-o", "--output"],
            "File to write",
            &[ValueKind::File],
            |args| {
                *output.borrow_mut() = Some(args.get(0)?);
                Ok(())
            },
        );
        parser.add_option(
            "--mkdir",
            "Create a directory (and its parents) right away",
            &[ValueKind::Directory],
            |args| {
                let dir: PathBuf = args.get(0)?;
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("cannot create {}", dir.display()))?;
                debug!(dir = %dir.display(), "created directory");
                Ok(())
            },
        );
        parser.add_flag(&["-a", "--append"], "Append instead of truncating", || {
            append.set(true);
            Ok(())
        });

        let Some(words) = invocation.process_command_line(&mut parser) else {
            return EXIT_FAILURE;
        };
        drop(parser);

        let painter = invocation.registry().painter();
        let Some(path) = output.into_inner() else {
            eprintln!("{}", painter.error("No output file given (use -o <file>)"));
            return EXIT_FAILURE;
        };

        match Self::write_line(&path, &words.join(" "), append.get()) {
            Ok(()) => EXIT_SUCCESS,
            Err(err) => {
                eprintln!("{}", painter.error(&format!("{:#}", err)));
                EXIT_FAILURE
            }
        }
    }
}
