use std::cell::{Cell, RefCell};

use crate::cli::{Applet, Invocation, ValueKind};
use crate::types::{EXIT_FAILURE, EXIT_SUCCESS};

/// Prints its positional arguments.
pub struct Echo;

impl Applet for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn description(&self) -> &'static str {
        "Print the given words"
    }

    fn run(&self, invocation: &mut Invocation<'_>) -> i32 {
        let separator = RefCell::new(String::from(" "));
        let repeat = Cell::new(1u32);
        let upper = Cell::new(false);
        let newline = Cell::new(true);

        let mut parser = invocation.option_parser();
        parser.add_options(
            &["-s", "--separator"],
            "Text placed between words",
            &[ValueKind::Text],
            |args| {
                *separator.borrow_mut() = args.get(0)?;
                Ok(())
            },
        );
        parser.add_option(
            "--repeat",
            "Print the line this many times",
            &[ValueKind::Uint],
            |args| {
                repeat.set(args.get(0)?);
                Ok(())
            },
        );
        parser.add_flag(&["-u", "--upper"], "Convert to upper case", || {
            upper.set(true);
            Ok(())
        });
        parser.add_flag(&["-n"], "Do not print the trailing newline", || {
            newline.set(false);
            Ok(())
        });

        let Some(words) = invocation.process_command_line(&mut parser) else {
            return EXIT_FAILURE;
        };
        drop(parser);

        let mut line = words.join(separator.borrow().as_str());
        if upper.get() {
            line = line.to_uppercase();
        }

        for _ in 0..repeat.get() {
            if newline.get() {
                println!("{}", line);
            } else {
                print!("{}", line);
            }
        }
        EXIT_SUCCESS
    }
}
