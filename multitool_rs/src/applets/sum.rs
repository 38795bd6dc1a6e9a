use std::cell::Cell;

use crate::cli::{Applet, Invocation, ValueKind};
use crate::types::{EXIT_FAILURE, EXIT_SUCCESS};

/// Adds numbers given as options or positional arguments.
pub struct Sum;

impl Sum {
    /// Total of the positional operands; the error is the first word that is
    /// not a number.
    fn operand_total(words: &[String]) -> Result<f64, &str> {
        words.iter().try_fold(0.0, |total, word| {
            word.parse::<f64>()
                .map(|value| total + value)
                .map_err(|_| word.as_str())
        })
    }

    /// Sum of every integer in `from..=to`, in closed form.
    fn range_total(from: i32, to: i32) -> f64 {
        let (from, to) = (i128::from(from), i128::from(to));
        ((from + to) * (to - from + 1) / 2) as f64
    }
}

impl Applet for Sum {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn description(&self) -> &'static str {
        "Add numbers together"
    }

    fn run(&self, invocation: &mut Invocation<'_>) -> i32 {
        let total = Cell::new(0.0f64);
        let precision = Cell::new(None::<u32>);

        let mut parser = invocation.option_parser();
        parser.add_options(&["-i", "--int"], "Add an integer", &[ValueKind::Int], |args| {
            let value: i32 = args.get(0)?;
            total.set(total.get() + f64::from(value));
            Ok(())
        });
        parser.add_options(&["-f", "--float"], "Add a number", &[ValueKind::Float], |args| {
            let value: f64 = args.get(0)?;
            total.set(total.get() + value);
            Ok(())
        });
        parser.add_option(
            "--range",
            "Add every integer from the first to the second bound",
            &[ValueKind::Int, ValueKind::Int],
            |args| {
                let (from, to): (i32, i32) = (args.get(0)?, args.get(1)?);
                if from > to {
                    anyhow::bail!("empty range {}..{}", from, to);
                }
                total.set(total.get() + Self::range_total(from, to));
                Ok(())
            },
        );
        parser.add_options(
            &["-p", "--precision"],
            "Digits printed after the decimal point",
            &[ValueKind::Uint],
            |args| {
                precision.set(Some(args.get(0)?));
                Ok(())
            },
        );

        let Some(words) = invocation.process_command_line(&mut parser) else {
            return EXIT_FAILURE;
        };
        drop(parser);

        let operands = match Self::operand_total(&words) {
            Ok(operands) => operands,
            Err(bad) => {
                let message = format!("Not a number: '{}'", bad);
                eprintln!("{}", invocation.registry().painter().error(&message));
                return EXIT_FAILURE;
            }
        };

        let total = total.get() + operands;
        match precision.get() {
            Some(digits) => println!("{:.*}", digits as usize, total),
            None => println!("{}", total),
        }
        EXIT_SUCCESS
    }
}
