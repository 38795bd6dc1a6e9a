//! A single registered option: schema, description and bound action.

use anyhow::anyhow;

use super::value::{ArgError, FromValue, Hint, TokenCursor, Value, ValueKind};

/// Callback bound to an option, invoked with the decoded parameters.
pub type Handler<'a> = Box<dyn FnMut(&Args) -> anyhow::Result<()> + 'a>;

/// Decoded parameters handed to a [`Handler`], in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Typed access to parameter `index`.
    ///
    /// ```
    /// use multitool::cli::{Args, Value};
    ///
    /// let args = Args::new(vec![Value::Int(5)]);
    /// let count: i32 = args.get(0).unwrap();
    /// assert_eq!(count, 5);
    /// assert!(args.get::<String>(0).is_err());
    /// ```
    pub fn get<T: FromValue>(&self, index: usize) -> anyhow::Result<T> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| anyhow!("no parameter at position {}", index))?;
        T::from_value(value).ok_or_else(|| {
            anyhow!(
                "parameter {} is a <{}>, requested as {}",
                index,
                value.kind(),
                std::any::type_name::<T>()
            )
        })
    }
}

pub(crate) enum Action<'a> {
    /// Built-in `-h`/`--help`.
    Help,
    Handler(Handler<'a>),
}

impl<'a> Action<'a> {
    pub(crate) fn handler<F>(handler: F) -> Self
    where
        F: FnMut(&Args) -> anyhow::Result<()> + 'a,
    {
        Action::Handler(Box::new(handler))
    }
}

/// Outcome of a successful [`OptionSpec::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Parsed {
    Applied,
    Help,
}

#[derive(Debug)]
pub(crate) enum ParseFailure {
    Argument(ArgError),
    Handler(anyhow::Error),
}

/// A command line option, shared by all of its keys.
pub struct OptionSpec<'a> {
    description: String,
    kinds: Vec<ValueKind>,
    action: Action<'a>,
}

impl<'a> OptionSpec<'a> {
    pub(crate) fn new(description: String, kinds: Vec<ValueKind>, action: Action<'a>) -> Self {
        Self {
            description,
            kinds,
            action,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kinds(&self) -> &[ValueKind] {
        &self.kinds
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.kinds.iter().map(|kind| kind.name()).collect()
    }

    /// Decode every declared parameter from the cursor.
    pub fn decode(&self, cursor: &mut TokenCursor<'_>) -> Result<Args, ArgError> {
        let values = self
            .kinds
            .iter()
            .map(|kind| kind.parse(cursor))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Args::new(values))
    }

    /// Decode the parameters and fire the bound action.
    pub(crate) fn parse(&mut self, cursor: &mut TokenCursor<'_>) -> Result<Parsed, ParseFailure> {
        let args = self.decode(cursor).map_err(ParseFailure::Argument)?;
        match &mut self.action {
            Action::Help => Ok(Parsed::Help),
            Action::Handler(handler) => {
                handler(&args).map_err(ParseFailure::Handler)?;
                Ok(Parsed::Applied)
            }
        }
    }

    /// Dry counterpart of [`parse`](Self::parse).
    ///
    /// Takes one token per parameter without converting it, so it walks the
    /// same tokens as a successful `decode`. A failing `decode` stops at the
    /// bad token instead, and `suggest` may walk further. Once the tokens run
    /// out, every remaining parameter is missing at once and the
    /// highest-ranked of their hints is returned.
    pub fn suggest(&self, cursor: &mut TokenCursor<'_>) -> Option<Hint> {
        let filled = self
            .kinds
            .iter()
            .take_while(|_| cursor.next_token().is_some())
            .count();
        Hint::best(self.kinds[filled..].iter().map(|kind| kind.suggest()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn spec(kinds: &[ValueKind]) -> OptionSpec<'static> {
        OptionSpec::new(
            "test".into(),
            kinds.to_vec(),
            Action::handler(|_| Ok(())),
        )
    }

    #[test]
    fn test_parse_and_suggest_walk_the_same_tokens() {
        let schemas: &[&[ValueKind]] = &[
            &[],
            &[ValueKind::Int],
            &[ValueKind::Text, ValueKind::File],
            &[ValueKind::Uint, ValueKind::Float, ValueKind::Directory],
        ];
        let inputs = [
            tokens(&[]),
            tokens(&["1"]),
            tokens(&["1", "2"]),
            tokens(&["1", "2", "3", "4"]),
        ];

        for kinds in schemas {
            for input in &inputs {
                let mut real = spec(kinds);
                let mut parse_cursor = TokenCursor::new(input);
                let _ = real.parse(&mut parse_cursor);

                let mut suggest_cursor = TokenCursor::new(input);
                let hint = real.suggest(&mut suggest_cursor);

                assert_eq!(
                    parse_cursor.position(),
                    suggest_cursor.position(),
                    "schema {:?} input {:?}",
                    kinds,
                    input
                );
                assert_eq!(hint.is_some(), input.len() < kinds.len());
            }
        }
    }

    #[test]
    fn test_failed_decode_stops_before_suggest() {
        let mut real = spec(&[ValueKind::Int, ValueKind::Int]);
        let input = tokens(&["x", "y"]);

        let mut parse_cursor = TokenCursor::new(&input);
        assert!(matches!(
            real.parse(&mut parse_cursor),
            Err(ParseFailure::Argument(ArgError::Invalid { .. }))
        ));
        assert_eq!(parse_cursor.position(), 1);

        let mut suggest_cursor = TokenCursor::new(&input);
        assert_eq!(real.suggest(&mut suggest_cursor), None);
        assert_eq!(suggest_cursor.position(), 2);
    }

    #[test]
    fn test_suggest_reports_missing_parameter() {
        let spec = spec(&[ValueKind::Text, ValueKind::Directory]);
        let input = tokens(&["name"]);
        let hint = spec.suggest(&mut TokenCursor::new(&input)).unwrap();
        assert_eq!(hint.kind, ValueKind::Directory);
        assert_eq!(hint.priority, 2);
    }

    #[test]
    fn test_suggest_ranks_simultaneously_missing_parameters() {
        let none = tokens(&[]);
        let ranked = |kinds: &[ValueKind]| {
            spec(kinds)
                .suggest(&mut TokenCursor::new(&none))
                .map(|hint| hint.kind)
        };

        assert_eq!(
            ranked(&[ValueKind::Int, ValueKind::File]),
            Some(ValueKind::File)
        );
        assert_eq!(
            ranked(&[ValueKind::File, ValueKind::Directory, ValueKind::Text]),
            Some(ValueKind::Directory)
        );
        assert_eq!(
            ranked(&[ValueKind::Uint, ValueKind::Text]),
            Some(ValueKind::Uint)
        );
    }

    #[test]
    fn test_parse_fires_handler_with_values() {
        let seen = Cell::new(0);
        let mut spec = OptionSpec::new(
            "count".into(),
            vec![ValueKind::Int],
            Action::handler(|args| {
                seen.set(args.get::<i32>(0)?);
                Ok(())
            }),
        );
        let input = tokens(&["42"]);
        let parsed = spec.parse(&mut TokenCursor::new(&input)).unwrap();
        assert_eq!(parsed, Parsed::Applied);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn test_parse_does_not_fire_on_bad_argument() {
        let fired = Cell::new(false);
        let mut spec = OptionSpec::new(
            "count".into(),
            vec![ValueKind::Int],
            Action::handler(|_| {
                fired.set(true);
                Ok(())
            }),
        );
        let input = tokens(&["x"]);
        let result = spec.parse(&mut TokenCursor::new(&input));
        assert!(matches!(result, Err(ParseFailure::Argument(_))));
        assert!(!fired.get());
    }

    #[test]
    fn test_type_names() {
        let spec = spec(&[ValueKind::Uint, ValueKind::File]);
        assert_eq!(spec.type_names(), ["uint", "file"]);
    }

    #[test]
    fn test_args_get_type_mismatch() {
        let args = Args::new(vec![Value::Text("a".into())]);
        assert_eq!(args.get::<String>(0).unwrap(), "a");
        assert!(args.get::<i32>(0).is_err());
        assert!(args.get::<String>(1).is_err());
    }
}
