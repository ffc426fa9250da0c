//! Parsed arguments of one invocation.

use clap::{Arg, ArgAction, ArgMatches};

use crate::command::UsageError;

/// Id of the catch-all positional argument every command definition carries.
const POSITIONAL: &str = "ARGS";

/// The catch-all positional argument.
///
/// Added to every definition that does not declare it. Commands whose values
/// may start with `-` declare it themselves with hyphen values allowed.
pub fn positionals() -> Arg {
    Arg::new(POSITIONAL).num_args(0..).action(ArgAction::Append)
}

/// Flags and positional arguments of one invocation, parsed once by the
/// runner before any requirement is built.
#[derive(Debug, Clone)]
pub struct Context {
    command: String,
    args: Vec<String>,
    matches: ArgMatches,
}

impl Context {
    /// Parse `raw` against a command's flag definition.
    ///
    /// Positional arguments are collected without arity checks; each command
    /// checks the count itself when declaring requirements.
    pub fn parse(definition: clap::Command, raw: &[String]) -> Result<Self, UsageError> {
        let mut definition = definition.no_binary_name(true).disable_help_flag(true);
        if definition.get_arguments().all(|a| a.get_id() != POSITIONAL) {
            definition = definition.arg(positionals());
        }
        let command = definition.get_name().to_string();

        let matches = definition
            .try_get_matches_from(raw)
            .map_err(|e| UsageError::invalid_flags(first_line(&e.to_string())))?;

        let args = matches
            .get_many::<String>(POSITIONAL)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        Ok(Self {
            command,
            args,
            matches,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Fail unless exactly `expected` positional arguments were given.
    pub fn expect_args(&self, expected: usize) -> Result<(), UsageError> {
        if self.args.len() == expected {
            Ok(())
        } else {
            Err(UsageError::WrongArgumentCount {
                expected,
                actual: self.args.len(),
            })
        }
    }

    /// Value of a string flag, when given.
    pub fn flag(&self, id: &str) -> Option<&str> {
        self.matches
            .try_get_one::<String>(id)
            .ok()
            .flatten()
            .map(String::as_str)
    }

    /// Value of a flag parsed to `T` by its value parser, when given.
    pub fn typed_flag<T>(&self, id: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.matches.try_get_one::<T>(id).ok().flatten().cloned()
    }

    pub fn is_present(&self, id: &str) -> bool {
        self.matches.try_contains_id(id).unwrap_or(false)
    }
}

fn first_line(message: &str) -> String {
    message
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> clap::Command {
        clap::Command::new("scale")
            .arg(Arg::new("i").short('i').value_parser(clap::value_parser!(u32)))
            .arg(Arg::new("m").short('m'))
    }

    fn raw(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn flags_and_positionals_are_separated() {
        let ctx = Context::parse(definition(), &raw(&["-i", "5", "-m", "512M", "my-app"])).unwrap();

        assert_eq!(ctx.command(), "scale");
        assert_eq!(ctx.args(), ["my-app"]);
        assert_eq!(ctx.typed_flag::<u32>("i"), Some(5));
        assert_eq!(ctx.flag("m"), Some("512M"));
        assert!(ctx.is_present("m"));
        assert!(ctx.expect_args(1).is_ok());
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = Context::parse(definition(), &raw(&["-z", "my-app"])).unwrap_err();
        assert!(matches!(err, UsageError::InvalidFlags(_)));
    }

    #[test]
    fn non_numeric_instances_is_a_usage_error() {
        assert!(Context::parse(definition(), &raw(&["-i", "lots", "my-app"])).is_err());
    }

    #[test]
    fn declared_positionals_may_take_hyphen_values() {
        let set_env = clap::Command::new("set-env")
            .arg(positionals().trailing_var_arg(true).allow_hyphen_values(true));

        let ctx = Context::parse(set_env, &raw(&["my-app", "JAVA_OPTS", "-Xmx512m"])).unwrap();
        assert_eq!(ctx.args(), ["my-app", "JAVA_OPTS", "-Xmx512m"]);

        let err =
            Context::parse(definition(), &raw(&["my-app", "JAVA_OPTS", "-Xmx512m"])).unwrap_err();
        assert!(matches!(err, UsageError::InvalidFlags(_)));
    }

    #[test]
    fn missing_flags_and_unknown_ids_read_as_absent() {
        let ctx = Context::parse(definition(), &raw(&["my-app"])).unwrap();

        assert_eq!(ctx.flag("m"), None);
        assert_eq!(ctx.flag("no-such-flag"), None);
        assert!(!ctx.is_present("i"));
        assert_eq!(
            ctx.expect_args(2),
            Err(UsageError::WrongArgumentCount { expected: 2, actual: 1 })
        );
    }
}
