//! Argument binding.
//!
//! Binds tokens to the declared argument names of the main window, then of
//! each matched subcommand's window, converting each token to its declared
//! type.

use std::collections::BTreeMap;

use chatcmd_foundation::{ActorId, ArgumentValue, CommandError, ErrorKind, Result};

use crate::convert::ArgumentConverter;
use crate::directory::ActorResolver;
use crate::grammar::{ArgumentSpec, CommandSpec};
use crate::subcommand::SubcommandMatch;

/// Bound arguments of one invocation.
///
/// Main-window values are keyed by argument name; each matched subcommand
/// with at least one bound value gets its own map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    main: BTreeMap<String, ArgumentValue>,
    subcommands: BTreeMap<String, BTreeMap<String, ArgumentValue>>,
}

impl Arguments {
    /// Returns a main-window value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.main.get(name)
    }

    /// Returns the values bound in a subcommand's window.
    #[must_use]
    pub fn subcommand(&self, name: &str) -> Option<&BTreeMap<String, ArgumentValue>> {
        self.subcommands.get(name)
    }

    /// Returns a value from a subcommand's window.
    #[must_use]
    pub fn get_in(&self, subcommand: &str, name: &str) -> Option<&ArgumentValue> {
        self.subcommands.get(subcommand).and_then(|args| args.get(name))
    }

    /// Returns a main-window string value.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgumentValue::as_str)
    }

    /// Returns a main-window numeric value.
    #[must_use]
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ArgumentValue::as_number)
    }

    /// Returns a main-window boolean value.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ArgumentValue::as_bool)
    }

    /// Returns a main-window single-actor value.
    #[must_use]
    pub fn get_actor(&self, name: &str) -> Option<ActorId> {
        self.get(name).and_then(ArgumentValue::as_actor)
    }

    /// All main-window values.
    #[must_use]
    pub const fn main(&self) -> &BTreeMap<String, ArgumentValue> {
        &self.main
    }

    /// All subcommand windows with bound values.
    #[must_use]
    pub const fn subcommands(&self) -> &BTreeMap<String, BTreeMap<String, ArgumentValue>> {
        &self.subcommands
    }

    /// Returns true if nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.subcommands.is_empty()
    }
}

/// Output of [`ArgumentBinder::bind`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Binding {
    /// The bound arguments.
    pub arguments: Arguments,
    /// Main-window arguments bound from input tokens (not defaults), in
    /// declaration order. These are the ones validators see.
    pub from_input: Vec<String>,
}

/// Binds tokens to a command's argument windows.
pub struct ArgumentBinder<'a> {
    spec: &'a CommandSpec,
    converter: &'a ArgumentConverter,
    resolver: &'a dyn ActorResolver,
    actor: ActorId,
}

impl<'a> ArgumentBinder<'a> {
    /// Creates a binder for one invocation of `spec` by `actor`.
    #[must_use]
    pub fn new(
        spec: &'a CommandSpec,
        converter: &'a ArgumentConverter,
        resolver: &'a dyn ActorResolver,
        actor: ActorId,
    ) -> Self {
        Self {
            spec,
            converter,
            resolver,
            actor,
        }
    }

    /// Binds the main window, then every matched subcommand window in chain
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if a required argument has no
    /// token or a token fails to convert. Nothing is returned on failure.
    pub fn bind(&self, tokens: &[String], matched: &SubcommandMatch) -> Result<Binding> {
        let mut binding = Binding::default();
        if self.spec.allowed_arguments.is_none() {
            return Ok(binding);
        }

        self.bind_main(tokens, matched, &mut binding)?;
        self.bind_subcommands(tokens, matched, &mut binding.arguments)?;

        Ok(binding)
    }

    /// Binds the main window.
    ///
    /// The cursor advances once per declared argument. When it sits on a
    /// position consumed by a subcommand name, that argument is skipped
    /// rather than bound.
    fn bind_main(
        &self,
        tokens: &[String],
        matched: &SubcommandMatch,
        binding: &mut Binding,
    ) -> Result<()> {
        let mut cursor = 0;

        for name in self.spec.main_window() {
            let Some(arg) = self.spec.arguments.get(name) else {
                continue;
            };

            if cursor >= tokens.len() {
                if let Some(value) = missing(arg, name, None)? {
                    binding.arguments.main.insert(name.clone(), value);
                }
                continue;
            }

            if matched.positions.contains(&cursor) {
                cursor += 1;
                continue;
            }

            let value = self.convert(&tokens[cursor], arg, name, None)?;
            binding.arguments.main.insert(name.clone(), value);
            binding.from_input.push(name.clone());
            cursor += 1;
        }

        Ok(())
    }

    /// Binds each matched subcommand's window: the tokens after its name up
    /// to the next matched subcommand or the end of input.
    fn bind_subcommands(
        &self,
        tokens: &[String],
        matched: &SubcommandMatch,
        arguments: &mut Arguments,
    ) -> Result<()> {
        for (i, (sub, position)) in matched.iter().enumerate() {
            let window = self.spec.window(sub);
            if window.is_empty() {
                continue;
            }

            let end = matched.positions.get(i + 1).copied().unwrap_or(tokens.len());
            let mut cursor = position + 1;
            let mut bound = BTreeMap::new();

            for name in window {
                let Some(arg) = self.spec.arguments.get(name) else {
                    continue;
                };

                if cursor >= end {
                    if let Some(value) = missing(arg, name, Some(sub))? {
                        bound.insert(name.clone(), value);
                    }
                    continue;
                }

                let value = self.convert(&tokens[cursor], arg, name, Some(sub))?;
                bound.insert(name.clone(), value);
                cursor += 1;
            }

            if !bound.is_empty() {
                arguments.subcommands.insert(sub.to_string(), bound);
            }
        }

        Ok(())
    }

    fn convert(
        &self,
        token: &str,
        arg: &ArgumentSpec,
        name: &str,
        subcommand: Option<&str>,
    ) -> Result<ArgumentValue> {
        self.converter
            .convert(self.actor, token, arg.kind, self.resolver)
            .map_err(|failure| {
                CommandError::new(ErrorKind::InvalidValue {
                    argument: name.to_string(),
                    subcommand: subcommand.map(str::to_string),
                    expected: arg.kind,
                    received: token.to_string(),
                    reason: failure.to_string(),
                })
                .with_cause(failure)
            })
    }
}

/// Required/default policy for an argument with no token.
fn missing(arg: &ArgumentSpec, name: &str, subcommand: Option<&str>) -> Result<Option<ArgumentValue>> {
    if arg.required {
        return Err(CommandError::missing_argument(name, subcommand));
    }
    Ok(arg.default.clone())
}
