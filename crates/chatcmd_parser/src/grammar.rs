//! Command grammar model.
//!
//! A [`CommandGrammar`] is built once by the host (in code, or deserialized
//! by an external loader with the `serde` feature) and read on every
//! invocation.

use std::collections::BTreeMap;

use chatcmd_foundation::{ArgumentType, ArgumentValue};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Key of the top-level argument window in `allowed_arguments`.
pub const MAIN_WINDOW: &str = "main";

/// Errors detected while validating a grammar.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GrammarError {
    /// The prefix was empty.
    #[error("command prefix is required")]
    EmptyPrefix,
    /// No command was declared.
    #[error("at least one command must be defined")]
    NoCommands,
    /// A default value does not match its declared type.
    #[error("default for argument \"{argument}\" of command \"{command}\" is a {actual}, expected {expected}")]
    DefaultTypeMismatch {
        /// The command declaring the argument.
        command: String,
        /// The argument name.
        argument: String,
        /// The declared type.
        expected: ArgumentType,
        /// The type of the default value.
        actual: ArgumentType,
    },
}

/// Declaration of a single argument.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArgumentSpec {
    /// Human-readable description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    /// Declared type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ArgumentType,
    /// Whether the argument must be supplied.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required: bool,
    /// Value bound when the argument is absent and not required.
    #[cfg_attr(feature = "serde", serde(default))]
    pub default: Option<ArgumentValue>,
}

impl ArgumentSpec {
    /// Creates an optional argument of the given type.
    #[must_use]
    pub const fn new(kind: ArgumentType) -> Self {
        Self {
            description: None,
            kind,
            required: false,
            default: None,
        }
    }

    /// Creates a required argument of the given type.
    #[must_use]
    pub const fn required(kind: ArgumentType) -> Self {
        Self {
            description: None,
            kind,
            required: true,
            default: None,
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<ArgumentValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A child entry of a [`SubCommandSpec`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubCommandEntry {
    /// Nested alternatives below this subcommand.
    #[cfg_attr(feature = "serde", serde(default, rename = "subCommands"))]
    pub sub_commands: Option<SubCommandSpec>,
}

/// One level of the subcommand tree.
///
/// Children are mutually exclusive alternatives at this nesting level.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubCommandSpec {
    /// Whether one of the children must be given.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required: bool,
    /// Children keyed by (lower-case) name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub commands: BTreeMap<String, SubCommandEntry>,
}

impl SubCommandSpec {
    /// Creates an optional level with no children.
    #[must_use]
    pub fn optional() -> Self {
        Self::default()
    }

    /// Creates a level where a child is mandatory.
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            commands: BTreeMap::new(),
        }
    }

    /// Adds a leaf child.
    #[must_use]
    pub fn with_leaf(mut self, name: impl Into<String>) -> Self {
        self.commands.insert(name.into(), SubCommandEntry::default());
        self
    }

    /// Adds a child with its own nested level.
    #[must_use]
    pub fn with_nested(mut self, name: impl Into<String>, nested: SubCommandSpec) -> Self {
        self.commands.insert(
            name.into(),
            SubCommandEntry {
                sub_commands: Some(nested),
            },
        );
        self
    }

    /// Returns the child names in order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Returns the nested level of a child (an empty optional level when the
    /// child declares none), or `None` when `name` is not a child.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&SubCommandSpec> {
        self.commands
            .get(name)
            .map(|entry| entry.sub_commands.as_ref().unwrap_or(&EMPTY_LEVEL))
    }
}

/// Shared stand-in for an undeclared subcommand level.
static EMPTY_LEVEL: SubCommandSpec = SubCommandSpec {
    required: false,
    commands: BTreeMap::new(),
};

/// Declaration of one command.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommandSpec {
    /// Human-readable description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Argument declarations keyed by argument name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub arguments: BTreeMap<String, ArgumentSpec>,
    /// Argument windows: [`MAIN_WINDOW`] plus one per subcommand name.
    #[cfg_attr(feature = "serde", serde(default, rename = "allowedArguments"))]
    pub allowed_arguments: Option<BTreeMap<String, Vec<String>>>,
    /// Root of the subcommand tree.
    #[cfg_attr(feature = "serde", serde(default, rename = "subCommands"))]
    pub sub_commands: Option<SubCommandSpec>,
}

impl CommandSpec {
    /// Creates a command with the given description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Declares an argument.
    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, spec: ArgumentSpec) -> Self {
        self.arguments.insert(name.into(), spec);
        self
    }

    /// Declares an argument window (`"main"` or a subcommand name).
    #[must_use]
    pub fn with_window<I, S>(mut self, slot: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_arguments
            .get_or_insert_with(BTreeMap::new)
            .insert(slot.into(), names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the subcommand tree.
    #[must_use]
    pub fn with_sub_commands(mut self, sub_commands: SubCommandSpec) -> Self {
        self.sub_commands = Some(sub_commands);
        self
    }

    /// Returns the argument names of a window, empty when undeclared.
    #[must_use]
    pub fn window(&self, slot: &str) -> &[String] {
        self.allowed_arguments
            .as_ref()
            .and_then(|windows| windows.get(slot))
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the main window.
    #[must_use]
    pub fn main_window(&self) -> &[String] {
        self.window(MAIN_WINDOW)
    }

    /// Returns the root of the subcommand tree, or an empty optional level.
    #[must_use]
    pub fn sub_command_root(&self) -> &SubCommandSpec {
        self.sub_commands.as_ref().unwrap_or(&EMPTY_LEVEL)
    }
}

/// The full grammar: a prefix and the declared commands.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommandGrammar {
    /// Prefix every input must start with.
    pub prefix: String,
    /// Commands keyed by name.
    pub commands: BTreeMap<String, CommandSpec>,
}

impl CommandGrammar {
    /// Creates an empty grammar with the given prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            commands: BTreeMap::new(),
        }
    }

    /// Declares a command.
    #[must_use]
    pub fn with_command(mut self, name: impl Into<String>, spec: CommandSpec) -> Self {
        self.commands.insert(name.into(), spec);
        self
    }

    /// Looks up a command by exact name.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// Checks the grammar's structural rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is empty, no command is declared, or a
    /// default value has a different type than its argument.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if self.prefix.is_empty() {
            return Err(GrammarError::EmptyPrefix);
        }
        if self.commands.is_empty() {
            return Err(GrammarError::NoCommands);
        }
        for (command, spec) in &self.commands {
            for (argument, arg) in &spec.arguments {
                if let Some(default) = &arg.default {
                    let actual = default.argument_type();
                    if actual != arg.kind {
                        return Err(GrammarError::DefaultTypeMismatch {
                            command: command.clone(),
                            argument: argument.clone(),
                            expected: arg.kind,
                            actual,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
