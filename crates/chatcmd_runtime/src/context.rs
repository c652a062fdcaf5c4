//! Execution context handed to executors.

use chatcmd_foundation::ActorId;
use chatcmd_parser::Arguments;

/// Everything an executor needs about one invocation.
///
/// Built fresh for every successful dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionContext {
    /// The actor that issued the command.
    pub actor: ActorId,
    /// The command name.
    pub command: String,
    /// Matched subcommand names, root to leaf.
    pub subcommands: Vec<String>,
    /// Bound arguments: main window plus one map per subcommand window.
    pub arguments: Arguments,
    /// The raw input text.
    pub message: String,
}

impl ExecutionContext {
    /// Returns true if `name` is part of the matched subcommand chain.
    #[must_use]
    pub fn has_subcommand(&self, name: &str) -> bool {
        self.subcommands.iter().any(|s| s == name)
    }

    /// Returns the deepest matched subcommand.
    #[must_use]
    pub fn leaf_subcommand(&self) -> Option<&str> {
        self.subcommands.last().map(String::as_str)
    }
}
