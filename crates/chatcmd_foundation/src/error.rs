//! Error types for chatcmd.
//!
//! Every failure surfaced to a host is a [`CommandError`] whose
//! [`ErrorKind`] carries the structured detail and maps onto exactly one
//! [`ErrorCategory`].

use std::fmt;

use thiserror::Error;

use crate::value::ArgumentType;

/// Boxed error returned by executors and attached as a cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for chatcmd operations.
pub type Result<T> = std::result::Result<T, CommandError>;

/// The four error categories a caller can branch on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Empty or blank input, missing prefix, command name, or actor.
    InvalidSyntax,
    /// Missing required argument, conversion failure, or validator rejection.
    InvalidArgument,
    /// Missing or unrecognized subcommand.
    InvalidSubcommand,
    /// Unknown command, missing executor, or a failure while executing.
    ExecutionError,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidSyntax => "INVALID_SYNTAX",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidSubcommand => "INVALID_SUBCOMMAND",
            Self::ExecutionError => "EXECUTION_ERROR",
        };
        f.write_str(name)
    }
}

/// The main error type for command parsing and dispatch.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct CommandError {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// The underlying error, when one was wrapped.
    #[source]
    pub cause: Option<BoxError>,
}

impl CommandError {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, cause: None }
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Creates a missing-argument error.
    #[must_use]
    pub fn missing_argument(argument: &str, subcommand: Option<&str>) -> Self {
        Self::new(ErrorKind::MissingArgument {
            argument: argument.to_string(),
            subcommand: subcommand.map(str::to_string),
        })
    }

    /// Creates a command-not-found error.
    #[must_use]
    pub fn command_not_found(command: &str) -> Self {
        Self::new(ErrorKind::CommandNotFound(command.to_string()))
    }

    /// Wraps an arbitrary executor failure.
    ///
    /// A boxed [`CommandError`] is unwrapped and returned unchanged so that
    /// executors can raise classified errors themselves.
    #[must_use]
    pub fn from_executor(err: BoxError) -> Self {
        match err.downcast::<CommandError>() {
            Ok(classified) => *classified,
            Err(other) => {
                let message = other.to_string();
                Self::new(ErrorKind::ExecutorFailed { message }).with_cause(other)
            }
        }
    }
}

impl From<ErrorKind> for CommandError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Categorized error kinds with structured detail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErrorKind {
    /// The input was empty or only whitespace.
    #[error("empty command")]
    EmptyInput,

    /// The input did not start with the configured prefix.
    #[error("input does not start with prefix \"{prefix}\"")]
    MissingPrefix {
        /// The configured prefix.
        prefix: String,
    },

    /// Nothing was left after the prefix to name a command.
    #[error("no command specified")]
    MissingCommand,

    /// The invoking actor was absent.
    #[error("an invoking actor is required")]
    MissingActor,

    /// A required argument had no token to bind.
    #[error("argument \"{argument}\"{} is required but not provided", in_subcommand(.subcommand))]
    MissingArgument {
        /// The argument name.
        argument: String,
        /// The subcommand owning the argument window, if any.
        subcommand: Option<String>,
    },

    /// A token could not be converted to the declared type.
    #[error(
        "invalid value \"{received}\" for argument \"{argument}\"{}: expected {expected} ({reason})",
        in_subcommand(.subcommand)
    )]
    InvalidValue {
        /// The argument name.
        argument: String,
        /// The subcommand owning the argument window, if any.
        subcommand: Option<String>,
        /// The declared type.
        expected: ArgumentType,
        /// The token that failed to convert.
        received: String,
        /// Why conversion failed.
        reason: String,
    },

    /// A registered validator rejected the bound value.
    #[error("argument \"{argument}\" failed validation")]
    ValidationFailed {
        /// The argument name.
        argument: String,
    },

    /// A required subcommand was not provided.
    #[error("subcommand is required but not provided (available: {})", .available.join(", "))]
    MissingSubcommand {
        /// The names that would have been accepted.
        available: Vec<String>,
    },

    /// A token in a subcommand position named no declared subcommand.
    #[error("invalid subcommand \"{name}\" (available: {})", .available.join(", "))]
    UnknownSubcommand {
        /// The offending token, lower-cased.
        name: String,
        /// The names that would have been accepted.
        available: Vec<String>,
    },

    /// A subcommand requiring a nested subcommand ended the input.
    #[error("nested subcommand is required after \"{parent}\"")]
    MissingNestedSubcommand {
        /// The subcommand that requires a child.
        parent: String,
    },

    /// The command is not declared in the grammar.
    #[error("command \"{0}\" not found")]
    CommandNotFound(String),

    /// The command is declared but has no executor.
    #[error("no executor registered for command \"{0}\"")]
    ExecutorNotRegistered(String),

    /// The matched subcommand chain grew past the configured depth.
    #[error("subcommand nesting exceeds the limit of {limit}")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// The executor returned an unclassified error.
    #[error("command execution failed: {message}")]
    ExecutorFailed {
        /// Rendered message of the underlying error.
        message: String,
    },

    /// The executor panicked.
    #[error("command executor panicked: {message}")]
    ExecutorPanicked {
        /// The panic payload, when it was a string.
        message: String,
    },

    /// A validator panicked while checking an argument.
    #[error("validator for argument \"{argument}\" panicked: {message}")]
    ValidatorPanicked {
        /// The argument being validated.
        argument: String,
        /// The panic payload, when it was a string.
        message: String,
    },
}

impl ErrorKind {
    /// Maps this kind onto its category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyInput | Self::MissingPrefix { .. } | Self::MissingCommand | Self::MissingActor => {
                ErrorCategory::InvalidSyntax
            }
            Self::MissingArgument { .. }
            | Self::InvalidValue { .. }
            | Self::ValidationFailed { .. } => ErrorCategory::InvalidArgument,
            Self::MissingSubcommand { .. }
            | Self::UnknownSubcommand { .. }
            | Self::MissingNestedSubcommand { .. } => ErrorCategory::InvalidSubcommand,
            Self::CommandNotFound(_)
            | Self::ExecutorNotRegistered(_)
            | Self::DepthExceeded { .. }
            | Self::ExecutorFailed { .. }
            | Self::ExecutorPanicked { .. }
            | Self::ValidatorPanicked { .. } => ErrorCategory::ExecutionError,
        }
    }
}

fn in_subcommand(subcommand: &Option<String>) -> String {
    subcommand
        .as_ref()
        .map(|s| format!(" for subcommand \"{s}\""))
        .unwrap_or_default()
}
