//! Chat command parsing.
//!
//! This crate turns a prefixed chat line like `!inv add "iron sword" 2`
//! into a subcommand chain and a map of typed arguments.
//!
//! # Architecture
//!
//! ```text
//! "!inv add \"iron sword\" 2"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["inv", "add", "iron sword", "2"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SUBCOMMAND      │  → chain ["add"] at position 0
//! │ RESOLUTION      │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ARGUMENT        │  → add.itemName = "iron sword", add.count = 2
//! │ BINDING         │
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`grammar`] - Command, argument, and subcommand declarations
//! - [`tokenizer`] - Convert raw input to a token list
//! - [`convert`] - Token to typed value conversion
//! - [`directory`] - Actor resolution for selector arguments
//! - [`subcommand`] - Candidate positions and subcommand chain matching
//! - [`binder`] - Positional argument binding with defaults
//! - [`usage`] - Usage lines for help output

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod binder;
pub mod convert;
pub mod directory;
pub mod grammar;
pub mod subcommand;
pub mod tokenizer;
pub mod usage;

// Re-export main types for convenience
pub use binder::{ArgumentBinder, Arguments, Binding};
pub use convert::{ArgumentConverter, ConversionFailure};
pub use directory::{ActorDirectory, ActorRecord, ActorResolver};
pub use grammar::{
    ArgumentSpec, CommandGrammar, CommandSpec, GrammarError, MAIN_WINDOW, SubCommandEntry,
    SubCommandSpec,
};
pub use subcommand::{SubcommandMatch, candidate_positions, match_chain};
pub use tokenizer::{InputTokenizer, RESERVED_TOKENS};
pub use usage::{CommandUsage, command_usages};
