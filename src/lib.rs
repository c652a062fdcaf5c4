//! chatcmd - Chat command parsing and dispatch
//!
//! This crate re-exports all layers of the chatcmd system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: chatcmd_runtime    - Registry, executors, validators, REPL
//! Layer 1: chatcmd_parser     - Grammar, tokenizer, converter, subcommands, binder
//! Layer 0: chatcmd_foundation - Core types (ActorId, ArgumentValue, CommandError)
//! ```

pub use chatcmd_foundation as foundation;
pub use chatcmd_parser as parser;
pub use chatcmd_runtime as runtime;
