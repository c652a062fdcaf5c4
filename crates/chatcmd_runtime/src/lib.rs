//! Command dispatch and the interactive host for chatcmd.
//!
//! This crate provides:
//! - [`Registry`] - Binds executors and validators to a grammar and runs input
//! - [`ExecutionContext`] - What an executor receives
//! - [`Executor`] and [`Validator`] - Async hooks, implemented for closures
//! - [`RegistryConfig`] - Depth limit and `@r` seeding
//! - [`Repl`] - Interactive REPL over a demo grammar

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod demo;
pub mod editor;
pub mod handler;
pub mod highlight;
pub mod registry;
pub mod repl;

pub use config::RegistryConfig;
pub use context::ExecutionContext;
pub use editor::{EditorError, LineEditor, ReadResult, RustylineEditor};
pub use handler::{Executor, Validator};
pub use registry::{ExecutorResult, Registry};
pub use repl::{Repl, ReplError, Reply};
