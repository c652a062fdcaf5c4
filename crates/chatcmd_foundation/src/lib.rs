//! Core types, argument values, and errors for chatcmd.
//!
//! This crate provides:
//! - [`ActorId`] - Identifiers for the actors that issue and receive commands
//! - [`Position`] - World coordinates used by distance-based selectors
//! - [`ArgumentType`] / [`ArgumentValue`] - Declared argument types and their typed values
//! - [`CommandError`] - Classified errors with structured detail

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actor;
pub mod error;
pub mod value;

pub use actor::{ActorId, Position};
pub use error::{BoxError, CommandError, ErrorCategory, ErrorKind, Result};
pub use value::{ArgumentType, ArgumentValue};
