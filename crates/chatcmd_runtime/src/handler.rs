//! Executor and validator traits.
//!
//! Both are implemented for plain closures, so hosts rarely need a type of
//! their own:
//!
//! ```ignore
//! registry.register("ping", |ctx: ExecutionContext| async move {
//!     println!("pong from {}", ctx.actor);
//!     Ok(())
//! })?;
//! registry.register_validator("give", "amount", |v: &ArgumentValue| {
//!     v.as_number().is_some_and(|n| n > 0.0)
//! });
//! ```

use std::future::Future;

use async_trait::async_trait;
use chatcmd_foundation::{ArgumentValue, BoxError};

use crate::context::ExecutionContext;

/// Runs a command once its arguments are bound.
///
/// Returning a boxed [`CommandError`](chatcmd_foundation::CommandError)
/// surfaces it unchanged; any other error is reported as an execution
/// error with the original attached as its cause.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Executes the command.
    async fn execute(&self, ctx: ExecutionContext) -> Result<(), BoxError>;
}

#[async_trait]
impl<F, Fut> Executor for F
where
    F: Fn(ExecutionContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    async fn execute(&self, ctx: ExecutionContext) -> Result<(), BoxError> {
        (self)(ctx).await
    }
}

/// Accepts or rejects a bound main-window argument value.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Returns false to reject the value.
    async fn validate(&self, value: &ArgumentValue) -> bool;
}

#[async_trait]
impl<F> Validator for F
where
    F: Fn(&ArgumentValue) -> bool + Send + Sync,
{
    async fn validate(&self, value: &ArgumentValue) -> bool {
        (self)(value)
    }
}
