//! Validator tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chatcmd_foundation::{ArgumentValue, ErrorCategory, ErrorKind};
use chatcmd_runtime::Validator;

use crate::support::fixture;

fn positive(value: &ArgumentValue) -> bool {
    value.as_number().is_some_and(|n| n > 0.0)
}

#[tokio::test]
async fn rejected_value_skips_executor() {
    let mut f = fixture();
    f.registry.register_validator("give", "amount", positive);

    let err = f
        .registry
        .run("!give apple -2", f.steve)
        .await
        .expect_err("rejected");
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
    assert_eq!(
        err.kind,
        ErrorKind::ValidationFailed {
            argument: "amount".into()
        }
    );
    assert_eq!(f.calls(), 0);

    f.registry.run("!give apple 2", f.steve).await.expect("accepted");
    assert_eq!(f.calls(), 1);
}

#[tokio::test]
async fn defaults_are_not_validated() {
    let mut f = fixture();
    f.registry
        .register_validator("give", "amount", |_v: &ArgumentValue| false);

    f.registry.run("!give apple", f.steve).await.expect("default skips validator");
}

#[tokio::test]
async fn last_registration_wins() {
    let mut f = fixture();
    f.registry
        .register_validator("give", "item", |_v: &ArgumentValue| false);
    f.registry
        .register_validator("give", "item", |_v: &ArgumentValue| true);

    f.registry.run("!give apple", f.steve).await.expect("accepted");
}

#[tokio::test]
async fn validators_run_in_declaration_order() {
    let mut f = fixture();
    f.registry
        .register_validator("give", "amount", |_v: &ArgumentValue| false);
    f.registry
        .register_validator("give", "item", |_v: &ArgumentValue| false);

    let err = f.registry.run("!give apple 3", f.steve).await.expect_err("rejected");
    assert_eq!(
        err.kind,
        ErrorKind::ValidationFailed {
            argument: "item".into()
        }
    );
}

#[tokio::test]
async fn validator_for_undeclared_argument_is_inert() {
    let mut f = fixture();
    f.registry
        .register_validator("give", "colour", |_v: &ArgumentValue| false);
    f.registry
        .register_validator("nope", "x", |_v: &ArgumentValue| false);

    f.registry.run("!give apple 3", f.steve).await.expect("runs");
}

/// Validator with its own state, checked asynchronously.
struct Limit {
    max: f64,
    seen: Arc<AtomicUsize>,
}

#[async_trait]
impl Validator for Limit {
    async fn validate(&self, value: &ArgumentValue) -> bool {
        self.seen.fetch_add(1, Ordering::SeqCst);
        value.as_number().is_some_and(|n| n <= self.max)
    }
}

#[tokio::test]
async fn custom_validator_type() {
    let mut f = fixture();
    let seen = Arc::new(AtomicUsize::new(0));
    f.registry.register_validator(
        "give",
        "amount",
        Limit {
            max: 64.0,
            seen: seen.clone(),
        },
    );

    f.registry.run("!give apple 64", f.steve).await.expect("within limit");
    let err = f.registry.run("!give apple 65", f.steve).await.expect_err("over limit");
    assert!(matches!(err.kind, ErrorKind::ValidationFailed { .. }));
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn panicking_validator_is_execution_error() {
    let mut f = fixture();
    f.registry
        .register_validator("give", "item", |_v: &ArgumentValue| -> bool {
            panic!("validator boom")
        });

    let err = f.registry.run("!give apple", f.steve).await.expect_err("panicked");
    assert_eq!(err.category(), ErrorCategory::ExecutionError);
    assert_eq!(
        err.kind,
        ErrorKind::ValidatorPanicked {
            argument: "item".into(),
            message: "validator boom".into()
        }
    );
    assert_eq!(f.calls(), 0);
}
