//! Property tests for dispatch.

use chatcmd_foundation::ErrorCategory;
use proptest::prelude::*;

use crate::support::fixture;

fn run(input: &str) -> Result<chatcmd_runtime::ExecutionContext, ErrorCategory> {
    let f = fixture();
    futures::executor::block_on(f.registry.run(input, f.steve)).map_err(|e| e.category())
}

proptest! {
    #[test]
    fn run_is_idempotent(item in "[a-z]{1,10}", amount in 1u32..1000) {
        let f = fixture();
        let input = format!("!give {item} {amount}");
        let first = futures::executor::block_on(f.registry.run(&input, f.steve));
        let second = futures::executor::block_on(f.registry.run(&input, f.steve));
        prop_assert_eq!(first.expect("runs"), second.expect("runs"));
    }

    #[test]
    fn unprefixed_input_is_syntax_error(body in "[a-z ]{1,20}") {
        prop_assert_eq!(run(&body).err(), Some(ErrorCategory::InvalidSyntax));
    }

    #[test]
    fn failures_never_reach_executor(body in "[a-z0-9@ ]{0,20}") {
        let f = fixture();
        let input = format!("!{body}");
        let result = futures::executor::block_on(f.registry.run(&input, f.steve));
        prop_assert_eq!(result.is_ok(), f.calls() == 1);
    }
}
