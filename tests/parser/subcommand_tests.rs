//! Subcommand resolution tests.
//!
//! Candidate positions come from the window layout, and only those
//! positions are checked against subcommand names.

use chatcmd_foundation::{ArgumentType, ErrorCategory, ErrorKind};
use chatcmd_parser::{
    ArgumentSpec, CommandSpec, MAIN_WINDOW, SubCommandSpec, SubcommandMatch, candidate_positions,
    match_chain,
};

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn inventory() -> CommandSpec {
    CommandSpec::new("Manage inventory")
        .with_argument("target", ArgumentSpec::new(ArgumentType::EntitySelector))
        .with_argument("itemName", ArgumentSpec::required(ArgumentType::String))
        .with_argument("count", ArgumentSpec::new(ArgumentType::Number).with_default(1))
        .with_window(MAIN_WINDOW, ["target"])
        .with_window("add", ["itemName", "count"])
        .with_sub_commands(SubCommandSpec::required().with_leaf("add").with_leaf("list"))
}

fn warp() -> CommandSpec {
    CommandSpec::new("Warps")
        .with_argument("name", ArgumentSpec::required(ArgumentType::String))
        .with_argument("radius", ArgumentSpec::new(ArgumentType::Number).with_default(0))
        .with_window("set", ["name", "radius"])
        .with_sub_commands(
            SubCommandSpec::optional()
                .with_nested("set", SubCommandSpec::required().with_leaf("public")),
        )
}

fn resolve(spec: &CommandSpec, tokens: &[String]) -> chatcmd_foundation::Result<SubcommandMatch> {
    let candidates = candidate_positions(spec, tokens);
    match_chain(tokens, &candidates, spec.sub_command_root(), 32)
}

#[test]
fn candidates_start_after_main_window() {
    let tokens = toks(&["@s", "add", "sword", "3", "list"]);
    assert_eq!(candidate_positions(&inventory(), &tokens), vec![1, 4]);
}

#[test]
fn no_windows_means_no_candidates() {
    let spec = CommandSpec::new("ping");
    assert!(candidate_positions(&spec, &toks(&["a", "b"])).is_empty());
}

#[test]
fn matches_subcommand_after_main_window() {
    let matched = resolve(&inventory(), &toks(&["@s", "add", "sword"])).expect("matches");
    assert_eq!(matched.chain, vec!["add".to_string()]);
    assert_eq!(matched.positions, vec![1]);
}

#[test]
fn subcommand_name_outside_candidates_is_not_matched() {
    // "list" sits inside the add window, so it is an item name.
    let matched = resolve(&inventory(), &toks(&["@s", "add", "list"])).expect("matches");
    assert_eq!(matched.chain, vec!["add".to_string()]);
}

#[test]
fn required_root_without_tokens() {
    let err = resolve(&inventory(), &toks(&["@s"])).expect_err("missing");
    assert_eq!(err.category(), ErrorCategory::InvalidSubcommand);
    assert_eq!(
        err.kind,
        ErrorKind::MissingSubcommand {
            available: vec!["add".into(), "list".into()]
        }
    );
}

#[test]
fn required_root_rejects_unknown_name() {
    let err = resolve(&inventory(), &toks(&["@s", "drop"])).expect_err("unknown");
    assert_eq!(
        err.kind,
        ErrorKind::UnknownSubcommand {
            name: "drop".into(),
            available: vec!["add".into(), "list".into()]
        }
    );
}

#[test]
fn optional_root_ignores_other_tokens() {
    let matched = resolve(&warp(), &toks(&["home"])).expect("matches");
    assert!(matched.is_empty());
}

#[test]
fn nested_offset_skips_full_parent_window() {
    // set consumes two tokens, so the nested candidate is 0 + 2 + 1.
    let tokens = toks(&["set", "home", "5", "public"]);
    assert_eq!(candidate_positions(&warp(), &tokens), vec![0, 3]);
    let matched = resolve(&warp(), &tokens).expect("matches");
    assert_eq!(matched.chain, vec!["set".to_string(), "public".to_string()]);
    assert_eq!(matched.positions, vec![0, 3]);
}

#[test]
fn nested_required_after_parent_at_end() {
    let err = resolve(&warp(), &toks(&["set"])).expect_err("needs public");
    assert_eq!(
        err.kind,
        ErrorKind::MissingNestedSubcommand {
            parent: "set".into()
        }
    );
}

#[test]
fn nested_required_with_short_parent_window() {
    // One token short: no candidate lands on "public".
    let err = resolve(&warp(), &toks(&["set", "home", "public"])).expect_err("needs public");
    assert_eq!(
        err.kind,
        ErrorKind::MissingNestedSubcommand {
            parent: "set".into()
        }
    );
}

#[test]
fn matching_is_case_insensitive() {
    let matched = resolve(&inventory(), &toks(&["@s", "ADD", "sword"])).expect("matches");
    assert_eq!(matched.chain, vec!["add".to_string()]);
}

#[test]
fn depth_limit_fails_closed() {
    let tokens = toks(&["set", "home", "5", "public"]);
    let spec = warp();
    let candidates = candidate_positions(&spec, &tokens);
    let err = match_chain(&tokens, &candidates, spec.sub_command_root(), 1).expect_err("too deep");
    assert_eq!(err.kind, ErrorKind::DepthExceeded { limit: 1 });
    assert_eq!(err.category(), ErrorCategory::ExecutionError);
}
