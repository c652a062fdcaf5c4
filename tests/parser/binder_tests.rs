//! Argument binder tests.
//!
//! Tests for positional binding of the main window and of each matched
//! subcommand window.

use chatcmd_foundation::{ActorId, ArgumentType, ArgumentValue, ErrorCategory, ErrorKind, Position};
use chatcmd_parser::{
    ActorDirectory, ArgumentBinder, ArgumentConverter, ArgumentSpec, Binding, CommandSpec,
    MAIN_WINDOW, SubCommandSpec, candidate_positions, match_chain,
};

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn directory() -> (ActorDirectory, ActorId) {
    ActorDirectory::new().spawn("Steve", Position::default(), "overworld")
}

fn bind(spec: &CommandSpec, words: &[&str]) -> chatcmd_foundation::Result<Binding> {
    let (dir, steve) = directory();
    let converter = ArgumentConverter::with_seed(5);
    let tokens = toks(words);
    let candidates = candidate_positions(spec, &tokens);
    let matched = match_chain(&tokens, &candidates, spec.sub_command_root(), 32)?;
    ArgumentBinder::new(spec, &converter, &dir, steve).bind(&tokens, &matched)
}

fn give() -> CommandSpec {
    CommandSpec::new("Give an item")
        .with_argument("item", ArgumentSpec::required(ArgumentType::String))
        .with_argument("amount", ArgumentSpec::new(ArgumentType::Number).with_default(1))
        .with_argument("silent", ArgumentSpec::new(ArgumentType::Boolean))
        .with_window(MAIN_WINDOW, ["item", "amount", "silent"])
}

fn inventory() -> CommandSpec {
    CommandSpec::new("Manage inventory")
        .with_argument("target", ArgumentSpec::required(ArgumentType::EntitySelector))
        .with_argument("itemName", ArgumentSpec::required(ArgumentType::String))
        .with_argument("count", ArgumentSpec::new(ArgumentType::Number).with_default(1))
        .with_window(MAIN_WINDOW, ["target"])
        .with_window("add", ["itemName", "count"])
        .with_window("remove", ["itemName"])
        .with_sub_commands(SubCommandSpec::required().with_leaf("add").with_leaf("remove"))
}

#[test]
fn binds_main_window_in_order() {
    let binding = bind(&give(), &["iron sword", "3", "true"]).expect("binds");
    let args = &binding.arguments;
    assert_eq!(args.get_str("item"), Some("iron sword"));
    assert_eq!(args.get_number("amount"), Some(3.0));
    assert_eq!(args.get_bool("silent"), Some(true));
    assert_eq!(binding.from_input, vec!["item", "amount", "silent"]);
}

#[test]
fn default_applies_when_tokens_run_out() {
    let binding = bind(&give(), &["apple"]).expect("binds");
    assert_eq!(binding.arguments.get_number("amount"), Some(1.0));
    assert_eq!(binding.arguments.get("silent"), None);
    assert_eq!(binding.from_input, vec!["item"]);
}

#[test]
fn missing_required_argument() {
    let err = bind(&give(), &[]).expect_err("item required");
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
    assert_eq!(
        err.kind,
        ErrorKind::MissingArgument {
            argument: "item".into(),
            subcommand: None
        }
    );
}

#[test]
fn conversion_failure_names_the_argument() {
    let err = bind(&give(), &["apple", "lots"]).expect_err("not a number");
    let ErrorKind::InvalidValue {
        argument,
        subcommand,
        expected,
        received,
        ..
    } = &err.kind
    else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(argument, "amount");
    assert_eq!(subcommand, &None);
    assert_eq!(*expected, ArgumentType::Number);
    assert_eq!(received, "lots");
}

#[test]
fn extra_tokens_are_ignored() {
    let binding = bind(&give(), &["apple", "2", "false", "extra", "words"]).expect("binds");
    assert_eq!(binding.arguments.main().len(), 3);
}

#[test]
fn subcommand_window_binds_after_name() {
    let binding = bind(&inventory(), &["@s", "add", "sword", "4"]).expect("binds");
    let args = &binding.arguments;
    assert_eq!(args.get_actor("target"), Some(ActorId::new(0)));
    assert_eq!(
        args.get_in("add", "itemName"),
        Some(&ArgumentValue::from("sword"))
    );
    assert_eq!(args.get_in("add", "count"), Some(&ArgumentValue::Number(4.0)));
    assert!(args.subcommand("remove").is_none());
}

#[test]
fn subcommand_name_as_argument_value() {
    let binding = bind(&inventory(), &["@s", "remove", "add"]).expect("binds");
    assert_eq!(
        binding.arguments.get_in("remove", "itemName"),
        Some(&ArgumentValue::from("add"))
    );
}

#[test]
fn subcommand_defaults_fill_window() {
    let binding = bind(&inventory(), &["@s", "add", "sword"]).expect("binds");
    assert_eq!(
        binding.arguments.get_in("add", "count"),
        Some(&ArgumentValue::Number(1.0))
    );
}

#[test]
fn missing_subcommand_argument_names_owner() {
    let err = bind(&inventory(), &["@s", "remove"]).expect_err("itemName required");
    assert_eq!(
        err.kind,
        ErrorKind::MissingArgument {
            argument: "itemName".into(),
            subcommand: Some("remove".into())
        }
    );
}

#[test]
fn subcommand_values_not_reported_for_validation() {
    let binding = bind(&inventory(), &["@s", "add", "sword", "4"]).expect("binds");
    assert_eq!(binding.from_input, vec!["target"]);
}

#[test]
fn command_without_windows_binds_nothing() {
    let binding = bind(&CommandSpec::new("ping"), &["anything", "at", "all"]).expect("binds");
    assert!(binding.arguments.is_empty());
    assert!(binding.from_input.is_empty());
}
