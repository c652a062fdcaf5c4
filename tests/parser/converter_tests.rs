//! Argument converter tests.
//!
//! Tests for typed conversion and the entity selectors.

use chatcmd_foundation::{ActorId, ArgumentType, ArgumentValue, Position};
use chatcmd_parser::{ActorDirectory, ArgumentConverter, ConversionFailure};
use proptest::prelude::*;

struct World {
    dir: ActorDirectory,
    steve: ActorId,
    alex: ActorId,
    notch: ActorId,
}

fn world() -> World {
    let (dir, steve) = ActorDirectory::new().spawn("Steve", Position::new(0.0, 64.0, 0.0), "overworld");
    let (dir, alex) = dir.spawn("Alex", Position::new(3.0, 64.0, 4.0), "overworld");
    let (dir, notch) = dir.spawn("Notch", Position::new(100.0, 64.0, 0.0), "end");
    World {
        dir,
        steve,
        alex,
        notch,
    }
}

fn convert(w: &World, actor: ActorId, token: &str, kind: ArgumentType) -> Result<ArgumentValue, ConversionFailure> {
    ArgumentConverter::with_seed(7).convert(actor, token, kind, &w.dir)
}

#[test]
fn number_prints_without_fraction() {
    let w = world();
    let value = convert(&w, w.steve, "42", ArgumentType::Number).expect("number");
    assert_eq!(value, ArgumentValue::Number(42.0));
    assert_eq!(value.to_string(), "42");
}

#[test]
fn number_rejects_words_and_infinities() {
    let w = world();
    for token in ["abc", "inf", "NaN", ""] {
        assert_eq!(
            convert(&w, w.steve, token, ArgumentType::Number),
            Err(ConversionFailure::NotANumber),
            "{token}"
        );
    }
}

#[test]
fn number_accepts_radix_literals() {
    let w = world();
    let value = convert(&w, w.steve, "0x40", ArgumentType::Number).expect("hex");
    assert_eq!(value, ArgumentValue::Number(64.0));
    assert_eq!(value.to_string(), "64");
    assert_eq!(
        convert(&w, w.steve, "0b11", ArgumentType::Number),
        Ok(ArgumentValue::Number(3.0))
    );
    assert_eq!(
        convert(&w, w.steve, "0o7", ArgumentType::Number),
        Ok(ArgumentValue::Number(7.0))
    );
}

#[test]
fn boolean_ignores_case() {
    let w = world();
    assert_eq!(
        convert(&w, w.steve, "TRUE", ArgumentType::Boolean),
        Ok(ArgumentValue::Boolean(true))
    );
    assert_eq!(
        convert(&w, w.steve, "False", ArgumentType::Boolean),
        Ok(ArgumentValue::Boolean(false))
    );
    assert_eq!(
        convert(&w, w.steve, "yes", ArgumentType::Boolean),
        Err(ConversionFailure::NotABoolean)
    );
}

#[test]
fn string_is_verbatim() {
    let w = world();
    assert_eq!(
        convert(&w, w.steve, "Iron Sword", ArgumentType::String),
        Ok(ArgumentValue::from("Iron Sword"))
    );
}

#[test]
fn self_selector_is_invoker() {
    let w = world();
    assert_eq!(
        convert(&w, w.alex, "@s", ArgumentType::EntitySelector),
        Ok(ArgumentValue::Actor(w.alex))
    );
}

#[test]
fn all_and_local_selectors() {
    let w = world();
    assert_eq!(
        convert(&w, w.steve, "@a", ArgumentType::EntitySelector),
        Ok(ArgumentValue::Actors(vec![w.steve, w.alex, w.notch]))
    );
    assert_eq!(
        convert(&w, w.notch, "@e", ArgumentType::EntitySelector),
        Ok(ArgumentValue::Actors(vec![w.notch]))
    );
}

#[test]
fn nearest_counts_the_invoker() {
    let w = world();
    assert_eq!(
        convert(&w, w.steve, "@p", ArgumentType::EntitySelector),
        Ok(ArgumentValue::Actor(w.steve))
    );
}

#[test]
fn nearest_needs_a_position() {
    let w = world();
    assert_eq!(
        convert(&w, ActorId::new(99), "@p", ArgumentType::EntitySelector),
        Err(ConversionFailure::NoPosition)
    );
}

#[test]
fn random_selector_with_empty_scope_fails() {
    let empty = ActorDirectory::new();
    let converter = ArgumentConverter::with_seed(1);
    assert_eq!(
        converter.convert(ActorId::new(0), "@r", ArgumentType::EntitySelector, &empty),
        Err(ConversionFailure::NoActorsInScope)
    );
}

#[test]
fn random_selector_is_seeded() {
    let w = world();
    let a = ArgumentConverter::with_seed(11);
    let b = ArgumentConverter::with_seed(11);
    for _ in 0..5 {
        assert_eq!(
            a.convert(w.steve, "@r", ArgumentType::EntitySelector, &w.dir),
            b.convert(w.steve, "@r", ArgumentType::EntitySelector, &w.dir)
        );
    }
}

#[test]
fn names_resolve_exactly() {
    let w = world();
    assert_eq!(
        convert(&w, w.steve, "Notch", ArgumentType::EntitySelector),
        Ok(ArgumentValue::Actor(w.notch))
    );
    assert_eq!(
        convert(&w, w.steve, "notch", ArgumentType::EntitySelector),
        Err(ConversionFailure::UnknownActor("notch".into()))
    );
}

proptest! {
    #[test]
    fn integers_round_trip(n in -1_000_000i64..1_000_000) {
        let w = world();
        let token = n.to_string();
        let value = convert(&w, w.steve, &token, ArgumentType::Number).expect("number");
        prop_assert_eq!(value.to_string(), token);
    }

    #[test]
    fn alphabetic_words_are_not_numbers(word in "[g-hj-mo-z]{1,10}") {
        let w = world();
        prop_assert_eq!(
            convert(&w, w.steve, &word, ArgumentType::Number),
            Err(ConversionFailure::NotANumber)
        );
    }
}
