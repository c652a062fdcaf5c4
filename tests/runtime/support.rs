//! Shared fixtures for runtime tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chatcmd_foundation::{ActorId, ArgumentType, Position};
use chatcmd_parser::{
    ActorDirectory, ArgumentSpec, CommandGrammar, CommandSpec, MAIN_WINDOW, SubCommandSpec,
};
use chatcmd_runtime::{ExecutionContext, ExecutorResult, Registry, RegistryConfig};

pub struct Fixture {
    pub registry: Registry,
    pub steve: ActorId,
    pub alex: ActorId,
    pub calls: Arc<AtomicUsize>,
}

impl Fixture {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn grammar() -> CommandGrammar {
    CommandGrammar::new("!")
        .with_command(
            "give",
            CommandSpec::new("Give an item")
                .with_argument("item", ArgumentSpec::required(ArgumentType::String))
                .with_argument("amount", ArgumentSpec::new(ArgumentType::Number).with_default(1))
                .with_window(MAIN_WINDOW, ["item", "amount"]),
        )
        .with_command(
            "tp",
            CommandSpec::new("Teleport")
                .with_argument("target", ArgumentSpec::required(ArgumentType::EntitySelector))
                .with_window(MAIN_WINDOW, ["target"]),
        )
        .with_command(
            "inv",
            CommandSpec::new("Inventory")
                .with_argument("itemName", ArgumentSpec::required(ArgumentType::String))
                .with_argument("count", ArgumentSpec::new(ArgumentType::Number).with_default(1))
                .with_window("add", ["itemName", "count"])
                .with_sub_commands(SubCommandSpec::required().with_leaf("add").with_leaf("list")),
        )
        .with_command("ping", CommandSpec::new("Ping"))
}

/// Registry over [`grammar`] with a counting executor on every command.
pub fn fixture() -> Fixture {
    let (dir, steve) = ActorDirectory::new().spawn("Steve", Position::new(0.0, 64.0, 0.0), "overworld");
    let (dir, alex) = dir.spawn("Alex", Position::new(8.0, 64.0, 0.0), "overworld");
    let mut registry = Registry::with_config(grammar(), Arc::new(dir), RegistryConfig::deterministic(42))
        .expect("valid grammar");
    let calls = Arc::new(AtomicUsize::new(0));
    for name in ["give", "tp", "inv", "ping"] {
        let counter = calls.clone();
        registry
            .register(name, move |_ctx: ExecutionContext| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { ExecutorResult::Ok(()) }
            })
            .expect("declared");
    }
    Fixture {
        registry,
        steve,
        alex,
        calls,
    }
}
