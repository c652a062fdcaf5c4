//! Demo grammar, actors, and executors for the interactive REPL.
//!
//! Executors do not mutate anything. They describe what they received into
//! a [`Transcript`] that the REPL prints after each command.

use std::sync::{Arc, Mutex, PoisonError};

use chatcmd_foundation::{ActorId, ArgumentType, ArgumentValue, CommandError, ErrorKind, Position};
use chatcmd_parser::{
    ActorDirectory, ArgumentSpec, CommandGrammar, CommandSpec, MAIN_WINDOW, SubCommandSpec,
};

use crate::config::RegistryConfig;
use crate::context::ExecutionContext;
use crate::registry::{ExecutorResult, Registry};
use crate::repl::ReplError;

/// Prefix used by the demo grammar.
pub const DEMO_PREFIX: &str = "!";

/// Shared buffer of executor output lines.
#[derive(Clone, Debug, Default)]
pub struct Transcript(Arc<Mutex<Vec<String>>>);

impl Transcript {
    /// Appends a line.
    pub fn push(&self, line: impl Into<String>) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.into());
    }

    /// Removes and returns every buffered line.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// The demo grammar: `give`, `tp`, `inv` and `warp`.
#[must_use]
pub fn grammar() -> CommandGrammar {
    CommandGrammar::new(DEMO_PREFIX)
        .with_command(
            "give",
            CommandSpec::new("Give yourself an item")
                .with_argument(
                    "item",
                    ArgumentSpec::required(ArgumentType::String).with_description("Item name"),
                )
                .with_argument(
                    "amount",
                    ArgumentSpec::new(ArgumentType::Number)
                        .with_default(1)
                        .with_description("Stack size"),
                )
                .with_window(MAIN_WINDOW, ["item", "amount"]),
        )
        .with_command(
            "tp",
            CommandSpec::new("Teleport an actor to another")
                .with_argument("target", ArgumentSpec::required(ArgumentType::EntitySelector))
                .with_argument("destination", ArgumentSpec::new(ArgumentType::EntitySelector))
                .with_window(MAIN_WINDOW, ["target", "destination"]),
        )
        .with_command(
            "inv",
            CommandSpec::new("Manage your inventory")
                .with_argument("itemName", ArgumentSpec::required(ArgumentType::String))
                .with_argument("count", ArgumentSpec::new(ArgumentType::Number).with_default(1))
                .with_window("add", ["itemName", "count"])
                .with_window("remove", ["itemName", "count"])
                .with_sub_commands(
                    SubCommandSpec::required()
                        .with_leaf("list")
                        .with_leaf("add")
                        .with_leaf("remove"),
                ),
        )
        .with_command(
            "warp",
            CommandSpec::new("Manage warp points")
                .with_argument("name", ArgumentSpec::required(ArgumentType::String))
                .with_window("set", ["name"])
                .with_window("delete", ["name"])
                .with_sub_commands(
                    SubCommandSpec::required()
                        .with_leaf("list")
                        .with_nested("set", SubCommandSpec::optional().with_leaf("public"))
                        .with_leaf("delete"),
                ),
        )
}

/// A small world of three actors; Steve and Alex share the overworld.
#[must_use]
pub fn directory() -> ActorDirectory {
    let (dir, _) = ActorDirectory::new().spawn("Steve", Position::new(0.0, 64.0, 0.0), "overworld");
    let (dir, _) = dir.spawn("Alex", Position::new(10.0, 64.0, 0.0), "overworld");
    let (dir, _) = dir.spawn("Herobrine", Position::new(2.0, 20.0, 2.0), "nether");
    dir
}

/// Builds a registry over the demo grammar with an executor for every
/// command, plus a validator that rejects non-positive `give` amounts.
///
/// # Errors
///
/// Returns an error if the demo grammar fails validation or an executor
/// names a command the grammar does not declare.
pub fn registry(
    directory: Arc<ActorDirectory>,
    config: RegistryConfig,
    transcript: &Transcript,
) -> Result<Registry, ReplError> {
    let mut registry = Registry::with_config(grammar(), directory.clone(), config)?;
    for name in ["give", "tp", "inv", "warp"] {
        let out = transcript.clone();
        let dir = directory.clone();
        registry.register(name, move |ctx: ExecutionContext| {
            let out = out.clone();
            let dir = dir.clone();
            async move { describe(&ctx, &dir, &out) }
        })?;
    }
    registry.register_validator("give", "amount", |v: &ArgumentValue| {
        v.as_number().is_some_and(|n| n > 0.0)
    });
    Ok(registry)
}

fn describe(ctx: &ExecutionContext, dir: &ActorDirectory, out: &Transcript) -> ExecutorResult {
    let who = actor_name(dir, ctx.actor);
    match ctx.command.as_str() {
        "give" => {
            let item = ctx.arguments.get_str("item").unwrap_or_default();
            let amount = ctx.arguments.get_number("amount").unwrap_or(1.0);
            out.push(format!("gave {amount} x {item} to {who}"));
        }
        "tp" => {
            let target = ctx.arguments.get("target").map(|v| names(dir, v));
            let destination = ctx.arguments.get("destination").map_or_else(
                || "spawn".to_string(),
                |v| names(dir, v),
            );
            out.push(format!(
                "teleported {} to {destination}",
                target.unwrap_or_default()
            ));
        }
        "inv" | "warp" => {
            let Some(leaf) = ctx.leaf_subcommand() else {
                return Err(CommandError::new(ErrorKind::MissingSubcommand {
                    available: Vec::new(),
                })
                .into());
            };
            let args = ctx
                .arguments
                .subcommands()
                .iter()
                .flat_map(|(sub, values)| {
                    values.iter().map(move |(k, v)| format!("{sub}.{k}={v}"))
                })
                .collect::<Vec<_>>()
                .join(" ");
            out.push(
                format!("{who} ran {} {} {args}", ctx.command, ctx.subcommands.join(" "))
                    .trim_end()
                    .to_string(),
            );
            if leaf == "list" {
                out.push("(nothing to list)");
            }
        }
        other => out.push(format!("{who} ran {other}")),
    }
    Ok(())
}

fn actor_name(dir: &ActorDirectory, actor: ActorId) -> String {
    dir.name_of(actor)
        .map_or_else(|| actor.to_string(), str::to_string)
}

fn names(dir: &ActorDirectory, value: &ArgumentValue) -> String {
    let actors = value.actors();
    if actors.is_empty() {
        return "nobody".to_string();
    }
    actors
        .into_iter()
        .map(|a| actor_name(dir, a))
        .collect::<Vec<_>>()
        .join(", ")
}
