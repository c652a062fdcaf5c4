//! Command registry and dispatcher.
//!
//! A [`Registry`] owns the grammar, the executor table, and the validator
//! table. Setup registers executors and validators through `&mut self`;
//! dispatch runs through `&self`, so any number of [`Registry::run`] calls
//! may be in flight at once.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chatcmd_foundation::{ActorId, CommandError, ErrorKind, Result};
use chatcmd_parser::{
    ActorResolver, ArgumentBinder, ArgumentConverter, CommandGrammar, CommandUsage, GrammarError,
    InputTokenizer, candidate_positions, command_usages, match_chain,
};
use futures::FutureExt;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::context::ExecutionContext;
use crate::handler::{Executor, Validator};

/// Result type for executors.
pub type ExecutorResult = std::result::Result<(), chatcmd_foundation::BoxError>;

/// Holds the grammar, executors, and validators, and dispatches input.
pub struct Registry {
    grammar: CommandGrammar,
    resolver: Arc<dyn ActorResolver>,
    converter: ArgumentConverter,
    config: RegistryConfig,
    executors: HashMap<String, Arc<dyn Executor>>,
    validators: HashMap<String, HashMap<String, Arc<dyn Validator>>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("prefix", &self.grammar.prefix)
            .field("commands", &self.grammar.commands.keys().collect::<Vec<_>>())
            .field("executors", &self.executors.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Creates a registry with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar fails validation.
    pub fn new(
        grammar: CommandGrammar,
        resolver: Arc<dyn ActorResolver>,
    ) -> std::result::Result<Self, GrammarError> {
        Self::with_config(grammar, resolver, RegistryConfig::default())
    }

    /// Creates a registry with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar fails validation.
    pub fn with_config(
        grammar: CommandGrammar,
        resolver: Arc<dyn ActorResolver>,
        config: RegistryConfig,
    ) -> std::result::Result<Self, GrammarError> {
        grammar.validate()?;
        let converter = match config.rng_seed {
            Some(seed) => ArgumentConverter::with_seed(seed),
            None => ArgumentConverter::new(),
        };
        Ok(Self {
            grammar,
            resolver,
            converter,
            config,
            executors: HashMap::new(),
            validators: HashMap::new(),
        })
    }

    /// Returns the grammar.
    #[must_use]
    pub const fn grammar(&self) -> &CommandGrammar {
        &self.grammar
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers the executor for a declared command, replacing any
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if `command` is not declared in the grammar.
    pub fn register(&mut self, command: &str, executor: impl Executor + 'static) -> Result<()> {
        if self.grammar.command(command).is_none() {
            return Err(CommandError::command_not_found(command));
        }
        if self
            .executors
            .insert(command.to_string(), Arc::new(executor))
            .is_some()
        {
            debug!(command, "replaced executor");
        } else {
            debug!(command, "registered executor");
        }
        Ok(())
    }

    /// Registers the validator for one argument of a command. The last
    /// registration for a pair wins.
    pub fn register_validator(
        &mut self,
        command: &str,
        argument: &str,
        validator: impl Validator + 'static,
    ) {
        let declared = self
            .grammar
            .command(command)
            .is_some_and(|spec| spec.arguments.contains_key(argument));
        if !declared {
            warn!(command, argument, "validator registered for an undeclared argument");
        }
        self.validators
            .entry(command.to_string())
            .or_default()
            .insert(argument.to_string(), Arc::new(validator));
        debug!(command, argument, "registered validator");
    }

    /// Returns true if `text` is non-empty and starts with the prefix.
    #[must_use]
    pub fn matches_prefix(&self, text: &str) -> bool {
        !text.is_empty() && text.starts_with(&self.grammar.prefix)
    }

    /// Usage lines for every declared command.
    #[must_use]
    pub fn usages(&self) -> Vec<CommandUsage> {
        command_usages(&self.grammar, self.config.max_subcommand_depth)
    }

    /// Parses `text` on behalf of `actor`, runs the command's executor, and
    /// returns the context it was given.
    ///
    /// Nothing reaches the executor unless every stage before it succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] in one of four categories: invalid syntax,
    /// invalid argument, invalid subcommand, or execution error.
    pub async fn run(&self, text: &str, actor: ActorId) -> Result<ExecutionContext> {
        let result = self.dispatch(text, actor).await;
        if let Err(err) = &result {
            warn!(
                category = %err.category(),
                error = %err,
                input = text,
                "command failed"
            );
        }
        result
    }

    async fn dispatch(&self, text: &str, actor: ActorId) -> Result<ExecutionContext> {
        if text.trim().is_empty() {
            return Err(ErrorKind::EmptyInput.into());
        }
        if actor.is_null() {
            return Err(ErrorKind::MissingActor.into());
        }
        if !self.matches_prefix(text) {
            return Err(ErrorKind::MissingPrefix {
                prefix: self.grammar.prefix.clone(),
            }
            .into());
        }
        debug!(input = text, %actor, "prefix checked");

        let mut tokens = InputTokenizer::tokenize(text, &self.grammar.prefix)?;
        if tokens.is_empty() {
            return Err(ErrorKind::MissingCommand.into());
        }
        let command = tokens.remove(0);
        debug!(command = %command, tokens = ?tokens, "tokenized");

        let spec = self
            .grammar
            .command(&command)
            .ok_or_else(|| CommandError::command_not_found(&command))?;
        let executor = self
            .executors
            .get(&command)
            .cloned()
            .ok_or_else(|| CommandError::new(ErrorKind::ExecutorNotRegistered(command.clone())))?;

        let candidates = candidate_positions(spec, &tokens);
        let matched = match_chain(
            &tokens,
            &candidates,
            spec.sub_command_root(),
            self.config.max_subcommand_depth,
        )?;
        debug!(chain = ?matched.chain, positions = ?matched.positions, "subcommands resolved");

        let binding = ArgumentBinder::new(spec, &self.converter, self.resolver.as_ref(), actor)
            .bind(&tokens, &matched)?;
        self.check_validators(&command, &binding).await?;
        debug!(arguments = ?binding.arguments, "arguments bound");

        let ctx = ExecutionContext {
            actor,
            command,
            subcommands: matched.chain,
            arguments: binding.arguments,
            message: text.to_string(),
        };

        debug!(command = %ctx.command, "invoking executor");
        match AssertUnwindSafe(executor.execute(ctx.clone()))
            .catch_unwind()
            .await
        {
            Ok(Ok(())) => Ok(ctx),
            Ok(Err(err)) => Err(CommandError::from_executor(err)),
            Err(payload) => Err(CommandError::new(ErrorKind::ExecutorPanicked {
                message: panic_message(payload.as_ref()),
            })),
        }
    }

    /// Runs the registered validators over main-window arguments bound from
    /// input, in declaration order.
    async fn check_validators(&self, command: &str, binding: &chatcmd_parser::Binding) -> Result<()> {
        let Some(validators) = self.validators.get(command) else {
            return Ok(());
        };
        for name in &binding.from_input {
            let (Some(validator), Some(value)) = (validators.get(name), binding.arguments.get(name))
            else {
                continue;
            };
            match AssertUnwindSafe(validator.validate(value)).catch_unwind().await {
                Ok(true) => {}
                Ok(false) => {
                    return Err(CommandError::new(ErrorKind::ValidationFailed {
                        argument: name.clone(),
                    }));
                }
                Err(payload) => {
                    return Err(CommandError::new(ErrorKind::ValidatorPanicked {
                        argument: name.clone(),
                        message: panic_message(payload.as_ref()),
                    }));
                }
            }
        }
        Ok(())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
