//! The interactive REPL.
//!
//! Lines starting with the grammar prefix are dispatched through the
//! [`Registry`]. Anything else is a meta command: `help`, `who`,
//! `as <name>`, or `quit`.

use std::sync::Arc;

use chatcmd_foundation::{ActorId, CommandError};
use chatcmd_parser::{ActorDirectory, ActorResolver, GrammarError};
use futures::executor::block_on;

use crate::config::RegistryConfig;
use crate::demo::{self, Transcript};
use crate::editor::{EditorError, LineEditor, ReadResult, RustylineEditor};
use crate::registry::Registry;

const META_COMMANDS: [&str; 5] = ["help", "who", "as", "quit", "exit"];

/// What one input line produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Lines to print.
    Output(Vec<String>),
    /// Leave the loop.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    registry: Registry,
    directory: Arc<ActorDirectory>,
    transcript: Transcript,
    actor: ActorId,
    show_banner: bool,
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a demo REPL with the rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(config: RegistryConfig) -> Result<Self, ReplError> {
        let editor = RustylineEditor::new(demo::DEMO_PREFIX)?;
        Self::demo(editor, config)
    }
}

/// Errors that stop the REPL from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    /// The terminal editor failed.
    #[error(transparent)]
    Editor(#[from] EditorError),
    /// The grammar was rejected.
    #[error("invalid grammar: {0}")]
    Grammar(#[from] GrammarError),
    /// An executor could not be registered.
    #[error("cannot register executor: {0}")]
    Command(#[from] CommandError),
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL over the demo grammar and actors with the given
    /// editor, acting as the first actor in the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the demo grammar fails validation.
    pub fn demo(editor: E, config: RegistryConfig) -> Result<Self, ReplError> {
        let directory = Arc::new(demo::directory());
        let transcript = Transcript::default();
        let registry = demo::registry(directory.clone(), config, &transcript)?;
        let actor = directory.iter().next().map_or_else(ActorId::null, |r| r.id);
        let mut repl = Self {
            editor,
            registry,
            directory,
            transcript,
            actor,
            show_banner: true,
            prompt: String::new(),
        };
        repl.refresh_prompt();
        repl.refresh_keywords();
        Ok(repl)
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns the acting actor.
    #[must_use]
    pub const fn actor(&self) -> ActorId {
        self.actor
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Switches the acting actor by name.
    ///
    /// Returns false if no actor has that name.
    pub fn act_as(&mut self, name: &str) -> bool {
        match self.directory.find_by_name(name) {
            Some(actor) => {
                self.actor = actor;
                self.refresh_prompt();
                true
            }
            None => false,
        }
    }

    /// Runs the REPL loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<(), ReplError> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => {
                    println!();
                    continue;
                }
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.eval(&line) {
                Reply::Output(lines) => {
                    for l in lines {
                        println!("{l}");
                    }
                }
                Reply::Quit => break,
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Handles one input line.
    pub fn eval(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if self.registry.matches_prefix(line) {
            return Reply::Output(self.dispatch(line));
        }

        let mut words = line.split_whitespace();
        let output = match (words.next(), words.next()) {
            (Some("quit" | "exit"), _) => return Reply::Quit,
            (Some("help"), _) => self.help(),
            (Some("who"), _) => self.who(),
            (Some("as"), Some(name)) => {
                if self.act_as(name) {
                    vec![format!("now acting as {name}")]
                } else {
                    vec![format!("no actor named {name}")]
                }
            }
            (Some("as"), None) => vec!["usage: as <name>".to_string()],
            _ => vec![format!(
                "commands start with {}; type help for a list",
                self.registry.grammar().prefix
            )],
        };
        Reply::Output(output)
    }

    fn dispatch(&self, line: &str) -> Vec<String> {
        let result = block_on(self.registry.run(line, self.actor));
        let mut lines = self.transcript.drain();
        if let Err(err) = result {
            lines.push(format_error(&err));
        }
        lines
    }

    fn help(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for usage in self.registry.usages() {
            lines.push(format!("{} - {}", usage.name, usage.description));
            lines.extend(usage.lines.into_iter().map(|l| format!("    {l}")));
        }
        lines.push("meta: help, who, as <name>, quit".to_string());
        lines
    }

    fn who(&self) -> Vec<String> {
        self.directory
            .iter()
            .map(|r| {
                let marker = if r.id == self.actor { "*" } else { " " };
                format!(
                    "{marker} {} ({}) at {:.1} {:.1} {:.1} in {}",
                    r.name, r.id, r.position.x, r.position.y, r.position.z, r.zone
                )
            })
            .collect()
    }

    fn refresh_prompt(&mut self) {
        let name = self.directory.name_of(self.actor).unwrap_or("nobody");
        self.prompt = format!("{name}> ");
    }

    fn refresh_keywords(&mut self) {
        let prefix = self.registry.grammar().prefix.clone();
        let mut keywords: Vec<String> = self
            .registry
            .grammar()
            .commands
            .keys()
            .map(|name| format!("{prefix}{name}"))
            .collect();
        keywords.extend(META_COMMANDS.iter().map(|m| (*m).to_string()));
        self.editor.set_keywords(keywords);
    }

    fn print_banner(&self) {
        println!("\x1b[1mchatcmd\x1b[0m {}", env!("CARGO_PKG_VERSION"));
        println!(
            "Type commands like {}give \"iron sword\" 3, or help for a list.",
            self.registry.grammar().prefix
        );
        println!();
    }
}

fn format_error(err: &CommandError) -> String {
    format!("\x1b[31m[{}]\x1b[0m {err}", err.category())
}
