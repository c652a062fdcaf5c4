//! Subcommand resolution.
//!
//! Subcommand names are only recognized at computed candidate positions,
//! never anywhere in the token stream, so an argument value that happens to
//! spell a subcommand name is still bound as an argument.
//!
//! Positions index the tokens that follow the command name.

use chatcmd_foundation::{CommandError, ErrorKind, Result};

use crate::grammar::{CommandSpec, MAIN_WINDOW, SubCommandSpec};

/// The subcommand path found in the input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubcommandMatch {
    /// Matched names, root to leaf, lower-cased.
    pub chain: Vec<String>,
    /// Token position of each matched name, parallel to `chain`.
    pub positions: Vec<usize>,
}

impl SubcommandMatch {
    /// Returns true if no subcommand was matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Iterates `(name, position)` pairs in chain order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.chain
            .iter()
            .map(String::as_str)
            .zip(self.positions.iter().copied())
    }
}

/// Computes the positions at which a subcommand name may appear.
///
/// The first candidate is the length of the main window. Then, for every
/// token from there on that equals (case-sensitively) a declared
/// subcommand window key, `i + window length + 1` is a candidate if it is
/// inside the token list. Commands without any argument windows have no
/// candidates.
#[must_use]
pub fn candidate_positions(spec: &CommandSpec, tokens: &[String]) -> Vec<usize> {
    let Some(windows) = spec.allowed_arguments.as_ref() else {
        return Vec::new();
    };

    let start = spec.main_window().len();
    let mut positions = vec![start];

    for (i, token) in tokens.iter().enumerate().skip(start) {
        for (slot, names) in windows {
            if slot != MAIN_WINDOW && slot == token {
                let next = i + names.len() + 1;
                if next < tokens.len() {
                    positions.push(next);
                }
            }
        }
    }

    positions
}

/// Walks the subcommand tree along the candidate positions.
///
/// Candidates are visited in ascending order, each at most once. At each
/// one the lower-cased token is tested against the children of the current
/// level; a hit extends the chain and descends, a miss is an error only
/// when the current level is required.
///
/// # Errors
///
/// - `MissingSubcommand` if the root is required and nothing matched
/// - `UnknownSubcommand` if a required level sees a token it does not know
/// - `MissingNestedSubcommand` if a matched subcommand needs a child and
///   none follows it
/// - `DepthExceeded` if the chain grows past `max_depth`
pub fn match_chain(
    tokens: &[String],
    candidates: &[usize],
    root: &SubCommandSpec,
    max_depth: usize,
) -> Result<SubcommandMatch> {
    if candidates.is_empty() && root.required {
        return Err(CommandError::new(ErrorKind::MissingSubcommand {
            available: root.names(),
        }));
    }

    let mut ordered = candidates.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    let mut matched = SubcommandMatch::default();
    let mut node = root;

    for position in ordered {
        let Some(token) = tokens.get(position) else {
            continue;
        };
        let name = token.to_lowercase();

        if let Some(child) = node.child(&name) {
            if matched.chain.len() >= max_depth {
                return Err(CommandError::new(ErrorKind::DepthExceeded { limit: max_depth }));
            }
            if child.required && position + 1 == tokens.len() {
                return Err(CommandError::new(ErrorKind::MissingNestedSubcommand {
                    parent: name,
                }));
            }
            matched.chain.push(name);
            matched.positions.push(position);
            node = child;
        } else if node.required {
            return Err(CommandError::new(ErrorKind::UnknownSubcommand {
                name,
                available: node.names(),
            }));
        }
    }

    if node.required && !node.commands.is_empty() {
        let kind = match matched.chain.last() {
            Some(parent) => ErrorKind::MissingNestedSubcommand {
                parent: parent.clone(),
            },
            None => ErrorKind::MissingSubcommand {
                available: node.names(),
            },
        };
        return Err(CommandError::new(kind));
    }

    Ok(matched)
}
