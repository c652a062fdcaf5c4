//! Input tokenization.
//!
//! Converts a raw chat line into the flat list of tokens that follow the
//! prefix: `!give "iron sword" 3` becomes `["give", "iron sword", "3"]`.

use chatcmd_foundation::{CommandError, ErrorKind, Result};

/// Selector tokens that pass through untouched.
pub const RESERVED_TOKENS: [&str; 5] = ["@a", "@p", "@r", "@s", "@e"];

/// Returns true if `token` is one of the [`RESERVED_TOKENS`].
#[must_use]
pub fn is_reserved(token: &str) -> bool {
    RESERVED_TOKENS.contains(&token)
}

/// Tokenizes chat input.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Strips `prefix` from `input` and splits the rest into tokens.
    ///
    /// - Whitespace separates tokens
    /// - `"..."` and `'...'` spans are single tokens, quotes removed
    /// - A leading `@` is removed, except on reserved selector tokens
    /// - Empty tokens are dropped
    ///
    /// # Errors
    ///
    /// Returns an `InvalidSyntax` error if `input` does not start with
    /// `prefix` or nothing but whitespace follows it.
    pub fn tokenize(input: &str, prefix: &str) -> Result<Vec<String>> {
        let Some(rest) = input.strip_prefix(prefix) else {
            return Err(CommandError::new(ErrorKind::MissingPrefix {
                prefix: prefix.to_string(),
            }));
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(CommandError::new(ErrorKind::EmptyInput));
        }

        Ok(Self::split(rest)
            .into_iter()
            .filter_map(|part| Self::clean(&part))
            .collect())
    }

    /// Splits text into raw parts; quoted spans keep their quotes.
    fn split(text: &str) -> Vec<String> {
        let mut parts = Vec::new();
        let mut chars = text.chars();
        let mut current = String::new();

        while let Some(ch) = chars.next() {
            match ch {
                '"' | '\'' => {
                    if !current.is_empty() {
                        parts.push(std::mem::take(&mut current));
                    }
                    let mut span = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == ch {
                            closed = true;
                            break;
                        }
                        span.push(c);
                    }
                    if closed {
                        parts.push(format!("{ch}{span}{ch}"));
                    } else {
                        // An unmatched quote is dropped; the rest splits normally.
                        parts.extend(Self::split(&span));
                    }
                }
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        parts.push(std::mem::take(&mut current));
                    }
                }
                c => current.push(c),
            }
        }

        if !current.is_empty() {
            parts.push(current);
        }

        parts
    }

    /// Applies the cleanup rules to one raw part.
    fn clean(part: &str) -> Option<String> {
        if is_reserved(part) {
            return Some(part.to_string());
        }

        let part = part.strip_prefix('@').unwrap_or(part);
        let part = part.strip_prefix(['"', '\'']).unwrap_or(part);
        let part = part.strip_suffix(['"', '\'']).unwrap_or(part);
        let part = part.trim();

        if part.is_empty() {
            None
        } else {
            Some(part.to_string())
        }
    }
}
