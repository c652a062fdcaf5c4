//! Syntax highlighting for the REPL.

use std::borrow::Cow;

const RESET: &str = "\x1b[0m";
const PREFIX: &str = "\x1b[1;32m";
const SELECTOR: &str = "\x1b[36m";
const QUOTED: &str = "\x1b[33m";
const NUMBER: &str = "\x1b[35m";

/// Highlighter for chat command lines.
///
/// Colors the prefix, `@` selectors, quoted spans, and numbers. Lines that
/// do not start with the prefix are REPL meta commands and pass through
/// unchanged.
pub struct CommandHighlighter {
    prefix: String,
}

impl CommandHighlighter {
    /// Creates a highlighter for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Highlight a line of input.
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let Some(rest) = line.strip_prefix(self.prefix.as_str()) else {
            return Cow::Borrowed(line);
        };
        if self.prefix.is_empty() {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len() * 2);
        result.push_str(PREFIX);
        result.push_str(&self.prefix);
        result.push_str(RESET);

        let mut quote: Option<char> = None;
        let mut word = String::new();
        for c in rest.chars() {
            match quote {
                Some(q) => {
                    result.push(c);
                    if c == q {
                        result.push_str(RESET);
                        quote = None;
                    }
                }
                None if c == '"' || c == '\'' => {
                    flush_word(&mut word, &mut result);
                    result.push_str(QUOTED);
                    result.push(c);
                    quote = Some(c);
                }
                None if c.is_whitespace() => {
                    flush_word(&mut word, &mut result);
                    result.push(c);
                }
                None => word.push(c),
            }
        }
        flush_word(&mut word, &mut result);
        if quote.is_some() {
            result.push_str(RESET);
        }

        Cow::Owned(result)
    }
}

fn flush_word(word: &mut String, out: &mut String) {
    if word.is_empty() {
        return;
    }
    let color = if word.starts_with('@') {
        Some(SELECTOR)
    } else if word.parse::<f64>().is_ok() {
        Some(NUMBER)
    } else {
        None
    };
    match color {
        Some(color) => {
            out.push_str(color);
            out.push_str(word);
            out.push_str(RESET);
        }
        None => out.push_str(word),
    }
    word.clear();
}
