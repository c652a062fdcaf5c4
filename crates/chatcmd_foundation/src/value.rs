//! Declared argument types and the typed values bound to them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::actor::ActorId;

/// The type an argument is declared with.
///
/// With the `serde` feature it serializes as a snake-case name and
/// deserializes from that name, from `player`, or from the integer codes
/// `0` to `3` in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArgumentType {
    /// Free text, bound verbatim.
    String,
    /// A finite floating point number.
    Number,
    /// `true` or `false`, case-insensitive.
    Boolean,
    /// A selector (`@a`, `@p`, `@r`, `@s`, `@e`) or an exact actor name.
    EntitySelector,
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::ArgumentType;
    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserialize, Deserializer};
    use std::fmt;

    const NAMES: &[&str] = &["string", "number", "boolean", "entity_selector", "player"];

    impl<'de> Deserialize<'de> for ArgumentType {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct ArgumentTypeVisitor;

            impl Visitor<'_> for ArgumentTypeVisitor {
                type Value = ArgumentType;

                fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                    formatter.write_str("an argument type name or an integer code from 0 to 3")
                }

                fn visit_u64<E>(self, code: u64) -> std::result::Result<ArgumentType, E>
                where
                    E: de::Error,
                {
                    match code {
                        0 => Ok(ArgumentType::String),
                        1 => Ok(ArgumentType::Number),
                        2 => Ok(ArgumentType::Boolean),
                        3 => Ok(ArgumentType::EntitySelector),
                        _ => Err(E::invalid_value(Unexpected::Unsigned(code), &self)),
                    }
                }

                fn visit_i64<E>(self, code: i64) -> std::result::Result<ArgumentType, E>
                where
                    E: de::Error,
                {
                    match u64::try_from(code) {
                        Ok(code) => self.visit_u64(code),
                        Err(_) => Err(E::invalid_value(Unexpected::Signed(code), &self)),
                    }
                }

                fn visit_str<E>(self, name: &str) -> std::result::Result<ArgumentType, E>
                where
                    E: de::Error,
                {
                    match name {
                        "string" => Ok(ArgumentType::String),
                        "number" => Ok(ArgumentType::Number),
                        "boolean" => Ok(ArgumentType::Boolean),
                        "entity_selector" | "player" => Ok(ArgumentType::EntitySelector),
                        _ => Err(E::unknown_variant(name, NAMES)),
                    }
                }
            }

            deserializer.deserialize_any(ArgumentTypeVisitor)
        }
    }
}

impl ArgumentType {
    /// Placeholder shown in usage lines (`<name:placeholder>`).
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::String => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::EntitySelector => "player",
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::EntitySelector => "entity selector",
        };
        f.write_str(name)
    }
}

/// A typed argument value.
///
/// Entity selectors resolve either to a single actor (`@s`, `@p`, `@r`, a
/// name) or to a list (`@a`, `@e`); both report
/// [`ArgumentType::EntitySelector`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ArgumentValue {
    /// Boolean value.
    Boolean(bool),
    /// Numeric value (always finite).
    Number(f64),
    /// String value.
    String(String),
    /// A single resolved actor.
    Actor(ActorId),
    /// Every actor a multi-target selector resolved to.
    Actors(Vec<ActorId>),
}

impl ArgumentValue {
    /// Returns the declared type this value satisfies.
    #[must_use]
    pub const fn argument_type(&self) -> ArgumentType {
        match self {
            Self::Boolean(_) => ArgumentType::Boolean,
            Self::Number(_) => ArgumentType::Number,
            Self::String(_) => ArgumentType::String,
            Self::Actor(_) | Self::Actors(_) => ArgumentType::EntitySelector,
        }
    }

    /// Returns the string, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric value.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the actor, if this is a single-actor value.
    #[must_use]
    pub const fn as_actor(&self) -> Option<ActorId> {
        match self {
            Self::Actor(a) => Some(*a),
            _ => None,
        }
    }

    /// Returns every actor this value refers to.
    ///
    /// Single-actor values yield one element; non-actor values yield none.
    #[must_use]
    pub fn actors(&self) -> Vec<ActorId> {
        match self {
            Self::Actor(a) => vec![*a],
            Self::Actors(list) => list.clone(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Actor(a) => write!(f, "{a}"),
            Self::Actors(list) => {
                f.write_str("[")?;
                for (i, a) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for ArgumentValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for ArgumentValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for ArgumentValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for ArgumentValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<ActorId> for ArgumentValue {
    fn from(a: ActorId) -> Self {
        Self::Actor(a)
    }
}
