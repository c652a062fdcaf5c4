//! Argument conversion.
//!
//! Turns a token into a typed [`ArgumentValue`] according to the declared
//! [`ArgumentType`]. Failures are reported as [`ConversionFailure`]; a
//! panicking resolver is caught and reported the same way.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Mutex, PoisonError};

use chatcmd_foundation::{ActorId, ArgumentType, ArgumentValue};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::directory::ActorResolver;

/// Why a token could not be converted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionFailure {
    /// The token is not a finite number.
    #[error("not a finite number")]
    NotANumber,
    /// The token is neither `true` nor `false`.
    #[error("not a boolean")]
    NotABoolean,
    /// No actor with that exact name is known.
    #[error("no actor named \"{0}\"")]
    UnknownActor(String),
    /// A selector needed at least one actor in scope.
    #[error("no actors in scope")]
    NoActorsInScope,
    /// The invoking actor has no position to measure from.
    #[error("invoking actor has no position")]
    NoPosition,
    /// The resolver panicked.
    #[error("actor resolver failed")]
    ResolverPanicked,
}

/// Converts tokens to typed values.
///
/// Holds the RNG behind `@r`; seed it for reproducible selection.
#[derive(Debug)]
pub struct ArgumentConverter {
    rng: Mutex<ChaCha8Rng>,
}

impl Default for ArgumentConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentConverter {
    /// Creates a converter seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Creates a converter with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Converts `token` to a value of type `kind`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionFailure`] if the token does not denote a value
    /// of the requested type.
    pub fn convert(
        &self,
        actor: ActorId,
        token: &str,
        kind: ArgumentType,
        resolver: &dyn ActorResolver,
    ) -> Result<ArgumentValue, ConversionFailure> {
        match kind {
            ArgumentType::String => Ok(ArgumentValue::String(token.to_string())),
            ArgumentType::Number => parse_number(token).map(ArgumentValue::Number),
            ArgumentType::Boolean => parse_bool(token).map(ArgumentValue::Boolean),
            ArgumentType::EntitySelector => {
                catch_unwind(AssertUnwindSafe(|| self.select(actor, token, resolver)))
                    .unwrap_or(Err(ConversionFailure::ResolverPanicked))
            }
        }
    }

    fn select(
        &self,
        actor: ActorId,
        token: &str,
        resolver: &dyn ActorResolver,
    ) -> Result<ArgumentValue, ConversionFailure> {
        match token {
            "@a" => Ok(ArgumentValue::Actors(resolver.actors())),
            "@p" => nearest(actor, resolver).map(ArgumentValue::Actor),
            "@r" => {
                let actors = resolver.actors();
                if actors.is_empty() {
                    return Err(ConversionFailure::NoActorsInScope);
                }
                let idx = self
                    .rng
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .gen_range(0..actors.len());
                Ok(ArgumentValue::Actor(actors[idx]))
            }
            "@s" => Ok(ArgumentValue::Actor(actor)),
            "@e" => Ok(ArgumentValue::Actors(resolver.local_actors(actor))),
            name => resolver
                .find_by_name(name)
                .map(ArgumentValue::Actor)
                .ok_or_else(|| ConversionFailure::UnknownActor(name.to_string())),
        }
    }
}

/// Decimal or scientific notation, or an unsigned `0x`, `0o` or `0b`
/// integer literal.
fn parse_number(token: &str) -> Result<f64, ConversionFailure> {
    let token = token.trim();
    radix_literal(token)
        .or_else(|| token.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .ok_or(ConversionFailure::NotANumber)
}

fn radix_literal(token: &str) -> Option<f64> {
    let prefix = token.get(..2)?;
    let radix = match prefix.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &token[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

fn parse_bool(token: &str) -> Result<bool, ConversionFailure> {
    if token.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConversionFailure::NotABoolean)
    }
}

/// Nearest actor to `actor`; ties go to the earlier actor in scope order.
fn nearest(actor: ActorId, resolver: &dyn ActorResolver) -> Result<ActorId, ConversionFailure> {
    let origin = resolver.position(actor).ok_or(ConversionFailure::NoPosition)?;

    let mut best: Option<(ActorId, f64)> = None;
    for candidate in resolver.actors() {
        let Some(pos) = resolver.position(candidate) else {
            continue;
        };
        let dist = origin.distance_squared(pos);
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }

    best.map(|(id, _)| id).ok_or(ConversionFailure::NoActorsInScope)
}
