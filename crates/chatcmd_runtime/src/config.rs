//! Configuration for the command registry.

/// Configuration for a [`Registry`](crate::Registry).
///
/// Controls how deep subcommand chains may go and how `@r` picks actors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Longest subcommand chain accepted before dispatch fails closed.
    pub max_subcommand_depth: usize,

    /// Seed for the `@r` selector; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_subcommand_depth: 32,
            rng_seed: None,
        }
    }
}

impl RegistryConfig {
    /// Creates a configuration with reproducible `@r` selection.
    #[must_use]
    pub fn deterministic(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Self::default()
        }
    }

    /// Builder method to set the subcommand depth limit.
    #[must_use]
    pub const fn with_max_subcommand_depth(mut self, depth: usize) -> Self {
        self.max_subcommand_depth = depth;
        self
    }

    /// Builder method to set the RNG seed.
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }
}
