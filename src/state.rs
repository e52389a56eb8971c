use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;

use crate::config::Config;

// --- Shared application state ---
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Fresh generator for one request's worth of demo data.
    ///
    /// Seeded from `DEMO_SEED` when configured so responses are
    /// reproducible, otherwise from OS entropy.
    pub fn demo_rng(&self) -> StdRng {
        match self.config.demo_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn state_with_seed(demo_seed: Option<u64>) -> AppState {
        AppState::new(Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allow_origin: "http://localhost:3000".to_string(),
            demo_seed,
        })
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let state = state_with_seed(Some(42));
        let a: Vec<u64> = state.demo_rng().random_iter().take(8).collect();
        let b: Vec<u64> = state.demo_rng().random_iter().take(8).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unseeded_rng_draws_differ() {
        let state = state_with_seed(None);
        let a: u64 = state.demo_rng().random();
        let b: u64 = state.demo_rng().random();
        // Not a guarantee, but a collision here is a 1-in-2^64 event.
        assert_ne!(a, b);
    }
}
