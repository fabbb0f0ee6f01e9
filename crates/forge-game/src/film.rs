//! Film store: the camera-capture resource
//!
//! One film is consumed per capture and recharges on a fixed interval up
//! to the cap. While full, the recharge baseline tracks the current time
//! so a freshly spent film always waits the full interval.

use serde::{Deserialize, Serialize};

/// Milliseconds between film recharges
pub const FILM_RECHARGE_INTERVAL_MS: f64 = 15_000.0;

/// Consumable capture counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmStore {
    pub film: u32,
    pub max_film: u32,
    last_recharge_ms: f64,
}

impl FilmStore {
    pub fn new(max_film: u32, now_ms: f64) -> Self {
        Self {
            film: max_film,
            max_film,
            last_recharge_ms: now_ms,
        }
    }

    /// Consume one film. Fails if none remain.
    pub fn consume(&mut self) -> bool {
        if self.film == 0 {
            return false;
        }
        self.film -= 1;
        true
    }

    /// Time-gated recharge, called every tick
    pub fn recharge(&mut self, now_ms: f64) {
        if self.film < self.max_film {
            if now_ms - self.last_recharge_ms > FILM_RECHARGE_INTERVAL_MS {
                self.film += 1;
                self.last_recharge_ms = now_ms;
            }
        } else {
            self.last_recharge_ms = now_ms;
        }
    }
}

impl Default for FilmStore {
    fn default() -> Self {
        Self::new(3, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_fails_at_zero() {
        let mut store = FilmStore::new(2, 0.0);
        assert!(store.consume());
        assert!(store.consume());
        assert!(!store.consume());
        assert_eq!(store.film, 0);
    }

    #[test]
    fn test_recharge_interval() {
        let mut store = FilmStore::new(3, 0.0);
        // Baseline keeps tracking time while full
        store.recharge(100_000.0);
        store.consume();

        store.recharge(114_000.0);
        assert_eq!(store.film, 2);
        store.recharge(115_001.0);
        assert_eq!(store.film, 3);
    }

    #[test]
    fn test_recharge_caps_at_max() {
        let mut store = FilmStore::new(1, 0.0);
        store.recharge(1_000_000.0);
        assert_eq!(store.film, 1);
    }
}
