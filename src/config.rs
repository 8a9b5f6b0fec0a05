//! Start-up configuration read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};

pub const SIZE_VAR: &str = "TUI_2048_SIZE";
pub const SEED_VAR: &str = "TUI_2048_SEED";
pub const STORE_VAR: &str = "TUI_2048_STORE";
pub const LOG_VAR: &str = "TUI_2048_LOG";

pub const DEFAULT_STORE_PATH: &str = "tui-2048-scores.json";

/// Where best scores and accounts live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    /// Nothing survives the process (`TUI_2048_STORE=off`).
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub size: usize,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    pub store: StoreLocation,
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            seed: None,
            store: StoreLocation::File(PathBuf::from(DEFAULT_STORE_PATH)),
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Read `TUI_2048_*` variables. Unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`GameConfig::from_env`] but with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let size = var(SIZE_VAR)
            .and_then(|s| s.parse().ok())
            .filter(|n: &usize| (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(n))
            .unwrap_or(DEFAULT_GRID_SIZE);

        let seed = var(SEED_VAR).and_then(|s| s.parse().ok());

        let store = match var(STORE_VAR) {
            Some(s) if s.eq_ignore_ascii_case("off") => StoreLocation::Memory,
            Some(s) => StoreLocation::File(PathBuf::from(s)),
            None => StoreLocation::File(PathBuf::from(DEFAULT_STORE_PATH)),
        };

        let log_path = var(LOG_VAR).map(PathBuf::from);

        Self {
            size,
            seed,
            store,
            log_path,
        }
    }

    /// The configured seed, or one derived from the current time.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0);
            (nanos ^ (nanos >> 32)) as u32
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> GameConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_vars() {
        assert_eq!(config(&[]), GameConfig::default());
    }

    #[test]
    fn test_reads_every_var() {
        let cfg = config(&[
            (SIZE_VAR, "5"),
            (SEED_VAR, "42"),
            (STORE_VAR, "/tmp/scores.json"),
            (LOG_VAR, " game.log "),
        ]);
        assert_eq!(cfg.size, 5);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.seed_or_clock(), 42);
        assert_eq!(cfg.store, StoreLocation::File("/tmp/scores.json".into()));
        assert_eq!(cfg.log_path, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = config(&[(SIZE_VAR, "1"), (SEED_VAR, "-3"), (LOG_VAR, "  ")]);
        assert_eq!(cfg.size, DEFAULT_GRID_SIZE);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.log_path, None);

        assert_eq!(config(&[(SIZE_VAR, "four")]).size, DEFAULT_GRID_SIZE);
    }

    #[test]
    fn test_oversized_board_falls_back() {
        assert_eq!(config(&[(SIZE_VAR, "8192")]).size, DEFAULT_GRID_SIZE);
        assert_eq!(
            config(&[(SIZE_VAR, MAX_GRID_SIZE.to_string().as_str())]).size,
            MAX_GRID_SIZE
        );
        let too_big = (MAX_GRID_SIZE + 1).to_string();
        assert_eq!(config(&[(SIZE_VAR, too_big.as_str())]).size, DEFAULT_GRID_SIZE);
    }

    #[test]
    fn test_store_off_is_memory() {
        assert_eq!(config(&[(STORE_VAR, "off")]).store, StoreLocation::Memory);
        assert_eq!(config(&[(STORE_VAR, "OFF")]).store, StoreLocation::Memory);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = GameConfig::from_env();
    }
}
