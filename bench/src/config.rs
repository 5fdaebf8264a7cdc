//! Run configuration: compiled-in defaults, overridable through environment
//! variables (a `.env` file is honoured by the binary).
//!
//! | Variable               | Meaning                               | Default |
//! |------------------------|---------------------------------------|---------|
//! | `CALLBENCH_NCALLS`     | calls per runner execution            | 10,000,000 |
//! | `CALLBENCH_ROUNDS`     | timed samples per configuration       | 5       |
//! | `CALLBENCH_NUMBER`     | runner executions per sample          | 1       |
//! | `CALLBENCH_SEED`       | RNG seed for argument generation      | random  |
//! | `CALLBENCH_LOOKUPS`    | comma list of `local,constant,holder` | all     |
//! | `CALLBENCH_LOG_LEVEL`  | `off`..`trace`                        | `info`  |
//! | `CALLBENCH_LOG_FILE`   | also log to this file                 | unset   |

use crate::workload::Lookup;
use anyhow::{ensure, Context, Result};
use bench_core::constants::{DEFAULT_NCALLS, DEFAULT_NUMBER, DEFAULT_ROUNDS};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub ncalls: u64,
    pub rounds: usize,
    pub number: usize,
    pub seed: Option<u64>,
    pub lookups: Vec<Lookup>,
    pub log_level: LevelFilter,
    pub log_file: Option<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            ncalls: DEFAULT_NCALLS,
            rounds: DEFAULT_ROUNDS,
            number: DEFAULT_NUMBER,
            seed: None,
            lookups: Lookup::ALL.to_vec(),
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl BenchConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key/value source. Missing or blank
    /// values keep their defaults.
    pub fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = parse_var(&var, "CALLBENCH_NCALLS")? {
            config.ncalls = v;
        }
        if let Some(v) = parse_var(&var, "CALLBENCH_ROUNDS")? {
            config.rounds = v;
        }
        if let Some(v) = parse_var(&var, "CALLBENCH_NUMBER")? {
            config.number = v;
        }
        config.seed = parse_var(&var, "CALLBENCH_SEED")?;
        if let Some(raw) = var("CALLBENCH_LOOKUPS") {
            config.lookups = parse_lookups(&raw).context("invalid CALLBENCH_LOOKUPS")?;
        }
        if let Some(v) = parse_var(&var, "CALLBENCH_LOG_LEVEL")? {
            config.log_level = v;
        }
        config.log_file = var("CALLBENCH_LOG_FILE").map(|s| s.trim().to_string());

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.rounds >= 1, "rounds must be at least 1");
        ensure!(self.number >= 1, "number must be at least 1");
        ensure!(!self.lookups.is_empty(), "at least one lookup pattern is required");
        Ok(())
    }

    /// Argument generator for a run: deterministic when a seed is configured.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Applies the nearest `.env` file to the process environment. A missing file
/// is not an error; a malformed one is.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).context("failed to load .env"),
    }
}

/// Like [`load_dotenv`] for an explicit path. Returns whether the file existed.
pub fn load_dotenv_from(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to load {}", path.display())),
    }
}

fn parse_var<T, F>(var: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("invalid {key}='{raw}': {e}")),
    }
}

/// Parses a comma-separated list, dropping duplicates while keeping order.
pub fn parse_lookups(raw: &str) -> Result<Vec<Lookup>> {
    let mut lookups = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let lookup: Lookup = part.parse()?;
        if !lookups.contains(&lookup) {
            lookups.push(lookup);
        }
    }
    Ok(lookups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_source_yields_defaults() {
        let config = BenchConfig::from_source(source(&[])).unwrap();
        assert_eq!(config, BenchConfig::default());
        assert_eq!(config.ncalls, DEFAULT_NCALLS);
        assert_eq!(config.rounds, DEFAULT_ROUNDS);
        assert_eq!(config.lookups, Lookup::ALL.to_vec());
    }

    #[test]
    fn overrides_are_applied() {
        let config = BenchConfig::from_source(source(&[
            ("CALLBENCH_NCALLS", "1000"),
            ("CALLBENCH_ROUNDS", " 3 "),
            ("CALLBENCH_NUMBER", "2"),
            ("CALLBENCH_SEED", "42"),
            ("CALLBENCH_LOOKUPS", "holder,local"),
            ("CALLBENCH_LOG_LEVEL", "debug"),
            ("CALLBENCH_LOG_FILE", "bench.log"),
        ]))
        .unwrap();

        assert_eq!(config.ncalls, 1000);
        assert_eq!(config.rounds, 3);
        assert_eq!(config.number, 2);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.lookups, vec![Lookup::Holder, Lookup::Local]);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file.as_deref(), Some("bench.log"));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = BenchConfig::from_source(source(&[
            ("CALLBENCH_ROUNDS", "  "),
            ("CALLBENCH_LOG_FILE", ""),
        ]))
        .unwrap();
        assert_eq!(config.rounds, DEFAULT_ROUNDS);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn malformed_number_names_the_variable() {
        let err = BenchConfig::from_source(source(&[("CALLBENCH_NCALLS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("CALLBENCH_NCALLS"));
    }

    #[test]
    fn zero_rounds_rejected() {
        assert!(BenchConfig::from_source(source(&[("CALLBENCH_ROUNDS", "0")])).is_err());
    }

    #[test]
    fn unknown_lookup_rejected() {
        let err =
            BenchConfig::from_source(source(&[("CALLBENCH_LOOKUPS", "local,global")])).unwrap_err();
        assert!(format!("{err:#}").contains("global"));
    }

    #[test]
    fn duplicate_lookups_collapse() {
        let lookups = parse_lookups("local, constant,local,,").unwrap();
        assert_eq!(lookups, vec![Lookup::Local, Lookup::Constant]);
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("callbench-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_env_file_is_not_an_error() {
        let dir = scratch_dir("no-dotenv");
        assert!(!load_dotenv_from(&dir.join(".env")).unwrap());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn valid_env_file_is_applied() {
        let dir = scratch_dir("good-dotenv");
        let path = dir.join(".env");
        std::fs::write(&path, "CALLBENCH_DOTENV_GOOD_TEST=applied\n").unwrap();

        assert!(load_dotenv_from(&path).unwrap());
        assert_eq!(env::var("CALLBENCH_DOTENV_GOOD_TEST").unwrap(), "applied");
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn malformed_env_file_is_an_error() {
        let dir = scratch_dir("bad-dotenv");
        let path = dir.join(".env");
        std::fs::write(
            &path,
            "CALLBENCH_DOTENV_BAD_TEST=1\nthis line is not valid = = \"\n",
        )
        .unwrap();

        let err = load_dotenv_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains(".env"), "unexpected error: {err:#}");
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = BenchConfig {
            seed: Some(9),
            ..BenchConfig::default()
        };
        let mut a = config.rng();
        let mut b = config.rng();
        for _ in 0..8 {
            assert_eq!(a.gen::<u64>(), b.gen::<u64>());
        }
    }
}
