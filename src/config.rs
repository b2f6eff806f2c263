//! Configuration module

use serde::{Deserialize, Serialize};

use crate::error::BenchError;
use crate::types::Workload;

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timed trials per workload
    pub runs: u32,

    /// Untimed trials run before measuring
    pub warmup_trials: u32,

    /// Workloads to run, in order
    pub workloads: Vec<Workload>,

    /// Element count override applied to every workload
    pub len: Option<usize>,

    /// Worker threads; `None` lets rayon size the pool
    pub threads: Option<usize>,

    pub report_format: ReportFormat,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_output: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runs: 1000,
            warmup_trials: 0,
            workloads: vec![Workload::Integer],
            len: None,
            threads: None,
            report_format: ReportFormat::Text,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load config from environment
    pub fn from_env() -> anyhow::Result<Self> {
        // Try to load from file first
        let config_path = std::env::var("PAR_BENCH_CONFIG")
            .unwrap_or_else(|_| "config/par-bench.json".to_string());

        let mut config = if std::path::Path::new(&config_path).exists() {
            Self::load(&config_path)?
        } else {
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a JSON file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `PAR_BENCH_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), BenchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(runs) = lookup("PAR_BENCH_RUNS") {
            self.runs = parse_number("PAR_BENCH_RUNS", &runs)?;
        }
        if let Some(threads) = lookup("PAR_BENCH_THREADS") {
            self.threads = Some(parse_number("PAR_BENCH_THREADS", &threads)?);
        }
        if let Some(len) = lookup("PAR_BENCH_LEN") {
            self.len = Some(parse_number("PAR_BENCH_LEN", &len)?);
        }
        if let Some(list) = lookup("PAR_BENCH_WORKLOADS") {
            self.workloads = if list.trim().eq_ignore_ascii_case("all") {
                Workload::ALL.to_vec()
            } else {
                list.split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(str::parse::<Workload>)
                    .collect::<Result<Vec<_>, BenchError>>()?
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.runs == 0 {
            return Err(BenchError::InvalidTrialCount);
        }
        if self.workloads.is_empty() {
            return Err(BenchError::Config("no workloads selected".to_string()));
        }
        if self.threads == Some(0) {
            return Err(BenchError::Config("threads must be at least 1".to_string()));
        }
        if self.len == Some(0) {
            return Err(BenchError::Config("len must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Element count for a workload after applying the global override
    pub fn len_for(&self, workload: Workload) -> usize {
        self.len.unwrap_or_else(|| workload.default_len())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, BenchError> {
    value
        .trim()
        .parse()
        .map_err(|_| BenchError::Config(format!("{} is not a valid number: '{}'", key, value)))
}
