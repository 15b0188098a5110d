mod defaults;

use crate::cli::EstimateArgs;
use crate::error::{CliError, Result};
use defaults::{DefaultsConfig, MAX_ENSEMBLE_SIZE};
use hydrobead::engine::config::{EstimationConfig, EstimationConfigBuilder, RetryPolicy};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialEnsembleConfig {
    size: Option<usize>,
    seed: Option<u64>,
    #[serde(rename = "max-rejections")]
    max_rejections: Option<u64>,
    #[serde(rename = "timeout-seconds")]
    timeout_seconds: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialEnvironmentConfig {
    temperature: Option<f64>,
    viscosity: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialEstimationConfig {
    ensemble: Option<PartialEnsembleConfig>,
    environment: Option<PartialEnvironmentConfig>,
}

/// Fully resolved settings for one `estimate` invocation.
#[derive(Debug)]
pub struct AppConfig {
    pub core_config: EstimationConfig,
    pub timeout: Option<Duration>,
}

impl PartialEstimationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn merge_with_cli(mut self, args: &EstimateArgs) -> Result<AppConfig> {
        let defaults = DefaultsConfig::default();

        let ensemble = self.ensemble.take().unwrap_or_default();
        let environment = self.environment.take().unwrap_or_default();
        let mut ensemble = PartialEnsembleConfig {
            size: args.ensemble_size.or(ensemble.size),
            seed: args.seed.or(ensemble.seed),
            max_rejections: args.max_rejections.or(ensemble.max_rejections),
            timeout_seconds: args.timeout.or(ensemble.timeout_seconds),
        };
        let mut environment = PartialEnvironmentConfig {
            temperature: args.temperature.or(environment.temperature),
            viscosity: args.viscosity.or(environment.viscosity),
        };
        apply_set_values(&mut ensemble, &mut environment, &args.set_values)?;

        let ensemble_size = ensemble.size.unwrap_or(defaults.ensemble_size);
        if !(1..=MAX_ENSEMBLE_SIZE).contains(&ensemble_size) {
            return Err(CliError::Config(format!(
                "Ensemble size must be between 1 and {}, got {}.",
                MAX_ENSEMBLE_SIZE, ensemble_size
            )));
        }

        let retry_policy = match ensemble.max_rejections {
            Some(max_rejections) => RetryPolicy::Bounded { max_rejections },
            None => RetryPolicy::Unbounded,
        };

        let core_config = EstimationConfigBuilder::new()
            .ensemble_size(ensemble_size)
            .seed(ensemble.seed)
            .retry_policy(retry_policy)
            .temperature(environment.temperature.unwrap_or(defaults.temperature))
            .viscosity(environment.viscosity.unwrap_or(defaults.viscosity))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(AppConfig {
            core_config,
            timeout: ensemble.timeout_seconds.map(Duration::from_secs),
        })
    }
}

fn apply_set_values(
    ensemble: &mut PartialEnsembleConfig,
    environment: &mut PartialEnvironmentConfig,
    set_values: &[String],
) -> Result<()> {
    for kv_pair in set_values {
        let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
            CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            ))
        })?;

        match key {
            "ensemble.size" => ensemble.size = Some(parse_value(key, value_str)?),
            "ensemble.seed" => ensemble.seed = Some(parse_value(key, value_str)?),
            "ensemble.max-rejections" => {
                ensemble.max_rejections = Some(parse_value(key, value_str)?)
            }
            "ensemble.timeout-seconds" => {
                ensemble.timeout_seconds = Some(parse_value(key, value_str)?)
            }
            "environment.temperature" => {
                environment.temperature = Some(parse_value(key, value_str)?)
            }
            "environment.viscosity" => environment.viscosity = Some(parse_value(key, value_str)?),
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key, value_str))
    })
}
