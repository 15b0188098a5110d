use thiserror::Error;

/// Fractional interpenetration tolerated between beads on opposite sides of a split.
pub const DEFAULT_STERIC_MARGIN: f64 = 0.001;
/// Upper bound on the number of batches used for the sampling error.
pub const DEFAULT_MAX_BATCHES: usize = 20;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Keep regenerating until a valid chain is found.
    #[default]
    Unbounded,
    /// Fail once this many joins have been rejected while building one chain.
    Bounded { max_rejections: u64 },
}

/// Where the right half of a split is attached when two halves are joined.
///
/// Both halves are generated in their own frame with their first bead at the
/// origin. The join direction `u` is random and the join length is always
/// `r_last_left + r_first_right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinAnchor {
    /// The right half is shifted by `(r_last_left + r_first_right) * u` in its
    /// own frame, so its first bead ends up that far from the first left bead.
    /// A split range that starts with a bead larger than the bead before the
    /// split point cannot be packed this way and retries forever under
    /// [`RetryPolicy::Unbounded`].
    #[default]
    Origin,
    /// The first right bead is placed at `p_last_left + (r_last_left + r_first_right) * u`,
    /// so consecutive beads along the chain are in contact.
    LastBead,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub margin: f64,
    pub retry_policy: RetryPolicy,
    pub join_anchor: JoinAnchor,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_STERIC_MARGIN,
            retry_policy: RetryPolicy::Unbounded,
            join_anchor: JoinAnchor::Origin,
        }
    }
}

/// Solvent conditions for converting a radius into a diffusion coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentConfig {
    /// Temperature in Kelvin.
    pub temperature: f64,
    /// Viscosity in centipoise.
    pub viscosity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimationConfig {
    pub ensemble_size: usize,
    pub seed: Option<u64>,
    pub max_batches: usize,
    pub generator: GeneratorConfig,
    pub environment: Option<EnvironmentConfig>,
}

#[derive(Default)]
pub struct EstimationConfigBuilder {
    ensemble_size: Option<usize>,
    seed: Option<u64>,
    max_batches: Option<usize>,
    margin: Option<f64>,
    retry_policy: Option<RetryPolicy>,
    join_anchor: Option<JoinAnchor>,
    temperature: Option<f64>,
    viscosity: Option<f64>,
}

impl EstimationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensemble_size(mut self, size: usize) -> Self {
        self.ensemble_size = Some(size);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    pub fn max_batches(mut self, batches: usize) -> Self {
        self.max_batches = Some(batches);
        self
    }
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = Some(margin);
        self
    }
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }
    pub fn join_anchor(mut self, anchor: JoinAnchor) -> Self {
        self.join_anchor = Some(anchor);
        self
    }
    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn viscosity(mut self, centipoise: f64) -> Self {
        self.viscosity = Some(centipoise);
        self
    }

    pub fn build(self) -> Result<EstimationConfig, ConfigError> {
        let ensemble_size = self
            .ensemble_size
            .ok_or(ConfigError::MissingParameter("ensemble_size"))?;
        if ensemble_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "ensemble_size",
                reason: "at least one conformation is required".to_string(),
            });
        }

        let max_batches = self.max_batches.unwrap_or(DEFAULT_MAX_BATCHES);
        if max_batches == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_batches",
                reason: "at least one batch is required".to_string(),
            });
        }

        let margin = self.margin.unwrap_or(DEFAULT_STERIC_MARGIN);
        if !(0.0..1.0).contains(&margin) {
            return Err(ConfigError::InvalidParameter {
                name: "margin",
                reason: format!("{margin} is outside [0, 1)"),
            });
        }

        let environment = match (self.temperature, self.viscosity) {
            (None, None) => None,
            (Some(temperature), Some(viscosity)) => {
                require_positive("temperature", temperature)?;
                require_positive("viscosity", viscosity)?;
                Some(EnvironmentConfig {
                    temperature,
                    viscosity,
                })
            }
            (Some(_), None) => return Err(ConfigError::MissingParameter("viscosity")),
            (None, Some(_)) => return Err(ConfigError::MissingParameter("temperature")),
        };

        Ok(EstimationConfig {
            ensemble_size,
            seed: self.seed,
            max_batches,
            generator: GeneratorConfig {
                margin,
                retry_policy: self.retry_policy.unwrap_or_default(),
                join_anchor: self.join_anchor.unwrap_or_default(),
            },
            environment,
        })
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("{value} is not a finite positive number"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = EstimationConfigBuilder::new()
            .ensemble_size(30)
            .build()
            .unwrap();
        assert_eq!(config.ensemble_size, 30);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_batches, 20);
        assert_eq!(config.generator.margin, 0.001);
        assert_eq!(config.generator.retry_policy, RetryPolicy::Unbounded);
        assert_eq!(config.generator.join_anchor, JoinAnchor::Origin);
        assert!(config.environment.is_none());
    }

    #[test]
    fn missing_ensemble_size_is_reported() {
        let result = EstimationConfigBuilder::new().build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("ensemble_size"))
        );
    }

    #[test]
    fn zero_ensemble_size_is_rejected() {
        let result = EstimationConfigBuilder::new().ensemble_size(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "ensemble_size", .. })
        ));
    }

    #[test]
    fn environment_requires_both_temperature_and_viscosity() {
        let result = EstimationConfigBuilder::new()
            .ensemble_size(1)
            .temperature(300.0)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("viscosity")));

        let config = EstimationConfigBuilder::new()
            .ensemble_size(1)
            .temperature(300.0)
            .viscosity(1.0)
            .build()
            .unwrap();
        assert_eq!(
            config.environment,
            Some(EnvironmentConfig {
                temperature: 300.0,
                viscosity: 1.0
            })
        );
    }

    #[test]
    fn non_positive_viscosity_is_rejected() {
        let result = EstimationConfigBuilder::new()
            .ensemble_size(1)
            .temperature(300.0)
            .viscosity(0.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "viscosity", .. })
        ));
    }

    #[test]
    fn margin_outside_unit_interval_is_rejected() {
        let result = EstimationConfigBuilder::new()
            .ensemble_size(1)
            .margin(1.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "margin", .. })
        ));
    }

    #[test]
    fn bounded_retry_policy_is_kept() {
        let config = EstimationConfigBuilder::new()
            .ensemble_size(4)
            .seed(Some(9))
            .retry_policy(RetryPolicy::Bounded {
                max_rejections: 100,
            })
            .build()
            .unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(
            config.generator.retry_policy,
            RetryPolicy::Bounded {
                max_rejections: 100
            }
        );
    }
}
