use crate::core::hydrodynamics::{MobilityOracle, RotnePragerYamakawa};
use crate::core::models::bead::BeadModel;
use crate::engine::config::EstimationConfig;
use crate::engine::ensemble::build_ensemble;
use crate::engine::error::EngineError;
use crate::engine::estimator::{RhEstimate, batch_count, estimate_rh_with};
use crate::engine::progress::ProgressReporter;
use crate::engine::units::diffusion_coefficient;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use tracing::{info, instrument};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EstimationResult {
    pub rh: RhEstimate,
    /// Total mass of the parsed sequence in Da.
    pub total_mass: f64,
    pub bead_count: usize,
    pub ensemble_size: usize,
    /// Diffusion coefficient in m²/s, present when an environment was configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffusion_coefficient: Option<f64>,
}

/// Estimates Rh for `model` with the Rotne-Prager-Yamakawa mobility.
pub fn run(
    model: &BeadModel,
    config: &EstimationConfig,
    reporter: &ProgressReporter,
    cancel: Option<&AtomicBool>,
) -> Result<EstimationResult, EngineError> {
    run_with_oracle(model, config, &RotnePragerYamakawa, reporter, cancel)
}

#[instrument(skip_all, name = "estimation_workflow", fields(beads = model.len()))]
pub fn run_with_oracle(
    model: &BeadModel,
    config: &EstimationConfig,
    oracle: &impl MobilityOracle,
    reporter: &ProgressReporter,
    cancel: Option<&AtomicBool>,
) -> Result<EstimationResult, EngineError> {
    if model.is_empty() {
        return Err(EngineError::SingularMatrix { size: 0 });
    }

    let ensemble = reporter.phase(
        "Generating Ensemble",
        config.ensemble_size as u64,
        || {
            build_ensemble(
                &model.steric_radii(),
                config.ensemble_size,
                config.seed,
                &config.generator,
                reporter,
                cancel,
            )
        },
    )?;

    let rh = reporter.phase(
        "Estimating Rh",
        batch_count(ensemble.len(), config.max_batches) as u64,
        || {
            estimate_rh_with(
                &ensemble,
                &model.hydrodynamic_radii(),
                oracle,
                config.max_batches,
                reporter,
            )
        },
    )?;

    let diffusion_coefficient = config
        .environment
        .map(|env| diffusion_coefficient(rh.value, env.temperature, env.viscosity));

    info!(
        "Workflow complete. Rh = {:.4e} from {} conformations.",
        rh.value,
        ensemble.len()
    );
    Ok(EstimationResult {
        rh,
        total_mass: model.total_mass(),
        bead_count: model.len(),
        ensemble_size: ensemble.len(),
        diffusion_coefficient,
    })
}
