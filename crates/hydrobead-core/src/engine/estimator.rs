use crate::core::hydrodynamics::{MobilityMatrix, MobilityOracle};
use crate::core::models::conformation::{ChainConformation, Ensemble};
use crate::engine::config::DEFAULT_MAX_BATCHES;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use serde::Serialize;
use std::f64::consts::PI;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Effective hydrodynamic radius of the whole chain, in the length unit of the
/// bead radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RhEstimate {
    pub value: f64,
    /// Standard deviation of the per-batch estimates. `None` when fewer than
    /// three batches were available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_error: Option<f64>,
}

impl RhEstimate {
    /// Sampling error relative to the estimate.
    pub fn relative_error(&self) -> Option<f64> {
        self.standard_error.map(|error| error / self.value)
    }
}

/// Number of interleaved batches used for an ensemble of `ensemble_size`:
/// half the ensemble size, at least one, at most `max_batches`.
pub fn batch_count(ensemble_size: usize, max_batches: usize) -> usize {
    (ensemble_size / 2).clamp(1, max_batches.max(1))
}

/// Radius from an averaged mobility matrix: the sum of all entries of the
/// inverse of the block-trace matrix, divided by `2 pi`.
pub fn rh_from_mobility(mean_mobility: &MobilityMatrix) -> Result<f64, EngineError> {
    let size = mean_mobility.size();
    if size == 0 {
        return Err(EngineError::SingularMatrix { size });
    }
    let inverse = mean_mobility
        .trace_matrix()
        .try_inverse()
        .ok_or(EngineError::SingularMatrix { size })?;
    Ok(inverse.sum() / (2.0 * PI))
}

/// Radius from the mobility averaged over the given conformations.
pub fn rh_from_conformations(
    conformations: &[&ChainConformation],
    radii: &[f64],
    oracle: &impl MobilityOracle,
) -> Result<f64, EngineError> {
    if conformations.is_empty() {
        return Err(EngineError::EmptyEnsemble);
    }
    let mut mean = sum_mobilities(conformations, radii, oracle)?;
    mean /= conformations.len() as f64;
    rh_from_mobility(&mean)
}

/// Estimates the radius of an ensemble and its sampling error using at most
/// [`DEFAULT_MAX_BATCHES`] batches.
pub fn estimate_rh(
    ensemble: &Ensemble,
    radii: &[f64],
    oracle: &impl MobilityOracle,
) -> Result<RhEstimate, EngineError> {
    estimate_rh_with(
        ensemble,
        radii,
        oracle,
        DEFAULT_MAX_BATCHES,
        &ProgressReporter::new(),
    )
}

/// Estimates the radius of an ensemble and its sampling error.
///
/// Every conformation is evaluated once and its mobility accumulated into its
/// interleaved batch. The full-ensemble estimate uses the pooled mean of all
/// batches; the sampling error is the (population) standard deviation of the
/// per-batch estimates. A `TaskIncrement` is reported after each batch.
#[instrument(skip_all, name = "rh_estimator", fields(ensemble_size = ensemble.len(), beads = radii.len()))]
pub fn estimate_rh_with(
    ensemble: &Ensemble,
    radii: &[f64],
    oracle: &impl MobilityOracle,
    max_batches: usize,
    reporter: &ProgressReporter,
) -> Result<RhEstimate, EngineError> {
    if ensemble.is_empty() {
        return Err(EngineError::EmptyEnsemble);
    }
    if radii.is_empty() {
        return Err(EngineError::SingularMatrix { size: 0 });
    }

    let batches = batch_count(ensemble.len(), max_batches);
    debug!(batches, "Evaluating mobility tensors per batch.");

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..batches;

    #[cfg(feature = "parallel")]
    let iterator = (0..batches).into_par_iter();

    let batch_sums = iterator
        .map(|index| {
            let members = ensemble.batch(index, batches);
            let sum = sum_mobilities(&members, radii, oracle)?;
            reporter.report(Progress::TaskIncrement);
            Ok((sum, members.len()))
        })
        .collect::<Result<Vec<(MobilityMatrix, usize)>, EngineError>>()?;

    let mut pooled = MobilityMatrix::zeros(radii.len());
    for (sum, _) in &batch_sums {
        pooled += sum;
    }
    pooled /= ensemble.len() as f64;
    let value = rh_from_mobility(&pooled)?;

    let batch_values = batch_sums
        .into_iter()
        .map(|(mut sum, count)| {
            sum /= count as f64;
            rh_from_mobility(&sum)
        })
        .collect::<Result<Vec<f64>, EngineError>>()?;

    let standard_error = if batch_values.len() < 3 {
        None
    } else {
        Some(standard_deviation(&batch_values))
    };

    info!(rh = value, ?standard_error, "Hydrodynamic radius estimated.");
    Ok(RhEstimate {
        value,
        standard_error,
    })
}

fn standard_deviation(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

fn evaluate(
    conformation: &ChainConformation,
    radii: &[f64],
    oracle: &impl MobilityOracle,
) -> Result<MobilityMatrix, EngineError> {
    if conformation.len() != radii.len() {
        return Err(EngineError::DimensionMismatch {
            expected: radii.len(),
            found: conformation.len(),
        });
    }
    let mobility = oracle.mobility(conformation.positions(), radii);
    if mobility.size() != radii.len() {
        return Err(EngineError::DimensionMismatch {
            expected: radii.len(),
            found: mobility.size(),
        });
    }
    Ok(mobility)
}

fn sum_mobilities(
    conformations: &[&ChainConformation],
    radii: &[f64],
    oracle: &impl MobilityOracle,
) -> Result<MobilityMatrix, EngineError> {
    let size = radii.len();

    #[cfg(not(feature = "parallel"))]
    {
        conformations.iter().try_fold(
            MobilityMatrix::zeros(size),
            |mut acc, conformation| -> Result<MobilityMatrix, EngineError> {
                acc += &evaluate(conformation, radii, oracle)?;
                Ok(acc)
            },
        )
    }

    #[cfg(feature = "parallel")]
    {
        conformations
            .par_iter()
            .map(|conformation| evaluate(conformation, radii, oracle))
            .reduce(
                || Ok(MobilityMatrix::zeros(size)),
                |lhs, rhs| {
                    let mut lhs = lhs?;
                    lhs += &rhs?;
                    Ok(lhs)
                },
            )
    }
}
