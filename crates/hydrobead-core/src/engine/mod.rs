//! # Engine Module
//!
//! Stochastic machinery behind the hydrodynamic radius estimate: chain
//! conformation generation, ensemble assembly, and the ensemble-averaged
//! mobility estimator with its batch-based sampling error.
//!
//! - **Configuration** ([`config`]) - Ensemble, generator, and environment parameters
//! - **Generation** ([`generator`], [`ensemble`]) - Overlap-free random chains, one or many
//! - **Estimation** ([`estimator`]) - Rh and sampling error from an ensemble
//! - **Units** ([`units`]) - Conversion of Rh to a diffusion coefficient
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod ensemble;
pub mod error;
pub mod estimator;
pub mod generator;
pub mod progress;
pub mod units;
