//! # hydrobead
//!
//! Estimation of the effective hydrodynamic radius (Rh) of partially disordered
//! proteins from coarse-grained bead models.
//!
//! A sequence is reduced to beads (one per disordered residue, one per
//! bracketed structured region), an ensemble of random overlap-free chain
//! conformations is generated, and Rh is obtained from the ensemble-averaged
//! Rotne-Prager-Yamakawa mobility, together with a batch-based sampling error.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Stateless data models (`BeadModel`,
//!   `ChainConformation`, `Ensemble`), the sequence parser, and the mobility
//!   tensors.
//!
//! - **[`engine`]: The Logic Core.** Chain generation, ensemble assembly,
//!   the Rh estimator, configuration, progress reporting, and errors.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into
//!   a single estimation run.
//!
//! ```
//! use hydrobead::core::sequence::parse;
//! use hydrobead::engine::config::EstimationConfigBuilder;
//! use hydrobead::engine::progress::ProgressReporter;
//! use hydrobead::workflows::estimate;
//!
//! let model = parse("MDVFMKG[LSKAKEGVVAAAEKTKQGVAEAAGKTKEGVL]YVGSK");
//! let config = EstimationConfigBuilder::new()
//!     .ensemble_size(4)
//!     .seed(Some(1))
//!     .build()
//!     .unwrap();
//! let result = estimate::run(&model, &config, &ProgressReporter::new(), None).unwrap();
//! assert!(result.rh.value > 0.0);
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
