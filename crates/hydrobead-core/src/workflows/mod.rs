//! # Workflows Module
//!
//! High-level entry points that run a complete estimation for a parsed
//! sequence: ensemble generation, mobility averaging, sampling error, and the
//! optional diffusion coefficient.
//!
//! - **Estimation Workflow** ([`estimate`]) - From a [`BeadModel`](crate::core::models::bead::BeadModel)
//!   and an [`EstimationConfig`](crate::engine::config::EstimationConfig) to an
//!   [`EstimationResult`](estimate::EstimationResult).

pub mod estimate;
