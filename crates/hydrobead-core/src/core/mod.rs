//! # Core Module
//!
//! Stateless building blocks: the residue and bead data model, the sequence
//! parser, pairwise hydrodynamic mobility tensors and small geometry helpers.
//!
//! - **Models** ([`models`]) - Residue codes, beads, bead models, conformations and ensembles
//! - **Sequence Parsing** ([`sequence`]) - Annotated sequence text to bead model
//! - **Hydrodynamics** ([`hydrodynamics`]) - Mobility oracle trait and the Rotne-Prager-Yamakawa tensor
//! - **Utilities** ([`utils`]) - Random directions and sphere overlap tests

pub mod hydrodynamics;
pub mod models;
pub mod sequence;
pub mod utils;
