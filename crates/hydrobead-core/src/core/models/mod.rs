//! # Core Models Module
//!
//! Data structures shared by the parser, the chain generator and the
//! hydrodynamic estimator.
//!
//! - [`residue`] - Closed table of one-letter residue codes and their masses
//! - [`bead`] - Beads and the ordered bead model produced from a sequence
//! - [`conformation`] - Sampled 3D bead positions and ensembles of them

pub mod bead;
pub mod conformation;
pub mod residue;
