//! # Hydrodynamics Module
//!
//! Pairwise translational mobility of bead pairs.
//!
//! The estimator only needs a [`MobilityOracle`]: something that, given bead
//! positions and hydrodynamic radii, returns the `N x N` grid of `3 x 3`
//! mobility tensors. [`RotnePragerYamakawa`] is the implementation used by
//! default; any other physically sound tensor can be plugged in, including a
//! plain closure.

pub mod mobility;
pub mod rpy;

pub use mobility::{MobilityMatrix, MobilityOracle};
pub use rpy::RotnePragerYamakawa;
