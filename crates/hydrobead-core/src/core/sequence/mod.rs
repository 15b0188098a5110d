//! # Sequence Module
//!
//! Turns annotated residue text into a [`BeadModel`](crate::core::models::bead::BeadModel).
//!
//! Residues are written as uppercase one-letter codes. A run wrapped in square
//! brackets marks a structured region, which collapses into a single bead;
//! every other residue becomes its own disordered bead. Anything else in the
//! text is ignored.
//!
//! ```
//! use hydrobead::core::sequence::parse;
//!
//! let model = parse("MKT [GAVL] aa12 PQ");
//! assert_eq!(model.len(), 3 + 1 + 2);
//! ```

pub mod diagnostics;
pub mod parser;

pub use diagnostics::{IgnoredCharacter, scan_ignored_characters};
pub use parser::parse;
