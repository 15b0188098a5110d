use nalgebra::{DMatrix, Matrix3, Point3};
use std::ops::{AddAssign, DivAssign};

/// Square grid of `3 x 3` mobility blocks, one per ordered bead pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MobilityMatrix {
    size: usize,
    blocks: Vec<Matrix3<f64>>,
}

impl MobilityMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            blocks: vec![Matrix3::zeros(); size * size],
        }
    }

    /// Builds the matrix from a block function evaluated for every `(i, j)`.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> Matrix3<f64>) -> Self {
        let mut blocks = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                blocks.push(f(i, j));
            }
        }
        Self { size, blocks }
    }

    /// Number of beads `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn block(&self, i: usize, j: usize) -> &Matrix3<f64> {
        &self.blocks[i * self.size + j]
    }

    pub fn block_mut(&mut self, i: usize, j: usize) -> &mut Matrix3<f64> {
        &mut self.blocks[i * self.size + j]
    }

    /// Reduces every block to its trace, giving the `N x N` scalar matrix.
    pub fn trace_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.size, self.size, |i, j| self.block(i, j).trace())
    }
}

impl AddAssign<&MobilityMatrix> for MobilityMatrix {
    fn add_assign(&mut self, rhs: &MobilityMatrix) {
        debug_assert_eq!(self.size, rhs.size);
        for (lhs, rhs) in self.blocks.iter_mut().zip(&rhs.blocks) {
            *lhs += rhs;
        }
    }
}

impl DivAssign<f64> for MobilityMatrix {
    fn div_assign(&mut self, rhs: f64) {
        for block in &mut self.blocks {
            *block /= rhs;
        }
    }
}

/// Anything that can evaluate pairwise translational mobilities.
///
/// Implementations must return an `N x N` block matrix for `N` beads that is
/// symmetric under exchange of the bead pair.
pub trait MobilityOracle: Sync {
    fn mobility(&self, positions: &[Point3<f64>], radii: &[f64]) -> MobilityMatrix;
}

impl<F> MobilityOracle for F
where
    F: Fn(&[Point3<f64>], &[f64]) -> MobilityMatrix + Sync,
{
    fn mobility(&self, positions: &[Point3<f64>], radii: &[f64]) -> MobilityMatrix {
        self(positions, radii)
    }
}
