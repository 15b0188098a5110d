use super::mobility::{MobilityMatrix, MobilityOracle};
use nalgebra::{Matrix3, Point3, Vector3};
use std::f64::consts::PI;

/// Generalised Rotne-Prager-Yamakawa translational mobility for spheres of
/// unequal size, in units of unit solvent viscosity.
///
/// The tensor has three regimes: separated spheres, overlapping spheres, and
/// one sphere fully contained in the other. It is continuous across both
/// boundaries and positive definite for any configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotnePragerYamakawa;

impl RotnePragerYamakawa {
    /// Mobility of an isolated sphere, `I / (6 pi a)`.
    pub fn self_mobility(radius: f64) -> Matrix3<f64> {
        Matrix3::identity() / (6.0 * PI * radius)
    }

    /// Coupling between two spheres separated by `r_vec`.
    pub fn pair_mobility(r_vec: &Vector3<f64>, a_i: f64, a_j: f64) -> Matrix3<f64> {
        let r = r_vec.norm();
        let identity = Matrix3::identity();

        if r <= (a_i - a_j).abs() {
            return identity / (6.0 * PI * a_i.max(a_j));
        }

        let r_hat = r_vec / r;
        let outer = r_hat * r_hat.transpose();

        if r > a_i + a_j {
            let r2 = r * r;
            let sq_sum = a_i * a_i + a_j * a_j;
            (identity * (1.0 + sq_sum / (3.0 * r2)) + outer * (1.0 - sq_sum / r2)) / (8.0 * PI * r)
        } else {
            let r3 = r * r * r;
            let diff2 = (a_i - a_j).powi(2);
            let isotropic = (16.0 * r3 * (a_i + a_j) - (diff2 + 3.0 * r * r).powi(2)) / (32.0 * r3);
            let anisotropic = 3.0 * (diff2 - r * r).powi(2) / (32.0 * r3);
            (identity * isotropic + outer * anisotropic) / (6.0 * PI * a_i * a_j)
        }
    }
}

impl MobilityOracle for RotnePragerYamakawa {
    fn mobility(&self, positions: &[Point3<f64>], radii: &[f64]) -> MobilityMatrix {
        let n = positions.len();
        let mut matrix = MobilityMatrix::zeros(n);
        for i in 0..n {
            *matrix.block_mut(i, i) = Self::self_mobility(radii[i]);
            for j in (i + 1)..n {
                let tensor = Self::pair_mobility(&(positions[i] - positions[j]), radii[i], radii[j]);
                *matrix.block_mut(i, j) = tensor;
                *matrix.block_mut(j, i) = tensor;
            }
        }
        matrix
    }
}
