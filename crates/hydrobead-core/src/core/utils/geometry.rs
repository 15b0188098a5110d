use itertools::Itertools;
use nalgebra::{Point3, Vector3};
use rand::Rng;
use rand_distr::StandardNormal;

/// Draws a direction uniformly distributed on the unit sphere by normalising an
/// isotropic Gaussian sample.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vector3<f64> {
    loop {
        let v = Vector3::new(
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
        );
        let norm = v.norm();
        if norm > f64::EPSILON {
            return v / norm;
        }
    }
}

/// Squared minimum separation two spheres may have, allowing a fractional
/// interpenetration of `margin`.
#[inline]
pub fn min_squared_separation(r_a: f64, r_b: f64, margin: f64) -> f64 {
    let min = (1.0 - margin) * (r_a + r_b);
    min * min
}

/// Returns the first `(i, j)` pair of spheres from the two sets that overlap by
/// more than `margin`, if any.
pub fn find_overlap(
    left: &[Point3<f64>],
    left_radii: &[f64],
    right: &[Point3<f64>],
    right_radii: &[f64],
    margin: f64,
) -> Option<(usize, usize)> {
    left.iter()
        .zip(left_radii)
        .enumerate()
        .cartesian_product(right.iter().zip(right_radii).enumerate())
        .find(|((_, (p_i, r_i)), (_, (p_j, r_j)))| {
            (*p_i - *p_j).norm_squared() < min_squared_separation(**r_i, **r_j, margin)
        })
        .map(|((i, _), (j, _))| (i, j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_unit_vectors_have_unit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!((random_unit_vector(&mut rng).norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn random_unit_vectors_are_roughly_isotropic() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 20_000;
        let mean = (0..n).fold(Vector3::zeros(), |acc, _| acc + random_unit_vector(&mut rng))
            / n as f64;
        assert!(mean.norm() < 0.05);
    }

    #[test]
    fn min_squared_separation_applies_margin_before_squaring() {
        let expected = (0.999_f64 * 3.0).powi(2);
        assert!((min_squared_separation(1.0, 2.0, 0.001) - expected).abs() < 1e-12);
    }

    #[test]
    fn touching_spheres_do_not_overlap() {
        let left = [Point3::origin()];
        let right = [Point3::new(2.0, 0.0, 0.0)];
        assert_eq!(find_overlap(&left, &[1.0], &right, &[1.0], 0.001), None);
    }

    #[test]
    fn slight_interpenetration_within_margin_is_tolerated() {
        let left = [Point3::origin()];
        let right = [Point3::new(1.9995, 0.0, 0.0)];
        assert_eq!(find_overlap(&left, &[1.0], &right, &[1.0], 0.001), None);
    }

    #[test]
    fn overlap_reports_offending_pair() {
        let left = [Point3::origin(), Point3::new(10.0, 0.0, 0.0)];
        let right = [Point3::new(20.0, 0.0, 0.0), Point3::new(11.0, 0.0, 0.0)];
        assert_eq!(
            find_overlap(&left, &[1.0, 1.0], &right, &[1.0, 1.0], 0.001),
            Some((1, 1))
        );
    }
}
