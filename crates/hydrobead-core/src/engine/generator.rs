use crate::core::models::conformation::ChainConformation;
use crate::core::utils::geometry::{find_overlap, random_unit_vector};
use crate::engine::config::{GeneratorConfig, JoinAnchor, RetryPolicy};
use crate::engine::error::EngineError;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{instrument, trace};

/// Generates one sterically valid conformation using the default settings:
/// 0.1% margin, unbounded retries, origin-anchored joins and no cancellation.
pub fn generate_conformation(
    radii: &[f64],
    rng: &mut impl Rng,
) -> Result<ChainConformation, EngineError> {
    generate_conformation_with(radii, rng, &GeneratorConfig::default(), None)
}

/// Generates one conformation of beads with the given steric radii.
///
/// The chain is built by recursive bisection. Both halves are generated
/// independently, the right half is shifted along a random direction by the sum
/// of the radii of the two beads at the split (see [`JoinAnchor`]), and the
/// join is accepted only if no bead of the left half overlaps a bead of the
/// right half by more than `config.margin`. A rejected join throws away both
/// halves and regenerates them from scratch.
///
/// With [`RetryPolicy::Unbounded`] there is no limit on the number of rejected
/// joins, so radii that cannot be packed keep this function busy forever. Pass
/// a `cancel` flag (checked after every rejection) or a bounded policy to cap
/// the work.
#[instrument(level = "debug", skip_all, fields(beads = radii.len()))]
pub fn generate_conformation_with(
    radii: &[f64],
    rng: &mut impl Rng,
    config: &GeneratorConfig,
    cancel: Option<&AtomicBool>,
) -> Result<ChainConformation, EngineError> {
    validate_radii(radii)?;

    let mut builder = ChainBuilder {
        radii,
        config,
        cancel,
        rng,
        rejections: 0,
    };
    let conformation = builder.build(0, radii.len())?;

    trace!(rejections = builder.rejections, "Conformation accepted.");
    Ok(conformation)
}

fn validate_radii(radii: &[f64]) -> Result<(), EngineError> {
    match radii
        .iter()
        .enumerate()
        .find(|&(_, &r)| !(r.is_finite() && r > 0.0))
    {
        Some((index, &value)) => Err(EngineError::InvalidRadius { index, value }),
        None => Ok(()),
    }
}

struct ChainBuilder<'a, R: Rng> {
    radii: &'a [f64],
    config: &'a GeneratorConfig,
    cancel: Option<&'a AtomicBool>,
    rng: &'a mut R,
    rejections: u64,
}

impl<R: Rng> ChainBuilder<'_, R> {
    fn build(&mut self, begin: usize, end: usize) -> Result<ChainConformation, EngineError> {
        match end - begin {
            0 => Ok(ChainConformation::default()),
            1 => Ok(ChainConformation::single()),
            _ => {
                let midpoint = (begin + end) / 2;
                loop {
                    let left = self.build(begin, midpoint)?;
                    let mut right = self.build(midpoint, end)?;

                    let direction = random_unit_vector(&mut *self.rng);
                    let mut offset = direction * (self.radii[midpoint - 1] + self.radii[midpoint]);
                    if self.config.join_anchor == JoinAnchor::LastBead {
                        if let Some(last) = left.positions().last() {
                            offset += last.coords;
                        }
                    }
                    right.translate(&offset);

                    let overlap = find_overlap(
                        left.positions(),
                        &self.radii[begin..midpoint],
                        right.positions(),
                        &self.radii[midpoint..end],
                        self.config.margin,
                    );
                    match overlap {
                        None => return Ok(left.concat(right)),
                        Some((i, j)) => {
                            trace!(
                                begin,
                                end,
                                left_bead = begin + i,
                                right_bead = midpoint + j,
                                "Join rejected, regenerating both halves."
                            );
                            self.record_rejection()?;
                        }
                    }
                }
            }
        }
    }

    fn record_rejection(&mut self) -> Result<(), EngineError> {
        self.rejections += 1;
        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(EngineError::Cancelled);
        }
        if let RetryPolicy::Bounded { max_rejections } = self.config.retry_policy {
            if self.rejections > max_rejections {
                return Err(EngineError::RetryLimitExceeded {
                    rejections: self.rejections,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::geometry::min_squared_separation;
    use nalgebra::Point3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const MARGIN: f64 = 0.001;
    // A large first bead followed by small ones: with origin-anchored joins the
    // first bead of the right half always lands inside bead 0.
    const UNPACKABLE: [f64; 4] = [10.0, 1.0, 1.0, 1.0];

    fn anchored(join_anchor: JoinAnchor, retry_policy: RetryPolicy) -> GeneratorConfig {
        GeneratorConfig {
            retry_policy,
            join_anchor,
            ..GeneratorConfig::default()
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Checks every pair separated by a split of the same bisection the
    /// generator performs.
    fn assert_split_pairs_valid(positions: &[Point3<f64>], radii: &[f64], begin: usize, end: usize) {
        if end - begin < 2 {
            return;
        }
        let midpoint = (begin + end) / 2;
        for i in begin..midpoint {
            for j in midpoint..end {
                let d2 = (positions[i] - positions[j]).norm_squared();
                assert!(
                    d2 >= min_squared_separation(radii[i], radii[j], MARGIN),
                    "beads {i} and {j} overlap: d^2 = {d2}"
                );
            }
        }
        assert_split_pairs_valid(positions, radii, begin, midpoint);
        assert_split_pairs_valid(positions, radii, midpoint, end);
    }

    #[test]
    fn empty_radii_give_empty_conformation() {
        let conformation = generate_conformation(&[], &mut rng()).unwrap();
        assert!(conformation.is_empty());
    }

    #[test]
    fn single_bead_is_placed_at_origin() {
        let conformation = generate_conformation(&[3.0], &mut rng()).unwrap();
        assert_eq!(conformation.positions(), &[Point3::origin()]);
    }

    #[test]
    fn two_beads_touch_under_either_anchor() {
        for anchor in [JoinAnchor::Origin, JoinAnchor::LastBead] {
            let config = anchored(anchor, RetryPolicy::Unbounded);
            let conformation =
                generate_conformation_with(&[1.0, 2.0], &mut rng(), &config, None).unwrap();
            let distance = (conformation.positions()[1] - conformation.positions()[0]).norm();
            assert!((distance - 3.0).abs() < 1e-12, "{anchor:?}");
        }
    }

    #[test]
    fn output_length_matches_input_length() {
        let mut rng = rng();
        for n in 0..40 {
            let radii = vec![1.9025; n];
            assert_eq!(generate_conformation(&radii, &mut rng).unwrap().len(), n);
        }
    }

    #[test]
    fn every_cross_split_pair_respects_steric_margin() {
        let mut rng = rng();
        // Large beads never start a split range of three or more beads.
        let radii: Vec<f64> = (0..33)
            .map(|i| if i % 6 == 5 { 6.5 } else { 1.9025 })
            .collect();
        for _ in 0..20 {
            let conformation = generate_conformation(&radii, &mut rng).unwrap();
            assert_split_pairs_valid(conformation.positions(), &radii, 0, radii.len());
        }
    }

    #[test]
    fn first_bead_stays_at_origin() {
        let conformation = generate_conformation(&[1.9025; 9], &mut rng()).unwrap();
        assert_eq!(conformation.positions()[0], Point3::origin());
    }

    #[test]
    fn same_seed_reproduces_conformation() {
        let radii = [1.9025; 12];
        let a = generate_conformation(&radii, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = generate_conformation(&radii, &mut StdRng::seed_from_u64(5)).unwrap();
        let c = generate_conformation(&radii, &mut StdRng::seed_from_u64(6)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn non_positive_or_non_finite_radii_are_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = generate_conformation(&[1.0, bad, 1.0], &mut rng());
            assert!(
                matches!(result, Err(EngineError::InvalidRadius { index: 1, .. })),
                "radius {bad}"
            );
        }
    }

    #[test]
    fn bounded_policy_gives_up_on_unpackable_radii() {
        let config = anchored(JoinAnchor::Origin, RetryPolicy::Bounded { max_rejections: 50 });
        let result = generate_conformation_with(&UNPACKABLE, &mut rng(), &config, None);
        assert!(matches!(
            result,
            Err(EngineError::RetryLimitExceeded { rejections: 51 })
        ));
    }

    #[test]
    fn raised_cancel_flag_stops_retry_loop() {
        let cancel = AtomicBool::new(true);
        let result = generate_conformation_with(
            &UNPACKABLE,
            &mut rng(),
            &anchored(JoinAnchor::Origin, RetryPolicy::Unbounded),
            Some(&cancel),
        );
        assert!(matches!(result, Err(EngineError::Cancelled)));
    }

    #[test]
    fn cancel_flag_is_ignored_when_no_join_is_rejected() {
        let cancel = AtomicBool::new(true);
        let result = generate_conformation_with(
            &[1.0, 1.0],
            &mut rng(),
            &GeneratorConfig::default(),
            Some(&cancel),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn last_bead_anchor_keeps_consecutive_beads_in_contact() {
        let radii = [10.0, 1.0, 1.0, 1.0, 2.0, 1.0];
        let config = anchored(JoinAnchor::LastBead, RetryPolicy::Unbounded);
        let mut rng = rng();
        for _ in 0..10 {
            let conformation = generate_conformation_with(&radii, &mut rng, &config, None).unwrap();
            let positions = conformation.positions();
            for k in 1..radii.len() {
                let distance = (positions[k] - positions[k - 1]).norm();
                assert!((distance - (radii[k] + radii[k - 1])).abs() < 1e-9);
            }
            assert_split_pairs_valid(positions, &radii, 0, radii.len());
        }
    }

    #[test]
    fn default_join_places_right_half_relative_to_first_bead() {
        let radii = [1.0, 1.0, 1.0, 1.0];
        for seed in 0..20 {
            let conformation =
                generate_conformation(&radii, &mut StdRng::seed_from_u64(seed)).unwrap();
            let positions = conformation.positions();
            assert!(
                (positions[2].coords.norm() - 2.0).abs() < 1e-12,
                "seed {seed}: third bead is not anchored to the first"
            );
            assert_split_pairs_valid(positions, &radii, 0, radii.len());
        }
    }

    #[test]
    fn default_join_does_not_chain_consecutive_beads() {
        let radii = [1.0, 1.0, 1.0, 1.0];
        let touching = (0..20)
            .filter(|&seed| {
                let conformation =
                    generate_conformation(&radii, &mut StdRng::seed_from_u64(seed)).unwrap();
                let positions = conformation.positions();
                ((positions[2] - positions[1]).norm() - 2.0).abs() < 1e-9
            })
            .count();
        assert!(touching < 20);
    }

    #[test]
    fn unpackable_radii_are_fine_with_last_bead_anchor() {
        let config = anchored(JoinAnchor::LastBead, RetryPolicy::Unbounded);
        let conformation =
            generate_conformation_with(&UNPACKABLE, &mut rng(), &config, None).unwrap();
        assert_eq!(conformation.len(), 4);
    }
}
