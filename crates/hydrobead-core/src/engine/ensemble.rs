use crate::core::models::conformation::{ChainConformation, Ensemble};
use crate::engine::config::GeneratorConfig;
use crate::engine::error::EngineError;
use crate::engine::generator::generate_conformation_with;
use crate::engine::progress::{Progress, ProgressReporter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Draws one seed per conformation from a master stream, so every member of
/// the ensemble has its own generator regardless of which thread builds it.
fn member_seeds(size: usize, seed: Option<u64>) -> Vec<u64> {
    let mut master = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..size).map(|_| master.r#gen::<u64>()).collect()
}

/// Builds `size` independent conformations for the given steric radii.
///
/// A `TaskIncrement` is reported after each finished conformation and a
/// summary `Message` once the whole ensemble is built. With a
/// fixed `seed` the ensemble is reproducible, also when built in parallel.
/// `cancel` is polled before each conformation and on every rejected join.
#[instrument(skip_all, name = "ensemble_builder", fields(size = size, beads = radii.len()))]
pub fn build_ensemble(
    radii: &[f64],
    size: usize,
    seed: Option<u64>,
    config: &GeneratorConfig,
    reporter: &ProgressReporter,
    cancel: Option<&AtomicBool>,
) -> Result<Ensemble, EngineError> {
    info!("Generating ensemble of {} conformations.", size);
    let seeds = member_seeds(size, seed);

    #[cfg(not(feature = "parallel"))]
    let iterator = seeds.iter();

    #[cfg(feature = "parallel")]
    let iterator = seeds.par_iter();

    let conformations = iterator
        .map(|&member_seed| {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(EngineError::Cancelled);
            }
            let mut rng = StdRng::seed_from_u64(member_seed);
            let conformation = generate_conformation_with(radii, &mut rng, config, cancel)?;
            reporter.report(Progress::TaskIncrement);
            Ok(conformation)
        })
        .collect::<Result<Vec<ChainConformation>, EngineError>>()?;

    reporter.report(Progress::Message(format!(
        "Generated {} conformations of {} beads.",
        conformations.len(),
        radii.len()
    )));
    Ok(Ensemble::new(conformations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn ensemble_has_requested_size_and_chain_length() {
        let radii = [1.9025; 10];
        let ensemble = build_ensemble(
            &radii,
            8,
            Some(1),
            &GeneratorConfig::default(),
            &ProgressReporter::new(),
            None,
        )
        .unwrap();
        assert_eq!(ensemble.len(), 8);
        assert!(ensemble.iter().all(|c| c.len() == 10));
    }

    #[test]
    fn fixed_seed_reproduces_ensemble() {
        let radii = [1.9025; 10];
        let build = || {
            build_ensemble(
                &radii,
                6,
                Some(123),
                &GeneratorConfig::default(),
                &ProgressReporter::new(),
                None,
            )
            .unwrap()
        };
        assert_eq!(build().conformations(), build().conformations());
    }

    #[test]
    fn members_are_distinct_samples() {
        let radii = [1.9025; 6];
        let ensemble = build_ensemble(
            &radii,
            4,
            Some(7),
            &GeneratorConfig::default(),
            &ProgressReporter::new(),
            None,
        )
        .unwrap();
        let members = ensemble.conformations();
        assert_ne!(members[0], members[1]);
        assert_ne!(members[2], members[3]);
    }

    #[test]
    fn member_seeds_differ() {
        let seeds = member_seeds(100, Some(3));
        let mut unique = seeds.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), seeds.len());
    }

    #[test]
    fn progress_is_reported_per_conformation() {
        let count = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if matches!(event, Progress::TaskIncrement) {
                count.fetch_add(1, Ordering::SeqCst);
            }
        }));
        build_ensemble(
            &[1.0, 1.0, 1.0],
            5,
            Some(9),
            &GeneratorConfig::default(),
            &reporter,
            None,
        )
        .unwrap();
        drop(reporter);
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn finished_ensemble_is_summarised() {
        let messages = std::sync::Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::Message(message) = event {
                messages.lock().unwrap().push(message);
            }
        }));
        build_ensemble(
            &[1.0, 1.0, 1.0],
            4,
            Some(2),
            &GeneratorConfig::default(),
            &reporter,
            None,
        )
        .unwrap();
        drop(reporter);
        assert_eq!(
            messages.into_inner().unwrap(),
            vec!["Generated 4 conformations of 3 beads.".to_string()]
        );
    }

    #[test]
    fn invalid_radius_fails_the_whole_ensemble() {
        let result = build_ensemble(
            &[1.0, -2.0],
            3,
            Some(1),
            &GeneratorConfig::default(),
            &ProgressReporter::new(),
            None,
        );
        assert!(matches!(result, Err(EngineError::InvalidRadius { index: 1, .. })));
    }

    #[test]
    fn raised_cancel_flag_stops_the_build() {
        let flag = AtomicBool::new(true);
        let result = build_ensemble(
            &[1.0, 1.0],
            4,
            Some(2),
            &GeneratorConfig::default(),
            &ProgressReporter::new(),
            Some(&flag),
        );
        assert!(matches!(result, Err(EngineError::Cancelled)));
    }
}
