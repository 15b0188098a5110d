use crate::cli::ConformationArgs;
use crate::error::Result;
use crate::utils::input::load_bead_model;
use hydrobead::core::models::conformation::ChainConformation;
use hydrobead::engine::config::{GeneratorConfig, RetryPolicy};
use hydrobead::engine::generator::generate_conformation_with;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use tracing::info;

pub fn run(args: ConformationArgs) -> Result<()> {
    let model = load_bead_model(&args.source)?;

    let config = GeneratorConfig {
        retry_policy: match args.max_rejections {
            Some(max_rejections) => RetryPolicy::Bounded { max_rejections },
            None => RetryPolicy::Unbounded,
        },
        ..GeneratorConfig::default()
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!("Generating one conformation of {} beads.", model.len());
    let conformation = generate_conformation_with(&model.steric_radii(), &mut rng, &config, None)?;

    let stdout = std::io::stdout();
    write_coordinates(&conformation, &mut stdout.lock())?;
    Ok(())
}

/// Writes one `x y z` line per bead, in chain order.
fn write_coordinates(conformation: &ChainConformation, out: &mut impl Write) -> Result<()> {
    for position in conformation.positions() {
        writeln!(out, "{} {} {}", position.x, position.y, position.z)?;
    }
    out.flush()?;
    Ok(())
}
