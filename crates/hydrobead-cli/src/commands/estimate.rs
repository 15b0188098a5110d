use crate::cli::EstimateArgs;
use crate::config::{AppConfig, PartialEstimationConfig};
use crate::error::{CliError, Result};
use crate::utils::format::scientific;
use crate::utils::input::load_bead_model;
use crate::utils::progress::CliProgressHandler;
use hydrobead::engine::error::EngineError;
use hydrobead::engine::progress::ProgressReporter;
use hydrobead::workflows::{self, estimate::EstimationResult};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing::{info, warn};

/// Run settings followed by a `[result]` table holding the core result.
#[derive(Serialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct EstimateReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    relative_sampling_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature_kelvin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    viscosity_centipoise: Option<f64>,
    result: &'a EstimationResult,
}

impl<'a> EstimateReport<'a> {
    fn new(result: &'a EstimationResult, config: &AppConfig) -> Self {
        let environment = config.core_config.environment;
        Self {
            relative_sampling_error: result.rh.relative_error(),
            seed: config.core_config.seed,
            temperature_kelvin: environment.map(|env| env.temperature),
            viscosity_centipoise: environment.map(|env| env.viscosity),
            result,
        }
    }
}

pub fn run(args: EstimateArgs, show_progress: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialEstimationConfig::from_file(path)?,
        None => PartialEstimationConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let app_config = partial_config.merge_with_cli(&args)?;

    let model = load_bead_model(&args.source)?;

    let cancel = Arc::new(AtomicBool::new(false));
    if let Some(timeout) = app_config.timeout {
        let flag = Arc::clone(&cancel);
        thread::spawn(move || {
            thread::sleep(timeout);
            flag.store(true, Ordering::Relaxed);
        });
    }

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Generating ensemble of size {} with {} beads in each chain.",
        app_config.core_config.ensemble_size,
        model.len()
    );
    info!("Invoking the core estimation workflow...");

    let result = workflows::estimate::run(
        &model,
        &app_config.core_config,
        &reporter,
        Some(cancel.as_ref()),
    )
    .map_err(|e| match (e, app_config.timeout) {
        (EngineError::Cancelled, Some(timeout)) => CliError::Timeout(timeout.as_secs()),
        (e, _) => e.into(),
    })?;

    println!();
    print!("{}", format_summary(&result));

    if let Some(output) = &args.output {
        write_report(output, &EstimateReport::new(&result, &app_config))?;
        println!("Report written to: {}", output.display());
    }

    Ok(())
}

fn format_summary(result: &EstimationResult) -> String {
    let mut lines = vec![
        "Computed effective, diffusive hydrodynamic radius is:".to_string(),
        format!("R_h = {} [Ang]", scientific(result.rh.value)),
    ];
    match result.rh.relative_error() {
        Some(relative) => lines.push(format!("(sampling error about {:.4}%).", relative * 100.0)),
        None => lines.push("(sampling error n/a: ensemble too small for 3 batches).".to_string()),
    }
    if let Some(d) = result.diffusion_coefficient {
        lines.push(String::new());
        lines.push("Computed diffusion coefficient is:".to_string());
        lines.push(format!("D = {} [m^2/s]", scientific(d)));
    }
    lines.push(String::new());
    lines.push("Total mass is:".to_string());
    lines.push(format!("M = {} [Da]", scientific(result.total_mass)));

    let mut summary = lines.join("\n");
    summary.push('\n');
    summary
}

fn write_report(path: &Path, report: &EstimateReport<'_>) -> Result<()> {
    let content = toml::to_string_pretty(report)
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to serialize report: {}", e)))?;
    std::fs::write(path, content)?;
    if report.relative_sampling_error.is_none() {
        warn!("Report written without a sampling error: fewer than 3 batches were available.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrobead::engine::config::EstimationConfigBuilder;
    use hydrobead::engine::estimator::RhEstimate;
    use std::time::Duration;

    fn sample_result(standard_error: Option<f64>) -> EstimationResult {
        EstimationResult {
            rh: RhEstimate {
                value: 12.5,
                standard_error,
            },
            total_mass: 11_234.7,
            bead_count: 42,
            ensemble_size: 30,
            diffusion_coefficient: Some(1.7573e-11),
        }
    }

    fn sample_config() -> AppConfig {
        AppConfig {
            core_config: EstimationConfigBuilder::new()
                .ensemble_size(30)
                .seed(Some(4))
                .temperature(300.0)
                .viscosity(1.0)
                .build()
                .unwrap(),
            timeout: Some(Duration::from_secs(5)),
        }
    }

    #[test]
    fn summary_uses_scientific_notation() {
        let summary = format_summary(&sample_result(Some(0.25)));
        assert!(summary.contains("R_h = 1.2500e+01 [Ang]"));
        assert!(summary.contains("(sampling error about 2.0000%)."));
        assert!(summary.contains("D = 1.7573e-11 [m^2/s]"));
        assert!(summary.contains("M = 1.1235e+04 [Da]"));
    }

    #[test]
    fn summary_marks_undefined_sampling_error() {
        let summary = format_summary(&sample_result(None));
        assert!(summary.contains("sampling error n/a"));
    }

    #[test]
    fn report_is_written_as_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.toml");
        let result = sample_result(Some(0.25));
        let report = EstimateReport::new(&result, &sample_config());
        write_report(&path, &report).unwrap();

        let table: toml::Table = std::fs::read_to_string(&path).unwrap().parse().unwrap();
        assert_eq!(table["relative-sampling-error"].as_float(), Some(0.02));
        assert_eq!(table["seed"].as_integer(), Some(4));
        assert_eq!(table["temperature-kelvin"].as_float(), Some(300.0));

        let core = &table["result"];
        assert_eq!(core["rh"]["value"].as_float(), Some(12.5));
        assert_eq!(core["rh"]["standard-error"].as_float(), Some(0.25));
        assert_eq!(core["total-mass"].as_float(), Some(11_234.7));
        assert_eq!(core["bead-count"].as_integer(), Some(42));
        assert_eq!(core["ensemble-size"].as_integer(), Some(30));
        assert_eq!(core["diffusion-coefficient"].as_float(), Some(1.7573e-11));
    }

    #[test]
    fn undefined_fields_are_left_out_of_the_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.toml");
        let mut result = sample_result(None);
        result.diffusion_coefficient = None;
        let report = EstimateReport::new(&result, &sample_config());
        write_report(&path, &report).unwrap();

        let table: toml::Table = std::fs::read_to_string(&path).unwrap().parse().unwrap();
        assert!(!table.contains_key("relative-sampling-error"));
        let core = table["result"].as_table().unwrap();
        assert!(!core.contains_key("diffusion-coefficient"));
        assert!(!core["rh"].as_table().unwrap().contains_key("standard-error"));
    }
}
