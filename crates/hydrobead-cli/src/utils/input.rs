use crate::cli::SequenceSource;
use crate::error::{CliError, Result};
use hydrobead::core::models::bead::BeadModel;
use hydrobead::core::sequence::{self, IgnoredCharacter};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const STDIN_MARKER: &str = "-";
/// Ignored characters listed individually before the warning is summarized.
const MAX_REPORTED_CHARACTERS: usize = 10;

impl SequenceSource {
    /// Reads the raw sequence text from the argument, a file, or stdin.
    pub fn read(&self) -> Result<String> {
        match (&self.sequence, &self.input) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) if path == Path::new(STDIN_MARKER) => {
                info!("Reading sequence from standard input.");
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
            (None, Some(path)) => {
                info!("Reading sequence from {:?}", path);
                std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
                    path: path.clone(),
                    source: e.into(),
                })
            }
            (None, None) => Err(CliError::Argument(
                "Either --sequence or --input is required.".to_string(),
            )),
        }
    }
}

/// Reads and parses the sequence, warning about characters the parser skips.
pub fn load_bead_model(source: &SequenceSource) -> Result<BeadModel> {
    let text = source.read()?;
    warn_ignored(&sequence::scan_ignored_characters(&text));

    let model = sequence::parse(&text);
    if model.is_empty() {
        return Err(CliError::Argument(
            "The sequence contains no residues.".to_string(),
        ));
    }
    info!(
        "Parsed {} bead(s), total mass {:.2} Da.",
        model.len(),
        model.total_mass()
    );
    Ok(model)
}

fn warn_ignored(ignored: &[IgnoredCharacter]) {
    for item in ignored.iter().take(MAX_REPORTED_CHARACTERS) {
        warn!(
            "Ignoring character {:?} at position {}.",
            item.character, item.position
        );
    }
    if ignored.len() > MAX_REPORTED_CHARACTERS {
        warn!(
            "... and {} more ignored character(s).",
            ignored.len() - MAX_REPORTED_CHARACTERS
        );
    }
}
