use crate::core::models::bead::{Bead, BeadModel};
use crate::core::models::residue::residue_mass;
use tracing::{instrument, trace};

const REGION_OPEN: char = '[';
const REGION_CLOSE: char = ']';

fn is_legal(c: char) -> bool {
    c.is_ascii_uppercase() || c == REGION_OPEN || c == REGION_CLOSE
}

/// A maximal run of the form `[? LETTER+ ]?` in the filtered text.
#[derive(Debug, PartialEq, Eq)]
struct Run<'a> {
    residues: &'a [char],
    bracketed: bool,
}

/// Scans the filtered characters left to right, yielding every non-overlapping
/// run. Characters that cannot start a run (a `]`, or a `[` not followed by a
/// letter) are skipped.
fn runs(chars: &[char]) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let opens = chars[pos] == REGION_OPEN;
        let letters_start = if opens { pos + 1 } else { pos };

        let letters_end = chars[letters_start.min(chars.len())..]
            .iter()
            .position(|c| !c.is_ascii_uppercase())
            .map_or(chars.len(), |offset| letters_start + offset);

        if letters_end == letters_start {
            pos += 1;
            continue;
        }

        let closes = chars.get(letters_end) == Some(&REGION_CLOSE);
        runs.push(Run {
            residues: &chars[letters_start..letters_end],
            bracketed: opens || closes,
        });
        pos = if closes { letters_end + 1 } else { letters_end };
    }

    runs
}

/// Builds the bead model for an annotated sequence.
///
/// Never fails: characters outside `A-Z`, `[` and `]` are dropped before
/// scanning and stray brackets that cannot open or close a run are skipped.
#[instrument(level = "debug", skip_all, fields(input_len = text.len()))]
pub fn parse(text: &str) -> BeadModel {
    let chars: Vec<char> = text.chars().filter(|&c| is_legal(c)).collect();

    let mut beads = Vec::new();
    let mut total_mass = 0.0;

    for run in runs(&chars) {
        if run.bracketed {
            let region_mass: f64 = run.residues.iter().map(|&c| residue_mass(c)).sum();
            total_mass += region_mass;
            trace!(
                residues = run.residues.len(),
                region_mass,
                "Collapsed structured region."
            );
            beads.push(Bead::structured(region_mass));
        } else {
            for &c in run.residues {
                total_mass += residue_mass(c);
                beads.push(Bead::disordered());
            }
        }
    }

    BeadModel::new(beads, total_mass)
}
