use phf::{Map, phf_map};
use std::fmt;

/// One-letter residue codes understood by the sequence parser.
///
/// The twenty standard amino acids carry their average residue mass (Da). The
/// wildcard and ambiguity codes are accepted as residues but carry no mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueCode {
    // --- Standard amino acids ---
    Alanine,       // A
    Cysteine,      // C
    AsparticAcid,  // D
    GlutamicAcid,  // E
    Phenylalanine, // F
    Glycine,       // G
    Histidine,     // H
    Isoleucine,    // I
    Lysine,        // K
    Leucine,       // L
    Methionine,    // M
    Asparagine,    // N
    Proline,       // P
    Glutamine,     // Q
    Arginine,      // R
    Serine,        // S
    Threonine,     // T
    Valine,        // V
    Tryptophan,    // W
    Tyrosine,      // Y

    // --- Wildcard / ambiguous codes (zero mass) ---
    Stop,                     // *
    GlutamineOrGlutamicAcid,  // Z
    Pyrrolysine,              // O
    Selenocysteine,           // U
    LeucineOrIsoleucine,      // J
    Unknown,                  // X
    AsparagineOrAsparticAcid, // B
}

#[rustfmt::skip]
static RESIDUE_CODES: Map<char, ResidueCode> = phf_map! {
    'A' => ResidueCode::Alanine,
    'C' => ResidueCode::Cysteine,
    'D' => ResidueCode::AsparticAcid,
    'E' => ResidueCode::GlutamicAcid,
    'F' => ResidueCode::Phenylalanine,
    'G' => ResidueCode::Glycine,
    'H' => ResidueCode::Histidine,
    'I' => ResidueCode::Isoleucine,
    'K' => ResidueCode::Lysine,
    'L' => ResidueCode::Leucine,
    'M' => ResidueCode::Methionine,
    'N' => ResidueCode::Asparagine,
    'P' => ResidueCode::Proline,
    'Q' => ResidueCode::Glutamine,
    'R' => ResidueCode::Arginine,
    'S' => ResidueCode::Serine,
    'T' => ResidueCode::Threonine,
    'V' => ResidueCode::Valine,
    'W' => ResidueCode::Tryptophan,
    'Y' => ResidueCode::Tyrosine,

    '*' => ResidueCode::Stop,
    'Z' => ResidueCode::GlutamineOrGlutamicAcid,
    'O' => ResidueCode::Pyrrolysine,
    'U' => ResidueCode::Selenocysteine,
    'J' => ResidueCode::LeucineOrIsoleucine,
    'X' => ResidueCode::Unknown,
    'B' => ResidueCode::AsparagineOrAsparticAcid,
};

impl ResidueCode {
    pub fn from_code(code: char) -> Option<Self> {
        RESIDUE_CODES.get(&code).copied()
    }

    pub fn code(&self) -> char {
        match self {
            ResidueCode::Alanine => 'A',
            ResidueCode::Cysteine => 'C',
            ResidueCode::AsparticAcid => 'D',
            ResidueCode::GlutamicAcid => 'E',
            ResidueCode::Phenylalanine => 'F',
            ResidueCode::Glycine => 'G',
            ResidueCode::Histidine => 'H',
            ResidueCode::Isoleucine => 'I',
            ResidueCode::Lysine => 'K',
            ResidueCode::Leucine => 'L',
            ResidueCode::Methionine => 'M',
            ResidueCode::Asparagine => 'N',
            ResidueCode::Proline => 'P',
            ResidueCode::Glutamine => 'Q',
            ResidueCode::Arginine => 'R',
            ResidueCode::Serine => 'S',
            ResidueCode::Threonine => 'T',
            ResidueCode::Valine => 'V',
            ResidueCode::Tryptophan => 'W',
            ResidueCode::Tyrosine => 'Y',
            ResidueCode::Stop => '*',
            ResidueCode::GlutamineOrGlutamicAcid => 'Z',
            ResidueCode::Pyrrolysine => 'O',
            ResidueCode::Selenocysteine => 'U',
            ResidueCode::LeucineOrIsoleucine => 'J',
            ResidueCode::Unknown => 'X',
            ResidueCode::AsparagineOrAsparticAcid => 'B',
        }
    }

    /// Average residue mass in Daltons.
    pub fn mass(&self) -> f64 {
        match self {
            ResidueCode::Alanine => 71.08,
            ResidueCode::Cysteine => 103.14,
            ResidueCode::AsparticAcid => 115.09,
            ResidueCode::GlutamicAcid => 129.12,
            ResidueCode::Phenylalanine => 147.18,
            ResidueCode::Glycine => 57.06,
            ResidueCode::Histidine => 137.15,
            ResidueCode::Isoleucine => 113.17,
            ResidueCode::Lysine => 128.18,
            ResidueCode::Leucine => 113.17,
            ResidueCode::Methionine => 131.21,
            ResidueCode::Asparagine => 114.11,
            ResidueCode::Proline => 97.12,
            ResidueCode::Glutamine => 128.41,
            ResidueCode::Arginine => 156.2,
            ResidueCode::Serine => 87.08,
            ResidueCode::Threonine => 101.11,
            ResidueCode::Valine => 99.14,
            ResidueCode::Tryptophan => 186.21,
            ResidueCode::Tyrosine => 163.18,
            ResidueCode::Stop
            | ResidueCode::GlutamineOrGlutamicAcid
            | ResidueCode::Pyrrolysine
            | ResidueCode::Selenocysteine
            | ResidueCode::LeucineOrIsoleucine
            | ResidueCode::Unknown
            | ResidueCode::AsparagineOrAsparticAcid => 0.0,
        }
    }

    pub fn is_standard(&self) -> bool {
        self.mass() > 0.0
    }
}

impl fmt::Display for ResidueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Mass contributed by a single residue character.
///
/// Letters outside the residue table are still residues as far as the chain is
/// concerned; they simply contribute no mass.
pub fn residue_mass(code: char) -> f64 {
    ResidueCode::from_code(code).map_or(0.0, |residue| residue.mass())
}
