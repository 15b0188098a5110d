use std::fmt;

/// Steric radius (Å) of a bead standing in for one disordered residue.
pub const DISORDERED_STERIC_RADIUS: f64 = 1.9025;
/// Hydrodynamic radius (Å) of a bead standing in for one disordered residue.
pub const DISORDERED_HYDRODYNAMIC_RADIUS: f64 = 4.2;
/// Prefactor relating the mass (Da) of a structured region to its bead radius (Å).
pub const STRUCTURED_RADIUS_PREFACTOR: f64 = 0.7525;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeadType {
    Disordered,
    Structured,
}

impl fmt::Display for BeadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BeadType::Disordered => "disordered",
                BeadType::Structured => "structured",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bead {
    steric_radius: f64,
    hydrodynamic_radius: f64,
    bead_type: BeadType,
}

impl Bead {
    pub fn new(steric_radius: f64, hydrodynamic_radius: f64, bead_type: BeadType) -> Self {
        Self {
            steric_radius,
            hydrodynamic_radius,
            bead_type,
        }
    }

    /// A single flexible residue.
    pub fn disordered() -> Self {
        Self::new(
            DISORDERED_STERIC_RADIUS,
            DISORDERED_HYDRODYNAMIC_RADIUS,
            BeadType::Disordered,
        )
    }

    /// A folded region collapsed into one sphere whose radius scales with the
    /// cube root of the region mass.
    pub fn structured(region_mass: f64) -> Self {
        let radius = STRUCTURED_RADIUS_PREFACTOR * region_mass.cbrt();
        Self::new(radius, radius, BeadType::Structured)
    }

    pub fn steric_radius(&self) -> f64 {
        self.steric_radius
    }

    pub fn hydrodynamic_radius(&self) -> f64 {
        self.hydrodynamic_radius
    }

    pub fn bead_type(&self) -> BeadType {
        self.bead_type
    }
}

/// Coarse-grained chain: beads in connectivity order plus the mass of every
/// residue that went into them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeadModel {
    beads: Vec<Bead>,
    total_mass: f64,
}

impl BeadModel {
    pub fn new(beads: Vec<Bead>, total_mass: f64) -> Self {
        Self { beads, total_mass }
    }

    pub fn beads(&self) -> &[Bead] {
        &self.beads
    }

    pub fn len(&self) -> usize {
        self.beads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beads.is_empty()
    }

    /// Total mass in Daltons.
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    pub fn steric_radii(&self) -> Vec<f64> {
        self.beads.iter().map(Bead::steric_radius).collect()
    }

    pub fn hydrodynamic_radii(&self) -> Vec<f64> {
        self.beads.iter().map(Bead::hydrodynamic_radius).collect()
    }

    pub fn bead_types(&self) -> Vec<BeadType> {
        self.beads.iter().map(Bead::bead_type).collect()
    }

    pub fn count_of(&self, bead_type: BeadType) -> usize {
        self.beads
            .iter()
            .filter(|bead| bead.bead_type == bead_type)
            .count()
    }
}
