use nalgebra::{Point3, Vector3};

/// Bead centres of one sampled chain, in the same order as the bead model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainConformation {
    positions: Vec<Point3<f64>>,
}

impl ChainConformation {
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self { positions }
    }

    /// Single bead at the origin.
    pub fn single() -> Self {
        Self::new(vec![Point3::origin()])
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for position in &mut self.positions {
            *position += offset;
        }
    }

    /// Appends `other` after the beads of `self`.
    pub fn concat(mut self, other: ChainConformation) -> Self {
        self.positions.extend(other.positions);
        self
    }
}

/// Independent conformations sampled for a single estimation request.
#[derive(Debug, Clone, Default)]
pub struct Ensemble {
    conformations: Vec<ChainConformation>,
}

impl Ensemble {
    pub fn new(conformations: Vec<ChainConformation>) -> Self {
        Self { conformations }
    }

    pub fn conformations(&self) -> &[ChainConformation] {
        &self.conformations
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainConformation> {
        self.conformations.iter()
    }

    pub fn len(&self) -> usize {
        self.conformations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conformations.is_empty()
    }

    /// Members `index, index + count, index + 2 * count, ...` of the ensemble.
    pub fn batch(&self, index: usize, count: usize) -> Vec<&ChainConformation> {
        self.conformations
            .iter()
            .skip(index)
            .step_by(count.max(1))
            .collect()
    }

    /// Splits the ensemble into `count` disjoint interleaved batches.
    pub fn batches(&self, count: usize) -> Vec<Vec<&ChainConformation>> {
        (0..count).map(|index| self.batch(index, count)).collect()
    }
}

impl FromIterator<ChainConformation> for Ensemble {
    fn from_iter<I: IntoIterator<Item = ChainConformation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
