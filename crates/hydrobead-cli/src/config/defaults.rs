/// Largest ensemble the CLI accepts.
pub const MAX_ENSEMBLE_SIZE: usize = 5000;

pub struct DefaultsConfig {
    pub ensemble_size: usize,
    pub temperature: f64,
    pub viscosity: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ensemble_size: 30,
            temperature: 300.0,
            viscosity: 1.0,
        }
    }
}
