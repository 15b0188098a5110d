use std::f64::consts::PI;

/// Boltzmann constant in J/K, at the precision diffusion coefficients are
/// reported with.
pub const BOLTZMANN_CONSTANT: f64 = 1.38e-23;

/// Ångström to metre.
const ANGSTROM_TO_METRE: f64 = 1e-10;
/// Viscosity scale applied to the centipoise input.
const VISCOSITY_SCALE: f64 = 0.01;

/// Stokes-Einstein translational diffusion coefficient, reported in m²/s.
///
/// `rh` is in Ångström, `temperature` in kelvin and `viscosity` in
/// centipoise. The expression is evaluated as
/// `kB * T / (1e-10 * rh * 6 * pi * 0.01 * viscosity)` so that published
/// values are reproduced bit for bit.
pub fn diffusion_coefficient(rh: f64, temperature: f64, viscosity: f64) -> f64 {
    BOLTZMANN_CONSTANT * temperature
        / (ANGSTROM_TO_METRE * rh * 6.0 * PI * VISCOSITY_SCALE * viscosity)
}
