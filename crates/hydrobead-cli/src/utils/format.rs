/// Formats `value` in scientific notation with four decimals and a signed,
/// at least two-digit exponent, e.g. `1.2500e+01` or `1.7573e-11`.
pub fn scientific(value: f64) -> String {
    let formatted = format!("{value:.4e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => {
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            Err(_) => formatted,
        },
        None => formatted,
    }
}
