//! Human-readable byte counts and percentages.
//!
//! All sizes are `u64` bytes internally; floating point only appears at the
//! display boundary.

/// Unit ladder for [`human_size`], smallest first.
const UNITS: [&str; 5] = ["o", "Ko", "Mo", "Go", "To"];

/// Format a byte count with one decimal and the largest fitting unit.
///
/// Values keep dividing by 1024 while they are at least 1024, stopping at
/// the last unit rather than running past it.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let last = UNITS.len() - 1;
    for unit in &UNITS[..last] {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} {}", UNITS[last])
}

/// Share of `part` in `whole`, in percent. A zero `whole` counts as 1.
pub fn percent_of(part: u64, whole: u64) -> f64 {
    part as f64 / whole.max(1) as f64 * 100.0
}
