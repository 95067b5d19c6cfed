use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
///
/// Every flow value, total and scalar in the aggregation pass uses this type
/// so that sums are order-independent and reproducible.
pub type Fixed64 = I32F32;

/// Convert a host-reported f64 to Fixed64.
///
/// Returns `None` for NaN, infinities, and values outside the Q32.32 range.
/// Use only at the host boundary, never inside the aggregation loop.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Option<Fixed64> {
    Fixed64::checked_from_num(v)
}

/// Convert Fixed64 to f64. Use only for display and host hand-off.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Parse a textual host field (e.g. `"12.5"`) into Fixed64.
///
/// Surrounding whitespace is ignored. Returns `None` if the text is not a
/// finite number or does not fit.
pub fn parse_fixed64(text: &str) -> Option<Fixed64> {
    text.trim().parse::<f64>().ok().and_then(f64_to_fixed64)
}

/// Checked division for Fixed64 that returns None on zero divisor.
#[inline]
pub fn checked_div_64(a: Fixed64, b: Fixed64) -> Option<Fixed64> {
    a.checked_div(b)
}
