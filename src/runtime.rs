//! Saturating fixed-width arithmetic.
//!
//! All helpers return both the clamped result and a flag indicating whether
//! saturation occurred. Overflow never fails; callers check the flag. The
//! only failure conditions are invalid bit widths and zero divisors, and
//! those are reported before any arithmetic runs.
//!
//! Operands are `i64` and intermediates are computed in `i128`, so every
//! exact sum, difference, and product of two in-range operands is
//! representable before clamping.

use crate::error::RuntimeError;

/// Widest supported operand width. Widths above this would not fit the
/// unsigned range in an `i64`.
pub const MAX_BITS: u32 = 63;

/// Result of a saturating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatResult {
    /// Clamped value.
    pub value: i64,
    /// Whether clamping occurred.
    pub saturated: bool,
}

/// Minimum and maximum representable values for `bits`.
///
/// `signed` selects between two's complement and unsigned ranges. `bits`
/// must be between 1 and 63 inclusive.
pub fn bounds(bits: u32, signed: bool) -> Result<(i64, i64), RuntimeError> {
    if bits == 0 || bits > MAX_BITS {
        return Err(RuntimeError::InvalidBitWidth(bits));
    }
    if signed {
        Ok((-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1))
    } else {
        // Computed in u64: 1 << 63 would overflow an i64 shift.
        Ok((0, ((1u64 << bits) - 1) as i64))
    }
}

/// Clamp `value` to the representable range for `bits`.
pub fn clamp(value: i64, bits: u32, signed: bool) -> Result<SatResult, RuntimeError> {
    let (min, max) = bounds(bits, signed)?;
    Ok(clamp_wide(value as i128, min, max))
}

fn clamp_wide(value: i128, min: i64, max: i64) -> SatResult {
    if value > max as i128 {
        SatResult { value: max, saturated: true }
    } else if value < (min as i128) {
        SatResult { value: min, saturated: true }
    } else {
        SatResult { value: value as i64, saturated: false }
    }
}

/// Saturating addition.
pub fn sat_add(a: i64, b: i64, bits: u32, signed: bool) -> Result<SatResult, RuntimeError> {
    let (min, max) = bounds(bits, signed)?;
    Ok(clamp_wide(a as i128 + b as i128, min, max))
}

/// Saturating subtraction.
pub fn sat_sub(a: i64, b: i64, bits: u32, signed: bool) -> Result<SatResult, RuntimeError> {
    let (min, max) = bounds(bits, signed)?;
    Ok(clamp_wide(a as i128 - b as i128, min, max))
}

/// Saturating multiplication.
pub fn sat_mul(a: i64, b: i64, bits: u32, signed: bool) -> Result<SatResult, RuntimeError> {
    let (min, max) = bounds(bits, signed)?;
    Ok(clamp_wide(a as i128 * b as i128, min, max))
}

/// Saturating division, truncating toward zero.
///
/// The bit width is validated before the divisor, so an invalid width is
/// reported even when `b == 0`.
pub fn sat_div(a: i64, b: i64, bits: u32, signed: bool) -> Result<SatResult, RuntimeError> {
    let (min, max) = bounds(bits, signed)?;
    if b == 0 {
        return Err(RuntimeError::DivideByZero);
    }
    // i128 division truncates toward zero, which is the required rule.
    Ok(clamp_wide(a as i128 / b as i128, min, max))
}

/// Saturating remainder, consistent with [`sat_div`]'s truncating division:
/// `a - trunc(a / b) * b`.
pub fn sat_mod(a: i64, b: i64, bits: u32, signed: bool) -> Result<SatResult, RuntimeError> {
    let (min, max) = bounds(bits, signed)?;
    if b == 0 {
        return Err(RuntimeError::ModuloByZero);
    }
    Ok(clamp_wide(a as i128 % b as i128, min, max))
}
