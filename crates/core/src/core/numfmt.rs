//! Fixed-point float formatting without `format!("{:.N}")`.
//!
//! Float-to-decimal formatting has panicked on wasm in some toolchain/browser
//! combinations, and HUD text is rendered every frame. These helpers round
//! into an `i64` and format integers instead.

/// `v` with exactly `decimals` fractional digits (at most 9).
pub fn fixed(v: f64, decimals: usize) -> String {
    fixed_inner(v, decimals, false)
}

/// Like [`fixed`] but always prints a sign (`+0.25`, `-1.00`).
pub fn signed_fixed(v: f64, decimals: usize) -> String {
    fixed_inner(v, decimals, true)
}

fn non_finite(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_sign_positive() {
        "Inf".to_string()
    } else {
        "-Inf".to_string()
    }
}

fn fixed_inner(v: f64, decimals: usize, force_sign: bool) -> String {
    if !v.is_finite() {
        return non_finite(v);
    }

    let decimals = decimals.min(9);
    let scale = 10_i64.pow(decimals as u32);
    let scaled = (v * scale as f64).round();
    if !scaled.is_finite() || scaled.abs() > i64::MAX as f64 {
        return non_finite(if v.is_sign_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let scaled = scaled as i64;
    let abs = scaled.unsigned_abs();
    let int_part = abs / scale as u64;
    let frac_part = abs % scale as u64;

    let mut out = String::new();
    if scaled < 0 {
        out.push('-');
    } else if force_sign {
        out.push('+');
    }
    out.push_str(&int_part.to_string());
    if decimals > 0 {
        let frac = frac_part.to_string();
        out.push('.');
        out.extend(std::iter::repeat('0').take(decimals - frac.len()));
        out.push_str(&frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_and_pads() {
        assert_eq!(fixed(3.14159, 2), "3.14");
        assert_eq!(fixed(2.005, 0), "2");
        assert_eq!(fixed(0.05, 2), "0.05");
        assert_eq!(fixed(-1.5, 1), "-1.5");
        assert_eq!(fixed(250.0, 1), "250.0");
    }

    #[test]
    fn sign_is_forced_on_request() {
        assert_eq!(signed_fixed(0.25, 2), "+0.25");
        assert_eq!(signed_fixed(-0.25, 2), "-0.25");
        assert_eq!(signed_fixed(0.0, 1), "+0.0");
    }

    #[test]
    fn tiny_negatives_round_to_unsigned_zero() {
        assert_eq!(fixed(-0.0001, 2), "0.00");
    }

    #[test]
    fn non_finite_values_are_named() {
        assert_eq!(fixed(f64::NAN, 2), "NaN");
        assert_eq!(fixed(f64::INFINITY, 2), "Inf");
        assert_eq!(fixed(f64::NEG_INFINITY, 2), "-Inf");
        assert_eq!(fixed(1e300, 3), "Inf");
    }
}
