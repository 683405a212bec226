use rug::{float::Special, Float};

fn signed_zero(prec: u32, negative: bool) -> Float {
    Float::with_val(prec, if negative { Special::NegZero } else { Special::Zero })
}

/// Floored quotient and remainder of two reals, following host float
/// conventions: the remainder has the sign of the divisor, a zero quotient
/// keeps the sign of the true quotient, and the pair is unrounded (held at
/// a working precision wide enough for either operand).
///
/// Callers round to the context and raise flags themselves.
pub(crate) fn floor_divmod(a: &Float, b: &Float) -> (Float, Float) {
    let wide = a.prec().max(b.prec());
    let nan = || Float::with_val(wide, Special::Nan);
    if a.is_nan() || b.is_nan() || a.is_infinite() {
        return (nan(), nan());
    }
    if b.is_zero() {
        let q = if a.is_zero() {
            nan()
        } else {
            let negative = a.is_sign_negative() != b.is_sign_negative();
            Float::with_val(wide, if negative { Special::NegInfinity } else { Special::Infinity })
        };
        return (q, nan());
    }

    let work = wide.saturating_mul(2).saturating_add(64).min(rug::float::prec_max());
    // fmod is exact at the operands' own precision.
    let mut m = Float::with_val(wide, a % b);
    let mut div = Float::with_val(work, a - &m);
    div /= b;
    if m.is_zero() {
        m = signed_zero(wide, b.is_sign_negative());
    } else if m.is_sign_negative() != b.is_sign_negative() {
        m = Float::with_val(work, &m + b);
        div -= 1;
    }
    let q = if div.is_zero() {
        signed_zero(wide, a.is_sign_negative() != b.is_sign_negative())
    } else {
        let mut q = div.clone().floor();
        if Float::with_val(work, &div - &q) > 0.5 {
            q += 1;
        }
        q
    };
    (q, m)
}
