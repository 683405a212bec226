//! Exact integer kernels. Divisors that fit a machine word go straight to
//! GMP's `_ui` primitives; the results are the same as the general path.

use {core::ffi::c_ulong, gmp_mpfr_sys::gmp, rug::{ops::Pow, Assign, Integer}};
use crate::{Error, Result};

/// Sign and magnitude of a nonzero divisor that fits in one limb argument.
fn small_divisor(d: &Integer) -> Option<(bool, c_ulong)> {
    let d = d.to_i64()?;
    let magnitude = c_ulong::try_from(d.unsigned_abs()).ok()?;
    (magnitude != 0).then_some((d < 0, magnitude))
}

fn check_divisor(op: &str, d: &Integer) -> Result<()> {
    if *d == 0 {
        return Err(Error::zero_division(format!("{}: division or modulo by zero", op)));
    }
    Ok(())
}

/// Quotient rounded toward negative infinity.
pub(crate) fn floor_div(n: &Integer, d: &Integer) -> Result<Integer> {
    check_divisor("floordiv", d)?;
    let mut q = Integer::new();
    match small_divisor(d) {
        // floor(n / -m) == -ceil(n / m)
        Some((true, m)) => {
            unsafe { gmp::mpz_cdiv_q_ui(q.as_raw_mut(), n.as_raw(), m) };
            Ok(-q)
        }
        Some((false, m)) => {
            unsafe { gmp::mpz_fdiv_q_ui(q.as_raw_mut(), n.as_raw(), m) };
            Ok(q)
        }
        None => Ok(n.clone().div_rem_floor(d.clone()).0),
    }
}

/// Remainder with the sign of the divisor.
pub(crate) fn floor_mod(n: &Integer, d: &Integer) -> Result<Integer> {
    check_divisor("mod", d)?;
    let mut r = Integer::new();
    match small_divisor(d) {
        // n - (-m) * floor(n / -m) == n - m * ceil(n / m)
        Some((true, m)) => unsafe {
            gmp::mpz_cdiv_r_ui(r.as_raw_mut(), n.as_raw(), m);
        },
        Some((false, m)) => unsafe {
            gmp::mpz_fdiv_r_ui(r.as_raw_mut(), n.as_raw(), m);
        },
        None => r = n.clone().div_rem_floor(d.clone()).1,
    }
    Ok(r)
}

pub(crate) fn floor_divmod(n: &Integer, d: &Integer) -> Result<(Integer, Integer)> {
    check_divisor("divmod", d)?;
    if small_divisor(d).is_some() {
        return Ok((floor_div(n, d)?, floor_mod(n, d)?));
    }
    let (mut q, mut r) = (Integer::new(), Integer::new());
    (&mut q, &mut r).assign(n.div_rem_floor_ref(d));
    Ok((q, r))
}

/// `base ** exp` for a nonnegative exponent.
pub(crate) fn pow(base: &Integer, exp: &Integer) -> Result<Integer> {
    let exp = exp
        .to_u32()
        .ok_or_else(|| Error::value("pow() outrageous exponent"))?;
    Ok(base.clone().pow(exp))
}

/// Three-argument `pow`. The result of a negative modulus lies in
/// `(modulus, 0]`.
pub(crate) fn pow_mod(base: &Integer, exp: &Integer, modulus: &Integer) -> Result<Integer> {
    if *modulus == 0 {
        return Err(Error::value("pow() 3rd argument cannot be 0"));
    }
    let magnitude = Integer::from(modulus.abs_ref());
    let r = match base.pow_mod_ref(exp, &magnitude) {
        Some(r) => Integer::from(r),
        None => return Err(Error::value("pow() base is not invertible")),
    };
    Ok(if *modulus < 0 && r != 0 { r + modulus } else { r })
}

fn shift_count(op: &str, count: &Integer) -> Result<u32> {
    if *count < 0 {
        return Err(Error::value(format!("{}: negative shift count", op)));
    }
    count
        .to_u32()
        .ok_or_else(|| Error::overflow(format!("{}: outrageous shift count", op)))
}

pub(crate) fn lshift(a: &Integer, count: &Integer) -> Result<Integer> {
    Ok(a.clone() << shift_count("lshift", count)?)
}

/// Arithmetic shift: rounds toward negative infinity like floor division by
/// a power of two.
pub(crate) fn rshift(a: &Integer, count: &Integer) -> Result<Integer> {
    Ok(a.clone() >> shift_count("rshift", count)?)
}
