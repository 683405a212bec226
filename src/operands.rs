//! Promotion of operands into the representation an operation's domain
//! works in.

use {core::{cmp::Ordering, ops::Deref}, rug::{float::Round, Complex, Float, Integer, Rational}};
use crate::{classify::{classify, TypeCode}, registers, value::Value, Context, Error, Result};

/// Operand handed to a library call.
///
/// `Ref` is the caller's own value, passed through without a copy because it
/// already satisfies the requested precision and range. `Owned` is a freshly
/// converted value. There is no way to get `&mut T` out of either: an alias
/// must never be changed in place.
#[derive(Debug)]
pub enum Operand<'a, T> {
    Ref(&'a T),
    Owned(T),
}

impl<T> Deref for Operand<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Operand::Ref(value) => value,
            Operand::Owned(value) => value,
        }
    }
}

impl<T: Clone> Operand<'_, T> {
    pub fn is_alias(&self) -> bool {
        matches!(self, Operand::Ref(_))
    }

    pub fn into_owned(self) -> T {
        match self {
            Operand::Ref(value) => value.clone(),
            Operand::Owned(value) => value,
        }
    }
}

/// How the target precision is chosen when converting into Real or Complex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrecisionPolicy {
    /// Context precision; the result goes through the full cleanup.
    Context,
    /// Radix-2 sources keep their own precision and skip range checks.
    /// Anything else falls back to `ContextPlusGuard`.
    Exact,
    /// Context precision plus the context's guard bits.
    ContextPlusGuard,
}

impl PrecisionPolicy {
    pub fn code(self) -> u8 {
        match self {
            PrecisionPolicy::Context => 0,
            PrecisionPolicy::Exact | PrecisionPolicy::ContextPlusGuard => 1,
        }
    }
}

fn unsupported(code: TypeCode, target: &str) -> Error {
    Error::type_err(format!("cannot convert {:?} to '{}'", code, target))
}

fn in_range(x: &Float, ctx: &Context) -> bool {
    registers::exponent(x).map_or(true, |e| e >= ctx.exponent_min() && e <= ctx.exponent_max())
}

pub(crate) fn to_integer(value: &Value) -> Result<Operand<'_, Integer>> {
    match value {
        Value::Mpz(z) => Ok(Operand::Ref(&z.0)),
        Value::Xmpz(x) => Ok(Operand::Ref(&x.0)),
        Value::Int(i) => Ok(Operand::Owned(Integer::from(*i))),
        Value::Other(object) if classify(value) == TypeCode::HasMpz => {
            Ok(Operand::Owned(object.to_mpz()?.0))
        }
        _ => Err(unsupported(classify(value), "mpz")),
    }
}

pub(crate) fn to_rational(value: &Value) -> Result<Operand<'_, Rational>> {
    let code = classify(value);
    match value {
        Value::Mpq(q) => Ok(Operand::Ref(&q.0)),
        Value::Fraction(f) => Ok(Operand::Owned(Rational::from((*f.numer(), *f.denom())))),
        Value::Decimal(d) => {
            let scale = Integer::from(Integer::u_pow_u(10, d.scale()));
            Ok(Operand::Owned(Rational::from((Integer::from(d.mantissa()), scale))))
        }
        Value::Other(object) if code == TypeCode::HasMpq => Ok(Operand::Owned(object.to_mpq()?.0)),
        _ if code.is_integer() => Ok(Operand::Owned(Rational::from(to_integer(value)?.into_owned()))),
        _ => Err(unsupported(code, "mpq")),
    }
}

/// Sources that are radix-2 already, held at their own precision.
/// Integers count: they are stored at exactly as many bits as they need.
fn exact_float(value: &Value) -> Result<Option<Operand<'_, Float>>> {
    let code = classify(value);
    Ok(match value {
        Value::Mpfr(x) => Some(Operand::Ref(&x.value)),
        Value::Float(f) => Some(Operand::Owned(Float::with_val(f64::MANTISSA_DIGITS, *f))),
        Value::Other(object) if code == TypeCode::HasMpfr => Some(Operand::Owned(object.to_mpfr()?.value)),
        _ if code.is_integer() => {
            let z = to_integer(value)?;
            let prec = z.significant_bits().max(rug::float::prec_min());
            Some(Operand::Owned(Float::with_val(prec, &*z)))
        }
        _ => None,
    })
}

/// Rounds any Real-or-narrower source to `prec`. Rationals and decimals go
/// through an exact `Rational` first, so there is exactly one rounding.
pub(crate) fn float_at(value: &Value, prec: u32, round: Round) -> Result<(Float, Ordering)> {
    let code = classify(value);
    match value {
        Value::Mpfr(x) => Ok(Float::with_val_round(prec, &x.value, round)),
        Value::Float(f) => Ok(Float::with_val_round(prec, *f, round)),
        Value::Other(object) if code == TypeCode::HasMpfr => {
            Ok(Float::with_val_round(prec, &object.to_mpfr()?.value, round))
        }
        _ if code.is_integer() => Ok(Float::with_val_round(prec, &*to_integer(value)?, round)),
        _ if code.is_rational() => Ok(Float::with_val_round(prec, &*to_rational(value)?, round)),
        _ => Err(unsupported(code, "mpfr")),
    }
}

/// Converts into the Real domain. The returned ternary only means something
/// for `PrecisionPolicy::Context`.
pub(crate) fn to_real<'a>(
    value: &'a Value,
    policy: PrecisionPolicy,
    ctx: &Context,
) -> Result<(Operand<'a, Float>, Ordering)> {
    registers::ensure_wide();
    if policy != PrecisionPolicy::Context {
        if let Some(x) = exact_float(value)? {
            return Ok((x, Ordering::Equal));
        }
        let (x, rc) = float_at(value, ctx.guarded_prec(), ctx.mpfr_round())?;
        return Ok((Operand::Owned(x), rc));
    }
    if let Value::Mpfr(x) = value {
        if x.value.prec() == ctx.mpfr_prec() && !ctx.subnormalize() && in_range(&x.value, ctx) {
            return Ok((Operand::Ref(&x.value), x.rc));
        }
    }
    let (x, rc) = float_at(value, ctx.mpfr_prec(), ctx.mpfr_round())?;
    Ok((Operand::Owned(x), rc))
}

/// Converts into the Complex domain; a Real-or-narrower source becomes the
/// real part over a zero imaginary part.
pub(crate) fn to_complex<'a>(
    value: &'a Value,
    policy: PrecisionPolicy,
    ctx: &Context,
) -> Result<(Operand<'a, Complex>, (Ordering, Ordering))> {
    registers::ensure_wide();
    let code = classify(value);
    let exact = policy != PrecisionPolicy::Context;
    let (rp, ip) = if exact {
        (ctx.guarded(ctx.real_prec()), ctx.guarded(ctx.imag_prec()))
    } else {
        ctx.complex_prec()
    };
    let round = ctx.complex_round();
    let same = (Ordering::Equal, Ordering::Equal);
    match value {
        Value::Mpc(c) => {
            let fits = c.value.prec() == (rp, ip)
                && !ctx.subnormalize()
                && in_range(c.value.real(), ctx)
                && in_range(c.value.imag(), ctx);
            if exact || fits {
                Ok((Operand::Ref(&c.value), c.rc))
            } else {
                let (c, rc) = Complex::with_val_round((rp, ip), &c.value, round);
                Ok((Operand::Owned(c), rc))
            }
        }
        Value::Complex(z) => {
            if exact {
                Ok((Operand::Owned(Complex::with_val(f64::MANTISSA_DIGITS, (z.re, z.im))), same))
            } else {
                let (c, rc) = Complex::with_val_round((rp, ip), (z.re, z.im), round);
                Ok((Operand::Owned(c), rc))
            }
        }
        Value::Other(object) if code == TypeCode::HasMpc => {
            let c = object.to_mpc()?.value;
            if exact {
                Ok((Operand::Owned(c), same))
            } else {
                let (c, rc) = Complex::with_val_round((rp, ip), &c, round);
                Ok((Operand::Owned(c), rc))
            }
        }
        _ if code.is_real() => {
            let exact_re = if exact { exact_float(value)? } else { None };
            let (re, rc) = match exact_re {
                Some(re) => (re.into_owned(), Ordering::Equal),
                None => float_at(value, rp, round.0)?,
            };
            Ok((Operand::Owned(Complex::from((re, Float::new(ip)))), (rc, Ordering::Equal)))
        }
        _ => Err(unsupported(code, "mpc")),
    }
}
