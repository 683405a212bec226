//! Per-domain bodies of every operation. The promotion ladder lives in
//! `dispatch`; each type here only says what the operation means in the
//! domains where it means anything.

mod integer;
mod real;

pub(crate) use integer::{floor_div as int_floor_div, floor_mod as int_floor_mod, lshift as int_lshift,
    rshift as int_rshift};

use {core::cmp::Ordering, rug::{ops::Pow as _, Complex, Float, Integer, Rational}};
use crate::{
    classify::{classify, Domain},
    cleanup::{commit, complex_op, finish_complex, finish_real, note_rounding, real_op},
    dispatch::{binary, common_domain, Binary, Unary},
    context::check_precision,
    operands::{float_at, to_complex, to_integer, to_rational, to_real, PrecisionPolicy},
    registers,
    value::{Number, Value},
    Context, Error, Flags, Mpc, Mpfr, Mpq, Mpz, Result,
};

fn mpz(value: Integer) -> Number {
    Number::Mpz(Mpz(value))
}

fn mpq(value: Rational) -> Number {
    Number::Mpq(Mpq(value))
}

fn exact(value: &Integer) -> Float {
    Float::with_val(value.significant_bits().max(rug::float::prec_min()), value)
}

fn rational_zero_check(op: &str, b: &Rational) -> Result<()> {
    if *b == 0 {
        return Err(Error::zero_division(format!("{}: division or modulo by zero", op)));
    }
    Ok(())
}

macro_rules! exact_and_rounded {
    ($($name:ident, $label:literal, $sym:tt;)*) => {
        $(
            pub(crate) struct $name;

            impl Binary for $name {
                const NAME: &'static str = $label;
                type Output = Number;

                fn integer(a: &Integer, b: &Integer, _: &mut Context) -> Result<Number> {
                    Ok(mpz(Integer::from(a $sym b)))
                }

                fn rational(a: &Rational, b: &Rational, _: &mut Context) -> Result<Number> {
                    Ok(mpq(Rational::from(a $sym b)))
                }

                fn real(a: &Float, b: &Float, ctx: &mut Context) -> Result<Number> {
                    real_op(ctx, $label, |prec, round| Float::with_val_round(prec, a $sym b, round))
                        .map(Number::Mpfr)
                }

                fn complex(a: &Complex, b: &Complex, ctx: &mut Context) -> Result<Number> {
                    complex_op(ctx, $label, |prec, round| Complex::with_val_round(prec, a $sym b, round))
                        .map(Number::Mpc)
                }
            }
        )*
    };
}

exact_and_rounded! {
    Add, "add", +;
    Sub, "sub", -;
    Mul, "mul", *;
}

pub(crate) struct TrueDiv;

impl Binary for TrueDiv {
    const NAME: &'static str = "truediv";
    type Output = Number;

    /// Exact quotient when the context asks for rational division,
    /// otherwise the quotient rounded once from its exact value.
    fn integer(a: &Integer, b: &Integer, ctx: &mut Context) -> Result<Number> {
        if *b == 0 {
            return Err(Error::zero_division("truediv: division by zero"));
        }
        let q = Rational::from((a.clone(), b.clone()));
        if ctx.rational_division() {
            return Ok(mpq(q));
        }
        real_op(ctx, Self::NAME, |prec, round| Float::with_val_round(prec, &q, round)).map(Number::Mpfr)
    }

    fn rational(a: &Rational, b: &Rational, _: &mut Context) -> Result<Number> {
        rational_zero_check(Self::NAME, b)?;
        Ok(mpq(Rational::from(a / b)))
    }

    fn real(a: &Float, b: &Float, ctx: &mut Context) -> Result<Number> {
        real_op(ctx, Self::NAME, |prec, round| Float::with_val_round(prec, a / b, round)).map(Number::Mpfr)
    }

    fn complex(a: &Complex, b: &Complex, ctx: &mut Context) -> Result<Number> {
        complex_op(ctx, Self::NAME, |prec, round| {
            if b.is_zero() {
                registers::set_divzero();
            }
            Complex::with_val_round(prec, a / b, round)
        })
        .map(Number::Mpc)
    }
}

fn rational_floor(a: &Rational, b: &Rational) -> Integer {
    Rational::from(a / b).floor().into_numer_denom().0
}

/// Rounds one half of a real floor division into the context.
fn finish_floor(ctx: &mut Context, op: &'static str, a: &Float, b: &Float, x: &Float) -> Result<Mpfr> {
    real_op(ctx, op, |prec, round| {
        if b.is_zero() && !a.is_nan() {
            registers::set_divzero();
        }
        if x.is_nan() {
            registers::set_nanflag();
        }
        Float::with_val_round(prec, x, round)
    })
}

pub(crate) struct FloorDiv;

impl Binary for FloorDiv {
    const NAME: &'static str = "floordiv";
    type Output = Number;

    fn integer(a: &Integer, b: &Integer, _: &mut Context) -> Result<Number> {
        integer::floor_div(a, b).map(mpz)
    }

    fn rational(a: &Rational, b: &Rational, _: &mut Context) -> Result<Number> {
        rational_zero_check(Self::NAME, b)?;
        Ok(mpz(rational_floor(a, b)))
    }

    fn real(a: &Float, b: &Float, ctx: &mut Context) -> Result<Number> {
        let (q, _) = real::floor_divmod(a, b);
        finish_floor(ctx, Self::NAME, a, b, &q).map(Number::Mpfr)
    }
}

pub(crate) struct Mod;

impl Binary for Mod {
    const NAME: &'static str = "mod";
    type Output = Number;

    fn integer(a: &Integer, b: &Integer, _: &mut Context) -> Result<Number> {
        integer::floor_mod(a, b).map(mpz)
    }

    fn rational(a: &Rational, b: &Rational, _: &mut Context) -> Result<Number> {
        rational_zero_check(Self::NAME, b)?;
        let q = Rational::from(rational_floor(a, b));
        Ok(mpq(a.clone() - q * b))
    }

    fn real(a: &Float, b: &Float, ctx: &mut Context) -> Result<Number> {
        let (_, m) = real::floor_divmod(a, b);
        finish_floor(ctx, Self::NAME, a, b, &m).map(Number::Mpfr)
    }
}

pub(crate) struct DivMod;

impl Binary for DivMod {
    const NAME: &'static str = "divmod";
    type Output = (Number, Number);

    fn integer(a: &Integer, b: &Integer, _: &mut Context) -> Result<Self::Output> {
        let (q, r) = integer::floor_divmod(a, b)?;
        Ok((mpz(q), mpz(r)))
    }

    fn rational(a: &Rational, b: &Rational, _: &mut Context) -> Result<Self::Output> {
        rational_zero_check(Self::NAME, b)?;
        let q = rational_floor(a, b);
        let m = a.clone() - Rational::from(q.clone()) * b;
        Ok((mpz(q), mpq(m)))
    }

    fn real(a: &Float, b: &Float, ctx: &mut Context) -> Result<Self::Output> {
        let (q, m) = real::floor_divmod(a, b);
        let q = finish_floor(ctx, Self::NAME, a, b, &q)?;
        let m = finish_floor(ctx, Self::NAME, a, b, &m)?;
        Ok((Number::Mpfr(q), Number::Mpfr(m)))
    }
}

fn complex_of(x: &Float) -> Complex {
    Complex::with_val(x.prec(), x)
}

pub(crate) struct Pow;

impl Binary for Pow {
    const NAME: &'static str = "pow";
    type Output = Number;

    fn integer(a: &Integer, b: &Integer, ctx: &mut Context) -> Result<Number> {
        if *b < 0 {
            return Self::real(&exact(a), &exact(b), ctx);
        }
        integer::pow(a, b).map(mpz)
    }

    /// Integer exponents only; anything else is computed as a real.
    fn rational(a: &Rational, b: &Rational, ctx: &mut Context) -> Result<Number> {
        if *b.denom() != 1 {
            let (x, _) = Float::with_val_round(ctx.guarded_prec(), a, ctx.mpfr_round());
            let (y, _) = Float::with_val_round(ctx.guarded_prec(), b, ctx.mpfr_round());
            return Self::real(&x, &y, ctx);
        }
        let exp = b.numer().to_i32().ok_or_else(|| Error::value("pow() outrageous exponent"))?;
        if exp < 0 {
            if *a == 0 {
                return Err(Error::zero_division("pow: zero cannot be raised to a negative power"));
            }
            return Ok(mpq(a.clone().recip().pow(exp.unsigned_abs())));
        }
        Ok(mpq(a.clone().pow(exp.unsigned_abs())))
    }

    /// A negative base with a fractional exponent has only complex powers.
    fn real(a: &Float, b: &Float, ctx: &mut Context) -> Result<Number> {
        if ctx.allow_complex() && *a < 0 && b.is_finite() && !b.is_integer() {
            return Self::complex(&complex_of(a), &complex_of(b), ctx);
        }
        real_op(ctx, Self::NAME, |prec, round| Float::with_val_round(prec, a.pow(b), round)).map(Number::Mpfr)
    }

    fn complex(a: &Complex, b: &Complex, ctx: &mut Context) -> Result<Number> {
        complex_op(ctx, Self::NAME, |prec, round| Complex::with_val_round(prec, a.pow(b), round))
            .map(Number::Mpc)
    }
}

pub(crate) struct Lshift;

impl Binary for Lshift {
    const NAME: &'static str = "lshift";
    type Output = Number;

    fn integer(a: &Integer, b: &Integer, _: &mut Context) -> Result<Number> {
        integer::lshift(a, b).map(mpz)
    }
}

pub(crate) struct Rshift;

impl Binary for Rshift {
    const NAME: &'static str = "rshift";
    type Output = Number;

    fn integer(a: &Integer, b: &Integer, _: &mut Context) -> Result<Number> {
        integer::rshift(a, b).map(mpz)
    }
}

pub(crate) struct Cmp;

impl Binary for Cmp {
    const NAME: &'static str = "cmp";
    type Output = Option<Ordering>;

    fn integer(a: &Integer, b: &Integer, _: &mut Context) -> Result<Self::Output> {
        Ok(Some(a.cmp(b)))
    }

    fn rational(a: &Rational, b: &Rational, _: &mut Context) -> Result<Self::Output> {
        Ok(Some(a.cmp(b)))
    }

    fn real(a: &Float, b: &Float, ctx: &mut Context) -> Result<Self::Output> {
        unordered(ctx, Self::NAME, a.partial_cmp(b))
    }
}

/// A comparison involving NaN has no answer and raises `erange`.
fn unordered(ctx: &mut Context, op: &'static str, ord: Option<Ordering>) -> Result<Option<Ordering>> {
    if ord.is_none() {
        commit(ctx, op, Flags::ERANGE)?;
    }
    Ok(ord)
}

/// Three-way comparison. A rational never gets rounded to meet a real: the
/// two are compared exactly.
pub(crate) fn compare(a: &Value, b: &Value, ctx: &mut Context) -> Result<Option<Ordering>> {
    if common_domain(Cmp::NAME, &[a, b])? == Domain::Real {
        let is_fraction = |v: &Value| {
            let code = classify(v);
            code.is_rational() && !code.is_integer()
        };
        if is_fraction(a) {
            let (y, _) = to_real(b, PrecisionPolicy::Exact, ctx)?;
            let ord = y.partial_cmp(&*to_rational(a)?).map(Ordering::reverse);
            return unordered(ctx, Cmp::NAME, ord);
        }
        if is_fraction(b) {
            let (x, _) = to_real(a, PrecisionPolicy::Exact, ctx)?;
            let ord = x.partial_cmp(&*to_rational(b)?);
            return unordered(ctx, Cmp::NAME, ord);
        }
    }
    binary::<Cmp>(a, b, ctx)
}

/// Equality works in every domain; complex values are equal part by part.
pub(crate) fn equal(a: &Value, b: &Value, ctx: &mut Context) -> Result<bool> {
    if common_domain("eq", &[a, b])? != Domain::Complex {
        return Ok(compare(a, b, ctx)? == Some(Ordering::Equal));
    }
    let (x, _) = to_complex(a, PrecisionPolicy::Exact, ctx)?;
    let (y, _) = to_complex(b, PrecisionPolicy::Exact, ctx)?;
    let has_nan = |c: &Complex| c.real().is_nan() || c.imag().is_nan();
    if has_nan(&x) || has_nan(&y) {
        commit(ctx, "eq", Flags::ERANGE)?;
        return Ok(false);
    }
    Ok(*x == *y)
}

pub(crate) struct Abs;

impl Unary for Abs {
    const NAME: &'static str = "abs";
    type Output = Number;

    fn integer(a: &Integer, _: &mut Context) -> Result<Number> {
        Ok(mpz(Integer::from(a.abs_ref())))
    }

    fn rational(a: &Rational, _: &mut Context) -> Result<Number> {
        Ok(mpq(Rational::from(a.abs_ref())))
    }

    fn real(a: &Float, ctx: &mut Context) -> Result<Number> {
        real_op(ctx, Self::NAME, |prec, round| Float::with_val_round(prec, a.abs_ref(), round)).map(Number::Mpfr)
    }

    /// The modulus, at the real-part precision.
    fn complex(a: &Complex, ctx: &mut Context) -> Result<Number> {
        registers::clear_flags();
        let (x, rc) = Float::with_val_round(ctx.real_prec(), a.abs_ref(), ctx.real_mpfr_round());
        note_rounding(rc);
        finish_real(ctx, Self::NAME, x, rc).map(Number::Mpfr)
    }
}

pub(crate) struct Neg;

impl Unary for Neg {
    const NAME: &'static str = "neg";
    type Output = Number;

    fn integer(a: &Integer, _: &mut Context) -> Result<Number> {
        Ok(mpz(Integer::from(-a)))
    }

    fn rational(a: &Rational, _: &mut Context) -> Result<Number> {
        Ok(mpq(Rational::from(-a)))
    }

    fn real(a: &Float, ctx: &mut Context) -> Result<Number> {
        real_op(ctx, Self::NAME, |prec, round| Float::with_val_round(prec, -a, round)).map(Number::Mpfr)
    }

    fn complex(a: &Complex, ctx: &mut Context) -> Result<Number> {
        complex_op(ctx, Self::NAME, |prec, round| Complex::with_val_round(prec, -a, round)).map(Number::Mpc)
    }
}

/// Unary plus: exact values pass through, floating values are rounded to
/// the context.
pub(crate) struct Pos;

impl Unary for Pos {
    const NAME: &'static str = "pos";
    type Output = Number;

    fn integer(a: &Integer, _: &mut Context) -> Result<Number> {
        Ok(mpz(a.clone()))
    }

    fn rational(a: &Rational, _: &mut Context) -> Result<Number> {
        Ok(mpq(a.clone()))
    }

    fn real(a: &Float, ctx: &mut Context) -> Result<Number> {
        real_op(ctx, Self::NAME, |prec, round| Float::with_val_round(prec, a, round)).map(Number::Mpfr)
    }

    fn complex(a: &Complex, ctx: &mut Context) -> Result<Number> {
        complex_op(ctx, Self::NAME, |prec, round| Complex::with_val_round(prec, a, round)).map(Number::Mpc)
    }
}

pub(crate) struct Sqrt;

impl Unary for Sqrt {
    const NAME: &'static str = "sqrt";
    type Output = Number;

    fn real(a: &Float, ctx: &mut Context) -> Result<Number> {
        if ctx.allow_complex() && *a < 0 {
            return Self::complex(&complex_of(a), ctx);
        }
        real_op(ctx, Self::NAME, |prec, round| Float::with_val_round(prec, a.sqrt_ref(), round)).map(Number::Mpfr)
    }

    fn complex(a: &Complex, ctx: &mut Context) -> Result<Number> {
        complex_op(ctx, Self::NAME, |prec, round| Complex::with_val_round(prec, a.sqrt_ref(), round))
            .map(Number::Mpc)
    }
}

pub(crate) struct Square;

impl Unary for Square {
    const NAME: &'static str = "square";
    type Output = Number;

    fn integer(a: &Integer, _: &mut Context) -> Result<Number> {
        Ok(mpz(Integer::from(a.square_ref())))
    }

    fn rational(a: &Rational, _: &mut Context) -> Result<Number> {
        Ok(mpq(Rational::from(a.square_ref())))
    }

    fn real(a: &Float, ctx: &mut Context) -> Result<Number> {
        real_op(ctx, Self::NAME, |prec, round| Float::with_val_round(prec, a.square_ref(), round))
            .map(Number::Mpfr)
    }

    fn complex(a: &Complex, ctx: &mut Context) -> Result<Number> {
        complex_op(ctx, Self::NAME, |prec, round| Complex::with_val_round(prec, a.square_ref(), round))
            .map(Number::Mpc)
    }
}

/// `a * b + c` with a single rounding.
pub(crate) fn fma(a: &Value, b: &Value, c: &Value, ctx: &mut Context) -> Result<Number> {
    let exact = PrecisionPolicy::Exact;
    match common_domain("fma", &[a, b, c])? {
        Domain::Integer => {
            let (x, y, z) = (to_integer(a)?, to_integer(b)?, to_integer(c)?);
            Ok(mpz(Integer::from(&*x * &*y) + &*z))
        }
        Domain::Rational => {
            let (x, y, z) = (to_rational(a)?, to_rational(b)?, to_rational(c)?);
            Ok(mpq(Rational::from(&*x * &*y) + &*z))
        }
        Domain::Real => {
            let (x, y, z) = (to_real(a, exact, ctx)?.0, to_real(b, exact, ctx)?.0, to_real(c, exact, ctx)?.0);
            real_op(ctx, "fma", |prec, round| Float::with_val_round(prec, &*x * &*y + &*z, round))
                .map(Number::Mpfr)
        }
        Domain::Complex => {
            let (x, y, z) = (
                to_complex(a, exact, ctx)?.0,
                to_complex(b, exact, ctx)?.0,
                to_complex(c, exact, ctx)?.0,
            );
            complex_op(ctx, "fma", |prec, round| Complex::with_val_round(prec, &*x * &*y + &*z, round))
                .map(Number::Mpc)
        }
    }
}

/// Three-argument `pow`, defined only when all three are integers.
pub(crate) fn pow_mod(a: &Value, b: &Value, m: &Value, _ctx: &mut Context) -> Result<Number> {
    if common_domain("pow", &[a, b, m])? != Domain::Integer {
        return Err(Error::type_err("pow() 3rd argument not allowed unless all arguments are integers"));
    }
    integer::pow_mod(&*to_integer(a)?, &*to_integer(b)?, &*to_integer(m)?).map(mpz)
}

/// Re-runs the result cleanup on an existing value.
pub(crate) fn check_range(x: &Mpfr, ctx: &mut Context) -> Result<Mpfr> {
    registers::clear_flags();
    finish_real(ctx, "check_range", x.value.clone(), x.rc)
}

/// Constructor conversions: these round to the context exactly once and
/// return a cleaned-up value.
pub(crate) fn to_mpz(value: &Value, ctx: &mut Context) -> Result<Mpz> {
    let code = classify(value);
    match value {
        Value::Str(s) => Mpz::parse(s, 10),
        _ if code.is_integer() => Ok(Mpz(to_integer(value)?.into_owned())),
        _ if code.is_rational() => Ok(Mpz(to_rational(value)?.into_owned().trunc().into_numer_denom().0)),
        _ if code.is_real() => {
            let (x, _) = to_real(value, PrecisionPolicy::Exact, ctx)?;
            Mpfr::from_parts(x.into_owned(), Ordering::Equal).to_mpz(ctx)
        }
        _ => Err(Error::type_err(format!("mpz() cannot convert {:?}", code))),
    }
}

pub(crate) fn to_mpq(value: &Value, ctx: &mut Context) -> Result<Mpq> {
    let code = classify(value);
    match value {
        Value::Str(s) => Mpq::parse(s, 10),
        _ if code.is_rational() => Ok(Mpq(to_rational(value)?.into_owned())),
        _ if code.is_real() => {
            let (x, _) = to_real(value, PrecisionPolicy::Exact, ctx)?;
            Mpfr::from_parts(x.into_owned(), Ordering::Equal).to_mpq()
        }
        _ => Err(Error::type_err(format!("mpq() cannot convert {:?}", code))),
    }
}

pub(crate) fn to_mpfr(value: &Value, ctx: &mut Context) -> Result<Mpfr> {
    if let Value::Str(s) = value {
        return Mpfr::parse(s, 10, ctx);
    }
    if !classify(value).is_real() {
        return Err(Error::type_err(format!("mpfr() cannot convert {:?}", classify(value))));
    }
    registers::clear_flags();
    let (x, rc) = to_real(value, PrecisionPolicy::Context, ctx)?;
    if !x.is_alias() {
        note_rounding(rc);
    }
    finish_real(ctx, "mpfr()", x.into_owned(), rc)
}

/// `to_mpfr` at `prec` bits instead of the context precision.
pub(crate) fn to_mpfr_prec(value: &Value, prec: u32, ctx: &mut Context) -> Result<Mpfr> {
    let prec = check_precision(prec)?;
    if let Value::Str(s) = value {
        return Mpfr::parse_prec(s, 10, prec, ctx);
    }
    if !classify(value).is_real() {
        return Err(Error::type_err(format!("mpfr() cannot convert {:?}", classify(value))));
    }
    registers::clear_flags();
    let (x, rc) = float_at(value, prec, ctx.mpfr_round())?;
    note_rounding(rc);
    finish_real(ctx, "mpfr()", x, rc)
}

pub(crate) fn to_mpc(value: &Value, ctx: &mut Context) -> Result<Mpc> {
    if let Value::Str(s) = value {
        return Mpc::parse(s, ctx);
    }
    registers::clear_flags();
    let (c, rc) = to_complex(value, PrecisionPolicy::Context, ctx)?;
    if !c.is_alias() {
        note_rounding(rc.0);
        note_rounding(rc.1);
    }
    finish_complex(ctx, "mpc()", c.into_owned(), rc)
}
