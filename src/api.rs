//! Public entry points. Every operation exists twice: as a `Context` method
//! that works in (and reports flags into) that context, and as a free
//! function that uses this thread's current context.

use {core::cmp::Ordering, rug::{Complex, Float, Integer}};
use crate::{
    dispatch::{binary, unary},
    operands::{self, to_integer, Operand, PrecisionPolicy},
    ops::{self, int_floor_div, int_floor_mod, int_lshift, int_rshift},
    scope::with_context,
    value::{Number, Value},
    Context, Mpc, Mpfr, Mpq, Mpz, Result, Xmpz,
};

macro_rules! binary_ops {
    ($($(#[$doc:meta])* $name:ident => $op:ty, $out:ty;)*) => {
        impl Context {
            $(
                $(#[$doc])*
                pub fn $name(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Result<$out> {
                    binary::<$op>(&a.into(), &b.into(), self)
                }
            )*
        }

        $(
            $(#[$doc])*
            pub fn $name(a: impl Into<Value>, b: impl Into<Value>) -> Result<$out> {
                with_context(|ctx| ctx.$name(a, b))
            }
        )*
    };
}

macro_rules! unary_ops {
    ($($(#[$doc:meta])* $name:ident => $op:ty;)*) => {
        impl Context {
            $(
                $(#[$doc])*
                pub fn $name(&mut self, a: impl Into<Value>) -> Result<Number> {
                    unary::<$op>(&a.into(), self)
                }
            )*
        }

        $(
            $(#[$doc])*
            pub fn $name(a: impl Into<Value>) -> Result<Number> {
                with_context(|ctx| ctx.$name(a))
            }
        )*
    };
}

binary_ops! {
    add => ops::Add, Number;
    sub => ops::Sub, Number;
    mul => ops::Mul, Number;
    /// True division. Two integers give a rational if the context has
    /// `rational_division` set, otherwise a correctly rounded real.
    div => ops::TrueDiv, Number;
    /// Floor division; a rational or integer quotient is an integer.
    floor_div => ops::FloorDiv, Number;
    /// Remainder of floor division. It takes the sign of the divisor.
    modulo => ops::Mod, Number;
    divmod => ops::DivMod, (Number, Number);
    /// `a ** b`. A negative integer exponent gives a real; a negative real
    /// base with a fractional exponent gives a complex if the context has
    /// `allow_complex` set, NaN otherwise.
    pow => ops::Pow, Number;
    lshift => ops::Lshift, Number;
    /// Arithmetic right shift, rounding toward negative infinity.
    rshift => ops::Rshift, Number;
}

unary_ops! {
    abs => ops::Abs;
    neg => ops::Neg;
    pos => ops::Pos;
    /// Square root; integers and rationals give a real. A negative real
    /// gives a complex if the context has `allow_complex` set.
    sqrt => ops::Sqrt;
    square => ops::Square;
}

impl Context {
    /// `(a ** b) % m` over integers. A negative `b` needs `a` to be
    /// invertible modulo `m`. The result has the sign of `m`.
    pub fn pow_mod(&mut self, a: impl Into<Value>, b: impl Into<Value>, m: impl Into<Value>) -> Result<Number> {
        ops::pow_mod(&a.into(), &b.into(), &m.into(), self)
    }

    pub fn fma(&mut self, a: impl Into<Value>, b: impl Into<Value>, c: impl Into<Value>) -> Result<Number> {
        ops::fma(&a.into(), &b.into(), &c.into(), self)
    }

    /// `None` when either side is NaN; that also raises `erange`. Complex
    /// values have no order.
    pub fn cmp(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Result<Option<Ordering>> {
        ops::compare(&a.into(), &b.into(), self)
    }

    pub fn equal(&mut self, a: impl Into<Value>, b: impl Into<Value>) -> Result<bool> {
        ops::equal(&a.into(), &b.into(), self)
    }

    /// Puts an existing value through range checking and subnormalization
    /// for this context, recording flags as any operation would. A value
    /// that already came out of this context comes back unchanged.
    pub fn check_range(&mut self, x: &Mpfr) -> Result<Mpfr> {
        ops::check_range(x, self)
    }

    /// Raw conversion into the Real domain, without the result cleanup.
    /// `Operand::Ref` means `value` already satisfied `policy` and was
    /// passed through without a copy.
    pub fn to_real<'a>(&self, value: &'a Value, policy: PrecisionPolicy) -> Result<(Operand<'a, Float>, Ordering)> {
        operands::to_real(value, policy, self)
    }

    pub fn to_complex<'a>(
        &self,
        value: &'a Value,
        policy: PrecisionPolicy,
    ) -> Result<(Operand<'a, Complex>, (Ordering, Ordering))> {
        operands::to_complex(value, policy, self)
    }

    pub fn mpz(&mut self, value: impl Into<Value>) -> Result<Mpz> {
        ops::to_mpz(&value.into(), self)
    }

    pub fn mpq(&mut self, value: impl Into<Value>) -> Result<Mpq> {
        ops::to_mpq(&value.into(), self)
    }

    /// Rounded to this context's precision.
    pub fn mpfr(&mut self, value: impl Into<Value>) -> Result<Mpfr> {
        ops::to_mpfr(&value.into(), self)
    }

    /// Rounded to `precision` bits; everything else comes from this context.
    pub fn mpfr_with_precision(&mut self, value: impl Into<Value>, precision: u32) -> Result<Mpfr> {
        ops::to_mpfr_prec(&value.into(), precision, self)
    }

    pub fn mpc(&mut self, value: impl Into<Value>) -> Result<Mpc> {
        ops::to_mpc(&value.into(), self)
    }
}

pub fn pow_mod(a: impl Into<Value>, b: impl Into<Value>, m: impl Into<Value>) -> Result<Number> {
    with_context(|ctx| ctx.pow_mod(a, b, m))
}

pub fn fma(a: impl Into<Value>, b: impl Into<Value>, c: impl Into<Value>) -> Result<Number> {
    with_context(|ctx| ctx.fma(a, b, c))
}

pub fn cmp(a: impl Into<Value>, b: impl Into<Value>) -> Result<Option<Ordering>> {
    with_context(|ctx| ctx.cmp(a, b))
}

pub fn equal(a: impl Into<Value>, b: impl Into<Value>) -> Result<bool> {
    with_context(|ctx| ctx.equal(a, b))
}

pub fn mpz(value: impl Into<Value>) -> Result<Mpz> {
    with_context(|ctx| ctx.mpz(value))
}

pub fn mpq(value: impl Into<Value>) -> Result<Mpq> {
    with_context(|ctx| ctx.mpq(value))
}

pub fn mpfr(value: impl Into<Value>) -> Result<Mpfr> {
    with_context(|ctx| ctx.mpfr(value))
}

pub fn mpfr_with_precision(value: impl Into<Value>, precision: u32) -> Result<Mpfr> {
    with_context(|ctx| ctx.mpfr_with_precision(value, precision))
}

pub fn mpc(value: impl Into<Value>) -> Result<Mpc> {
    with_context(|ctx| ctx.mpc(value))
}

fn operand(value: impl Into<Value>, apply: impl FnOnce(&Integer) -> Result<()>) -> Result<()> {
    let value = value.into();
    apply(&*to_integer(&value)?)
}

/// In-place integer arithmetic. The right-hand side must be an integer.
impl Xmpz {
    pub fn iadd(&mut self, other: impl Into<Value>) -> Result<()> {
        operand(other, |b| {
            self.0 += b;
            Ok(())
        })
    }

    pub fn isub(&mut self, other: impl Into<Value>) -> Result<()> {
        operand(other, |b| {
            self.0 -= b;
            Ok(())
        })
    }

    pub fn imul(&mut self, other: impl Into<Value>) -> Result<()> {
        operand(other, |b| {
            self.0 *= b;
            Ok(())
        })
    }

    pub fn ifloor_div(&mut self, other: impl Into<Value>) -> Result<()> {
        operand(other, |b| {
            self.0 = int_floor_div(&self.0, b)?;
            Ok(())
        })
    }

    pub fn imod(&mut self, other: impl Into<Value>) -> Result<()> {
        operand(other, |b| {
            self.0 = int_floor_mod(&self.0, b)?;
            Ok(())
        })
    }

    pub fn ilshift(&mut self, other: impl Into<Value>) -> Result<()> {
        operand(other, |b| {
            self.0 = int_lshift(&self.0, b)?;
            Ok(())
        })
    }

    pub fn irshift(&mut self, other: impl Into<Value>) -> Result<()> {
        operand(other, |b| {
            self.0 = int_rshift(&self.0, b)?;
            Ok(())
        })
    }
}
