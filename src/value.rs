//! Operands as callers hand them in (`Value`) and results as operations
//! hand them back (`Number`).

use {core::fmt, std::sync::Arc, bitflags::bitflags, num_complex::Complex64,
    num_rational::Rational64, rust_decimal::Decimal};
use crate::{Mpc, Mpfr, Mpq, Mpz, Result, Xmpz};

bitflags! {
    /// Conversions a foreign [`NumberLike`] object offers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const MPZ = 0x1;
        const MPQ = 0x2;
        const MPFR = 0x4;
        const MPC = 0x8;
    }
}

/// A foreign numeric type that knows how to turn itself into one of ours.
/// Only the conversions listed by `capabilities` are ever called.
pub trait NumberLike: fmt::Debug + Send + Sync {
    fn capabilities(&self) -> Capabilities;

    fn to_mpz(&self) -> Result<Mpz> {
        Err(crate::Error::type_err("object has no integer conversion"))
    }

    fn to_mpq(&self) -> Result<Mpq> {
        Err(crate::Error::type_err("object has no rational conversion"))
    }

    fn to_mpfr(&self) -> Result<Mpfr> {
        Err(crate::Error::type_err("object has no real conversion"))
    }

    fn to_mpc(&self) -> Result<Mpc> {
        Err(crate::Error::type_err("object has no complex conversion"))
    }
}

/// Any operand an operation accepts. Host types sit next to ours and take
/// part in dispatch on equal footing.
#[derive(Clone, Debug)]
pub enum Value {
    Mpz(Mpz),
    Xmpz(Xmpz),
    Mpq(Mpq),
    Mpfr(Mpfr),
    Mpc(Mpc),
    Int(i64),
    Float(f64),
    Fraction(Rational64),
    Decimal(Decimal),
    Complex(Complex64),
    Str(String),
    Other(Arc<dyn NumberLike>),
}

/// The result of an operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Mpz(Mpz),
    Mpq(Mpq),
    Mpfr(Mpfr),
    Mpc(Mpc),
}

impl Number {
    pub fn as_mpz(&self) -> Option<&Mpz> {
        match self {
            Number::Mpz(z) => Some(z),
            _ => None,
        }
    }

    pub fn as_mpq(&self) -> Option<&Mpq> {
        match self {
            Number::Mpq(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_mpfr(&self) -> Option<&Mpfr> {
        match self {
            Number::Mpfr(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_mpc(&self) -> Option<&Mpc> {
        match self {
            Number::Mpc(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Mpz(z) => fmt::Display::fmt(z, f),
            Number::Mpq(q) => fmt::Display::fmt(q, f),
            Number::Mpfr(x) => fmt::Display::fmt(x, f),
            Number::Mpc(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Mpz(z) => Value::Mpz(z),
            Number::Mpq(q) => Value::Mpq(q),
            Number::Mpfr(x) => Value::Mpfr(x),
            Number::Mpc(c) => Value::Mpc(c),
        }
    }
}

impl From<&Number> for Value {
    fn from(number: &Number) -> Self {
        number.clone().into()
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }

            impl From<&$t> for Value {
                fn from(v: &$t) -> Self {
                    Value::$variant(v.clone())
                }
            }
        )*
    };
}

value_from! {
    Mpz => Mpz,
    Xmpz => Xmpz,
    Mpq => Mpq,
    Mpfr => Mpfr,
    Mpc => Mpc,
    i64 => Int,
    f64 => Float,
    Rational64 => Fraction,
    Decimal => Decimal,
    Complex64 => Complex,
    String => Str,
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<rug::Integer> for Value {
    fn from(v: rug::Integer) -> Self {
        Value::Mpz(Mpz::from(v))
    }
}

impl From<Arc<dyn NumberLike>> for Value {
    fn from(v: Arc<dyn NumberLike>) -> Self {
        Value::Other(v)
    }
}
