//! Structural classification of operands into numeric tiers.

use crate::value::{Capabilities, Value};

/// Numeric domains. Each one contains the previous: the derived `Ord`
/// is the promotion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    Integer,
    Rational,
    Real,
    Complex,
}

/// What an operand is, as far as dispatch cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeCode {
    Unknown,
    Mpz,
    Xmpz,
    HostInt,
    HasMpz,
    Mpq,
    HostFraction,
    HostDecimal,
    HasMpq,
    Mpfr,
    HostFloat,
    HasMpfr,
    Mpc,
    HostComplex,
    HasMpc,
}

impl TypeCode {
    pub fn domain(self) -> Option<Domain> {
        use TypeCode::*;
        match self {
            Unknown => None,
            Mpz | Xmpz | HostInt | HasMpz => Some(Domain::Integer),
            Mpq | HostFraction | HostDecimal | HasMpq => Some(Domain::Rational),
            Mpfr | HostFloat | HasMpfr => Some(Domain::Real),
            Mpc | HostComplex | HasMpc => Some(Domain::Complex),
        }
    }

    pub fn is_integer(self) -> bool {
        self.domain() == Some(Domain::Integer)
    }

    pub fn is_rational(self) -> bool {
        matches!(self.domain(), Some(d) if d <= Domain::Rational)
    }

    pub fn is_real(self) -> bool {
        matches!(self.domain(), Some(d) if d <= Domain::Real)
    }

    pub fn is_complex(self) -> bool {
        self.domain().is_some()
    }
}

/// Never fails: anything unrecognised is `TypeCode::Unknown`.
///
/// A foreign object is placed by the narrowest conversion it offers, except
/// that a narrower conversion only counts when the next wider one is absent:
/// offering both integer and rational conversions makes it a rational.
pub fn classify(value: &Value) -> TypeCode {
    match value {
        Value::Mpz(_) => TypeCode::Mpz,
        Value::Xmpz(_) => TypeCode::Xmpz,
        Value::Int(_) => TypeCode::HostInt,
        Value::Mpq(_) => TypeCode::Mpq,
        Value::Fraction(_) => TypeCode::HostFraction,
        Value::Decimal(_) => TypeCode::HostDecimal,
        Value::Mpfr(_) => TypeCode::Mpfr,
        Value::Float(_) => TypeCode::HostFloat,
        Value::Mpc(_) => TypeCode::Mpc,
        Value::Complex(_) => TypeCode::HostComplex,
        Value::Str(_) => TypeCode::Unknown,
        Value::Other(object) => {
            let caps = object.capabilities();
            if caps.contains(Capabilities::MPZ) && !caps.contains(Capabilities::MPQ) {
                TypeCode::HasMpz
            } else if caps.contains(Capabilities::MPQ) {
                TypeCode::HasMpq
            } else if caps.contains(Capabilities::MPFR) && !caps.contains(Capabilities::MPC) {
                TypeCode::HasMpfr
            } else if caps.contains(Capabilities::MPC) {
                TypeCode::HasMpc
            } else {
                TypeCode::Unknown
            }
        }
    }
}
