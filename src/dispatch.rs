//! One promotion ladder for every operation: classify the operands, take
//! the widest of their domains, convert, and call that domain's entry point.

use {rug::{Complex, Float, Integer, Rational}, tracing::trace};
use crate::{classify::{classify, Domain}, operands::{to_complex, to_integer, to_rational, to_real, PrecisionPolicy},
    registers, value::Value, Context, Error, Result};

pub(crate) fn domain_name(domain: Domain) -> &'static str {
    match domain {
        Domain::Integer => "integer",
        Domain::Rational => "rational",
        Domain::Real => "real",
        Domain::Complex => "complex",
    }
}

pub(crate) fn undefined(op: &str, domain: Domain) -> Error {
    Error::type_err(format!("'{}' is not defined for {} operands", op, domain_name(domain)))
}

/// Least upper bound of the operands' domains, or a type error naming the
/// first operand nobody knows how to handle.
pub(crate) fn common_domain(op: &str, values: &[&Value]) -> Result<Domain> {
    registers::ensure_wide();
    values.iter().try_fold(Domain::Integer, |widest, value| {
        let code = classify(value);
        match code.domain() {
            Some(domain) => Ok(widest.max(domain)),
            None => Err(Error::type_err(format!("unsupported operand type for '{}': {:?}", op, code))),
        }
    })
}

/// A two-operand operation. Domains an operation has no meaning in keep the
/// default bodies and fail with a type error; nothing is downgraded.
pub(crate) trait Binary {
    const NAME: &'static str;
    type Output;

    fn integer(_a: &Integer, _b: &Integer, _ctx: &mut Context) -> Result<Self::Output> {
        Err(undefined(Self::NAME, Domain::Integer))
    }

    fn rational(_a: &Rational, _b: &Rational, _ctx: &mut Context) -> Result<Self::Output> {
        Err(undefined(Self::NAME, Domain::Rational))
    }

    fn real(_a: &Float, _b: &Float, _ctx: &mut Context) -> Result<Self::Output> {
        Err(undefined(Self::NAME, Domain::Real))
    }

    fn complex(_a: &Complex, _b: &Complex, _ctx: &mut Context) -> Result<Self::Output> {
        Err(undefined(Self::NAME, Domain::Complex))
    }
}

pub(crate) fn binary<Op: Binary>(a: &Value, b: &Value, ctx: &mut Context) -> Result<Op::Output> {
    let domain = common_domain(Op::NAME, &[a, b])?;
    trace!(op = Op::NAME, domain = domain_name(domain), "dispatch");
    match domain {
        Domain::Integer => Op::integer(&*to_integer(a)?, &*to_integer(b)?, ctx),
        Domain::Rational => Op::rational(&*to_rational(a)?, &*to_rational(b)?, ctx),
        Domain::Real => {
            let (x, _) = to_real(a, PrecisionPolicy::Exact, ctx)?;
            let (y, _) = to_real(b, PrecisionPolicy::Exact, ctx)?;
            Op::real(&x, &y, ctx)
        }
        Domain::Complex => {
            let (x, _) = to_complex(a, PrecisionPolicy::Exact, ctx)?;
            let (y, _) = to_complex(b, PrecisionPolicy::Exact, ctx)?;
            Op::complex(&x, &y, ctx)
        }
    }
}

/// A one-operand operation. By default exact operands are handed to the
/// Real entry point (integers exactly, rationals rounded once to the
/// guarded precision).
pub(crate) trait Unary {
    const NAME: &'static str;
    type Output;

    fn integer(a: &Integer, ctx: &mut Context) -> Result<Self::Output> {
        let prec = a.significant_bits().max(rug::float::prec_min());
        Self::real(&Float::with_val(prec, a), ctx)
    }

    fn rational(a: &Rational, ctx: &mut Context) -> Result<Self::Output> {
        let (x, _) = Float::with_val_round(ctx.guarded_prec(), a, ctx.mpfr_round());
        Self::real(&x, ctx)
    }

    fn real(a: &Float, ctx: &mut Context) -> Result<Self::Output>;

    fn complex(_a: &Complex, _ctx: &mut Context) -> Result<Self::Output> {
        Err(undefined(Self::NAME, Domain::Complex))
    }
}

pub(crate) fn unary<Op: Unary>(a: &Value, ctx: &mut Context) -> Result<Op::Output> {
    let domain = common_domain(Op::NAME, &[a])?;
    trace!(op = Op::NAME, domain = domain_name(domain), "dispatch");
    match domain {
        Domain::Integer => Op::integer(&*to_integer(a)?, ctx),
        Domain::Rational => Op::rational(&*to_rational(a)?, ctx),
        Domain::Real => Op::real(&to_real(a, PrecisionPolicy::Exact, ctx)?.0, ctx),
        Domain::Complex => Op::complex(&to_complex(a, PrecisionPolicy::Exact, ctx)?.0, ctx),
    }
}
