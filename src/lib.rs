//! Multiple-precision integers, rationals, reals and complex numbers over
//! GMP, MPFR and MPC, driven by a numeric [`Context`].
//!
//! Every operation accepts any mix of operand types (ours or host ones, see
//! [`Value`]), promotes them to the narrowest common domain (integer,
//! rational, real, complex) and runs there. Real and complex results are
//! rounded to the context, range checked, optionally subnormalized, and
//! report their status flags into the context, which may turn them into
//! errors (traps).
//!
//! ```ignore
//! let mut ctx = uninum::Context::new();
//! let third = ctx.div(uninum::mpfr(1)?, 3)?;
//! assert!(ctx.inexact());
//! ```
mod tests;

mod api;
mod classify;
mod cleanup;
mod context;
mod dispatch;
mod error;
mod operands;
mod ops;
mod registers;
mod scope;
mod types;
mod value;

pub use {
    api::*,
    classify::{classify, Domain, TypeCode},
    context::{Context, Flags, RoundMode, DEFAULT_EMAX, DEFAULT_EMIN, DEFAULT_PRECISION},
    error::{Error, ErrorFamily, Result},
    operands::{Operand, PrecisionPolicy},
    scope::{get_context, local_context, set_context, with_context, ContextGuard},
    types::{Mpc, Mpfr, Mpq, Mpz, Xmpz},
    value::{Capabilities, Number, NumberLike, Value},
};

use {gmp_mpfr_sys::{gmp, mpc, mpfr}, pkg_version::{pkg_version_major, pkg_version_minor, pkg_version_patch}};

const VERSION_MAJOR: u32 = pkg_version_major!();
const VERSION_MINOR: u32 = pkg_version_minor!();
const VERSION_PATCH: u32 = pkg_version_patch!();

/// This crate's version.
pub fn version() -> String {
    format!("{}.{}.{}", VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH)
}

/// Version of the GMP headers this crate was built against.
pub fn mp_version() -> String {
    format!("GMP {}.{}.{}", gmp::VERSION, gmp::VERSION_MINOR, gmp::VERSION_PATCHLEVEL)
}

pub fn mpfr_version() -> String {
    format!("MPFR {}.{}.{}", mpfr::VERSION_MAJOR, mpfr::VERSION_MINOR, mpfr::VERSION_PATCHLEVEL)
}

pub fn mpc_version() -> String {
    format!("MPC {}.{}.{}", mpc::VERSION_MAJOR, mpc::VERSION_MINOR, mpc::VERSION_PATCHLEVEL)
}

/// Largest precision any context or value may have.
pub fn max_precision() -> u32 {
    rug::float::prec_max()
}

/// Smallest `exponent_min` a context accepts.
pub fn emin_min() -> i64 {
    registers::emin_min()
}

/// Largest `exponent_max` a context accepts.
pub fn emax_max() -> i64 {
    registers::emax_max()
}
