//! MPFR keeps its exponent range and its status flags in process-wide
//! (thread-local, when built thread safe) registers. Nothing else in the
//! crate touches them; everything goes through here.

use {core::{cell::Cell, cmp::Ordering, ffi::c_int}, gmp_mpfr_sys::mpfr,
    parking_lot::{const_mutex, Mutex}, rug::{float::Round, Float}};
use crate::context::Flags;

/// Held for the whole save -> install -> use -> restore sequence.
static RANGE: Mutex<()> = const_mutex(());

thread_local! {
    static WIDENED: Cell<bool> = Cell::new(false);
}

pub fn emin_min() -> i64 {
    i64::from(unsafe { mpfr::get_emin_min() })
}

pub fn emax_max() -> i64 {
    i64::from(unsafe { mpfr::get_emax_max() })
}

fn to_exp(e: i64) -> mpfr::exp_t {
    // The clamp keeps the narrowing cast lossless where exp_t is 32 bits.
    e.clamp(emin_min(), emax_max()) as mpfr::exp_t
}

/// Results are computed in the widest range MPFR allows and only then
/// squeezed into a context's range by `with_range`. MPFR starts out with a
/// narrower default, so widen it once per thread before any value is
/// built or converted on it.
pub(crate) fn ensure_wide() {
    WIDENED.with(|widened| {
        if !widened.get() {
            let _lock = RANGE.lock();
            unsafe {
                mpfr::set_emin(mpfr::get_emin_min());
                mpfr::set_emax(mpfr::get_emax_max());
            }
            widened.set(true);
        }
    });
}

struct Restore {
    emin: mpfr::exp_t,
    emax: mpfr::exp_t,
}

impl Drop for Restore {
    fn drop(&mut self) {
        unsafe {
            mpfr::set_emin(self.emin);
            mpfr::set_emax(self.emax);
        }
    }
}

/// Runs `f` with MPFR's exponent range set to `[emin, emax]`. The previous
/// range is back in place when this returns (or unwinds).
pub(crate) fn with_range<R>(emin: i64, emax: i64, f: impl FnOnce() -> R) -> R {
    let _lock = RANGE.lock();
    let _restore = unsafe {
        Restore {
            emin: mpfr::get_emin(),
            emax: mpfr::get_emax(),
        }
    };
    unsafe {
        // Current range is the widest one, so the order of these is safe.
        mpfr::set_emin(to_exp(emin));
        mpfr::set_emax(to_exp(emax));
    }
    f()
}

pub(crate) fn raw_round(round: Round) -> mpfr::rnd_t {
    match round {
        Round::Nearest => mpfr::rnd_t::RNDN,
        Round::Zero => mpfr::rnd_t::RNDZ,
        Round::Up => mpfr::rnd_t::RNDU,
        Round::Down => mpfr::rnd_t::RNDD,
        Round::AwayZero => mpfr::rnd_t::RNDA,
        _ => mpfr::rnd_t::RNDN,
    }
}

/// Exponent of a regular (finite, nonzero) value.
pub(crate) fn exponent(x: &Float) -> Option<i64> {
    if x.is_normal() {
        Some(i64::from(unsafe { mpfr::get_exp(x.as_raw()) }))
    } else {
        None
    }
}

/// `mpfr_check_range` against whatever range is installed. Call inside
/// `with_range`.
pub(crate) fn check_range(x: &mut Float, rc: Ordering, round: Round) -> Ordering {
    let ret = unsafe { mpfr::check_range(x.as_raw_mut(), rc as c_int, raw_round(round)) };
    ret.cmp(&0)
}

/// `mpfr_subnormalize` against whatever range is installed. Call inside
/// `with_range`.
pub(crate) fn subnormalize(x: &mut Float, rc: Ordering, round: Round) -> Ordering {
    let ret = unsafe { mpfr::subnormalize(x.as_raw_mut(), rc as c_int, raw_round(round)) };
    ret.cmp(&0)
}

/// Starts a fresh operation: nothing raised yet.
pub(crate) fn clear_flags() {
    ensure_wide();
    unsafe { mpfr::clear_flags() }
}

/// Flags MPFR raised since the last `clear_flags`.
pub(crate) fn raised() -> Flags {
    let mut flags = Flags::empty();
    unsafe {
        flags.set(Flags::UNDERFLOW, mpfr::underflow_p() != 0);
        flags.set(Flags::OVERFLOW, mpfr::overflow_p() != 0);
        flags.set(Flags::INEXACT, mpfr::inexflag_p() != 0);
        flags.set(Flags::INVALID, mpfr::nanflag_p() != 0);
        flags.set(Flags::ERANGE, mpfr::erangeflag_p() != 0);
        flags.set(Flags::DIVZERO, mpfr::divby0_p() != 0);
    }
    flags
}

pub(crate) fn set_divzero() {
    unsafe { mpfr::set_divby0() }
}

pub(crate) fn set_inexact() {
    unsafe { mpfr::set_inexflag() }
}

pub(crate) fn set_nanflag() {
    unsafe { mpfr::set_nanflag() }
}
