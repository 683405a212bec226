//! What happens to every Real and Complex result before the caller sees it:
//! range check, subnormalization, flag bookkeeping, traps.

use {core::cmp::Ordering, rug::{float::Round, Complex, Float}, tracing::debug};
use crate::{context::TRAP_PRIORITY, registers, Context, Error, Flags, Mpc, Mpfr, Result};

/// Steps 1 and 2 for one real component. Returns the updated ternary and
/// whether either step changed the value.
fn normalize(x: &mut Float, mut rc: Ordering, round: Round, ctx: &Context) -> (Ordering, bool) {
    let (emin, emax) = (ctx.exponent_min(), ctx.exponent_max());
    let mut changed = false;
    if let Some(exp) = registers::exponent(x) {
        if exp < emin || exp > emax {
            let before = x.clone();
            rc = registers::with_range(emin, emax, || registers::check_range(x, rc, round));
            changed |= *x != before;
        }
    }
    if ctx.subnormalize() {
        let prec = i64::from(x.prec());
        if let Some(exp) = registers::exponent(x) {
            if exp >= emin && exp <= emin + prec - 2 {
                let before = x.clone();
                rc = registers::with_range(emin, emax, || registers::subnormalize(x, rc, round));
                changed |= *x != before;
            }
        }
    }
    (rc, changed)
}

/// Steps 3 and 4: record `raised` in the context, then fail on the first
/// trapped flag in priority order.
pub(crate) fn commit(ctx: &mut Context, op: &'static str, raised: Flags) -> Result<()> {
    ctx.raise(raised);
    let trapped = raised & ctx.traps();
    if let Some(&flag) = TRAP_PRIORITY.iter().find(|&&flag| trapped.contains(flag)) {
        debug!(op, flag = flag.name(), "trap");
        return Err(Error::trapped(flag, op));
    }
    Ok(())
}

/// The library flags decide whether the computation itself was inexact. The
/// stored ternary only travels along with the value: a value that is already
/// clean passes through without raising anything.
pub(crate) fn finish_real(ctx: &mut Context, op: &'static str, mut value: Float, rc: Ordering) -> Result<Mpfr> {
    let (rc, changed) = normalize(&mut value, rc, ctx.mpfr_round(), ctx);
    let mut raised = registers::raised();
    if changed {
        raised |= Flags::INEXACT;
    }
    commit(ctx, op, raised)?;
    Ok(Mpfr::from_parts(value, rc))
}

/// One part NaN while the other is not infinite. A NaN next to an infinity
/// still counts as a complex infinity, not an invalid result.
fn is_invalid_nan(c: &Complex) -> bool {
    let (re, im) = (c.real(), c.imag());
    (re.is_nan() && !im.is_infinite()) || (im.is_nan() && !re.is_infinite())
}

pub(crate) fn finish_complex(
    ctx: &mut Context,
    op: &'static str,
    mut value: Complex,
    rc: (Ordering, Ordering),
) -> Result<Mpc> {
    let (rr, ir) = ctx.complex_round();
    let (rc_re, re_changed) = normalize(value.mut_real(), rc.0, rr, ctx);
    let (rc_im, im_changed) = normalize(value.mut_imag(), rc.1, ir, ctx);
    let mut raised = registers::raised() - Flags::INVALID;
    if is_invalid_nan(&value) {
        raised |= Flags::INVALID;
    }
    if re_changed || im_changed {
        raised |= Flags::INEXACT;
    }
    commit(ctx, op, raised)?;
    Ok(Mpc::from_parts(value, (rc_re, rc_im)))
}

/// Records that a fresh rounding (ternary `rc`) was inexact.
pub(crate) fn note_rounding(rc: Ordering) {
    if rc != Ordering::Equal {
        registers::set_inexact();
    }
}

/// Runs a Real computation at the context's precision and rounding, from a
/// clean set of library flags through to the finished value.
pub(crate) fn real_op(
    ctx: &mut Context,
    op: &'static str,
    compute: impl FnOnce(u32, Round) -> (Float, Ordering),
) -> Result<Mpfr> {
    registers::clear_flags();
    let (value, rc) = compute(ctx.mpfr_prec(), ctx.mpfr_round());
    note_rounding(rc);
    finish_real(ctx, op, value, rc)
}

/// Complex counterpart of `real_op`.
pub(crate) fn complex_op(
    ctx: &mut Context,
    op: &'static str,
    compute: impl FnOnce((u32, u32), (Round, Round)) -> (Complex, (Ordering, Ordering)),
) -> Result<Mpc> {
    registers::clear_flags();
    let (value, rc) = compute(ctx.complex_prec(), ctx.complex_round());
    note_rounding(rc.0);
    note_rounding(rc.1);
    finish_complex(ctx, op, value, rc)
}
