use rug::float::Round;
use crate::{context::{DEFAULT_EMAX, DEFAULT_EMIN}, Context, ErrorFamily, Flags, RoundMode};

#[test]
fn defaults() {
    let ctx = Context::new();
    assert_eq!(ctx.precision(), 53);
    assert_eq!(ctx.round(), RoundMode::Nearest);
    assert_eq!(ctx.real_round(), RoundMode::Default);
    assert_eq!(ctx.exponent_min(), DEFAULT_EMIN);
    assert_eq!(ctx.exponent_max(), DEFAULT_EMAX);
    assert_eq!(ctx.flags(), Flags::empty());
    assert_eq!(ctx.traps(), Flags::empty());
    assert!(!ctx.subnormalize() && !ctx.allow_complex() && !ctx.rational_division() && !ctx.readonly());
}

#[test]
fn precision_is_validated() {
    let mut ctx = Context::new();
    assert_eq!(ctx.set_precision(0).unwrap_err().family(), ErrorFamily::Value);
    ctx.set_precision(200).unwrap();
    assert_eq!(ctx.precision(), 200);
    assert!(Context::with_precision(0).is_err());
}

#[test]
fn complex_slots_fall_back() {
    let mut ctx = Context::with_precision(80).unwrap();
    assert_eq!(ctx.complex_prec(), (80, 80));
    ctx.set_real_precision(Some(100)).unwrap();
    assert_eq!(ctx.complex_prec(), (100, 100));
    ctx.set_imag_precision(Some(30)).unwrap();
    assert_eq!(ctx.complex_prec(), (100, 30));
    assert_eq!(ctx.mpfr_prec(), 80);

    ctx.set_round(RoundMode::Up).unwrap();
    assert_eq!(ctx.complex_round(), (Round::Up, Round::Up));
    ctx.set_imag_round(RoundMode::Down).unwrap();
    assert_eq!(ctx.complex_round(), (Round::Up, Round::Down));
}

#[test]
fn away_from_zero_resets_complex_rounding() {
    let mut ctx = Context::new();
    ctx.set_real_round(RoundMode::Up).unwrap();
    ctx.set_imag_round(RoundMode::Down).unwrap();
    ctx.set_round(RoundMode::AwayFromZero).unwrap();
    assert_eq!(ctx.real_round(), RoundMode::Nearest);
    assert_eq!(ctx.imag_round(), RoundMode::Nearest);
    assert_eq!(ctx.mpfr_round(), Round::AwayZero);

    assert!(ctx.set_real_round(RoundMode::AwayFromZero).is_err());
    assert!(ctx.set_imag_round(RoundMode::AwayFromZero).is_err());
    assert!(ctx.set_round(RoundMode::Default).is_err());
}

#[test]
fn exponent_bounds() {
    let mut ctx = Context::new();
    assert!(ctx.set_exponent_min(crate::emin_min() - 1).is_err());
    assert!(ctx.set_exponent_max(crate::emax_max() + 1).is_err());
    assert!(ctx.set_exponent_max(DEFAULT_EMIN - 1).is_err());
    ctx.set_exponent_max(100).unwrap();
    assert!(ctx.set_exponent_min(101).is_err());
    ctx.set_exponent_min(-100).unwrap();
    assert_eq!((ctx.exponent_min(), ctx.exponent_max()), (-100, 100));
}

#[test]
fn ieee_formats() {
    let half = Context::ieee(16, false).unwrap();
    assert_eq!((half.precision(), half.exponent_max(), half.exponent_min()), (11, 16, -23));

    let single = Context::ieee(32, true).unwrap();
    assert_eq!((single.precision(), single.exponent_max(), single.exponent_min()), (24, 128, -148));
    assert!(single.subnormalize());

    let double = Context::ieee(64, false).unwrap();
    assert_eq!((double.precision(), double.exponent_max(), double.exponent_min()), (53, 1024, -1073));

    let quad = Context::ieee(128, false).unwrap();
    assert_eq!((quad.precision(), quad.exponent_max()), (113, 16384));

    assert!(Context::ieee(48, false).is_err());
    assert!(Context::ieee(160 + 1, false).is_err());
}

#[test]
fn readonly_blocks_configuration_not_flags() {
    let mut ctx = Context::new();
    ctx.set_readonly(true);
    assert_eq!(ctx.set_precision(100).unwrap_err().family(), ErrorFamily::Value);
    assert!(ctx.set_trap_inexact(true).is_err());

    ctx.raise(Flags::INEXACT);
    assert!(ctx.inexact());

    let mut copy = ctx.copy();
    assert!(!copy.readonly());
    copy.set_precision(100).unwrap();
    assert!(copy.inexact());
}

#[test]
fn trap_setters_and_flag_getters() {
    let mut ctx = Context::new();
    ctx.set_trap_underflow(true).unwrap();
    ctx.set_trap_divzero(true).unwrap();
    assert_eq!(ctx.traps(), Flags::UNDERFLOW | Flags::DIVZERO);
    ctx.set_trap_underflow(false).unwrap();
    assert_eq!(ctx.traps(), Flags::DIVZERO);

    ctx.raise(Flags::ERANGE | Flags::OVERFLOW);
    assert!(ctx.erange() && ctx.overflow());
    assert!(!ctx.underflow() && !ctx.invalid() && !ctx.divzero());
    ctx.clear_flags();
    assert_eq!(ctx.flags(), Flags::empty());
}

#[test]
fn guard_bits_widen_intermediates() {
    let mut ctx = Context::new();
    ctx.set_guard_bits(11).unwrap();
    assert_eq!(ctx.guarded_prec(), 64);
    assert!(ctx.set_guard_bits(u32::MAX).is_err());
}

#[test]
fn guard_bits_never_push_a_precision_past_the_limit() {
    let max = crate::max_precision();
    let mut ctx = Context::new();
    ctx.set_guard_bits(64).unwrap();
    assert_eq!(ctx.set_precision(max - 10).unwrap_err().family(), ErrorFamily::Value);
    assert!(ctx.set_real_precision(Some(max)).is_err());
    assert!(ctx.set_imag_precision(Some(max - 63)).is_err());
    assert_eq!(ctx.precision(), 53);

    ctx.set_precision(max - 64).unwrap();
    assert_eq!(ctx.guarded_prec(), max);
    assert!(ctx.set_guard_bits(65).is_err());

    let mut ctx = Context::new();
    ctx.set_imag_precision(Some(max - 5)).unwrap();
    assert!(ctx.set_guard_bits(6).is_err());
    ctx.set_guard_bits(5).unwrap();
}
