//! The numeric context: precision, rounding, exponent range, traps and the
//! sticky status flags that every Real and Complex operation reports into.

use {bitflags::bitflags, rug::float::Round};
use crate::{registers, Error, Result};

bitflags! {
    /// Status conditions. The same bit set is used for the sticky flags and
    /// for the trap mask of a [`Context`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const UNDERFLOW = 0x01;
        const OVERFLOW = 0x02;
        const INEXACT = 0x04;
        const INVALID = 0x08;
        const ERANGE = 0x10;
        const DIVZERO = 0x20;
    }
}

/// Order in which freshly raised flags are checked against the trap mask.
/// The first trapped flag in this order decides which error is returned.
pub(crate) const TRAP_PRIORITY: [Flags; 6] = [
    Flags::UNDERFLOW,
    Flags::OVERFLOW,
    Flags::INEXACT,
    Flags::INVALID,
    Flags::ERANGE,
    Flags::DIVZERO,
];

impl Flags {
    pub fn name(self) -> &'static str {
        match self {
            f if f == Flags::UNDERFLOW => "underflow",
            f if f == Flags::OVERFLOW => "overflow",
            f if f == Flags::INEXACT => "inexact",
            f if f == Flags::INVALID => "invalid",
            f if f == Flags::ERANGE => "erange",
            f if f == Flags::DIVZERO => "divzero",
            _ => "mixed",
        }
    }
}

/// Rounding modes. `Default` is only meaningful for the real/imaginary slots,
/// where it means "use the context's main rounding mode".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundMode {
    Nearest,
    TowardZero,
    Up,
    Down,
    AwayFromZero,
    Default,
}

impl RoundMode {
    fn to_round(self) -> Round {
        match self {
            RoundMode::Nearest | RoundMode::Default => Round::Nearest,
            RoundMode::TowardZero => Round::Zero,
            RoundMode::Up => Round::Up,
            RoundMode::Down => Round::Down,
            RoundMode::AwayFromZero => Round::AwayZero,
        }
    }
}

pub const DEFAULT_PRECISION: u32 = 53;
pub const DEFAULT_EMIN: i64 = 1 - (1 << 30);
pub const DEFAULT_EMAX: i64 = (1 << 30) - 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    precision: u32,
    real_precision: Option<u32>,
    imag_precision: Option<u32>,
    round: RoundMode,
    real_round: RoundMode,
    imag_round: RoundMode,
    emin: i64,
    emax: i64,
    subnormalize: bool,
    traps: Flags,
    flags: Flags,
    allow_complex: bool,
    rational_division: bool,
    guard_bits: u32,
    readonly: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            real_precision: None,
            imag_precision: None,
            round: RoundMode::Nearest,
            real_round: RoundMode::Default,
            imag_round: RoundMode::Default,
            emin: DEFAULT_EMIN,
            emax: DEFAULT_EMAX,
            subnormalize: false,
            traps: Flags::empty(),
            flags: Flags::empty(),
            allow_complex: false,
            rational_division: false,
            guard_bits: 0,
            readonly: false,
        }
    }
}

pub(crate) fn check_precision(prec: u32) -> Result<u32> {
    if prec < rug::float::prec_min() || prec > rug::float::prec_max() {
        return Err(Error::value(format!("invalid value for precision: {}", prec)));
    }
    Ok(prec)
}

/// Every precision in a context must still be valid once the guard bits
/// are added to it.
fn check_guarded(prec: u32, guard_bits: u32) -> Result<u32> {
    check_precision(prec)?;
    match prec.checked_add(guard_bits) {
        Some(guarded) if guarded <= rug::float::prec_max() => Ok(prec),
        _ => Err(Error::value(format!("precision {} plus {} guard bits is too large", prec, guard_bits))),
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(precision: u32) -> Result<Self> {
        let mut ctx = Self::default();
        ctx.set_precision(precision)?;
        Ok(ctx)
    }

    /// A context matching an IEEE 754 binary interchange format of `bits`
    /// bits: 16, 32, 64, or any multiple of 32 from 128 up.
    pub fn ieee(bits: u32, subnormalize: bool) -> Result<Self> {
        let precision = match bits {
            16 => 11,
            32 => 24,
            64 => 53,
            b if b >= 128 && b % 32 == 0 => {
                b - (4.0 * f64::from(b).log2()).round() as u32 + 13
            }
            _ => {
                return Err(Error::value(
                    "bitwidth must be 16, 32, 64, 128; or must be greater than 128 and divisible by 32.",
                ))
            }
        };
        let emax = 1i64
            .checked_shl(bits - precision - 1)
            .filter(|&emax| emax <= registers::emax_max())
            .ok_or_else(|| Error::value(format!("exponent range of a {}-bit format is too wide", bits)))?;
        let mut ctx = Self::default();
        ctx.set_precision(precision)?;
        ctx.set_exponent_max(emax)?;
        ctx.set_exponent_min(4 - emax - i64::from(precision))?;
        ctx.subnormalize = subnormalize;
        Ok(ctx)
    }

    /// A writable copy with the same configuration and flags.
    pub fn copy(&self) -> Self {
        Self { readonly: false, ..self.clone() }
    }

    fn writable(&self) -> Result<()> {
        if self.readonly {
            return Err(Error::value("context is read-only; copy it before changing it"));
        }
        Ok(())
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn set_precision(&mut self, precision: u32) -> Result<()> {
        self.writable()?;
        self.precision = check_guarded(precision, self.guard_bits)?;
        Ok(())
    }

    /// `None` means "same as `precision`".
    pub fn real_precision(&self) -> Option<u32> {
        self.real_precision
    }

    pub fn set_real_precision(&mut self, precision: Option<u32>) -> Result<()> {
        self.writable()?;
        let guard_bits = self.guard_bits;
        self.real_precision = precision.map(|p| check_guarded(p, guard_bits)).transpose()?;
        Ok(())
    }

    pub fn imag_precision(&self) -> Option<u32> {
        self.imag_precision
    }

    pub fn set_imag_precision(&mut self, precision: Option<u32>) -> Result<()> {
        self.writable()?;
        let guard_bits = self.guard_bits;
        self.imag_precision = precision.map(|p| check_guarded(p, guard_bits)).transpose()?;
        Ok(())
    }

    pub fn round(&self) -> RoundMode {
        self.round
    }

    /// MPC has no away-from-zero rounding, so choosing it here sends the
    /// complex slots back to round-to-nearest.
    pub fn set_round(&mut self, round: RoundMode) -> Result<()> {
        self.writable()?;
        match round {
            RoundMode::Default => return Err(Error::value("invalid value for round mode")),
            RoundMode::AwayFromZero => {
                self.real_round = RoundMode::Nearest;
                self.imag_round = RoundMode::Nearest;
            }
            _ => {}
        }
        self.round = round;
        Ok(())
    }

    pub fn real_round(&self) -> RoundMode {
        self.real_round
    }

    pub fn set_real_round(&mut self, round: RoundMode) -> Result<()> {
        self.writable()?;
        if round == RoundMode::AwayFromZero {
            return Err(Error::value("invalid value for round mode"));
        }
        self.real_round = round;
        Ok(())
    }

    pub fn imag_round(&self) -> RoundMode {
        self.imag_round
    }

    pub fn set_imag_round(&mut self, round: RoundMode) -> Result<()> {
        self.writable()?;
        if round == RoundMode::AwayFromZero {
            return Err(Error::value("invalid value for round mode"));
        }
        self.imag_round = round;
        Ok(())
    }

    pub fn exponent_min(&self) -> i64 {
        self.emin
    }

    pub fn set_exponent_min(&mut self, emin: i64) -> Result<()> {
        self.writable()?;
        if emin < registers::emin_min() || emin > self.emax {
            return Err(Error::value(format!("requested minimum exponent is invalid: {}", emin)));
        }
        self.emin = emin;
        Ok(())
    }

    pub fn exponent_max(&self) -> i64 {
        self.emax
    }

    pub fn set_exponent_max(&mut self, emax: i64) -> Result<()> {
        self.writable()?;
        if emax > registers::emax_max() || emax < self.emin {
            return Err(Error::value(format!("requested maximum exponent is invalid: {}", emax)));
        }
        self.emax = emax;
        Ok(())
    }

    pub fn subnormalize(&self) -> bool {
        self.subnormalize
    }

    pub fn set_subnormalize(&mut self, subnormalize: bool) -> Result<()> {
        self.writable()?;
        self.subnormalize = subnormalize;
        Ok(())
    }

    pub fn allow_complex(&self) -> bool {
        self.allow_complex
    }

    pub fn set_allow_complex(&mut self, allow: bool) -> Result<()> {
        self.writable()?;
        self.allow_complex = allow;
        Ok(())
    }

    pub fn rational_division(&self) -> bool {
        self.rational_division
    }

    pub fn set_rational_division(&mut self, rational: bool) -> Result<()> {
        self.writable()?;
        self.rational_division = rational;
        Ok(())
    }

    pub fn guard_bits(&self) -> u32 {
        self.guard_bits
    }

    pub fn set_guard_bits(&mut self, guard_bits: u32) -> Result<()> {
        self.writable()?;
        let widest = self.precision.max(self.real_prec()).max(self.imag_prec());
        check_guarded(widest, guard_bits)?;
        self.guard_bits = guard_bits;
        Ok(())
    }

    pub fn readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    pub fn traps(&self) -> Flags {
        self.traps
    }

    pub fn set_traps(&mut self, traps: Flags) -> Result<()> {
        self.writable()?;
        self.traps = traps;
        Ok(())
    }

    fn set_trap(&mut self, flag: Flags, on: bool) -> Result<()> {
        self.writable()?;
        self.traps.set(flag, on);
        Ok(())
    }

    pub fn set_trap_underflow(&mut self, on: bool) -> Result<()> {
        self.set_trap(Flags::UNDERFLOW, on)
    }

    pub fn set_trap_overflow(&mut self, on: bool) -> Result<()> {
        self.set_trap(Flags::OVERFLOW, on)
    }

    pub fn set_trap_inexact(&mut self, on: bool) -> Result<()> {
        self.set_trap(Flags::INEXACT, on)
    }

    pub fn set_trap_invalid(&mut self, on: bool) -> Result<()> {
        self.set_trap(Flags::INVALID, on)
    }

    pub fn set_trap_erange(&mut self, on: bool) -> Result<()> {
        self.set_trap(Flags::ERANGE, on)
    }

    pub fn set_trap_divzero(&mut self, on: bool) -> Result<()> {
        self.set_trap(Flags::DIVZERO, on)
    }

    /// Sticky flags raised since the last [`Context::clear_flags`].
    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn clear_flags(&mut self) {
        self.flags = Flags::empty();
    }

    pub fn underflow(&self) -> bool {
        self.flags.contains(Flags::UNDERFLOW)
    }

    pub fn overflow(&self) -> bool {
        self.flags.contains(Flags::OVERFLOW)
    }

    pub fn inexact(&self) -> bool {
        self.flags.contains(Flags::INEXACT)
    }

    pub fn invalid(&self) -> bool {
        self.flags.contains(Flags::INVALID)
    }

    pub fn erange(&self) -> bool {
        self.flags.contains(Flags::ERANGE)
    }

    pub fn divzero(&self) -> bool {
        self.flags.contains(Flags::DIVZERO)
    }

    /// Flags only ever accumulate here; see `clear_flags`.
    pub(crate) fn raise(&mut self, flags: Flags) {
        self.flags |= flags;
    }

    // Resolved slots: "default" falls through to the main setting.

    pub(crate) fn mpfr_prec(&self) -> u32 {
        self.precision
    }

    pub(crate) fn guarded_prec(&self) -> u32 {
        self.guarded(self.precision)
    }

    /// `prec` plus the guard bits. The setters keep this within `prec_max`.
    pub(crate) fn guarded(&self, prec: u32) -> u32 {
        prec.saturating_add(self.guard_bits)
    }

    pub(crate) fn real_prec(&self) -> u32 {
        self.real_precision.unwrap_or(self.precision)
    }

    pub(crate) fn imag_prec(&self) -> u32 {
        self.imag_precision.unwrap_or_else(|| self.real_prec())
    }

    pub(crate) fn complex_prec(&self) -> (u32, u32) {
        (self.real_prec(), self.imag_prec())
    }

    pub(crate) fn mpfr_round(&self) -> Round {
        self.round.to_round()
    }

    pub(crate) fn real_mpfr_round(&self) -> Round {
        match (self.real_round, self.round) {
            (RoundMode::Default, RoundMode::AwayFromZero) => Round::Nearest,
            (RoundMode::Default, r) | (r, _) => r.to_round(),
        }
    }

    pub(crate) fn imag_mpfr_round(&self) -> Round {
        match self.imag_round {
            RoundMode::Default => self.real_mpfr_round(),
            r => r.to_round(),
        }
    }

    pub(crate) fn complex_round(&self) -> (Round, Round) {
        (self.real_mpfr_round(), self.imag_mpfr_round())
    }
}
