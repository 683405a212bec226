//! The five numeric value kinds. Integers and rationals are exact; reals and
//! complexes carry their own precision plus the ternary (rounding direction)
//! of the operation that produced them.

use {core::{cmp::Ordering, fmt}, rug::{Complex, Float, Integer, Rational}};
use crate::{cleanup, context, registers, Context, Error, Result};

/// Immutable arbitrary-precision integer.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mpz(pub(crate) Integer);

/// Mutable arbitrary-precision integer. Deliberately not `Hash`: its value
/// changes under in-place operations.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Xmpz(pub(crate) Integer);

/// Rational, always in lowest terms with a positive denominator.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mpq(pub(crate) Rational);

/// Binary floating-point value of fixed precision.
#[derive(Clone, Debug)]
pub struct Mpfr {
    pub(crate) value: Float,
    pub(crate) rc: Ordering,
}

/// Complex value; both parts have their own precision and ternary.
#[derive(Clone, Debug)]
pub struct Mpc {
    pub(crate) value: Complex,
    pub(crate) rc: (Ordering, Ordering),
}

fn check_base(base: u32, allow_auto: bool) -> Result<()> {
    if (allow_auto && base == 0) || (2..=36).contains(&base) {
        Ok(())
    } else if allow_auto {
        Err(Error::value("base must be 0 or in the interval [2, 36]"))
    } else {
        Err(Error::value("base must be in the interval [2, 36]"))
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn strip_prefix(body: &str, base: u32) -> (u32, &str) {
    let lower = body.get(..2).map(str::to_ascii_lowercase);
    let prefixed = |radix: u32| match (lower.as_deref(), radix) {
        (Some("0x"), 16) | (Some("0o"), 8) | (Some("0b"), 2) => Some(&body[2..]),
        _ => None,
    };
    match base {
        0 => [16, 8, 2]
            .iter()
            .find_map(|&radix| prefixed(radix).map(|rest| (radix, rest)))
            .unwrap_or((10, body)),
        16 | 8 | 2 => (base, prefixed(base).unwrap_or(body)),
        _ => (base, body),
    }
}

/// Integer literal in `base` (0 = detect `0x`/`0o`/`0b`, else decimal).
pub(crate) fn parse_integer(s: &str, base: u32) -> Result<Integer> {
    check_base(base, true)?;
    let invalid = || Error::value(format!("invalid digits for base {}: '{}'", base, s));
    let (negative, body) = split_sign(s.trim());
    let (radix, mut digits) = strip_prefix(body, base);
    if digits.len() != body.len() {
        // One underscore may separate a base prefix from the digits.
        digits = digits.strip_prefix('_').unwrap_or(digits);
    }
    if digits.is_empty()
        || digits.starts_with(['_', '+', '-'])
        || digits.ends_with('_')
        || digits.contains("__")
        || digits.contains(char::is_whitespace)
    {
        return Err(invalid());
    }
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    let parsed = Integer::parse_radix(&digits, radix as i32).map_err(|_| invalid())?;
    let value = Integer::from(parsed);
    Ok(if negative { -value } else { value })
}

/// Base-10 literal with optional fraction and exponent, held exactly.
fn parse_decimal(s: &str) -> Result<Rational> {
    let invalid = || Error::value(format!("invalid digits: '{}'", s));
    let (negative, body) = split_sign(s.trim());
    let (mantissa, exp) = match body.find(['e', 'E']) {
        Some(at) => {
            let exp: i64 = body[at + 1..].parse().map_err(|_| invalid())?;
            (&body[..at], exp)
        }
        None => (body, 0),
    };
    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if (whole.is_empty() && frac.is_empty())
        || !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    let digits = Integer::from(Integer::parse(format!("{}{}", whole, frac)).map_err(|_| invalid())?);
    let scale = i64::try_from(frac.len())
        .ok()
        .and_then(|digits| digits.checked_sub(exp))
        .ok_or_else(invalid)?;
    let ten_pow = |n: i64| -> Result<Integer> {
        let n = u32::try_from(n.unsigned_abs()).map_err(|_| invalid())?;
        Ok(Integer::from(Integer::u_pow_u(10, n)))
    };
    let value = if scale >= 0 {
        Rational::from((digits, ten_pow(scale)?))
    } else {
        Rational::from(digits * ten_pow(scale)?)
    };
    Ok(if negative { -value } else { value })
}

pub(crate) fn parse_rational(s: &str, base: u32) -> Result<Rational> {
    check_base(base, true)?;
    if let Some((num, den)) = s.split_once('/') {
        let num = parse_integer(num, base)?;
        let den = parse_integer(den, base)?;
        if den == 0 {
            return Err(Error::zero_division("zero denominator in mpq()"));
        }
        return Ok(Rational::from((num, den)));
    }
    let trimmed = s.trim();
    if base == 10 && trimmed.contains(['.', 'e', 'E']) {
        parse_decimal(trimmed)
    } else {
        parse_integer(trimmed, base).map(Rational::from)
    }
}

pub(crate) fn parse_float(s: &str, base: u32, prec: u32, round: rug::float::Round) -> Result<(Float, Ordering)> {
    check_base(base, false)?;
    let text = s.trim();
    let parsed = Float::parse_radix(text, base as i32)
        .map_err(|_| Error::value(format!("invalid digits for base {}: '{}'", base, s)))?;
    Ok(Float::with_val_round(prec, parsed, round))
}

/// Splits host-complex syntax (`1+2j`, `-3j`, `(4-1e-3j)`, `5`) into its
/// real and imaginary literals.
fn split_complex(s: &str) -> (&str, &str) {
    let mut text = s.trim();
    if let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        text = inner.trim();
    }
    let Some(body) = text.strip_suffix(['j', 'J']) else {
        return (text, "0");
    };
    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'));
    let (re, im) = match split {
        Some(at) => (&body[..at], &body[at..]),
        None => ("0", body),
    };
    let im = match im {
        "" | "+" => "1",
        "-" => "-1",
        im => im,
    };
    (re, im)
}

impl Mpz {
    pub fn new() -> Self {
        Mpz(Integer::new())
    }

    /// Parses an integer literal. `base` is 0 (auto-detect prefix) or 2..=36.
    pub fn parse(s: &str, base: u32) -> Result<Self> {
        parse_integer(s, base).map(Mpz)
    }

    pub fn as_integer(&self) -> &Integer {
        &self.0
    }

    pub fn into_integer(self) -> Integer {
        self.0
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    pub fn bit_length(&self) -> u32 {
        self.0.significant_bits()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<Integer> for Mpz {
    fn from(value: Integer) -> Self {
        Mpz(value)
    }
}

impl From<i64> for Mpz {
    fn from(value: i64) -> Self {
        Mpz(Integer::from(value))
    }
}

impl From<Xmpz> for Mpz {
    fn from(value: Xmpz) -> Self {
        Mpz(value.0)
    }
}

impl Xmpz {
    pub fn new() -> Self {
        Xmpz(Integer::new())
    }

    pub fn parse(s: &str, base: u32) -> Result<Self> {
        parse_integer(s, base).map(Xmpz)
    }

    pub fn as_integer(&self) -> &Integer {
        &self.0
    }

    pub fn bit(&self, index: u32) -> bool {
        self.0.get_bit(index)
    }

    pub fn set_bit(&mut self, index: u32) -> &mut Self {
        self.0.set_bit(index, true);
        self
    }

    pub fn clear_bit(&mut self, index: u32) -> &mut Self {
        self.0.set_bit(index, false);
        self
    }

    pub fn toggle_bit(&mut self, index: u32) -> &mut Self {
        self.0.toggle_bit(index);
        self
    }

    /// An immutable snapshot of the current value.
    pub fn to_mpz(&self) -> Mpz {
        Mpz(self.0.clone())
    }
}

impl From<i64> for Xmpz {
    fn from(value: i64) -> Self {
        Xmpz(Integer::from(value))
    }
}

impl From<Mpz> for Xmpz {
    fn from(value: Mpz) -> Self {
        Xmpz(value.0)
    }
}

impl Mpq {
    pub fn new() -> Self {
        Mpq(Rational::new())
    }

    pub fn from_parts(numerator: impl Into<Integer>, denominator: impl Into<Integer>) -> Result<Self> {
        let denominator = denominator.into();
        if denominator == 0 {
            return Err(Error::zero_division("zero denominator in mpq()"));
        }
        Ok(Mpq(Rational::from((numerator.into(), denominator))))
    }

    /// Parses `"n/d"`, an integer, or (base 10) a decimal literal.
    pub fn parse(s: &str, base: u32) -> Result<Self> {
        parse_rational(s, base).map(Mpq)
    }

    pub fn as_rational(&self) -> &Rational {
        &self.0
    }

    pub fn numerator(&self) -> Mpz {
        Mpz(self.0.numer().clone())
    }

    pub fn denominator(&self) -> Mpz {
        Mpz(self.0.denom().clone())
    }
}

impl From<Rational> for Mpq {
    fn from(value: Rational) -> Self {
        Mpq(value)
    }
}

impl Mpfr {
    pub(crate) fn from_parts(value: Float, rc: Ordering) -> Self {
        Mpfr { value, rc }
    }

    /// Zero at `precision` bits.
    pub fn zero(precision: u32) -> Result<Self> {
        let precision = context::check_precision(precision)?;
        Ok(Mpfr::from_parts(Float::new(precision), Ordering::Equal))
    }

    /// Parses `s` in `base` (2..=36), rounding to the context precision.
    pub fn parse(s: &str, base: u32, ctx: &mut Context) -> Result<Self> {
        Mpfr::parse_prec(s, base, ctx.mpfr_prec(), ctx)
    }

    /// Parses `s` in `base`, rounding to `precision` bits. Range checks and
    /// traps still come from `ctx`.
    pub fn parse_prec(s: &str, base: u32, precision: u32, ctx: &mut Context) -> Result<Self> {
        let precision = context::check_precision(precision)?;
        registers::clear_flags();
        let (value, rc) = parse_float(s, base, precision, ctx.mpfr_round())?;
        cleanup::note_rounding(rc);
        cleanup::finish_real(ctx, "mpfr()", value, rc)
    }

    pub fn as_float(&self) -> &Float {
        &self.value
    }

    pub fn precision(&self) -> u32 {
        self.value.prec()
    }

    /// Direction in which the producing operation rounded.
    pub fn rc(&self) -> Ordering {
        self.rc
    }

    pub fn is_nan(&self) -> bool {
        self.value.is_nan()
    }

    pub fn is_infinite(&self) -> bool {
        self.value.is_infinite()
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.value.is_integer()
    }

    pub fn to_f64(&self) -> f64 {
        self.value.to_f64()
    }

    /// Rounds to an integer with the context rounding mode.
    pub fn to_mpz(&self, ctx: &Context) -> Result<Mpz> {
        if self.value.is_nan() {
            return Err(Error::value("'mpfr' NaN cannot be converted to 'mpz'"));
        }
        match self.value.to_integer_round(ctx.mpfr_round()) {
            Some((value, _)) => Ok(Mpz(value)),
            None => Err(Error::overflow("'mpfr' infinity cannot be converted to 'mpz'")),
        }
    }

    /// Exact conversion.
    pub fn to_mpq(&self) -> Result<Mpq> {
        if self.value.is_nan() {
            return Err(Error::value("'mpfr' NaN cannot be converted to 'mpq'"));
        }
        self.value
            .to_rational()
            .map(Mpq)
            .ok_or_else(|| Error::overflow("'mpfr' infinity cannot be converted to 'mpq'"))
    }
}

impl PartialEq for Mpfr {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Mpfr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl Mpc {
    pub(crate) fn from_parts(value: Complex, rc: (Ordering, Ordering)) -> Self {
        Mpc { value, rc }
    }

    /// Parses host-complex syntax such as `"1.5-2j"`.
    pub fn parse(s: &str, ctx: &mut Context) -> Result<Self> {
        let (re, im) = split_complex(s);
        let (rp, ip) = ctx.complex_prec();
        let (rr, ir) = ctx.complex_round();
        registers::clear_flags();
        let (re, rc_re) = parse_float(re, 10, rp, rr)?;
        let (im, rc_im) = parse_float(im, 10, ip, ir)?;
        cleanup::note_rounding(rc_re);
        cleanup::note_rounding(rc_im);
        cleanup::finish_complex(ctx, "mpc()", Complex::from((re, im)), (rc_re, rc_im))
    }

    pub fn as_complex(&self) -> &Complex {
        &self.value
    }

    pub fn real(&self) -> Mpfr {
        Mpfr::from_parts(self.value.real().clone(), self.rc.0)
    }

    pub fn imag(&self) -> Mpfr {
        Mpfr::from_parts(self.value.imag().clone(), self.rc.1)
    }

    pub fn precision(&self) -> (u32, u32) {
        self.value.prec()
    }

    pub fn rc(&self) -> (Ordering, Ordering) {
        self.rc
    }

    pub fn is_nan(&self) -> bool {
        self.value.real().is_nan() || self.value.imag().is_nan()
    }

    pub fn is_infinite(&self) -> bool {
        self.value.real().is_infinite() || self.value.imag().is_infinite()
    }

    pub fn is_zero(&self) -> bool {
        self.value.real().is_zero() && self.value.imag().is_zero()
    }
}

impl PartialEq for Mpc {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Mpz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for Xmpz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for Mpq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for Mpfr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl fmt::Display for Mpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (re, im) = (self.value.real(), self.value.imag());
        let sign = if im.is_sign_negative() || im.is_nan() { "" } else { "+" };
        write!(f, "({}{}{}j)", re, sign, im)
    }
}
