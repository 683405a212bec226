use {core::cmp::Ordering, std::sync::Arc, num_complex::Complex64, num_rational::Rational64,
    rug::{Float, Rational}, rust_decimal::Decimal};
use crate::{
    classify, dispatch::common_domain, operands::to_rational, registers, Capabilities, Context, Domain, ErrorFamily, Mpfr,
    Mpq, Mpz, Number, NumberLike, PrecisionPolicy, TypeCode, Value, Xmpz,
};

#[derive(Debug)]
struct Foreign(Capabilities);

impl NumberLike for Foreign {
    fn capabilities(&self) -> Capabilities {
        self.0
    }

    fn to_mpz(&self) -> crate::Result<Mpz> {
        Ok(Mpz::from(7))
    }

    fn to_mpq(&self) -> crate::Result<Mpq> {
        Mpq::from_parts(7, 2)
    }
}

fn foreign(caps: Capabilities) -> Value {
    let object: Arc<dyn NumberLike> = Arc::new(Foreign(caps));
    Value::from(object)
}

#[test]
fn classification() {
    assert_eq!(classify(&Value::from(Mpz::from(1))), TypeCode::Mpz);
    assert_eq!(classify(&Value::from(Xmpz::from(1))), TypeCode::Xmpz);
    assert_eq!(classify(&Value::from(5)), TypeCode::HostInt);
    assert_eq!(classify(&Value::from(Rational64::new(1, 3))), TypeCode::HostFraction);
    assert_eq!(classify(&Value::from(Decimal::new(15, 1))), TypeCode::HostDecimal);
    assert_eq!(classify(&Value::from(0.5)), TypeCode::HostFloat);
    assert_eq!(classify(&Value::from(Complex64::new(1.0, 2.0))), TypeCode::HostComplex);
    assert_eq!(classify(&Value::from("12")), TypeCode::Unknown);
}

#[test]
fn capabilities_pick_the_narrowest_unambiguous_tier() {
    assert_eq!(classify(&foreign(Capabilities::MPZ)), TypeCode::HasMpz);
    assert_eq!(classify(&foreign(Capabilities::MPZ | Capabilities::MPQ)), TypeCode::HasMpq);
    assert_eq!(classify(&foreign(Capabilities::MPFR)), TypeCode::HasMpfr);
    assert_eq!(classify(&foreign(Capabilities::MPFR | Capabilities::MPC)), TypeCode::HasMpc);
    assert_eq!(classify(&foreign(Capabilities::empty())), TypeCode::Unknown);
}

#[test]
fn domain_is_least_upper_bound() {
    let int = Value::from(2);
    let frac = Value::from(Rational64::new(1, 2));
    let float = Value::from(0.5);
    let complex = Value::from(Complex64::new(0.0, 1.0));
    assert_eq!(common_domain("add", &[&int, &int]).unwrap(), Domain::Integer);
    assert_eq!(common_domain("add", &[&int, &frac]).unwrap(), Domain::Rational);
    assert_eq!(common_domain("add", &[&frac, &float]).unwrap(), Domain::Real);
    assert_eq!(common_domain("add", &[&int, &complex, &float]).unwrap(), Domain::Complex);

    let err = common_domain("add", &[&int, &Value::from("2")]).unwrap_err();
    assert_eq!(err.family(), ErrorFamily::Type);
}

#[test]
fn foreign_objects_take_part_in_dispatch() {
    let mut ctx = Context::new();
    let sum = ctx.add(foreign(Capabilities::MPZ), 1).unwrap();
    assert_eq!(sum, Number::Mpz(Mpz::from(8)));

    let sum = ctx.add(foreign(Capabilities::MPZ | Capabilities::MPQ), 1).unwrap();
    assert_eq!(sum, Number::Mpq(Mpq::from_parts(9, 2).unwrap()));

    // It offers no real conversion, even though it claims to.
    let err = ctx.add(foreign(Capabilities::MPFR), 1).unwrap_err();
    assert_eq!(err.family(), ErrorFamily::Type);
}

#[test]
fn decimals_convert_exactly() {
    let value = Value::from(Decimal::new(-125, 2));
    let q = to_rational(&value).unwrap();
    assert_eq!(*q, Rational::from((-5, 4)));
}

#[test]
fn context_policy_aliases_a_fitting_real() {
    let mut ctx = Context::new();
    let x = ctx.mpfr(0.1).unwrap();
    let value = Value::from(&x);
    let (operand, rc) = ctx.to_real(&value, PrecisionPolicy::Context).unwrap();
    assert!(operand.is_alias());
    assert_eq!(rc, x.rc());

    ctx.set_precision(20).unwrap();
    let (operand, rc) = ctx.to_real(&value, PrecisionPolicy::Context).unwrap();
    assert!(!operand.is_alias());
    assert_eq!(operand.prec(), 20);
    assert_ne!(rc, Ordering::Equal);
}

#[test]
fn exact_policy_keeps_binary_precision() {
    let mut wide = Context::with_precision(200).unwrap();
    let x = wide.mpfr("0.1").unwrap();
    let mut ctx = Context::new();
    ctx.set_guard_bits(10).unwrap();

    let value = Value::from(x);
    let (operand, _) = ctx.to_real(&value, PrecisionPolicy::Exact).unwrap();
    assert!(operand.is_alias());
    assert_eq!(operand.prec(), 200);

    let value = Value::from(0.1);
    let (operand, _) = ctx.to_real(&value, PrecisionPolicy::Exact).unwrap();
    assert_eq!(operand.prec(), 53);

    let third = Value::from(Mpq::from_parts(1, 3).unwrap());
    let (operand, rc) = ctx.to_real(&third, PrecisionPolicy::Exact).unwrap();
    assert_eq!(operand.prec(), 63);
    assert_ne!(rc, Ordering::Equal);
    let (guarded, _) = ctx.to_real(&third, PrecisionPolicy::ContextPlusGuard).unwrap();
    assert_eq!(*guarded, *operand);

    assert_eq!(PrecisionPolicy::Context.code(), 0);
    assert_eq!(PrecisionPolicy::Exact.code(), 1);
    assert_eq!(PrecisionPolicy::ContextPlusGuard.code(), 1);
}

#[test]
fn reals_widen_to_complex() {
    let ctx = Context::new();
    let value = Value::from(2.5);
    let (c, _) = ctx.to_complex(&value, PrecisionPolicy::Context).unwrap();
    assert_eq!(*c.real(), 2.5);
    assert!(c.imag().is_zero());
    assert!(ctx.to_complex(&Value::from("1"), PrecisionPolicy::Context).is_err());
}

#[test]
fn undefined_domain_is_a_type_error() {
    let mut ctx = Context::new();
    let z = Value::from(Complex64::new(1.0, 1.0));
    for result in [ctx.floor_div(z.clone(), 2), ctx.modulo(z.clone(), 2), ctx.lshift(1.5, 1)] {
        assert_eq!(result.unwrap_err().family(), ErrorFamily::Type);
    }
    assert_eq!(ctx.divmod(z.clone(), 2).unwrap_err().family(), ErrorFamily::Type);
    assert_eq!(ctx.cmp(z, 1).unwrap_err().family(), ErrorFamily::Type);
}

#[test]
fn strings_are_parsed_by_constructors_only() {
    let mut ctx = Context::new();
    assert_eq!(ctx.mpz("-0x_ff").unwrap_err().family(), ErrorFamily::Value);
    assert_eq!(ctx.mpz(" 1_000 ").unwrap(), Mpz::from(1000));
    assert_eq!(Mpz::parse("0x_ff", 0).unwrap(), Mpz::from(255));
    assert_eq!(Mpz::parse("-0b101", 0).unwrap(), Mpz::from(-5));
    assert_eq!(Mpz::parse("z", 36).unwrap(), Mpz::from(35));
    assert!(Mpz::parse("12", 37).is_err());
    assert!(Mpz::parse("1__0", 10).is_err());
    assert_eq!(ctx.mpq("3/-6").unwrap(), Mpq::from_parts(-1, 2).unwrap());
    assert_eq!(ctx.mpq("1.25e1").unwrap(), Mpq::from_parts(25, 2).unwrap());
    assert_eq!(ctx.mpq("1/0").unwrap_err().family(), ErrorFamily::ZeroDivision);
    assert!(ctx.mpfr("inf").unwrap().is_infinite());
    assert_eq!(ctx.mpfr("0.5x").unwrap_err().family(), ErrorFamily::Value);
    let c = ctx.mpc("(1.5-2j)").unwrap();
    assert_eq!((c.real().to_f64(), c.imag().to_f64()), (1.5, -2.0));
    assert_eq!(ctx.add("1", 2).unwrap_err().family(), ErrorFamily::Type);
}

#[test]
fn conversions_between_kinds() {
    let mut ctx = Context::new();
    assert_eq!(ctx.mpz(2.5).unwrap(), Mpz::from(2));
    assert_eq!(ctx.mpz(3.5).unwrap(), Mpz::from(4));
    assert_eq!(ctx.mpz(Mpq::from_parts(-7, 2).unwrap()).unwrap(), Mpz::from(-3));
    assert_eq!(ctx.mpq(0.75).unwrap(), Mpq::from_parts(3, 4).unwrap());

    let nan = ctx.mpfr("nan").unwrap();
    assert_eq!(ctx.mpz(nan.clone()).unwrap_err().family(), ErrorFamily::Value);
    assert_eq!(nan.to_mpq().unwrap_err().family(), ErrorFamily::Value);
    let inf = ctx.mpfr("-inf").unwrap();
    assert_eq!(ctx.mpz(inf).unwrap_err().family(), ErrorFamily::Overflow);

    assert_eq!(ctx.mpfr(Complex64::new(1.0, 0.0)).unwrap_err().family(), ErrorFamily::Type);
    let x: Mpfr = ctx.mpfr(Mpq::from_parts(1, 4).unwrap()).unwrap();
    assert_eq!(*x.as_float(), Float::with_val(53, 0.25));
}

#[test]
fn converted_values_classify_as_their_target() {
    let mut ctx = Context::new();
    assert_eq!(classify(&Value::from(ctx.mpz(5).unwrap())), TypeCode::Mpz);
    assert_eq!(classify(&Value::from(ctx.mpq(Rational64::new(1, 3)).unwrap())), TypeCode::Mpq);
    assert_eq!(classify(&Value::from(ctx.mpfr(0.5).unwrap())), TypeCode::Mpfr);
    assert_eq!(classify(&Value::from(ctx.mpc(Complex64::new(1.0, -1.0)).unwrap())), TypeCode::Mpc);
    assert!(ctx.flags().is_empty());
}

#[test]
fn huge_decimal_exponents_are_rejected() {
    for text in ["1e-9223372036854775808", "1e9223372036854775807", "2.5e-99999999999"] {
        assert_eq!(Mpq::parse(text, 10).unwrap_err().family(), ErrorFamily::Value, "{}", text);
    }
    assert_eq!(Mpq::parse("25e-1", 10).unwrap(), Mpq::from_parts(5, 2).unwrap());
}

#[test]
fn a_fresh_thread_converts_with_the_widest_exponent_range() {
    registers::ensure_wide();
    let mut big = Float::with_val(53, 1);
    big <<= 1u32 << 31;
    let big = Mpfr::from_parts(big, Ordering::Equal);

    let finite = std::thread::spawn(move || {
        let mut ctx = Context::with_precision(20).unwrap();
        ctx.set_exponent_max(crate::emax_max()).unwrap();
        let value = Value::from(big);
        let (operand, _) = ctx.to_real(&value, PrecisionPolicy::Context).unwrap();
        operand.is_finite()
    })
    .join()
    .unwrap();
    assert!(finite);
}

#[test]
fn explicit_precision_overrides_only_the_precision() {
    let mut ctx = Context::new();
    let exact = ctx.mpfr_with_precision(0.1, 100).unwrap();
    assert_eq!(exact.precision(), 100);
    assert_eq!(*exact.as_float(), Float::with_val(53, 0.1));
    assert!(ctx.flags().is_empty());

    let tenth = ctx.mpfr_with_precision("0.1", 100).unwrap();
    let wide = Context::with_precision(100).unwrap().mpfr("0.1").unwrap();
    assert_eq!(tenth, wide);
    assert_eq!(tenth.precision(), 100);
    assert_ne!(tenth.rc(), Ordering::Equal);
    assert_eq!(ctx.precision(), 53);

    let ff = Mpfr::parse_prec("ff", 16, 8, &mut ctx).unwrap();
    assert_eq!(ff.precision(), 8);
    assert_eq!(*ff.as_float(), 255);

    assert_eq!(crate::mpfr_with_precision(Mpz::from(3), 10).unwrap().precision(), 10);
    assert_eq!(ctx.mpfr_with_precision(1, 0).unwrap_err().family(), ErrorFamily::Value);
    assert_eq!(Mpfr::parse_prec("1", 10, 0, &mut ctx).unwrap_err().family(), ErrorFamily::Value);
    assert_eq!(ctx.mpfr_with_precision(Complex64::new(1.0, 0.0), 10).unwrap_err().family(), ErrorFamily::Type);
}
