use quickcheck::{quickcheck, TestResult};
use rug::Integer;
use uninum::{get_context, local_context, with_context, Context, Mpq, Mpz, Number};

fn int(number: Number) -> Integer {
    match number {
        Number::Mpz(z) => z.into_integer(),
        other => panic!("expected an integer, got {:?}", other),
    }
}

#[test]
fn floor_division_identity() {
    fn prop(a: i64, b: i64) -> TestResult {
        if b == 0 {
            return TestResult::discard();
        }
        let mut ctx = Context::new();
        let q = int(ctx.floor_div(a, b).unwrap());
        let r = int(ctx.modulo(a, b).unwrap());
        let (dq, dr) = ctx.divmod(a, b).unwrap();
        if int(dq) != q || int(dr) != r {
            return TestResult::failed();
        }
        let b = Integer::from(b);
        let holds = Integer::from(&q * &b) + &r == a
            && r.cmp_abs(&b).is_lt()
            && (r == 0 || (r < 0) == (b < 0));
        TestResult::from_bool(holds)
    }
    quickcheck(prop as fn(i64, i64) -> TestResult);
}

#[test]
fn rationals_are_always_reduced() {
    fn reduced(number: Number) -> bool {
        match number {
            Number::Mpq(q) => {
                let (n, d) = (q.numerator().into_integer(), q.denominator().into_integer());
                d > 0 && n.gcd(&d) == 1
            }
            // Integral results come back as integers.
            Number::Mpz(_) => true,
            _ => false,
        }
    }

    fn prop(a: i32, b: i32, c: i32, d: i32) -> TestResult {
        if b == 0 || d == 0 || c == 0 {
            return TestResult::discard();
        }
        let mut ctx = Context::new();
        let x = Mpq::from_parts(a, b).unwrap();
        let y = Mpq::from_parts(c, d).unwrap();
        TestResult::from_bool(
            reduced(ctx.add(x.clone(), y.clone()).unwrap())
                && reduced(ctx.mul(x.clone(), y.clone()).unwrap())
                && reduced(ctx.div(x, y).unwrap()),
        )
    }
    quickcheck(prop as fn(i32, i32, i32, i32) -> TestResult);
}

#[test]
fn scopes_restore_whatever_happens_inside() {
    fn prop(outer: u8, inner: u8) -> bool {
        let before = get_context();
        let outer = Context::with_precision(u32::from(outer) + 2).unwrap();
        let inner = Context::with_precision(u32::from(inner) + 2).unwrap();
        {
            let _outer = local_context(&outer);
            {
                let _inner = local_context(&inner);
                with_context(|ctx| ctx.set_precision(1000)).unwrap();
                let _ = uninum::div(1, 3);
            }
            if get_context().precision() != outer.precision() {
                return false;
            }
        }
        get_context() == before
    }
    quickcheck(prop as fn(u8, u8) -> bool);
}

#[test]
fn shifts_agree_with_multiplication() {
    fn prop(a: i64, n: u8) -> bool {
        let n = u32::from(n % 100);
        let mut ctx = Context::new();
        let shifted = int(ctx.lshift(a, n).unwrap());
        let back = int(ctx.rshift(Mpz::from(shifted.clone()), n).unwrap());
        shifted == Integer::from(a) * (Integer::from(1) << n) && back == a
    }
    quickcheck(prop as fn(i64, u8) -> bool);
}
