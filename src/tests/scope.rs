use {std::sync::Arc, rug::Float};
use crate::{get_context, local_context, set_context, with_context, Capabilities, Context, Mpfr, NumberLike, RoundMode};
use super::fresh;

/// Converts itself with the free functions, so through the current context.
#[derive(Debug)]
struct Third;

impl NumberLike for Third {
    fn capabilities(&self) -> Capabilities {
        Capabilities::MPFR
    }

    fn to_mpfr(&self) -> crate::Result<Mpfr> {
        crate::mpfr(1.0 / 3.0)
    }
}

#[test]
fn free_functions_use_the_current_context() {
    fresh();
    let mut ctx = Context::with_precision(20).unwrap();
    ctx.set_trap_inexact(false).unwrap();
    set_context(ctx);

    let x = crate::div(1, 3).unwrap();
    assert_eq!(x.as_mpfr().map(|x| x.precision()), Some(20));
    assert!(get_context().inexact());

    with_context(|ctx| ctx.clear_flags());
    assert!(!get_context().inexact());
}

#[test]
fn scopes_nest_and_restore() {
    fresh();
    let outer = Context::with_precision(100).unwrap();
    let inner = Context::with_precision(200).unwrap();
    {
        let _outer = local_context(&outer);
        with_context(|ctx| ctx.set_round(RoundMode::Up)).unwrap();
        {
            let _inner = inner.enter();
            assert_eq!(get_context().precision(), 200);
            with_context(|ctx| ctx.set_precision(300)).unwrap();
        }
        let current = get_context();
        assert_eq!(current.precision(), 100);
        assert_eq!(current.round(), RoundMode::Up);
    }
    assert_eq!(get_context(), Context::default());
    // The scope worked on copies.
    assert_eq!(outer.round(), RoundMode::Nearest);
    assert_eq!(inner.precision(), 200);
}

#[test]
fn entering_a_readonly_context_gives_a_writable_copy() {
    fresh();
    let mut frozen = Context::new();
    frozen.set_readonly(true);
    let _scope = local_context(&frozen);
    assert!(with_context(|ctx| ctx.set_precision(64)).is_ok());
}

#[test]
fn each_thread_has_its_own_context() {
    fresh();
    set_context(Context::with_precision(128).unwrap());
    let seen = std::thread::spawn(|| {
        crate::add(1.0, 2.0).unwrap();
        get_context().precision()
    })
    .join()
    .unwrap();
    assert_eq!(seen, 53);
    assert_eq!(get_context().precision(), 128);
}

#[test]
fn foreign_conversions_may_call_back_into_the_current_context() {
    fresh();
    set_context(Context::with_precision(20).unwrap());
    let third: Arc<dyn NumberLike> = Arc::new(Third);
    let sum = crate::add(third, 0).unwrap();
    let x = sum.as_mpfr().unwrap();
    assert_eq!(x.precision(), 20);
    assert_eq!(*x.as_float(), Float::with_val(20, 1) / 3);
    // Only the nested conversion rounded; its flag survives the outer call.
    let current = get_context();
    assert!(current.inexact());
    assert_eq!(current.precision(), 20);
}
