#![cfg(test)]

mod context;
mod dispatch;
mod scope;

use crate::{Context, Mpfr, Number};

/// The Real payload of a result, or a panic naming what came back instead.
fn real(number: Number) -> Mpfr {
    match number {
        Number::Mpfr(x) => x,
        other => panic!("expected a real, got {:?}", other),
    }
}

/// A context in a known state, installed as this thread's current one too
/// (test threads may be reused).
fn fresh() -> Context {
    crate::set_context(Context::default());
    Context::default()
}
