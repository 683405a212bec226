//! The current context, one per thread, and scoped replacement of it.

use {core::{cell::RefCell, marker::PhantomData}, tracing::debug};
use crate::Context;

thread_local! {
    static CURRENT: RefCell<Option<Context>> = RefCell::new(None);
}

/// Mutable access to this thread's current context, creating the default
/// one on first use.
///
/// `f` works on a copy that is written back when it returns, so `f` may
/// itself call the free functions (a foreign [`crate::NumberLike`]
/// conversion often does). Those nested calls see the context as it was
/// when `f` started, and the flags they raise are kept.
pub fn with_context<R>(f: impl FnOnce(&mut Context) -> R) -> R {
    let mut ctx = CURRENT.with(|current| current.borrow_mut().get_or_insert_with(Context::default).clone());
    let before = ctx.flags();
    let result = f(&mut ctx);
    CURRENT.with(|current| {
        let mut current = current.borrow_mut();
        if let Some(nested) = current.as_ref() {
            ctx.raise(nested.flags() - before);
        }
        *current = Some(ctx);
    });
    result
}

/// A copy of this thread's current context.
pub fn get_context() -> Context {
    with_context(|ctx| ctx.clone())
}

/// Replaces this thread's current context.
pub fn set_context(ctx: Context) {
    debug!(precision = ctx.precision(), "set_context");
    CURRENT.with(|current| *current.borrow_mut() = Some(ctx));
}

/// Installs a copy of `ctx` as the current context until the returned guard
/// is dropped. The guard restores exactly what was current before, so
/// scopes nest.
pub fn local_context(ctx: &Context) -> ContextGuard {
    let entered = ctx.copy();
    debug!(precision = entered.precision(), "enter context");
    let previous = CURRENT.with(|current| current.borrow_mut().replace(entered));
    ContextGuard {
        previous,
        _thread_bound: PhantomData,
    }
}

impl Context {
    /// Shorthand for [`local_context`].
    pub fn enter(&self) -> ContextGuard {
        local_context(self)
    }
}

/// Token for the context that was current before a scope was entered.
#[must_use = "the context is restored as soon as the guard is dropped"]
pub struct ContextGuard {
    previous: Option<Context>,
    // Restoring on another thread would clobber that thread's context.
    _thread_bound: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        debug!("exit context");
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}
