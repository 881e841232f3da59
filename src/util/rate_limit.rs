//! Debounce and throttle wrappers for UI event handlers.
//!
//! Each wrapper owns exactly one optional scheduled-timer handle. Debouncing
//! cancels and reschedules that timer on every call; throttling runs
//! immediately and uses the timer as a cooldown. Timers come from a
//! [`Scheduler`] so the logic stays testable off the browser: the real
//! implementation is a `gloo-timers` timeout, tests drive a fake by hand.

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod rate_limit_test;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Source of cancellable one-shot timers.
pub trait Scheduler {
    /// Opaque handle to one pending callback.
    type Handle;

    /// Run `callback` once after `delay`.
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;

    /// Cancel a pending callback so it never runs.
    fn cancel(&self, handle: Self::Handle);
}

/// Browser scheduler backed by `gloo-timers`. On the server it degrades to a
/// no-op: nothing is ever scheduled there.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

#[cfg(feature = "hydrate")]
impl Scheduler for TimeoutScheduler {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, callback)
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.cancel();
    }
}

#[cfg(not(feature = "hydrate"))]
impl Scheduler for TimeoutScheduler {
    type Handle = ();

    fn schedule(&self, _delay: Duration, _callback: Box<dyn FnOnce()>) -> Self::Handle {}

    fn cancel(&self, _handle: Self::Handle) {}
}

/// Debounced function wrapper: only the last call of a quiet window runs,
/// with that call's argument.
pub struct Debouncer<S: Scheduler, T> {
    scheduler: S,
    delay: Duration,
    func: Rc<RefCell<dyn FnMut(T)>>,
    pending: Rc<RefCell<Option<S::Handle>>>,
}

impl<S, T> Debouncer<S, T>
where
    S: Scheduler,
    S::Handle: 'static,
    T: 'static,
{
    pub fn new(scheduler: S, delay: Duration, func: impl FnMut(T) + 'static) -> Self {
        Self {
            scheduler,
            delay,
            func: Rc::new(RefCell::new(func)),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Cancel any pending run and schedule a fresh one `delay` from now.
    pub fn call(&self, arg: T) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            self.scheduler.cancel(handle);
        }

        let func = Rc::clone(&self.func);
        let pending = Rc::clone(&self.pending);
        let handle = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                pending.borrow_mut().take();
                (func.borrow_mut())(arg);
            }),
        );
        *self.pending.borrow_mut() = Some(handle);
    }
}

impl<S: Scheduler + Clone, T> Clone for Debouncer<S, T> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            delay: self.delay,
            func: Rc::clone(&self.func),
            pending: Rc::clone(&self.pending),
        }
    }
}

/// Throttled function wrapper: the first call of a burst runs immediately,
/// later calls are ignored until `delay` elapses.
pub struct Throttler<S: Scheduler, T> {
    scheduler: S,
    delay: Duration,
    func: Rc<RefCell<dyn FnMut(T)>>,
    cooldown: Rc<RefCell<Option<S::Handle>>>,
}

impl<S, T> Throttler<S, T>
where
    S: Scheduler,
    S::Handle: 'static,
    T: 'static,
{
    pub fn new(scheduler: S, delay: Duration, func: impl FnMut(T) + 'static) -> Self {
        Self {
            scheduler,
            delay,
            func: Rc::new(RefCell::new(func)),
            cooldown: Rc::new(RefCell::new(None)),
        }
    }

    /// Run now unless a cooldown is active; a cooldown timer arms after each
    /// run and expires on its own.
    pub fn call(&self, arg: T) {
        if self.cooldown.borrow().is_some() {
            return;
        }

        (self.func.borrow_mut())(arg);

        let cooldown = Rc::clone(&self.cooldown);
        let handle = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                cooldown.borrow_mut().take();
            }),
        );
        *self.cooldown.borrow_mut() = Some(handle);
    }
}

impl<S: Scheduler + Clone, T> Clone for Throttler<S, T> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            delay: self.delay,
            func: Rc::clone(&self.func),
            cooldown: Rc::clone(&self.cooldown),
        }
    }
}

/// Debounce `func` with the browser scheduler.
pub fn debounce<T: 'static>(
    delay: Duration,
    func: impl FnMut(T) + 'static,
) -> Debouncer<TimeoutScheduler, T> {
    Debouncer::new(TimeoutScheduler, delay, func)
}

/// Throttle `func` with the browser scheduler.
pub fn throttle<T: 'static>(
    delay: Duration,
    func: impl FnMut(T) + 'static,
) -> Throttler<TimeoutScheduler, T> {
    Throttler::new(TimeoutScheduler, delay, func)
}
