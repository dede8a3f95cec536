//! Suspend until the wake edge
//!
//! The core waits in WFE. embassy-rp's GPIO interrupt wakes the edge
//! future's waker, and that waker only raises `WAKE_PENDING` and signals
//! an event. Everything else happens in the control loop after
//! `suspend_until_wake_edge` returns.

use core::future::Future;
use core::pin::pin;
use core::ptr;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use defmt::*;
use embassy_rp::gpio::Input;
use portable_atomic::{AtomicBool, Ordering};
use repcount_hal::{PowerControl, WakeEdge};

#[cfg(not(separate_wake_pin))]
use crate::board::SharedInput;

/// Set from interrupt context when the awaited edge arrives
static WAKE_PENDING: AtomicBool = AtomicBool::new(false);

/// Which input ends a suspend, fixed by `device.toml` at build time
pub enum WakeSource {
    /// The counting button itself
    #[cfg(not(separate_wake_pin))]
    Button(SharedInput),
    /// A pin of its own
    #[cfg(separate_wake_pin)]
    Dedicated(Input<'static>),
}

/// `PowerControl` that parks the core until a GPIO edge
pub struct EdgeSuspend {
    source: WakeSource,
}

impl EdgeSuspend {
    pub fn new(source: WakeSource) -> Self {
        Self { source }
    }
}

impl PowerControl for EdgeSuspend {
    fn suspend_until_wake_edge(&mut self, pin: u8, edge: WakeEdge) {
        debug!("Suspending until {} edge on GPIO{}", edge, pin);

        match &mut self.source {
            #[cfg(not(separate_wake_pin))]
            WakeSource::Button(input) => wait_for_edge(&mut input.borrow_mut(), edge),
            #[cfg(separate_wake_pin)]
            WakeSource::Dedicated(input) => wait_for_edge(input, edge),
        }

        debug!("Wake edge seen");
    }
}

fn wait_for_edge(input: &mut Input<'static>, edge: WakeEdge) {
    match edge {
        WakeEdge::Rising => block_until(input.wait_for_rising_edge()),
        WakeEdge::Falling => block_until(input.wait_for_falling_edge()),
    }
}

/// Run a future to completion, sleeping in WFE between polls
fn block_until<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let waker = flag_waker();
    let mut cx = Context::from_waker(&waker);

    WAKE_PENDING.store(false, Ordering::Release);
    loop {
        if let Poll::Ready(output) = fut.as_mut().poll(&mut cx) {
            WAKE_PENDING.store(false, Ordering::Release);
            return output;
        }

        // A wake between the check and WFE leaves the event register set,
        // so WFE returns at once
        while !WAKE_PENDING.swap(false, Ordering::AcqRel) {
            cortex_m::asm::wfe();
        }
    }
}

static VTABLE: RawWakerVTable = RawWakerVTable::new(clone_waker, wake, wake, drop_waker);

fn clone_waker(_: *const ()) -> RawWaker {
    RawWaker::new(ptr::null(), &VTABLE)
}

fn wake(_: *const ()) {
    WAKE_PENDING.store(true, Ordering::Release);
    cortex_m::asm::sev();
}

fn drop_waker(_: *const ()) {}

fn flag_waker() -> Waker {
    // SAFETY: the vtable never dereferences the data pointer and only
    // touches an atomic, so it is sound to call from any context
    unsafe { Waker::from_raw(RawWaker::new(ptr::null(), &VTABLE)) }
}
