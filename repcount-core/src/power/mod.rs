//! Idle tracking for the sleep/wake cycle

pub mod idle;

pub use idle::IdleTimer;
