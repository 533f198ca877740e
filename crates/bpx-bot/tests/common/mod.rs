//! Shared helpers for bpx-bot integration tests.

pub mod fake_exchange;
pub mod log_capture;
