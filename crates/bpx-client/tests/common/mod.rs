//! Shared helpers for bpx-client integration tests.

pub mod mock_exchange;
