//! Backpack exchange access for the volume bot.
//!
//! - `Exchange`: the four operations the bot needs (markets, depth,
//!   balances, order execution)
//! - `BackpackClient`: REST implementation over `reqwest`
//! - `RequestSigner`: ED25519 signing of private endpoints

pub mod client;
pub mod error;
pub mod exchange;
pub mod signer;

pub use client::{BackpackClient, DEFAULT_API_URL, DEFAULT_WINDOW_MS};
pub use error::{ClientError, ClientResult};
pub use exchange::Exchange;
pub use signer::{signing_params, RequestSigner};
