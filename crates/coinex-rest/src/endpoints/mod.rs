//! API endpoint implementations
//!
//! Each group borrows the client and only assembles parameters; signing,
//! transport and envelope handling live in [`crate::CoinexRestClient::execute`].

pub mod account;
pub mod assets;
pub mod spot;

pub use account::AccountEndpoints;
pub use assets::AssetEndpoints;
pub use spot::SpotEndpoints;
