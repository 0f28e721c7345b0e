pub mod client;
pub mod error;
mod parse;
mod selectors;

pub use client::PriceClient;
pub use error::PriceError;
