pub mod client;
pub mod error;
mod ndl;
mod openbd;

pub use client::LookupClient;
pub use error::LookupError;
