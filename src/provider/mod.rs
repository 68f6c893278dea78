//! Provider module - upstream media generation clients

pub mod http_provider;
pub mod traits;

pub use http_provider::HttpProvider;
pub use traits::{MediaKind, MediaProvider};
