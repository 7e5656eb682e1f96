//! Waratah - NSW address lookup service
//!
//! Resolves a free-text street address into coordinates and a state electoral
//! district by chaining two NSW spatial services: the geocoded addressing
//! layer (address → point) and the administrative boundaries layer
//! (point → district).

pub mod address;
pub mod boundaries;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod http;
pub mod models;
pub mod resolver;

pub use config::Config;
pub use error::{ErrorKind, LookupError};
pub use models::{GeoPoint, LookupData, LookupResponse};
pub use resolver::AddressResolver;
