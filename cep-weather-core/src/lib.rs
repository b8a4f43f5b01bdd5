//! Core library for the CEP weather service.
//!
//! This crate defines:
//! - Shared domain models (postal address, forecast, temperature scales)
//! - Abstractions over the two upstream services, with reqwest-backed
//!   implementations
//!
//! It is used by `cep-weather-server`, but can also be reused by other
//! binaries or services.

pub mod model;
pub mod postal;
pub mod weather;

pub use model::{Forecast, PostalAddress, Temperatures};
pub use postal::{AwesomeApiClient, PostalLookup};
pub use weather::{OpenMeteoClient, WeatherLookup};
