//! Core library for the `weathertime` tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The request → parse → display lookup flow
//! - The two lookups (current weather, zone time) and shared domain models
//!
//! It is used by `weathertime-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod location;
pub mod lookup;
pub mod model;

pub use config::{Config, Credentials};
pub use lookup::{Lookup, LookupFlow, ParseError, TimeLookup, TransportError, WeatherLookup};
pub use model::{LocalTime, WeatherReading};
