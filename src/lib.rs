#![no_std]

//! A message decoding engine for Garmin's Flexible and Interoperable Data
//! Transfer protocol.
//!
//! Chainring decodes FIT documents into typed, unit-converted and time-ordered
//! messages. Field types that depend on sibling values are resolved as each
//! message is decoded, developer fields are resolved from their in-band
//! descriptions, and compressed timestamps are reconstructed into absolute
//! times.
//!
//! Most users should begin with the functions and derive macros in the [`avec`]
//! module. Applications needing records as they are decoded can drive a
//! [`sans::Stream`] directly.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoding (default).

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod avec;
pub mod config;
pub mod error;
pub mod profile;
pub mod sans;

pub use config::DecoderConfig;
pub use error::Error;
pub use profile::{MessageKind, UnitSystem};
pub use sans::value::{FieldValue, Value};

#[doc(hidden)]
pub use chrono;
