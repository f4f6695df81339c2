//! Static knowledge of the FIT profile.
//!
//! The catalog covers the messages common to activity and monitoring files.
//! Messages, fields and enumeration codes it does not describe still decode,
//! and are marked as unknown.

pub mod enums;
pub mod messages;
pub mod units;

pub use messages::MessageKind;
pub use units::{Quantity, UnitSystem};
