//! The message decoding engine.
//!
//! This module is intended for applications that need records as they are
//! decoded, or finer control over decoder state. See [`crate::avec`] for
//! whole-file decoding.
//!
//! # Architecture
//!
//! A [`Stream`] reads a document header, then alternates between record
//! headers and message content until the declared number of record bytes has
//! been consumed:
//!
//! - A definition message describes the layout of later data messages on one
//! of sixteen local slots. A new definition replaces the slot's previous one.
//! Data messages hold their own reference to the definition they were decoded
//! against.
//!
//! - A data message is decoded against its slot's definition. Every fixed
//! layout, from a definition's header to a single array field, is described by
//! a [`schema::Schema`] and unpacked by a [`schema::Plan`] compiled once per
//! byte order.
//!
//! - Fields whose meaning depends on other fields of the same message are
//! resolved through closed [`dispatch::Dispatch`] tables once all fields have
//! their base values.
//!
//! - `field_description` messages extend the [`developer::DeveloperRegistry`],
//! making developer fields declared by later definitions resolvable.
//!
//! - Full timestamps, 16-bit fragments and compressed header offsets are
//! reconciled by the stream's [`context::DecodingContext`].
//!
//! The stream checks the file CRC once all records are consumed. A helper is
//! provided in the [`check`] module for other uses.

pub mod base;
pub mod check;
pub mod context;
pub mod data;
pub mod definition;
pub mod developer;
pub mod dispatch;
pub mod field;
pub mod header;
pub mod schema;
pub mod stream;
pub mod value;

pub use stream::{Record, Stream};
