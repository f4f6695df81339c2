//! Cross-message timestamp reconstruction.
//!
//! Data messages may carry a full timestamp, only its low sixteen bits, or a
//! five-bit offset in a compressed record header. A [`DecodingContext`] holds
//! what is needed to rebuild absolute times from the latter two. There is one
//! context per stream, owned by its driver.

use chrono::{DateTime, Utc};

/// Offset of the FIT epoch (1989-12-31T00:00:00Z) from the Unix epoch.
pub const FIT_EPOCH: i64 = 631_065_600;

/// Convert seconds since the FIT epoch to a UTC time.
pub fn fit_time(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(FIT_EPOCH.checked_add(secs)?, 0)
}

/// How a data message's timestamp was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    /// A full `timestamp` field.
    Absolute,
    /// A `timestamp_16` fragment against the anchor.
    Fragment,
    /// The time offset of a compressed record header.
    Offset,
    /// No temporal field; the last known timestamp was carried over.
    Inherited,
}

/// Mutable timestamp state threaded through the data messages of a stream.
///
/// All times are seconds since the FIT epoch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodingContext {
    last: Option<i64>,
    matched: Option<u16>,
    anchor: Option<i64>,
}

impl DecodingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent timestamp, however it was obtained.
    pub fn last_timestamp(&self) -> Option<i64> {
        self.last
    }

    /// The last full timestamp, against which fragments are resolved.
    pub fn anchor(&self) -> Option<i64> {
        self.anchor
    }

    /// The fragment matched to the anchor, if any since it was set.
    pub fn matched_fragment(&self) -> Option<u16> {
        self.matched
    }

    /// Record a full timestamp, which becomes the anchor and resets the
    /// fragment match point.
    pub fn absolute(&mut self, secs: i64) {
        self.last = Some(secs);
        self.anchor = Some(secs);
        self.matched = None;
    }

    /// Reconstruct a full timestamp from its low sixteen bits.
    ///
    /// The first fragment after an anchor is matched to it with a delta of
    /// zero. Later fragments are measured from that match point. Returns
    /// `None`, leaving the context untouched, if no anchor has been seen.
    pub fn fragment(&mut self, fragment: u16) -> Option<i64> {
        let anchor = self.anchor?;

        let delta = match self.matched {
            None => {
                self.matched = Some(fragment);
                0
            }
            Some(m) if fragment >= m => i64::from(fragment - m),
            Some(m) => (i64::from(m) - 65535) + i64::from(fragment),
        };

        let secs = anchor + delta;
        self.last = Some(secs);
        Some(secs)
    }

    /// Reconstruct a full timestamp from a compressed header's time offset.
    ///
    /// Returns `None` if no timestamp has been seen.
    pub fn offset(&mut self, offset: u8) -> Option<i64> {
        let last = self.last?;
        let secs = last + ((i64::from(offset) - last) & 0x1F);

        self.last = Some(secs);
        Some(secs)
    }
}
