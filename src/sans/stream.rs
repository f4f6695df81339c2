//! The stream driver.
//!
//! A [`Stream`] owns every piece of mutable decoding state: the cursor over
//! the source, the sixteen local definition slots, the developer registry, the
//! timestamp context and the plan cache. Nothing is shared between streams.

use alloc::{sync::Arc, vec, vec::Vec};

use either::Either::{self, Left, Right};
use tracing::{debug, trace};

use super::{
    check::Crc,
    context::DecodingContext,
    data::DataMessage,
    definition::DefinitionMessage,
    developer::DeveloperRegistry,
    header::{CRC_HEADER_SIZE, FileHeader, MessageClass, RecordHeader},
    schema::{Plan, PlanCache, Scalar},
};
use crate::{config::DecoderConfig, error::Error};

/// A source of document bytes.
pub trait Source {
    /// Fill the buffer completely, or fail with [`Error::EndOfData`] once the
    /// source is exhausted.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error>;

    /// Bytes left in the source, when known up front.
    fn remaining(&self) -> Option<usize> {
        None
    }
}

impl Source for &[u8] {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        if self.len() < buf.len() {
            Err(Error::EndOfData)?;
        }

        let (head, tail) = self.split_at(buf.len());
        buf.copy_from_slice(head);
        *self = tail;

        Ok(())
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// Adapts a reader into a [`Source`].
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R>(pub R);

#[cfg(feature = "std")]
impl<R: std::io::Read> Source for IoSource<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        match self.0.read_exact(buf) {
            Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => Err(Error::EndOfData),
            r => Ok(r?),
        }
    }
}

/// A position in a source, counting consumed bytes and accumulating their
/// CRC.
#[derive(Debug)]
pub struct Cursor<S> {
    source: S,
    consumed: usize,
    crc: Crc,
}

impl<S: Source> Cursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            consumed: 0,
            crc: Crc::new(),
        }
    }

    /// Take an exact number of bytes.
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut r = [0; N];
        self.fill(&mut r)?;
        Ok(r)
    }

    /// Take a run-time number of bytes.
    pub fn take_vec(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        let mut r = vec![0; n];
        self.fill(&mut r)?;
        Ok(r)
    }

    /// Take and unpack the bytes of one plan.
    pub fn unpack(&mut self, plan: &Plan) -> Result<Vec<Scalar>, Error> {
        let r = self.take_vec(plan.len())?;
        Ok(plan.decode(&r)?)
    }

    /// Bytes consumed since the start of the source.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// CRC of the bytes consumed so far.
    pub fn crc(&self) -> u16 {
        self.crc.value()
    }

    /// Bytes left in the source, when known.
    pub fn remaining(&self) -> Option<usize> {
        self.source.remaining()
    }

    fn fill(&mut self, r: &mut [u8]) -> Result<(), Error> {
        self.source.read_exact(r)?;
        self.consumed += r.len();
        self.crc.update(r);
        Ok(())
    }
}

/// A record decoded from a stream.
pub type Record = Either<Arc<DefinitionMessage>, DataMessage>;

/// A decoder over one FIT document.
#[derive(Debug)]
pub struct Stream<S> {
    cursor: Cursor<S>,
    header: FileHeader,
    config: DecoderConfig,
    slots: [Option<Arc<DefinitionMessage>>; 16],
    registry: DeveloperRegistry,
    context: DecodingContext,
    plans: PlanCache,
    /// Bytes consumed by the file header.
    start: usize,
    done: bool,
}

impl<S: Source> Stream<S> {
    /// Decode and validate the file header, positioning the stream at the
    /// first record.
    pub fn open(source: S, config: DecoderConfig) -> Result<Self, Error> {
        let mut cursor = Cursor::new(source);
        let mut header = FileHeader::decode(cursor.take()?)?;

        let mut extension = header.extension_len();

        if header.header_size >= CRC_HEADER_SIZE {
            let calculated = cursor.crc();
            let found = u16::from_le_bytes(cursor.take()?);

            // A zero header CRC is declared as not computed.
            if config.verify_crc && found != 0 && found != calculated {
                Err(Error::CyclicRedundancyCheck { found, calculated })?;
            }

            header.crc = Some(found);
            extension -= 2;
        }

        cursor.take_vec(extension)?;

        debug!(
            protocol_version = header.protocol_version,
            profile_version = header.profile_version,
            data_size = header.data_size,
            "opened document"
        );

        Ok(Self {
            start: cursor.consumed(),
            cursor,
            header,
            config,
            slots: Default::default(),
            registry: DeveloperRegistry::new(),
            context: DecodingContext::new(),
            plans: PlanCache::new(),
            done: false,
        })
    }

    /// Decode the next record, or return `None` once the declared payload has
    /// been consumed and the file CRC checked.
    pub fn next_record(&mut self) -> Result<Option<Record>, Error> {
        if self.done {
            return Ok(None);
        }

        if self.payload_consumed() == self.declared() {
            self.finish()?;
            return Ok(None);
        }

        let outstanding = self.declared().saturating_sub(self.payload_consumed());

        if let Some(remaining) = self.cursor.remaining().filter(|r| *r < outstanding) {
            Err(self.short_payload(remaining))?;
        }

        let record = match self.decode_record() {
            Err(Error::EndOfData) => Err(self.short_payload(0))?,
            record => record?,
        };

        if self.payload_consumed() > self.declared() {
            Err(Error::PayloadSize {
                declared: self.declared(),
                consumed: self.payload_consumed(),
            })?;
        }

        Ok(Some(record))
    }

    fn decode_record(&mut self) -> Result<Record, Error> {
        let [byte] = self.cursor.take()?;
        let header = RecordHeader::decode(byte);
        let slot = usize::from(header.local_slot);

        let record = match header.class {
            MessageClass::Definition => {
                let definition = Arc::new(DefinitionMessage::decode(
                    header,
                    &self.registry,
                    &mut self.plans,
                    &mut self.cursor,
                )?);

                self.slots[slot] = Some(definition.clone());
                Left(definition)
            }
            MessageClass::Data => {
                let definition = self.slots[slot]
                    .clone()
                    .ok_or(Error::EmptySlot(header.local_slot))?;

                let message = DataMessage::decode(
                    definition,
                    header,
                    &mut self.cursor,
                    &mut self.plans,
                    &mut self.context,
                    &self.config,
                )?;

                self.registry.observe(&message);
                Right(message)
            }
        };

        Ok(record)
    }

    /// The source ran out before the declared payload did.
    fn short_payload(&self, remaining: usize) -> Error {
        Error::PayloadSize {
            declared: self.declared(),
            consumed: self.payload_consumed() + remaining,
        }
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn registry(&self) -> &DeveloperRegistry {
        &self.registry
    }

    pub fn context(&self) -> &DecodingContext {
        &self.context
    }

    /// The definition currently held by a local slot.
    pub fn slot(&self, local_slot: u8) -> Option<&Arc<DefinitionMessage>> {
        self.slots.get(usize::from(local_slot))?.as_ref()
    }

    /// Number of distinct unpacking plans compiled so far.
    pub fn plans_compiled(&self) -> usize {
        self.plans.len()
    }

    /// Release the stream, keeping its header and developer registry.
    pub fn into_parts(self) -> (FileHeader, DeveloperRegistry) {
        (self.header, self.registry)
    }

    fn declared(&self) -> usize {
        self.header.data_size as usize
    }

    fn payload_consumed(&self) -> usize {
        self.cursor.consumed() - self.start
    }

    fn finish(&mut self) -> Result<(), Error> {
        self.done = true;

        let calculated = self.cursor.crc();
        let found = u16::from_le_bytes(self.cursor.take()?);

        if self.config.verify_crc && found != calculated {
            Err(Error::CyclicRedundancyCheck { found, calculated })?;
        }

        trace!(bytes = self.payload_consumed(), "finished document");

        Ok(())
    }
}

impl<S: Source> Iterator for Stream<S> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
