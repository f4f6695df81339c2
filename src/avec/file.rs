use alloc::{collections::BTreeMap, vec::Vec};

use either::Either::Right;

use super::FromMessages;
use crate::{
    config::DecoderConfig,
    error::Error,
    profile::MessageKind,
    sans::{
        Stream,
        data::DataMessage,
        developer::DeveloperRegistry,
        header::FileHeader,
        stream::Source,
    },
};

/// A fully decoded document.
#[derive(Debug, Clone)]
pub struct FitFile {
    header: FileHeader,
    messages: Vec<DataMessage>,
    index: BTreeMap<MessageKind, Vec<usize>>,
    registry: DeveloperRegistry,
}

impl FitFile {
    /// Decode every record of a document.
    ///
    /// Any error aborts the whole decode.
    pub fn decode<S: Source>(source: S, config: DecoderConfig) -> Result<Self, Error> {
        let mut stream = Stream::open(source, config)?;

        let mut messages = Vec::new();
        let mut index: BTreeMap<_, Vec<_>> = BTreeMap::new();

        while let Some(record) = stream.next_record()? {
            if let Right(message) = record {
                index.entry(message.kind()).or_default().push(messages.len());
                messages.push(message);
            }
        }

        let (header, registry) = stream.into_parts();

        Ok(Self {
            header,
            messages,
            index,
            registry,
        })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// All data messages, in document order.
    pub fn messages(&self) -> &[DataMessage] {
        &self.messages
    }

    /// Data messages of one kind, in document order.
    pub fn messages_of(&self, kind: MessageKind) -> impl Iterator<Item = &DataMessage> {
        self.index
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.messages.get(i))
    }

    pub fn first(&self, kind: MessageKind) -> Option<&DataMessage> {
        self.messages_of(kind).next()
    }

    /// Kinds of message present, in ascending order.
    pub fn kinds(&self) -> impl Iterator<Item = MessageKind> + '_ {
        self.index.keys().copied()
    }

    /// Developer fields described by the document.
    pub fn registry(&self) -> &DeveloperRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<DataMessage> {
        self.messages
    }

    /// Publish messages, in document order, to a receiver.
    pub fn publish(&self, o: &mut impl FromMessages) {
        for message in &self.messages {
            // Shadow the document receiver with that of a single message.
            let Some(o) = o.add_message(message.global_number()) else {
                continue;
            };

            if let Some(timestamp) = message.timestamp() {
                o.add_timestamp(timestamp);
            }

            for field in message.fields() {
                if !field.value().is_invalid() {
                    o.add_field(field);
                }
            }
        }
    }
}
