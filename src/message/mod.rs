// Copyright 2024 the dnswire developers.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Implementation of reading and writing of DNS messages.

use log::trace;

use crate::name;
use crate::rr::{RdataTooLongError, ResourceRecord};

mod constants;
mod header;
mod opcode;
mod question;
mod rcode;
pub mod reader;
pub use constants::HEADER_SIZE;
pub use header::Header;
pub use opcode::{IntoOpcodeError, Opcode};
pub use question::{IntoQtypeError, Qtype, Question};
pub use rcode::{IntoRcodeError, Rcode};
pub use reader::Reader;

////////////////////////////////////////////////////////////////////////
// MESSAGES                                                           //
////////////////////////////////////////////////////////////////////////

/// A complete DNS message: the [`Header`], one [`Question`], and the
/// answer, authority, and additional sections.
///
/// A `Message` is either constructed field by field for the outbound
/// direction (see [`Message::new_query`]) or decoded from a received
/// buffer with [`Message::from_wire`]. The header's section counts are
/// not validated against the section vectors; when encoding, keeping
/// them consistent is the caller's responsibility.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    pub header: Header,
    pub question: Question,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

/// How much of a received message [`Message::from_wire_with`] decodes.
///
/// The answer section is always decoded. Callers that only care about
/// answers (the common case for a stub resolver) can stop there and
/// skip the authority and additional sections entirely.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DecodeSections {
    /// Stop after the answer section, leaving
    /// [`authority`](Message::authority) and
    /// [`additional`](Message::additional) empty.
    AnswersOnly,

    /// Decode every section the header announces.
    #[default]
    All,
}

impl Message {
    /// Builds an outbound query message asking for all records (`*`
    /// QTYPE, `*` QCLASS) of `domain`, with recursion desired and a
    /// randomly chosen transaction ID.
    ///
    /// Fails if `domain` is not a valid domain name.
    pub fn new_query(domain: &str) -> Result<Self, name::Error> {
        let question = Question {
            qname: domain.parse()?,
            qtype: Qtype::Any,
            qclass: crate::class::Class::Any,
        };
        Ok(Self {
            header: Header::new_query(rand::random()),
            question,
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        })
    }

    /// Encodes the message into its on-the-wire form: the header, the
    /// question, and then the answer, authority, and additional
    /// sections, in that order. Names are always written with explicit
    /// labels; this codec never emits compression pointers.
    ///
    /// Fails if any record's RDATA is too long for its RDLENGTH field.
    pub fn to_wire(&self) -> Result<Vec<u8>, RdataTooLongError> {
        let mut buf = Vec::with_capacity(512);
        self.header.to_wire(&mut buf);
        self.question.to_wire(&mut buf);
        for rr in self
            .answers
            .iter()
            .chain(&self.authority)
            .chain(&self.additional)
        {
            rr.to_wire(&mut buf)?;
        }
        Ok(buf)
    }

    /// Decodes a message from `octets`, including every section the
    /// header announces. See [`Message::from_wire_with`].
    pub fn from_wire(octets: &[u8]) -> Result<(Self, usize), reader::Error> {
        Self::from_wire_with(octets, DecodeSections::All)
    }

    /// Decodes a message from `octets`.
    ///
    /// Exactly one question is read, regardless of the header's
    /// QDCOUNT; multi-question messages are not supported. The number
    /// of records read from each remaining section is the count the
    /// header announces for it (subject to `sections`); a count larger
    /// than the data actually present surfaces as an end-of-message
    /// error from the affected section.
    ///
    /// On success, returns the message and the total number of octets
    /// consumed. The first failure in any sub-decode aborts the whole
    /// decode and is returned unmodified.
    pub fn from_wire_with(
        octets: &[u8],
        sections: DecodeSections,
    ) -> Result<(Self, usize), reader::Error> {
        let mut reader = Reader::try_from(octets)?;
        let header = reader.header()?;
        let question = reader.read_question()?;

        let mut answers = Vec::with_capacity(header.ancount as usize);
        for _ in 0..header.ancount {
            answers.push(reader.read_rr()?);
        }

        let (mut authority, mut additional) = (Vec::new(), Vec::new());
        if sections == DecodeSections::All {
            authority.reserve(header.nscount as usize);
            for _ in 0..header.nscount {
                authority.push(reader.read_rr()?);
            }
            additional.reserve(header.arcount as usize);
            for _ in 0..header.arcount {
                additional.push(reader.read_rr()?);
            }
        }

        trace!(
            "decoded message: id {}, {} answer(s), {} octet(s)",
            header.id,
            answers.len(),
            reader.bytes_read()
        );
        let message = Self {
            header,
            question,
            answers,
            authority,
            additional,
        };
        Ok((message, reader.bytes_read()))
    }
}

/// Encodes a query for all records of `domain`; the on-the-wire form of
/// [`Message::new_query`].
pub fn encode_query(domain: &str) -> Result<Vec<u8>, name::Error> {
    let message = Message::new_query(domain)?;
    // A fresh query has no records, so only the header and question
    // need encoding, and neither can fail.
    let mut buf = Vec::with_capacity(HEADER_SIZE + message.question.qname.wire_repr().len() + 4);
    message.header.to_wire(&mut buf);
    message.question.to_wire(&mut buf);
    Ok(buf)
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Class;
    use crate::name::Name;
    use crate::rr::{Ttl, Type};

    #[test]
    fn new_query_has_the_expected_shape() {
        let message = Message::new_query("example.test").unwrap();
        assert!(!message.header.qr);
        assert_eq!(message.header.opcode, Opcode::Query);
        assert!(message.header.rd);
        assert_eq!(message.header.qdcount, 1);
        assert_eq!(message.header.ancount, 0);
        assert_eq!(message.question.qtype, Qtype::Any);
        assert_eq!(message.question.qclass, Class::Any);
        assert!(message.answers.is_empty());
    }

    #[test]
    fn encode_query_emits_header_then_question() {
        let octets = encode_query("foo.bar").unwrap();
        // Flag octets: RD only. The ID octets are random.
        assert_eq!(&octets[2..12], &[1, 0, 0, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            &octets[12..],
            b"\x03foo\x03bar\x00\x00\xff\x00\xff"
        );
    }

    #[test]
    fn encode_query_rejects_bad_names() {
        assert_eq!(encode_query(""), Err(name::Error::StrEmpty));
        assert_eq!(encode_query("a..b"), Err(name::Error::EmptyLabel));
    }

    #[test]
    fn to_wire_then_from_wire_roundtrips() {
        let mut message = Message::new_query("example.test").unwrap();
        message.header.qr = true;
        message.header.ra = true;
        message.header.ancount = 1;
        message.header.arcount = 1;
        message.answers.push(ResourceRecord {
            owner: "example.test".parse().unwrap(),
            rr_type: Type::A,
            class: Class::In,
            ttl: Ttl::from(300),
            rdata: vec![192, 0, 2, 1],
        });
        message.additional.push(ResourceRecord {
            owner: Name::root(),
            rr_type: Type::Txt,
            class: Class::Ch,
            ttl: Ttl::from(0),
            rdata: vec![],
        });

        let octets = message.to_wire().unwrap();
        let (decoded, consumed) = Message::from_wire(&octets).unwrap();
        assert_eq!(decoded, message);
        assert_eq!(consumed, octets.len());
    }

    #[test]
    fn from_wire_can_stop_after_answers() {
        let mut message = Message::new_query("example.test").unwrap();
        message.header.qr = true;
        message.header.arcount = 1;
        message.additional.push(ResourceRecord {
            owner: Name::root(),
            rr_type: Type::A,
            class: Class::In,
            ttl: Ttl::from(0),
            rdata: vec![10, 0, 0, 1],
        });
        let octets = message.to_wire().unwrap();

        let (decoded, consumed) =
            Message::from_wire_with(&octets, DecodeSections::AnswersOnly).unwrap();
        assert!(decoded.additional.is_empty());
        assert_eq!(decoded.header.arcount, 1);
        assert!(consumed < octets.len());

        let (decoded, consumed) = Message::from_wire(&octets).unwrap();
        assert_eq!(decoded.additional.len(), 1);
        assert_eq!(consumed, octets.len());
    }

    #[test]
    fn from_wire_decodes_exactly_one_question() {
        // QDCOUNT claims two questions; the second is not decoded, so
        // the consumed count stops after the first.
        let mut message = Message::new_query("example.test").unwrap();
        message.header.qdcount = 2;
        let octets = message.to_wire().unwrap();
        let (decoded, consumed) = Message::from_wire(&octets).unwrap();
        assert_eq!(decoded.header.qdcount, 2);
        assert_eq!(consumed, octets.len());
    }

    #[test]
    fn from_wire_surfaces_count_overruns() {
        // ANCOUNT claims an answer that is not in the buffer.
        let mut message = Message::new_query("example.test").unwrap();
        message.header.ancount = 1;
        let octets = message.to_wire().unwrap();
        assert_eq!(
            Message::from_wire(&octets),
            Err(reader::Error::InvalidName(name::Error::UnexpectedEom))
        );
    }

    #[test]
    fn from_wire_propagates_section_errors() {
        let mut octets = Message::new_query("example.test").unwrap().to_wire().unwrap();
        // Corrupt the QCLASS field (last two octets) to the reserved
        // value 0.
        let len = octets.len();
        octets[len - 2..].fill(0);
        assert_eq!(
            Message::from_wire(&octets),
            Err(reader::Error::InvalidClass(crate::class::IntoClassError(0)))
        );
    }
}
