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

//! Implementation of the [`Reader`] type to read on-the-wire DNS
//! messages.
//!
//! The building blocks are the pure functions [`read_question_at`] and
//! [`read_rr_at`]: each takes `(buffer, offset)` and returns the parsed
//! value together with the number of octets consumed, leaving cursor
//! arithmetic to the caller. [`Reader`] layers a cursor on top of them
//! for the common case of walking a whole message front to back.

use std::fmt;

use super::constants::HEADER_SIZE;
use super::{Header, IntoOpcodeError, IntoQtypeError, IntoRcodeError, Qtype, Question};
use crate::class::{Class, IntoClassError};
use crate::name::{self, Name};
use crate::rr::{IntoTypeError, ResourceRecord, Ttl, Type};

////////////////////////////////////////////////////////////////////////
// PURE SECTION-ENTRY DECODERS                                        //
////////////////////////////////////////////////////////////////////////

/// Reads a [`Question`] starting at index `offset` of `octets`.
///
/// Compression pointers in the QNAME are resolved against `octets`, so
/// the buffer should be the entire DNS message. On success, returns the
/// question and the number of octets it occupies at `offset`.
pub fn read_question_at(octets: &[u8], offset: usize) -> Result<(Question, usize)> {
    let (qname, qname_len) =
        Name::try_from_compressed(octets, offset).map_err(Error::InvalidName)?;
    let qname_end = offset + qname_len;
    let raw_qtype = read_u16(octets, qname_end)?;
    let raw_qclass = read_u16(octets, qname_end + 2)?;
    let question = Question {
        qname,
        qtype: Qtype::try_from(raw_qtype).map_err(Error::InvalidQtype)?,
        qclass: Class::try_from(raw_qclass).map_err(Error::InvalidClass)?,
    };
    Ok((question, qname_len + 4))
}

/// Reads a [`ResourceRecord`] starting at index `offset` of `octets`.
///
/// Compression pointers in the owner name are resolved against
/// `octets`, so the buffer should be the entire DNS message. The RDATA
/// is copied out verbatim, without type-specific interpretation. On
/// success, returns the record and the number of octets it occupies at
/// `offset`.
pub fn read_rr_at(octets: &[u8], offset: usize) -> Result<(ResourceRecord, usize)> {
    let (owner, owner_len) =
        Name::try_from_compressed(octets, offset).map_err(Error::InvalidName)?;
    let owner_end = offset + owner_len;
    let raw_type = read_u16(octets, owner_end)?;
    let raw_class = read_u16(octets, owner_end + 2)?;
    let ttl = read_u32(octets, owner_end + 4)? as i32;
    let rdlength = read_u16(octets, owner_end + 8)?;
    let rdata_start = owner_end + 10;
    let rdata = octets
        .get(rdata_start..rdata_start + rdlength as usize)
        .ok_or(Error::UnexpectedEomInRdata)?
        .to_vec();
    let rr = ResourceRecord {
        owner,
        rr_type: Type::try_from(raw_type).map_err(Error::InvalidType)?,
        class: Class::try_from(raw_class).map_err(Error::InvalidClass)?,
        ttl: Ttl::from(ttl),
        rdata,
    };
    Ok((rr, owner_len + 10 + rdlength as usize))
}

/// Reads a network-byte-order `u16` at index `at` of `octets`.
fn read_u16(octets: &[u8], at: usize) -> Result<u16> {
    octets
        .get(at..at + 2)
        .map(|slice| u16::from_be_bytes([slice[0], slice[1]]))
        .ok_or(Error::UnexpectedEomInField)
}

/// Reads a network-byte-order `u32` at index `at` of `octets`.
fn read_u32(octets: &[u8], at: usize) -> Result<u32> {
    octets
        .get(at..at + 4)
        .map(|slice| u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]]))
        .ok_or(Error::UnexpectedEomInField)
}

////////////////////////////////////////////////////////////////////////
// READER                                                             //
////////////////////////////////////////////////////////////////////////

/// A "frame" around a buffer containing a DNS message that enables
/// reading the message data.
///
/// A `Reader` is constructed using its [`TryFrom`] implementation. Any
/// underlying buffer for a reader must contain at least a full DNS
/// message header of 12 octets; otherwise the construction will fail.
///
/// The header is read through [`Reader::header`]. Questions and
/// resource records are read through [`Reader::read_question`] and
/// [`Reader::read_rr`], which use a cursor initially set to the first
/// octet after the header. They must be called sequentially to read the
/// question and then the records, in the order they appear in the
/// message.
#[derive(Clone, Eq, PartialEq)]
pub struct Reader<'a> {
    octets: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    /// Decodes the message header.
    pub fn header(&self) -> Result<Header> {
        Header::from_wire(self.octets)
    }

    /// Reads a [`Question`] starting at the current cursor.
    ///
    /// This method is atomic, in that the cursor is not changed on
    /// failure.
    pub fn read_question(&mut self) -> Result<Question> {
        let (question, len) = read_question_at(self.octets, self.cursor)?;
        self.cursor += len;
        Ok(question)
    }

    /// Reads a [`ResourceRecord`] starting at the current cursor.
    ///
    /// This method is atomic, in that the cursor is not changed on
    /// failure.
    pub fn read_rr(&mut self) -> Result<ResourceRecord> {
        let (rr, len) = read_rr_at(self.octets, self.cursor)?;
        self.cursor += len;
        Ok(rr)
    }

    /// Returns the number of octets read so far, including the header.
    pub fn bytes_read(&self) -> usize {
        self.cursor
    }

    /// Returns whether the `Reader`'s cursor has reached the end of the
    /// message.
    pub fn at_eom(&self) -> bool {
        self.cursor >= self.octets.len()
    }
}

impl<'a> TryFrom<&'a [u8]> for Reader<'a> {
    type Error = Error;

    fn try_from(octets: &'a [u8]) -> Result<Self> {
        if octets.len() >= HEADER_SIZE {
            Ok(Self {
                octets,
                cursor: HEADER_SIZE,
            })
        } else {
            Err(Error::HeaderTooShort)
        }
    }
}

impl fmt::Debug for Reader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Reader")
            .field("header", &self.header())
            .field("cursor", &self.cursor)
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that part of an on-the-wire DNS message could not
/// be decoded.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// The buffer is shorter than the fixed twelve-octet header.
    HeaderTooShort,

    /// A fixed-width field extends past the end of the buffer.
    UnexpectedEomInField,

    /// An RDLENGTH field announced more RDATA than the buffer holds.
    UnexpectedEomInRdata,

    /// A QNAME or owner name could not be decoded.
    InvalidName(name::Error),

    /// The header's opcode bits do not map to a known opcode.
    InvalidOpcode(IntoOpcodeError),

    /// The header's RCODE bits do not map to a known RCODE.
    InvalidRcode(IntoRcodeError),

    /// A TYPE field does not map to a known RR type.
    InvalidType(IntoTypeError),

    /// A QTYPE field does not map to a known QTYPE.
    InvalidQtype(IntoQtypeError),

    /// A CLASS or QCLASS field does not map to a known class.
    InvalidClass(IntoClassError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::HeaderTooShort => f.write_str("header too short"),
            Self::UnexpectedEomInField => f.write_str("unexpected end of message in field"),
            Self::UnexpectedEomInRdata => f.write_str("unexpected end of message in RDATA"),
            Self::InvalidName(err) => write!(f, "invalid name: {}", err),
            Self::InvalidOpcode(err) => err.fmt(f),
            Self::InvalidRcode(err) => err.fmt(f),
            Self::InvalidType(err) => err.fmt(f),
            Self::InvalidQtype(err) => err.fmt(f),
            Self::InvalidClass(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

/// The type returned by fallible decoding functions in this module.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
