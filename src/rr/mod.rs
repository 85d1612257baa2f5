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

//! Data structures and routines for handling DNS resource records.

use std::fmt;

use crate::class::Class;
use crate::name::Name;

mod rr_type;
mod ttl;
pub use rr_type::{IntoTypeError, Type};
pub use ttl::Ttl;

////////////////////////////////////////////////////////////////////////
// RESOURCE RECORDS                                                   //
////////////////////////////////////////////////////////////////////////

/// A DNS resource record, as defined in [RFC 1035 § 4.1.3].
///
/// The RDATA is kept as an opaque octet string; this codec does not
/// interpret type-specific record payloads. On the wire the RDATA is
/// preceded by a 16-bit RDLENGTH field. There is no corresponding
/// member here: when encoding, the RDLENGTH is computed from the actual
/// length of [`rdata`](Self::rdata), so the two can never disagree.
///
/// [RFC 1035 § 4.1.3]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.3
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ResourceRecord {
    pub owner: Name,
    pub rr_type: Type,
    pub class: Class,
    pub ttl: Ttl,
    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    /// Appends the on-the-wire form of this record to `buf`:
    /// the owner name, TYPE, CLASS, TTL, RDLENGTH, and RDATA, with all
    /// multi-octet integers in network byte order. The owner name is
    /// written with explicit labels (never compression pointers).
    ///
    /// Fails if the RDATA is longer than an RDLENGTH field can
    /// describe. Nothing is written to `buf` in that case.
    pub fn to_wire(&self, buf: &mut Vec<u8>) -> Result<(), RdataTooLongError> {
        let rdlength =
            u16::try_from(self.rdata.len()).or(Err(RdataTooLongError(self.rdata.len())))?;
        buf.extend_from_slice(self.owner.wire_repr());
        buf.extend_from_slice(&u16::from(self.rr_type).to_be_bytes());
        buf.extend_from_slice(&u16::from(self.class).to_be_bytes());
        buf.extend_from_slice(&i32::from(self.ttl).to_be_bytes());
        buf.extend_from_slice(&rdlength.to_be_bytes());
        buf.extend_from_slice(&self.rdata);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a record's RDATA is longer than 65,535
/// octets and therefore cannot be described by the RDLENGTH field.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RdataTooLongError(pub usize);

impl fmt::Display for RdataTooLongError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RDATA of {} octets does not fit in RDLENGTH", self.0)
    }
}

impl std::error::Error for RdataTooLongError {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
