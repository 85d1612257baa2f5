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

//! Implementation of the [`Header`] type and its wire codec.

use super::constants::*;
use super::reader::Error;
use super::{Opcode, Rcode};

////////////////////////////////////////////////////////////////////////
// HEADERS                                                            //
////////////////////////////////////////////////////////////////////////

/// The fixed twelve-octet header that starts every DNS message,
/// defined in [RFC 1035 § 4.1.1].
///
/// The four counts describe the number of entries in the question,
/// answer, authority, and additional sections that follow. The codec
/// trusts them as given: [`Header::to_wire`] writes whatever counts the
/// caller stored, and message decoding reads as many entries as the
/// counts announce. A count that disagrees with the sections actually
/// present yields an under-read or an end-of-message error, not a
/// repaired message.
///
/// [RFC 1035 § 4.1.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: Opcode,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub rcode: Rcode,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Returns the header of an outbound query with the given
    /// transaction ID: opcode QUERY, recursion desired, one question,
    /// everything else zeroed.
    pub fn new_query(id: u16) -> Self {
        Self {
            id,
            qr: false,
            opcode: Opcode::Query,
            aa: false,
            tc: false,
            rd: true,
            ra: false,
            rcode: Rcode::NoError,
            qdcount: 1,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    /// Appends the twelve-octet on-the-wire form of this header to
    /// `buf`.
    pub fn to_wire(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.id.to_be_bytes());

        let mut flags_hi = 0u8;
        if self.qr {
            flags_hi |= QR_MASK;
        }
        flags_hi |= (u8::from(self.opcode) << OPCODE_SHIFT) & OPCODE_MASK;
        if self.aa {
            flags_hi |= AA_MASK;
        }
        if self.tc {
            flags_hi |= TC_MASK;
        }
        if self.rd {
            flags_hi |= RD_MASK;
        }
        buf.push(flags_hi);

        let mut flags_lo = 0u8;
        if self.ra {
            flags_lo |= RA_MASK;
        }
        flags_lo |= u8::from(self.rcode) & RCODE_MASK;
        buf.push(flags_lo);

        buf.extend_from_slice(&self.qdcount.to_be_bytes());
        buf.extend_from_slice(&self.ancount.to_be_bytes());
        buf.extend_from_slice(&self.nscount.to_be_bytes());
        buf.extend_from_slice(&self.arcount.to_be_bytes());
    }

    /// Decodes a header from the first [`HEADER_SIZE`] octets of
    /// `octets`. Extra octets after the header are ignored here; they
    /// belong to the message sections.
    ///
    /// Fails if the buffer is shorter than a header, or if the opcode
    /// or RCODE bit pattern does not map to a known value.
    pub fn from_wire(octets: &[u8]) -> Result<Self, Error> {
        if octets.len() < HEADER_SIZE {
            return Err(Error::HeaderTooShort);
        }

        let raw_opcode = (octets[OPCODE_BYTE] & OPCODE_MASK) >> OPCODE_SHIFT;
        let raw_rcode = octets[RCODE_BYTE] & RCODE_MASK;
        Ok(Self {
            id: u16::from_be_bytes([octets[ID_START], octets[ID_START + 1]]),
            qr: octets[QR_BYTE] & QR_MASK != 0,
            opcode: Opcode::try_from(raw_opcode).map_err(Error::InvalidOpcode)?,
            aa: octets[AA_BYTE] & AA_MASK != 0,
            tc: octets[TC_BYTE] & TC_MASK != 0,
            rd: octets[RD_BYTE] & RD_MASK != 0,
            ra: octets[RA_BYTE] & RA_MASK != 0,
            rcode: Rcode::try_from(raw_rcode).map_err(Error::InvalidRcode)?,
            qdcount: u16::from_be_bytes([octets[QDCOUNT_START], octets[QDCOUNT_START + 1]]),
            ancount: u16::from_be_bytes([octets[ANCOUNT_START], octets[ANCOUNT_START + 1]]),
            nscount: u16::from_be_bytes([octets[NSCOUNT_START], octets[NSCOUNT_START + 1]]),
            arcount: u16::from_be_bytes([octets[ARCOUNT_START], octets[ARCOUNT_START + 1]]),
        })
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::super::{IntoOpcodeError, IntoRcodeError};
    use super::*;

    #[test]
    fn to_wire_packs_the_flag_bits() {
        let header = Header {
            id: 256,
            qr: false,
            opcode: Opcode::Status,
            aa: false,
            tc: false,
            rd: true,
            ra: false,
            rcode: Rcode::NoError,
            qdcount: 1,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        };
        let mut buf = Vec::new();
        header.to_wire(&mut buf);
        assert_eq!(buf, [1, 0, 17, 0, 0, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn from_wire_inverts_to_wire() {
        let header = Header {
            id: 0xe2d7,
            qr: true,
            opcode: Opcode::IQuery,
            aa: true,
            tc: false,
            rd: true,
            ra: true,
            rcode: Rcode::Refused,
            qdcount: 1,
            ancount: 2,
            nscount: 3,
            arcount: 4,
        };
        let mut buf = Vec::new();
        header.to_wire(&mut buf);
        assert_eq!(Header::from_wire(&buf), Ok(header));
    }

    #[test]
    fn from_wire_rejects_short_buffers() {
        for size in 0..HEADER_SIZE {
            let buf = vec![0; size];
            assert_eq!(Header::from_wire(&buf), Err(Error::HeaderTooShort));
        }
    }

    #[test]
    fn from_wire_rejects_unknown_opcode_bits() {
        // Opcode bits set to 7.
        let buf = [0, 0, 7 << 3, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            Header::from_wire(&buf),
            Err(Error::InvalidOpcode(IntoOpcodeError(7)))
        );
    }

    #[test]
    fn from_wire_rejects_unknown_rcode_bits() {
        let buf = [0, 0, 0, 9, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            Header::from_wire(&buf),
            Err(Error::InvalidRcode(IntoRcodeError(9)))
        );
    }

    #[test]
    fn from_wire_ignores_trailing_data() {
        let buf = [0u8; 64];
        let header = Header::from_wire(&buf).unwrap();
        assert_eq!(header.id, 0);
        assert_eq!(header.opcode, Opcode::Query);
        assert_eq!(header.qdcount, 0);
    }
}
