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

//! Provides the [`Type`] structure for DNS RR types.

use std::fmt;

////////////////////////////////////////////////////////////////////////
// RR TYPES                                                           //
////////////////////////////////////////////////////////////////////////

/// Represents the RR type of a DNS record.
///
/// An RR type is represented on the wire as an unsigned 16-bit integer.
/// This is a closed enumeration of the data types of [RFC 1035 §
/// 3.2.2] plus AAAA ([RFC 3596]) and CAA ([RFC 8659]); decoding any
/// other wire value fails. Query-only meta types like `AXFR` and `*`
/// are not `Type`s—see [`Qtype`](crate::message::Qtype).
///
/// [RFC 1035 § 3.2.2]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.2
/// [RFC 3596]: https://datatracker.ietf.org/doc/html/rfc3596
/// [RFC 8659]: https://datatracker.ietf.org/doc/html/rfc8659
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub enum Type {
    A,
    Ns,
    Md,
    Mf,
    Cname,
    Soa,
    Mb,
    Mg,
    Mr,
    Null,
    Wks,
    Ptr,
    Hinfo,
    Minfo,
    Mx,
    Txt,
    Aaaa,
    Caa,
}

impl TryFrom<u16> for Type {
    type Error = IntoTypeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::A),
            2 => Ok(Self::Ns),
            3 => Ok(Self::Md),
            4 => Ok(Self::Mf),
            5 => Ok(Self::Cname),
            6 => Ok(Self::Soa),
            7 => Ok(Self::Mb),
            8 => Ok(Self::Mg),
            9 => Ok(Self::Mr),
            10 => Ok(Self::Null),
            11 => Ok(Self::Wks),
            12 => Ok(Self::Ptr),
            13 => Ok(Self::Hinfo),
            14 => Ok(Self::Minfo),
            15 => Ok(Self::Mx),
            16 => Ok(Self::Txt),
            28 => Ok(Self::Aaaa),
            257 => Ok(Self::Caa),
            _ => Err(IntoTypeError(value)),
        }
    }
}

impl From<Type> for u16 {
    fn from(rr_type: Type) -> Self {
        match rr_type {
            Type::A => 1,
            Type::Ns => 2,
            Type::Md => 3,
            Type::Mf => 4,
            Type::Cname => 5,
            Type::Soa => 6,
            Type::Mb => 7,
            Type::Mg => 8,
            Type::Mr => 9,
            Type::Null => 10,
            Type::Wks => 11,
            Type::Ptr => 12,
            Type::Hinfo => 13,
            Type::Minfo => 14,
            Type::Mx => 15,
            Type::Txt => 16,
            Type::Aaaa => 28,
            Type::Caa => 257,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::A => f.write_str("A"),
            Self::Ns => f.write_str("NS"),
            Self::Md => f.write_str("MD"),
            Self::Mf => f.write_str("MF"),
            Self::Cname => f.write_str("CNAME"),
            Self::Soa => f.write_str("SOA"),
            Self::Mb => f.write_str("MB"),
            Self::Mg => f.write_str("MG"),
            Self::Mr => f.write_str("MR"),
            Self::Null => f.write_str("NULL"),
            Self::Wks => f.write_str("WKS"),
            Self::Ptr => f.write_str("PTR"),
            Self::Hinfo => f.write_str("HINFO"),
            Self::Minfo => f.write_str("MINFO"),
            Self::Mx => f.write_str("MX"),
            Self::Txt => f.write_str("TXT"),
            Self::Aaaa => f.write_str("AAAA"),
            Self::Caa => f.write_str("CAA"),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that the provided value is not a known RR type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IntoTypeError(pub u16);

impl fmt::Display for IntoTypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} is not a known RR type", self.0)
    }
}

impl std::error::Error for IntoTypeError {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
