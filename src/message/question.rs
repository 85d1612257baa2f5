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

//! Implementation of types relating to DNS questions.

use std::fmt;

use crate::class::Class;
use crate::name::Name;
use crate::rr::Type;

////////////////////////////////////////////////////////////////////////
// QUESTIONS                                                          //
////////////////////////////////////////////////////////////////////////

/// The question of a DNS query.
///
/// Defined in [RFC 1035 § 4.1.2], a DNS question includes
///
/// * the QNAME, which is the domain name whose records are being
///   queried;
/// * the [QTYPE](Qtype), which specifies what types of records are
///   desired; and
/// * the QCLASS, which specifies which DNS [`Class`] to search.
///
/// While the original specification does not rule out having multiple
/// questions per message, in practice only one question per message is
/// used, and this codec decodes exactly one.
///
/// [RFC 1035 § 4.1.2]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.2
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    pub qname: Name,
    pub qtype: Qtype,
    pub qclass: Class,
}

impl Question {
    /// Appends the on-the-wire form of this question to `buf`: the
    /// QNAME with explicit labels, then the QTYPE and QCLASS in network
    /// byte order.
    pub fn to_wire(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.qname.wire_repr());
        buf.extend_from_slice(&u16::from(self.qtype).to_be_bytes());
        buf.extend_from_slice(&u16::from(self.qclass).to_be_bytes());
    }
}

////////////////////////////////////////////////////////////////////////
// QTYPES                                                             //
////////////////////////////////////////////////////////////////////////

/// The QTYPE of a DNS [question](Question).
///
/// The QTYPE determines what type of DNS records are desired. Every
/// data [`Type`] is a valid QTYPE; in addition there are query-only
/// meta values that ask for groups of types ([MAILB](Qtype::Mailb),
/// [*](Qtype::Any)), a mail-agent value obsoleted by MX
/// ([MAILA](Qtype::Maila)), and the zone-transfer request
/// ([AXFR](Qtype::Axfr)).
///
/// Like the other enumerated wire values, the set is closed: decoding a
/// 16-bit value that is neither a meta value nor a known [`Type`]
/// fails.
#[derive(Copy, Clone, Eq, Hash, PartialEq)]
pub enum Qtype {
    /// A data type, requesting records of exactly that type.
    Rr(Type),
    Axfr,
    Mailb,
    Maila,
    Any,
}

impl TryFrom<u16> for Qtype {
    type Error = IntoQtypeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            252 => Ok(Self::Axfr),
            253 => Ok(Self::Mailb),
            254 => Ok(Self::Maila),
            255 => Ok(Self::Any),
            _ => Type::try_from(value)
                .map(Self::Rr)
                .or(Err(IntoQtypeError(value))),
        }
    }
}

impl From<Qtype> for u16 {
    fn from(qtype: Qtype) -> Self {
        match qtype {
            Qtype::Rr(rr_type) => rr_type.into(),
            Qtype::Axfr => 252,
            Qtype::Mailb => 253,
            Qtype::Maila => 254,
            Qtype::Any => 255,
        }
    }
}

impl From<Type> for Qtype {
    fn from(rr_type: Type) -> Self {
        Self::Rr(rr_type)
    }
}

impl fmt::Display for Qtype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Rr(rr_type) => rr_type.fmt(f),
            Self::Axfr => f.write_str("AXFR"),
            Self::Mailb => f.write_str("MAILB"),
            Self::Maila => f.write_str("MAILA"),
            Self::Any => f.write_str("*"),
        }
    }
}

impl fmt::Debug for Qtype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that the provided value is not a known QTYPE.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IntoQtypeError(pub u16);

impl fmt::Display for IntoQtypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} is not a known QTYPE", self.0)
    }
}

impl std::error::Error for IntoQtypeError {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qtype_covers_data_types_and_meta_values() {
        assert_eq!(Qtype::try_from(16), Ok(Qtype::Rr(Type::Txt)));
        assert_eq!(Qtype::try_from(252), Ok(Qtype::Axfr));
        assert_eq!(Qtype::try_from(255), Ok(Qtype::Any));
        assert_eq!(u16::from(Qtype::Rr(Type::Aaaa)), 28);
        assert_eq!(u16::from(Qtype::Mailb), 253);
    }

    #[test]
    fn qtype_rejects_unknown_values() {
        assert_eq!(Qtype::try_from(0), Err(IntoQtypeError(0)));
        assert_eq!(Qtype::try_from(251), Err(IntoQtypeError(251)));
        assert_eq!(Qtype::try_from(256), Err(IntoQtypeError(256)));
    }

    #[test]
    fn to_wire_works() {
        let question = Question {
            qname: "example.test.".parse().unwrap(),
            qtype: Qtype::Rr(Type::A),
            qclass: Class::In,
        };
        let mut buf = Vec::new();
        question.to_wire(&mut buf);
        assert_eq!(buf, b"\x07example\x04test\x00\x00\x01\x00\x01");
    }
}
