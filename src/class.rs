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

//! Implementation of the [`Class`] type for DNS classes.

use std::fmt;

////////////////////////////////////////////////////////////////////////
// CLASSES                                                            //
////////////////////////////////////////////////////////////////////////

/// Represents a class in the DNS.
///
/// A class is represented on the wire as an unsigned 16-bit integer.
/// This is a closed enumeration of the classes of [RFC 1035 § 3.2.4]
/// plus the `*` QCLASS of § 3.2.5; decoding any other wire value fails.
/// The only class in common use is [`In`](Class::In).
///
/// [RFC 1035 § 3.2.4]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.4
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub enum Class {
    In,
    Cs,
    Ch,
    Hs,
    Any,
}

impl TryFrom<u16> for Class {
    type Error = IntoClassError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::In),
            2 => Ok(Self::Cs),
            3 => Ok(Self::Ch),
            4 => Ok(Self::Hs),
            255 => Ok(Self::Any),
            _ => Err(IntoClassError(value)),
        }
    }
}

impl From<Class> for u16 {
    fn from(class: Class) -> Self {
        match class {
            Class::In => 1,
            Class::Cs => 2,
            Class::Ch => 3,
            Class::Hs => 4,
            Class::Any => 255,
        }
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::In => f.write_str("IN"),
            Self::Cs => f.write_str("CS"),
            Self::Ch => f.write_str("CH"),
            Self::Hs => f.write_str("HS"),
            Self::Any => f.write_str("*"),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that the provided value is not a known class.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IntoClassError(pub u16);

impl fmt::Display for IntoClassError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} is not a known class", self.0)
    }
}

impl std::error::Error for IntoClassError {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_canonical_values() {
        assert_eq!(u16::from(Class::In), 1);
        assert_eq!(u16::from(Class::Cs), 2);
        assert_eq!(u16::from(Class::Ch), 3);
        assert_eq!(u16::from(Class::Hs), 4);
        assert_eq!(u16::from(Class::Any), 255);
    }

    #[test]
    fn decodes_canonical_values() {
        for class in [Class::In, Class::Cs, Class::Ch, Class::Hs, Class::Any] {
            assert_eq!(Class::try_from(u16::from(class)), Ok(class));
        }
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(Class::try_from(0), Err(IntoClassError(0)));
        assert_eq!(Class::try_from(5), Err(IntoClassError(5)));
        assert_eq!(Class::try_from(254), Err(IntoClassError(254)));
    }
}
