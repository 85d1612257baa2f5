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

//! Implementation of data structures related to domain names.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::str::FromStr;

use arrayvec::ArrayVec;

mod error;
mod wire;
pub use error::Error;

/// The maximum length of the uncompressed on-the-wire representation of
/// a domain name.
const MAX_WIRE_LEN: usize = 255;

/// The maximum length of a label in a domain name (not including the
/// octet that provides the length).
const MAX_LABEL_LEN: usize = 63;

////////////////////////////////////////////////////////////////////////
// NAME STRUCTURE                                                     //
////////////////////////////////////////////////////////////////////////

/// A structure to represent a domain name.
///
/// A `Name` can be constructed in two ways:
///
/// * through the [`FromStr`] implementation, which parses the common
///   dotted presentation format (e.g. `www.example.test.`); and
/// * from an on-the-wire name embedded in a DNS message through
///   [`Name::try_from_compressed`], which follows compression pointers
///   ([RFC 1035 § 4.1.4]).
///
/// Internally, a `Name` owns its *uncompressed* on-the-wire
/// representation: a sequence of length-prefixed labels terminated by
/// the null label, at most 255 octets in all. Even when a `Name` is
/// parsed from a compressed on-the-wire name, the stored representation
/// is fully uncompressed, and [`Name::wire_repr`] never contains
/// pointer labels. Consequently re-encoding a decoded `Name` always
/// emits explicit labels; this codec never *writes* compression
/// pointers.
///
/// Comparisons between `Name`s are ASCII-case-insensitive, as required
/// by [RFC 1034 § 3.1]. The [`FromStr`] implementation lowercases as it
/// encodes, while names decoded from the wire preserve the case they
/// arrived with.
///
/// [RFC 1034 § 3.1]: https://datatracker.ietf.org/doc/html/rfc1034#section-3.1
/// [RFC 1035 § 4.1.4]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.4
#[derive(Clone)]
pub struct Name {
    wire: Box<[u8]>,
}

impl Name {
    /// Returns whether the `Name` is the DNS root `.`.
    pub fn is_root(&self) -> bool {
        self.wire.len() == 1
    }

    /// Returns an iterator over the labels of this `Name`, not
    /// including the null terminator label.
    pub fn labels(&self) -> Labels {
        Labels { rest: &self.wire }
    }

    /// Returns a `Name` representing the DNS root, `.`.
    pub fn root() -> Self {
        Self {
            wire: Box::new([0]),
        }
    }

    /// Tries to parse a (possibly compressed) name present at index
    /// `start` of the provided buffer. Pointers are followed; indices
    /// given in pointers are treated as indices into `octets`, so one
    /// generally passes an entire DNS message in `octets`. Two things
    /// are returned on success:
    ///
    /// * the parsed `Name`; and
    /// * the number of contiguous octets read at `start`. Equivalently,
    ///   the number of octets to skip after `start` to reach the next
    ///   field when parsing a DNS message. If the name contains no
    ///   pointers, this is the length of its on-the-wire
    ///   representation; if a pointer label occurs, it is the offset of
    ///   the end of the first pointer.
    ///
    /// Pointers must point strictly backward—to an offset before the
    /// chunk of the name in which they occur. This is what RFC 1035
    /// prescribes ("a *prior* occurrence"), and enforcing it guarantees
    /// that parsing terminates even on hostile input.
    pub fn try_from_compressed(octets: &[u8], start: usize) -> Result<(Self, usize), Error> {
        wire::parse_compressed_name(octets, start)
    }

    /// Returns the uncompressed on-the-wire representation of the
    /// `Name`, including the length octets and the null terminator.
    pub fn wire_repr(&self) -> &[u8] {
        &self.wire
    }

    /// Wraps octets known to form a valid uncompressed on-the-wire name
    /// without re-validating them. For use within this module only.
    fn from_wire_unchecked(octets: &[u8]) -> Self {
        Self {
            wire: octets.into(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for label in self.labels() {
            for &octet in label {
                if octet == b'.' {
                    f.write_str("\\.")?;
                } else if octet == b'\\' {
                    f.write_str("\\\\")?;
                } else if octet.is_ascii_graphic() {
                    write!(f, "{}", octet as char)?;
                } else {
                    write!(f, "\\{:03}", octet)?;
                }
            }
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        // Length octets are 0–63 and thus unaffected by ASCII case
        // folding, so the whole wire representation can be compared
        // case-insensitively in one go.
        self.wire.eq_ignore_ascii_case(&other.wire)
    }
}

impl Eq for Name {}

// Eq is case-insensitive, so Hash must be as well.
impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for &octet in self.wire.iter() {
            state.write_u8(octet.to_ascii_lowercase());
        }
    }
}

////////////////////////////////////////////////////////////////////////
// ITERATION OVER A NAME'S LABELS                                     //
////////////////////////////////////////////////////////////////////////

/// An iterator over the labels in a [`Name`].
///
/// To use this iterator, construct one from a [`Name`] using
/// [`Name::labels`]. Each item is the raw octets of one label, without
/// its length octet. The null terminator label is not yielded.
#[derive(Clone, Debug)]
pub struct Labels<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        match self.rest.split_first() {
            None | Some((&0, _)) => None,
            Some((&len, rest)) => {
                let (label, rest) = rest.split_at(len as usize);
                self.rest = rest;
                Some(label)
            }
        }
    }
}

impl FusedIterator for Labels<'_> {}

////////////////////////////////////////////////////////////////////////
// PARSING OF NAMES FROM RUST STRINGS                                 //
////////////////////////////////////////////////////////////////////////

/// Allows for conversion of a Rust [`str`] in dotted presentation
/// format into a [`Name`].
///
/// One trailing `.` is permitted and ignored, so `example.test` and
/// `example.test.` parse to the same `Name`. ASCII letters are
/// lowercased as the name is encoded. The string `.` parses to the
/// root name.
///
/// Parsing fails when the string is empty, when any `.`-delimited label
/// is empty or longer than 63 octets, or when the encoded name would
/// exceed 255 octets on the wire.
impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::StrEmpty);
        } else if s == "." {
            return Ok(Self::root());
        }

        let s = s.strip_suffix('.').unwrap_or(s);
        let mut wire = ArrayVec::<u8, MAX_WIRE_LEN>::new();
        for label in s.split('.') {
            let octets = label.as_bytes();
            if octets.is_empty() {
                return Err(Error::EmptyLabel);
            } else if octets.len() > MAX_LABEL_LEN {
                return Err(Error::LabelTooLong);
            }
            wire.try_push(octets.len() as u8)
                .or(Err(Error::NameTooLong))?;
            for &octet in octets {
                wire.try_push(octet.to_ascii_lowercase())
                    .or(Err(Error::NameTooLong))?;
            }
        }
        wire.try_push(0).or(Err(Error::NameTooLong))?;
        Ok(Self::from_wire_unchecked(&wire))
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fromstr_works() {
        let name: Name = "foo.bar".parse().unwrap();
        assert_eq!(name.wire_repr(), &[3, 102, 111, 111, 3, 98, 97, 114, 0]);
    }

    #[test]
    fn fromstr_ignores_one_trailing_dot() {
        let relative: Name = "example.test".parse().unwrap();
        let fqdn: Name = "example.test.".parse().unwrap();
        assert_eq!(relative.wire_repr(), fqdn.wire_repr());
    }

    #[test]
    fn fromstr_lowercases() {
        let name: Name = "EXAMPLE.Test.".parse().unwrap();
        assert_eq!(name.wire_repr(), b"\x07example\x04test\x00");
    }

    #[test]
    fn fromstr_works_for_root() {
        let name: Name = ".".parse().unwrap();
        assert!(name.is_root());
        assert_eq!(name.wire_repr(), &[0]);
    }

    #[test]
    fn fromstr_rejects_empty() {
        assert_eq!("".parse::<Name>(), Err(Error::StrEmpty));
    }

    #[test]
    fn fromstr_rejects_empty_label() {
        assert_eq!("a.b..c.".parse::<Name>(), Err(Error::EmptyLabel));
        assert_eq!(".example.".parse::<Name>(), Err(Error::EmptyLabel));
        assert_eq!("example..".parse::<Name>(), Err(Error::EmptyLabel));
    }

    #[test]
    fn fromstr_rejects_long_label() {
        assert_eq!(
            "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx.".parse::<Name>(),
            Err(Error::LabelTooLong)
        );
    }

    #[test]
    fn fromstr_accepts_longest_label() {
        let label = "x".repeat(63);
        let name: Name = format!("{}.", label).parse().unwrap();
        assert_eq!(name.wire_repr().len(), 65);
    }

    #[test]
    fn fromstr_rejects_long_name() {
        assert_eq!(
            "x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.\
             x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.\
             x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.\
             x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x."
                .parse::<Name>(),
            Err(Error::NameTooLong)
        );
    }

    #[test]
    fn fromstr_accepts_longest_name() {
        // 127 single-octet labels encode to exactly 255 octets.
        let string = "x.".repeat(127);
        let name: Name = string.parse().unwrap();
        assert_eq!(name.wire_repr().len(), 255);
    }

    #[test]
    fn display_writes_fqdn_form() {
        let name: Name = "www.example.test".parse().unwrap();
        assert_eq!(name.to_string(), "www.example.test.");
        assert_eq!(Name::root().to_string(), ".");
    }

    #[test]
    fn display_roundtrips_through_fromstr() {
        let name: Name = "a.bb.ccc.".parse().unwrap();
        let reparsed: Name = name.to_string().parse().unwrap();
        assert_eq!(name, reparsed);
    }

    #[test]
    fn eq_ignores_ascii_case() {
        let lower: Name = "example.test.".parse().unwrap();
        let (upper, _) = Name::try_from_compressed(b"\x07EXAMPLE\x04TeSt\x00", 0).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn labels_iterator_works() {
        let name: Name = "a.bb.ccc.".parse().unwrap();
        let labels: Vec<&[u8]> = name.labels().collect();
        assert_eq!(labels, vec![&b"a"[..], &b"bb"[..], &b"ccc"[..]]);
        assert_eq!(Name::root().labels().next(), None);
    }
}
