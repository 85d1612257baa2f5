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

//! Provides the [`Ttl`] structure for DNS RR TTLs.

use std::fmt;

////////////////////////////////////////////////////////////////////////
// TTLS                                                               //
////////////////////////////////////////////////////////////////////////

/// The time to live (TTL) of a DNS record, in seconds.
///
/// [RFC 1035 § 3.2.1] defines the TTL field as a *signed* 32-bit
/// integer, even though a TTL is semantically a non-negative duration
/// (later RFCs redefined the field as unsigned with the top bit
/// reserved). This type wraps `i32` and round-trips whatever value is
/// on the wire, negative values included; interpreting a negative TTL
/// is left to the caller.
///
/// [RFC 1035 § 3.2.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.1
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Ttl(i32);

impl From<i32> for Ttl {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl From<Ttl> for i32 {
    fn from(ttl: Ttl) -> Self {
        ttl.0
    }
}

impl fmt::Debug for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_wire_values() {
        assert_eq!(i32::from(Ttl::from(0)), 0);
        assert_eq!(i32::from(Ttl::from(86400)), 86400);
        assert_eq!(i32::from(Ttl::from(-1)), -1);
    }
}
