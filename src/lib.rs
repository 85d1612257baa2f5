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

//! Encoding and decoding of DNS messages in their [RFC 1035 § 4] wire
//! format.
//!
//! This crate implements the core DNS message codec: the fixed 12-octet
//! header with its packed flag bits, label-based domain-name encoding
//! with decoding of message-compression pointers, and the question and
//! resource-record sections. Resource record data (RDATA) is treated as
//! an opaque, length-delimited octet string; type-specific RDATA
//! parsing, EDNS, DNSSEC, and the transport layer are out of scope.
//!
//! Decoding is panic-free: every malformed input is reported through a
//! structured error, and each decode operation returns both the parsed
//! value and the exact number of octets it consumed, so that callers
//! can thread a cursor through a message. [`message::Reader`] does this
//! threading for whole messages; [`message::Message::from_wire`] and
//! [`message::Message::to_wire`] are the top-level entry points.
//!
//! [RFC 1035 § 4]: https://datatracker.ietf.org/doc/html/rfc1035#section-4

pub mod class;
pub mod message;
pub mod name;
pub mod rr;
