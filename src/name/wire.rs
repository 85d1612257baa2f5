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

//! Implementation of parsing of on-the-wire names.

use arrayvec::ArrayVec;

use super::{Error, Name, MAX_LABEL_LEN, MAX_WIRE_LEN};

/// Parses a compressed name starting at index `start` of `octets`.
/// Pointers are followed. Indices given in pointers are treated as
/// indices of `octets`, so the intention is for an entire DNS message
/// to be passed in `octets`. This is the implementation of
/// [`Name::try_from_compressed`].
///
/// The name is reassembled chunk by chunk: a chunk is a run of literal
/// labels ending either with the null label or with a pointer to the
/// next chunk. Since each pointer must target an offset strictly before
/// the chunk it occurs in, the chunk offsets decrease monotonically and
/// the loop terminates on every input.
pub fn parse_compressed_name(octets: &[u8], start: usize) -> Result<(Name, usize), Error> {
    let mut next_chunk = Some(start);
    let mut wire_len_of_first_chunk = None;
    let mut wire_repr = ArrayVec::<u8, MAX_WIRE_LEN>::new();

    while let Some(chunk_start) = next_chunk {
        let mut index = chunk_start;
        loop {
            let len = *octets.get(index).ok_or(Error::UnexpectedEom)?;
            if len & 0xc0 == 0xc0 {
                next_chunk = Some(parse_pointer(octets, chunk_start, index)? as usize);
                index += 2;
                break;
            } else if len > (MAX_LABEL_LEN as u8) {
                return Err(Error::LabelTooLong);
            } else if len == 0 {
                wire_repr.try_push(0).or(Err(Error::NameTooLong))?;
                next_chunk = None;
                index += 1;
                break;
            } else {
                let end_of_label = index + len as usize + 1;
                let label = octets
                    .get(index..end_of_label)
                    .ok_or(Error::UnexpectedEom)?;
                wire_repr
                    .try_extend_from_slice(label)
                    .or(Err(Error::NameTooLong))?;
                index = end_of_label;
            }
        }

        wire_len_of_first_chunk.get_or_insert(index - chunk_start);
    }

    let name = Name::from_wire_unchecked(&wire_repr);
    // The outer loop runs at least once, so the first chunk length has
    // been recorded by now.
    Ok((name, wire_len_of_first_chunk.unwrap_or(0)))
}

/// Parses a pointer at `index` in `octets`. This also checks that the
/// pointer refers to an index *earlier* than the start of the chunk it
/// is in (`chunk_start`).
fn parse_pointer(octets: &[u8], chunk_start: usize, index: usize) -> Result<u16, Error> {
    if index + 1 < octets.len() {
        let pointer_bytes = [octets[index], octets[index + 1]];
        let pointer = u16::from_be_bytes(pointer_bytes) & !0xc000;
        if (pointer as usize) >= chunk_start {
            // RFC 1035 § 4.1.4: pointers point to a *prior* occurrence
            // of the name. This is also what rules out loops.
            Err(Error::InvalidPointer)
        } else {
            Ok(pointer)
        }
    } else {
        Err(Error::UnexpectedEom)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_uncompressed_names() {
        let octets = b"junk\x07example\x04test\x00junk";
        let target: Name = "example.test.".parse().unwrap();
        assert_eq!(parse_compressed_name(octets, 4), Ok((target, 14)));
    }

    #[test]
    fn accepts_valid_compressed_names() {
        let octets = b"junk\x04test\x00junk\x07example\xc0\x04junk";
        let target: Name = "example.test.".parse().unwrap();
        assert_eq!(parse_compressed_name(octets, 14), Ok((target, 10)));
    }

    #[test]
    fn consumes_only_the_pointer_at_the_original_position() {
        // A 12-octet dummy header followed by "foo." at offset 12, then
        // a pointer back to it at offset 17. Reading at offset 12
        // consumes the whole 5-octet name; reading at offset 17
        // consumes exactly the 2 pointer octets.
        let mut octets = vec![0; 12];
        octets.extend_from_slice(b"\x03foo\x00\xc0\x0c");
        let target: Name = "foo.".parse().unwrap();
        assert_eq!(
            parse_compressed_name(&octets, 12),
            Ok((target.clone(), 5))
        );
        assert_eq!(parse_compressed_name(&octets, 17), Ok((target, 2)));
    }

    #[test]
    fn rejects_long_label() {
        assert_eq!(
            parse_compressed_name(
                b"\x40xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx\x00",
                0
            ),
            Err(Error::LabelTooLong)
        );
    }

    #[test]
    fn rejects_long_label_after_pointer() {
        assert_eq!(
            parse_compressed_name(
                b"\x01x\
                  \x40xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx\
                  \x00\x01x\xc0\x00",
                68
            ),
            Err(Error::LabelTooLong),
        );
    }

    #[test]
    fn rejects_long_name() {
        assert_eq!(
            parse_compressed_name(
                b"\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x00",
                0
            ),
            Err(Error::NameTooLong)
        );
    }

    #[test]
    fn rejects_long_name_with_pointers() {
        assert_eq!(
            parse_compressed_name(
                b"\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \x00\
                  \x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\x01x\
                  \xc0\x00",
                225
            ),
            Err(Error::NameTooLong),
        );
    }

    #[test]
    fn rejects_unexpected_eom() {
        assert_eq!(
            parse_compressed_name(b"\x07example\x04tes", 0),
            Err(Error::UnexpectedEom)
        );
        assert_eq!(parse_compressed_name(b"", 0), Err(Error::UnexpectedEom));
        assert_eq!(
            parse_compressed_name(b"\x03foo\x00", 5),
            Err(Error::UnexpectedEom)
        );
        // A pointer's second octet is past the end of the buffer.
        assert_eq!(
            parse_compressed_name(b"\x03foo\x00\xc0", 5),
            Err(Error::UnexpectedEom)
        );
    }

    #[test]
    fn rejects_pointer_loops() {
        assert_eq!(
            parse_compressed_name(b"\xc0\x00", 0),
            Err(Error::InvalidPointer),
        );
        assert_eq!(
            parse_compressed_name(b"\x01a\x01b\xc0\x00", 2),
            Err(Error::InvalidPointer),
        );
    }

    #[test]
    fn rejects_forward_pointers() {
        assert_eq!(
            parse_compressed_name(b"\x01x\xc0\x08junk\x00", 0),
            Err(Error::InvalidPointer),
        );
    }
}
