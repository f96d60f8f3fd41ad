//! 7-bit encoded integers.
//!
//! BAML uses the .NET `BinaryWriter.Write7BitEncodedInt` scheme for the size prefix of
//! variable-length records and for string lengths: each byte carries 7 bits of the value,
//! least significant group first, and the high bit signals that another byte follows.
//!
//! The number of bytes an encoded value occupies is part of the on-disk format, because
//! the size of a variable record includes the bytes of its own size field. The bucket
//! boundaries are therefore fixed:
//!
//! | Value range | Encoded bytes |
//! |---|---|
//! | `< 2^7` | 1 |
//! | `< 2^14` | 2 |
//! | `< 2^21` | 3 |
//! | `< 2^28` | 4 |
//! | otherwise | 5 |
//!
//! Decoding lives on [`crate::file::parser::Parser::read_7bit_encoded_int`].

/// Largest number of bytes a 7-bit encoded `u32` can occupy.
pub const MAX_7BIT_ENCODED_LEN: usize = 5;

/// Returns the number of bytes `value` occupies when 7-bit encoded.
///
/// # Examples
///
/// ```rust
/// use bamlscope::baml::varint::size_of_7bit_encoded;
///
/// assert_eq!(size_of_7bit_encoded(127), 1);
/// assert_eq!(size_of_7bit_encoded(128), 2);
/// assert_eq!(size_of_7bit_encoded(u32::MAX), 5);
/// ```
#[must_use]
pub const fn size_of_7bit_encoded(value: u32) -> usize {
    if value < (1 << 7) {
        1
    } else if value < (1 << 14) {
        2
    } else if value < (1 << 21) {
        3
    } else if value < (1 << 28) {
        4
    } else {
        5
    }
}

/// Appends the 7-bit encoding of `value` to `buffer` and returns the number of bytes written.
pub fn write_7bit_encoded_int(value: u32, buffer: &mut Vec<u8>) -> usize {
    let mut remaining = value;
    let mut written = 1;
    while remaining >= 0x80 {
        #[allow(clippy::cast_possible_truncation)]
        buffer.push((remaining as u8) | 0x80);
        remaining >>= 7;
        written += 1;
    }
    #[allow(clippy::cast_possible_truncation)]
    buffer.push(remaining as u8);
    written
}

/// Computes the size field of a variable-length record from its payload length.
///
/// The size counts the bytes of the size field itself plus the payload. Because the width
/// of the field depends on the value it encodes, the width is computed twice: first for the
/// bare payload, then for the payload plus that first estimate.
#[must_use]
pub const fn variable_record_size(payload_len: u32) -> u32 {
    let size_of_size = size_of_7bit_encoded(payload_len) as u32;
    let size_of_size = size_of_7bit_encoded(size_of_size + payload_len) as u32;
    size_of_size + payload_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::parser::Parser;

    const BOUNDARIES: [(u32, usize); 10] = [
        (0, 1),
        (127, 1),
        (128, 2),
        (16_383, 2),
        (16_384, 3),
        (2_097_151, 3),
        (2_097_152, 4),
        (268_435_455, 4),
        (268_435_456, 5),
        (u32::MAX, 5),
    ];

    #[test]
    fn size_buckets() {
        for (value, expected) in BOUNDARIES {
            assert_eq!(size_of_7bit_encoded(value), expected, "value {value}");
        }
    }

    #[test]
    fn encoded_length_matches_size() {
        for (value, expected) in BOUNDARIES {
            let mut buffer = Vec::new();
            let written = write_7bit_encoded_int(value, &mut buffer);
            assert_eq!(written, expected);
            assert_eq!(buffer.len(), expected);

            let mut parser = Parser::new(&buffer);
            assert_eq!(parser.read_7bit_encoded_int().unwrap(), value);
            assert_eq!(parser.pos(), expected);
        }
    }

    #[test]
    fn known_encodings() {
        let mut buffer = Vec::new();
        write_7bit_encoded_int(128, &mut buffer);
        assert_eq!(buffer, [0x80, 0x01]);

        buffer.clear();
        write_7bit_encoded_int(300, &mut buffer);
        assert_eq!(buffer, [0xAC, 0x02]);
    }

    #[test]
    fn record_size_includes_own_width() {
        assert_eq!(variable_record_size(0), 1);
        assert_eq!(variable_record_size(126), 127);
        // 127 payload bytes plus a one byte field would be 128, which needs two bytes
        assert_eq!(variable_record_size(127), 129);
        assert_eq!(variable_record_size(16_381), 16_383);
        assert_eq!(variable_record_size(16_382), 16_385);

        for payload in [0_u32, 1, 126, 127, 128, 16_381, 16_382, 20_000, 2_097_149] {
            let size = variable_record_size(payload);
            let width = size_of_7bit_encoded(size) as u32;
            assert_eq!(size - width, payload, "payload {payload}");
        }
    }
}
