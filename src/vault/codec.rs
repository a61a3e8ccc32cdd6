//! Whole-vault encoding: a DER `SEQUENCE OF` record `SET`s.

use super::collection::Vault;
use super::der::{self, Class, TAG_SEQUENCE};
use super::record::{Record, RecordDecode};
use crate::crypto::TRAILER_LEN;
use crate::errors::{PassKeeperError, Result};

/// Encode every record of `vault` into one `SEQUENCE`.
///
/// Sizes are computed first and the buffer is allocated once, with
/// room left for the encryption trailer.  All-empty records produce no
/// bytes and are therefore dropped.
pub fn encode(vault: &Vault) -> Result<Vec<u8>> {
    let content: usize = vault.iter().map(Record::encoded_len).sum();
    let expected = der::header_len(TAG_SEQUENCE, content) + content;

    let mut out = Vec::with_capacity(expected + TRAILER_LEN);
    der::write_header(&mut out, Class::Universal, true, TAG_SEQUENCE, content);
    for record in vault {
        record.encode_into(&mut out);
    }

    if out.len() != expected {
        return Err(PassKeeperError::SerializationMismatch {
            expected,
            actual: out.len(),
        });
    }
    Ok(out)
}

/// Decode a buffer produced by [`encode`].
///
/// The outer `SEQUENCE` must span the buffer exactly, or the whole
/// buffer is rejected with `StructureCorruption`.  Malformed records
/// inside it are kept as far as they could be read.
pub fn decode(input: &[u8]) -> Result<Vault> {
    let header = der::read_header(input).ok_or(PassKeeperError::StructureCorruption)?;
    if header.class != Class::Universal
        || !header.constructed
        || header.tag != TAG_SEQUENCE
        || header.total_len() != Some(input.len())
    {
        return Err(PassKeeperError::StructureCorruption);
    }

    let end = input.len();
    let mut pos = header.header_len;
    let mut vault = Vault::new();
    let mut truncated = 0usize;

    while pos < end {
        let record = match Record::decode(input, &mut pos, end) {
            RecordDecode::Complete(record) => record,
            RecordDecode::Truncated(record) => {
                truncated += 1;
                record
            }
        };
        vault.insert(record);
    }

    if truncated > 0 {
        tracing::warn!(truncated, "some records were damaged and loaded partially");
    }
    tracing::debug!(records = vault.len(), bytes = end, "decoded vault");
    Ok(vault)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vault_is_an_empty_sequence() {
        assert_eq!(encode(&Vault::new()).unwrap(), [0x30, 0x00]);
        assert!(decode(&[0x30, 0x00]).unwrap().is_empty());
    }

    #[test]
    fn all_empty_records_are_dropped_on_encode() {
        let vault: Vault = [Record::default(), Record::new("a", "", "", "")]
            .into_iter()
            .collect();
        let bytes = encode(&vault).unwrap();
        assert_eq!(decode(&bytes).unwrap().len(), 1);
    }

    #[test]
    fn capacity_leaves_room_for_trailer() {
        let vault: Vault = std::iter::once(Record::new("svc", "me", "pw", "")).collect();
        let bytes = encode(&vault).unwrap();
        assert!(bytes.capacity() >= bytes.len() + TRAILER_LEN);
    }

    #[test]
    fn outer_sequence_must_span_buffer() {
        // trailing garbage
        assert!(matches!(
            decode(&[0x30, 0x00, 0x00]),
            Err(PassKeeperError::StructureCorruption)
        ));
        // declared length too long
        assert!(matches!(
            decode(&[0x30, 0x05, 0x31, 0x00]),
            Err(PassKeeperError::StructureCorruption)
        ));
        // SET at top level
        assert!(matches!(decode(&[0x31, 0x00]), Err(PassKeeperError::StructureCorruption)));
        assert!(matches!(decode(&[]), Err(PassKeeperError::StructureCorruption)));
    }

    #[test]
    fn empty_and_damaged_records_are_still_inserted() {
        let bytes = [
            0x30, 0x0B, // SEQUENCE
            0x31, 0x00, // empty record
            0x31, 0x03, 0x80, 0x01, b'a', // good record
            0x04, 0x02, 0x00, 0x00, // not a SET: rest is abandoned
        ];
        let vault = decode(&bytes).unwrap();
        assert_eq!(vault.len(), 3);
        assert_eq!(vault.iter().filter(|r| r.is_empty()).count(), 2);
    }

    #[test]
    fn decode_reorders_out_of_order_input() {
        let bytes = [
            0x30, 0x0A, //
            0x31, 0x03, 0x80, 0x01, b'z', //
            0x31, 0x03, 0x80, 0x01, b'a',
        ];
        let vault = decode(&bytes).unwrap();
        let first = vault.get(0).unwrap();
        assert_eq!(first.service, b"a");
    }
}
