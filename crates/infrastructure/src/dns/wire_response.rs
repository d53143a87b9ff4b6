//! Responses built directly in wire format, for queries that could not be
//! decoded and therefore cannot go through the message codec.

const HEADER_LEN: usize = 12;
const FLAG_QR: u8 = 0x80;
/// Opcode (bits 3-6) and RD (bit 0) of the first flags byte.
const OPCODE_AND_RD_MASK: u8 = 0x79;
const RCODE_FORMERR: u8 = 0x01;

/// Header-only FORMERR response for an undecodable query.
///
/// The id, opcode and RD bit are copied from whatever part of the header
/// is present in `raw`; all section counts are zero.
pub fn build_formerr_response(raw: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; HEADER_LEN];

    if raw.len() >= 2 {
        buf[0] = raw[0];
        buf[1] = raw[1];
    }

    let flags = raw.get(2).copied().unwrap_or(0);
    buf[2] = FLAG_QR | (flags & OPCODE_AND_RD_MASK);
    buf[3] = RCODE_FORMERR;

    buf
}
