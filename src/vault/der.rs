//! Minimal DER tag/length/value primitives.
//!
//! Only what the vault format needs: identifier octets (including the
//! high-tag-number form), definite lengths in short or long form, and
//! size calculation for the encoder's first pass.  Indefinite lengths
//! are rejected.

/// Identifier class, from the top two bits of the first octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Universal,
    Application,
    Context,
    Private,
}

impl Class {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Universal,
            1 => Self::Application,
            2 => Self::Context,
            _ => Self::Private,
        }
    }

    fn bits(self) -> u8 {
        match self {
            Self::Universal => 0,
            Self::Application => 1,
            Self::Context => 2,
            Self::Private => 3,
        }
    }
}

/// Universal tag of SEQUENCE / SEQUENCE OF.
pub const TAG_SEQUENCE: u32 = 16;

/// Universal tag of SET / SET OF.
pub const TAG_SET: u32 = 17;

const CONSTRUCTED_BIT: u8 = 0x20;
const SHORT_TAG_MASK: u8 = 0x1F;

/// A decoded identifier + length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub class: Class,
    pub constructed: bool,
    pub tag: u32,
    /// Length of the contents.
    pub len: usize,
    /// Length of the identifier and length octets.
    pub header_len: usize,
}

impl Header {
    /// Header plus contents.
    pub fn total_len(&self) -> Option<usize> {
        self.header_len.checked_add(self.len)
    }
}

/// Parse the header at the start of `input`.
///
/// Returns `None` when the header is truncated, uses the indefinite
/// length form, or declares a length that does not fit in `usize`.  The
/// contents are not checked against `input`; callers compare `len`
/// with their own bounds.
pub fn read_header(input: &[u8]) -> Option<Header> {
    let (&first, mut rest) = input.split_first()?;
    let mut header_len = 1;

    let mut tag = u32::from(first & SHORT_TAG_MASK);
    if tag == u32::from(SHORT_TAG_MASK) {
        tag = 0;
        loop {
            let (&b, tail) = rest.split_first()?;
            rest = tail;
            header_len += 1;
            tag = tag.checked_mul(128)? | u32::from(b & 0x7F);
            if b & 0x80 == 0 {
                break;
            }
        }
    }

    let (&first_len, mut rest) = rest.split_first()?;
    header_len += 1;

    let len = if first_len < 0x80 {
        usize::from(first_len)
    } else {
        let count = usize::from(first_len & 0x7F);
        // 0x80 alone is the indefinite form.
        if count == 0 || count > std::mem::size_of::<usize>() {
            return None;
        }
        let mut len = 0usize;
        for _ in 0..count {
            let (&b, tail) = rest.split_first()?;
            rest = tail;
            len = (len << 8) | usize::from(b);
        }
        header_len += count;
        len
    };

    Some(Header {
        class: Class::from_bits(first >> 6),
        constructed: first & CONSTRUCTED_BIT != 0,
        tag,
        len,
        header_len,
    })
}

/// Number of octets `write_header` produces for this tag and length.
pub fn header_len(tag: u32, len: usize) -> usize {
    tag_len(tag) + length_len(len)
}

fn tag_len(tag: u32) -> usize {
    if tag < u32::from(SHORT_TAG_MASK) {
        1
    } else {
        1 + base128_len(tag)
    }
}

fn base128_len(mut value: u32) -> usize {
    let mut n = 1;
    while value >= 0x80 {
        value >>= 7;
        n += 1;
    }
    n
}

fn length_len(len: usize) -> usize {
    if len < 0x80 {
        1
    } else {
        1 + significant_bytes(len)
    }
}

fn significant_bytes(value: usize) -> usize {
    let bits = usize::BITS - value.leading_zeros();
    ((bits + 7) / 8) as usize
}

/// Append an identifier and definite length to `out`.
pub fn write_header(out: &mut Vec<u8>, class: Class, constructed: bool, tag: u32, len: usize) {
    let mut first = class.bits() << 6;
    if constructed {
        first |= CONSTRUCTED_BIT;
    }

    if tag < u32::from(SHORT_TAG_MASK) {
        out.push(first | tag as u8);
    } else {
        out.push(first | SHORT_TAG_MASK);
        let n = base128_len(tag);
        for i in (0..n).rev() {
            let mut b = ((tag >> (7 * i)) & 0x7F) as u8;
            if i > 0 {
                b |= 0x80;
            }
            out.push(b);
        }
    }

    if len < 0x80 {
        out.push(len as u8);
    } else {
        let n = significant_bytes(len);
        out.push(0x80 | n as u8);
        out.extend_from_slice(&len.to_be_bytes()[std::mem::size_of::<usize>() - n..]);
    }
}
