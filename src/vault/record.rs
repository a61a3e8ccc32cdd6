//! One credential entry and its binary encoding.
//!
//! A record is encoded as a DER `SET` holding one context-specific
//! primitive per non-empty field:
//!
//! ```text
//! 31 LL                 SET
//!    80 LL <service>    [0]
//!    81 LL <login>      [1]
//!    82 LL <password>   [2]
//!    90 LL <comment>    [16]
//! ```

use super::der::{self, Class, TAG_SET};

/// The four record fields and their context tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Service,
    Login,
    Password,
    Comment,
}

impl Field {
    /// Encoding order.
    pub const ALL: [Field; 4] = [Self::Service, Self::Login, Self::Password, Self::Comment];

    pub fn tag(self) -> u32 {
        match self {
            Self::Service => 0,
            Self::Login => 1,
            Self::Password => 2,
            Self::Comment => 16,
        }
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(Self::Service),
            1 => Some(Self::Login),
            2 => Some(Self::Password),
            16 => Some(Self::Comment),
            _ => None,
        }
    }
}

/// A credential record.  Fields are opaque bytes (normally UTF-8).
///
/// Records sort by [`Record::key`]; the comment does not take part in
/// ordering, so two records can sort equal without being equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub service: Vec<u8>,
    pub login: Vec<u8>,
    pub password: Vec<u8>,
    pub comment: Vec<u8>,
}

/// Result of decoding one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDecode {
    Complete(Record),
    /// The record was malformed; holds the fields read before the fault.
    Truncated(Record),
}

impl RecordDecode {
    pub fn into_record(self) -> Record {
        match self {
            Self::Complete(r) | Self::Truncated(r) => r,
        }
    }
}

impl Record {
    pub fn new(
        service: impl Into<Vec<u8>>,
        login: impl Into<Vec<u8>>,
        password: impl Into<Vec<u8>>,
        comment: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            service: service.into(),
            login: login.into(),
            password: password.into(),
            comment: comment.into(),
        }
    }

    pub fn field(&self, field: Field) -> &[u8] {
        match field {
            Field::Service => &self.service,
            Field::Login => &self.login,
            Field::Password => &self.password,
            Field::Comment => &self.comment,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut Vec<u8> {
        match field {
            Field::Service => &mut self.service,
            Field::Login => &mut self.login,
            Field::Password => &mut self.password,
            Field::Comment => &mut self.comment,
        }
    }

    /// Sort key: service, then login, then password.
    pub fn key(&self) -> (&[u8], &[u8], &[u8]) {
        (&self.service, &self.login, &self.password)
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.field(*f).is_empty())
    }

    /// `login@service`, leaving out whichever part is empty.
    pub fn display_name(&self) -> String {
        let service = String::from_utf8_lossy(&self.service);
        let login = String::from_utf8_lossy(&self.login);
        match (login.is_empty(), service.is_empty()) {
            (false, false) => format!("{login}@{service}"),
            (false, true) => login.into_owned(),
            (true, _) => service.into_owned(),
        }
    }

    fn content_len(&self) -> usize {
        Field::ALL
            .iter()
            .filter_map(|f| {
                let len = self.field(*f).len();
                (len > 0).then(|| der::header_len(f.tag(), len) + len)
            })
            .sum()
    }

    /// Size of the encoded record; zero for an all-empty record.
    pub fn encoded_len(&self) -> usize {
        match self.content_len() {
            0 => 0,
            content => der::header_len(TAG_SET, content) + content,
        }
    }

    /// Append the encoded record to `out`.  An all-empty record writes
    /// nothing.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        let content = self.content_len();
        if content == 0 {
            return;
        }

        der::write_header(out, Class::Universal, true, TAG_SET, content);
        for field in Field::ALL {
            let value = self.field(field);
            if !value.is_empty() {
                der::write_header(out, Class::Context, false, field.tag(), value.len());
                out.extend_from_slice(value);
            }
        }
    }

    /// Decode the record starting at `*pos`, reading no further than `end`.
    ///
    /// A malformed `SET` header abandons the rest of the input: `*pos`
    /// moves to `end` and an empty truncated record is returned.
    /// Otherwise `*pos` moves past this record, and a malformed field
    /// inside it ends decoding with the fields captured so far.  Fields
    /// with unknown tags are skipped.
    pub fn decode(input: &[u8], pos: &mut usize, end: usize) -> RecordDecode {
        let end = end.min(input.len());
        let start = (*pos).min(end);

        let Some((content_start, content_end)) = outer_bounds(&input[start..end]) else {
            tracing::warn!(offset = start, "malformed record header; skipping to end of data");
            *pos = end;
            return RecordDecode::Truncated(Record::default());
        };
        let content_start = start + content_start;
        let content_end = start + content_end;
        *pos = content_end;

        let mut record = Record::default();
        let mut cursor = content_start;

        while cursor < content_end {
            let remaining = &input[cursor..content_end];
            let Some(header) = read_header_within(remaining) else {
                tracing::warn!(offset = cursor, "malformed record field; record truncated");
                return RecordDecode::Truncated(record);
            };
            if header.class != Class::Context || header.constructed {
                tracing::warn!(
                    offset = cursor,
                    tag = header.tag,
                    "unexpected field type; record truncated"
                );
                return RecordDecode::Truncated(record);
            }

            let value = &remaining[header.header_len..header.header_len + header.len];
            if let Some(field) = Field::from_tag(header.tag) {
                record.field_mut(field).extend_from_slice(value);
            }
            cursor += header.header_len + header.len;
        }

        RecordDecode::Complete(record)
    }
}

/// Content bounds of a `SET` at the start of `input`, relative to it.
fn outer_bounds(input: &[u8]) -> Option<(usize, usize)> {
    let header = read_header_within(input)?;
    if header.class != Class::Universal || !header.constructed || header.tag != TAG_SET {
        return None;
    }
    Some((header.header_len, header.header_len + header.len))
}

/// A header whose contents fit inside `input`.
fn read_header_within(input: &[u8]) -> Option<der::Header> {
    let header = der::read_header(input)?;
    if header.total_len()? > input.len() {
        return None;
    }
    Some(header)
}
