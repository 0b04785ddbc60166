//! RLP, the chain's canonical binary format.
//!
//! Integers are written as their minimal big-endian bytes (zero is the empty
//! string), byte strings and lists carry a length prefix. Identifiers are
//! reduced to their raw payload; the prefix is implied by the schema.

use byteorder::{BigEndian, ByteOrder};

use crate::error::DecodeError;
use crate::types::Id;

const STRING_OFFSET: u8 = 0x80;
const LIST_OFFSET: u8 = 0xC0;
const SHORT_LIMIT: usize = 55;

/// One encodable value of a transaction field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Int(u128),
    /// 256-bit unsigned integer, big-endian.
    Word([u8; 32]),
    Bytes(Vec<u8>),
    Id(Id),
    List(Vec<Field>),
}

impl From<u64> for Field {
    fn from(v: u64) -> Self {
        Self::Int(u128::from(v))
    }
}

impl From<u128> for Field {
    fn from(v: u128) -> Self {
        Self::Int(v)
    }
}

impl From<Id> for Field {
    fn from(id: Id) -> Self {
        Self::Id(id)
    }
}

/// A decoded RLP item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Bytes(Vec<u8>),
    List(Vec<Item>),
}

impl Item {
    /// The byte string, or `None` for a list.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            Self::List(_) => None,
        }
    }

    /// The list elements, or `None` for a byte string.
    pub fn as_list(&self) -> Option<&[Item]> {
        match self {
            Self::List(items) => Some(items),
            Self::Bytes(_) => None,
        }
    }

    /// Read a canonical (no leading zero) integer of at most 16 bytes.
    pub fn to_u128(&self) -> Result<u128, DecodeError> {
        let bytes = self.canonical_int(16)?;
        let mut buf = [0u8; 16];
        buf[16 - bytes.len()..].copy_from_slice(bytes);
        Ok(BigEndian::read_u128(&buf))
    }

    /// Like [`Item::to_u128`], rejecting values above `u64::MAX`.
    pub fn to_u64(&self) -> Result<u64, DecodeError> {
        let v = self.to_u128()?;
        u64::try_from(v).map_err(|_| DecodeError::Rlp(format!("{v} does not fit in 64 bits")))
    }

    /// Read a canonical integer of at most 32 bytes.
    pub fn to_word(&self) -> Result<[u8; 32], DecodeError> {
        let bytes = self.canonical_int(32)?;
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(bytes);
        Ok(out)
    }

    fn canonical_int(&self, max: usize) -> Result<&[u8], DecodeError> {
        let bytes = self
            .as_bytes()
            .ok_or_else(|| DecodeError::Rlp("expected an integer, found a list".into()))?;
        if bytes.len() > max {
            return Err(DecodeError::Rlp(format!(
                "integer of {} bytes exceeds {max}",
                bytes.len()
            )));
        }
        if bytes.first() == Some(&0) {
            return Err(DecodeError::Rlp("integer has a leading zero byte".into()));
        }
        Ok(bytes)
    }
}

/// Minimal big-endian bytes of `v`; empty for zero.
pub fn int_bytes(v: u128) -> Vec<u8> {
    let mut buf = [0u8; 16];
    BigEndian::write_u128(&mut buf, v);
    strip_leading_zeros(&buf).to_vec()
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Encode a single field.
pub fn encode(field: &Field) -> Vec<u8> {
    let mut out = Vec::new();
    write_field(&mut out, field);
    out
}

/// Encode `fields` as one RLP list.
pub fn encode_list(fields: &[Field]) -> Vec<u8> {
    let mut body = Vec::new();
    for field in fields {
        write_field(&mut body, field);
    }
    let mut out = Vec::with_capacity(body.len() + 9);
    write_header(&mut out, LIST_OFFSET, body.len());
    out.extend_from_slice(&body);
    out
}

fn write_field(out: &mut Vec<u8>, field: &Field) {
    match field {
        Field::Int(v) => write_bytes(out, &int_bytes(*v)),
        Field::Word(w) => write_bytes(out, strip_leading_zeros(w)),
        Field::Bytes(b) => write_bytes(out, b),
        Field::Id(id) => write_bytes(out, id.as_bytes()),
        Field::List(items) => out.extend_from_slice(&encode_list(items)),
    }
}

fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    if let [b] = bytes {
        if *b < STRING_OFFSET {
            out.push(*b);
            return;
        }
    }
    write_header(out, STRING_OFFSET, bytes.len());
    out.extend_from_slice(bytes);
}

fn write_header(out: &mut Vec<u8>, offset: u8, len: usize) {
    if len <= SHORT_LIMIT {
        out.push(offset + len as u8);
    } else {
        let len_bytes = int_bytes(len as u128);
        out.push(offset + SHORT_LIMIT as u8 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
}

/// Decode exactly one item; trailing bytes are an error.
pub fn decode(data: &[u8]) -> Result<Item, DecodeError> {
    let (item, rest) = decode_item(data)?;
    if !rest.is_empty() {
        return Err(DecodeError::Rlp(format!(
            "{} trailing bytes after item",
            rest.len()
        )));
    }
    Ok(item)
}

fn decode_item(data: &[u8]) -> Result<(Item, &[u8]), DecodeError> {
    let (&first, rest) = data
        .split_first()
        .ok_or_else(|| DecodeError::Rlp("unexpected end of input".into()))?;

    match first {
        0x00..=0x7F => Ok((Item::Bytes(vec![first]), rest)),
        0x80..=0xB7 => {
            let (payload, rest) = take(rest, (first - STRING_OFFSET) as usize)?;
            if let [b] = payload {
                if *b < STRING_OFFSET {
                    return Err(DecodeError::Rlp(
                        "single byte below 0x80 must not carry a prefix".into(),
                    ));
                }
            }
            Ok((Item::Bytes(payload.to_vec()), rest))
        }
        0xB8..=0xBF => {
            let (len, rest) = read_long_len(rest, (first - 0xB7) as usize)?;
            let (payload, rest) = take(rest, len)?;
            Ok((Item::Bytes(payload.to_vec()), rest))
        }
        0xC0..=0xF7 => {
            let (body, rest) = take(rest, (first - LIST_OFFSET) as usize)?;
            Ok((Item::List(decode_items(body)?), rest))
        }
        0xF8..=0xFF => {
            let (len, rest) = read_long_len(rest, (first - 0xF7) as usize)?;
            let (body, rest) = take(rest, len)?;
            Ok((Item::List(decode_items(body)?), rest))
        }
    }
}

fn decode_items(mut body: &[u8]) -> Result<Vec<Item>, DecodeError> {
    let mut items = Vec::new();
    while !body.is_empty() {
        let (item, rest) = decode_item(body)?;
        items.push(item);
        body = rest;
    }
    Ok(items)
}

fn read_long_len(data: &[u8], len_of_len: usize) -> Result<(usize, &[u8]), DecodeError> {
    if len_of_len > 8 {
        return Err(DecodeError::Rlp(format!(
            "length of length {len_of_len} is too large"
        )));
    }
    let (len_bytes, rest) = take(data, len_of_len)?;
    if len_bytes.first() == Some(&0) {
        return Err(DecodeError::Rlp("length has a leading zero byte".into()));
    }
    let len = BigEndian::read_uint(len_bytes, len_of_len);
    if len <= SHORT_LIMIT as u64 {
        return Err(DecodeError::Rlp(format!(
            "length {len} should use the short form"
        )));
    }
    let len = usize::try_from(len)
        .map_err(|_| DecodeError::Rlp(format!("length {len} does not fit in memory")))?;
    Ok((len, rest))
}

fn take(data: &[u8], len: usize) -> Result<(&[u8], &[u8]), DecodeError> {
    if data.len() < len {
        return Err(DecodeError::Rlp(format!(
            "need {len} bytes, only {} left",
            data.len()
        )));
    }
    Ok(data.split_at(len))
}
