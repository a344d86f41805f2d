//! node/codec — кадровый формат узла и детерминированная сериализация.
//!
//! Кадр:
//! [status u8]    -- '0' live | '1' moved | '2' deleted
//! [length 20b]   -- ASCII-десятичная длина payload с ведущими нулями
//! [payload]
//!
//! Moved-кадр вместо length+payload несёт 20-байтовое ASCII-смещение живой
//! копии; читатель прозрачно следует по нему, но `self_location`
//! возвращаемого узла остаётся исходным запрошенным смещением — родители
//! ссылаются именно на него. Deleted-кадр не несёт payload.
//!
//! Payload (LE):
//! [magic 4 = "F1BN"]
//! [version u16]
//! [deleted u8]
//! [parent_id i32][id i32]
//! [path_len u32][path i32 ...]
//! [elem_count u32]
//!   per element: [kind u8][key][location i64][less i64][more i64]
//!   key: Int/Ts -> i64; Str -> [len u32][bytes]
//! [crc32 u32]    -- по всем предыдущим байтам payload
//!
//! Кодирование детерминировано: один узел — одни и те же байты.

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::consts::{
    LEN_FIELD, NODE_MAGIC, NODE_TRAILER_LEN, NODE_VERSION, NO_LOCATION, NO_PARENT, STATUS_DELETED,
    STATUS_LIVE, STATUS_MOVED,
};
use crate::error::{Cause, FletchError, Result};
use crate::metrics::record_forward_hop;

use super::core::Node;
use super::element::Element;
use super::key::{Key, KeyKind};

// --------------------------- ASCII-поля ---------------------------

/// 20-байтовое ASCII-десятичное поле с ведущими нулями.
pub(crate) fn encode_offset(value: i64) -> [u8; LEN_FIELD] {
    let mut out = [0u8; LEN_FIELD];
    let s = format!("{:020}", value);
    out.copy_from_slice(s.as_bytes());
    out
}

/// Разбор 20-байтового ASCII-десятичного поля (ведущие нули допустимы).
pub(crate) fn decode_offset(raw: &[u8]) -> std::result::Result<i64, Cause> {
    let s = std::str::from_utf8(raw).map_err(|e| -> Cause { Box::new(e) })?;
    s.parse::<i64>().map_err(|e| -> Cause { Box::new(e) })
}

// --------------------------- Encode ---------------------------

/// Полный live-кадр узла: status + length + payload.
pub fn serialise(node: &Node) -> Result<Vec<u8>> {
    let payload = encode_payload(node)?;
    let mut frame = Vec::with_capacity(1 + LEN_FIELD + payload.len());
    frame.push(STATUS_LIVE);
    frame.extend_from_slice(&encode_offset(payload.len() as i64));
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Payload узла (без кадрового заголовка).
pub fn encode_payload(node: &Node) -> Result<Vec<u8>> {
    encode_payload_io(node).map_err(FletchError::EncodePayload)
}

fn encode_payload_io(node: &Node) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(64 + node.elements.len() * 48);
    buf.write_all(NODE_MAGIC)?;
    buf.write_u16::<LittleEndian>(NODE_VERSION)?;
    buf.write_u8(u8::from(node.deleted))?;
    buf.write_i32::<LittleEndian>(node.parent_id)?;
    buf.write_i32::<LittleEndian>(node.id)?;

    buf.write_u32::<LittleEndian>(node.path.len() as u32)?;
    for p in &node.path {
        buf.write_i32::<LittleEndian>(*p)?;
    }

    buf.write_u32::<LittleEndian>(node.elements.len() as u32)?;
    for e in &node.elements {
        buf.write_u8(e.key.tag())?;
        match &e.key {
            Key::Int(v) | Key::Ts(v) => buf.write_i64::<LittleEndian>(*v)?,
            Key::Str(s) => {
                buf.write_u32::<LittleEndian>(s.len() as u32)?;
                buf.write_all(s)?;
            }
        }
        buf.write_i64::<LittleEndian>(e.location)?;
        buf.write_i64::<LittleEndian>(e.less_location)?;
        buf.write_i64::<LittleEndian>(e.more_location)?;
    }

    let crc = crc32fast::hash(&buf);
    buf.write_u32::<LittleEndian>(crc)?;
    Ok(buf)
}

// --------------------------- Decode ---------------------------

#[inline]
fn truncated(_: io::Error) -> FletchError {
    FletchError::DecodePayload {
        reason: "truncated payload".to_string(),
    }
}

/// Разбор payload узла. `self_location` у результата не задан — его
/// проставляет читатель кадра.
pub fn decode_payload(buf: &[u8]) -> Result<Node> {
    let min = NODE_MAGIC.len() + 2 + NODE_TRAILER_LEN;
    if buf.len() < min {
        return Err(FletchError::DecodePayload {
            reason: format!("payload too short: {} bytes", buf.len()),
        });
    }

    let (body, trailer) = buf.split_at(buf.len() - NODE_TRAILER_LEN);
    let stored = LittleEndian::read_u32(trailer);
    let computed = crc32fast::hash(body);
    if stored != computed {
        return Err(FletchError::DecodePayload {
            reason: format!("crc mismatch (stored {stored:08x}, computed {computed:08x})"),
        });
    }

    let mut r = body;

    let mut magic = [0u8; 4];
    r.read_exact(&mut magic).map_err(truncated)?;
    if &magic != NODE_MAGIC {
        return Err(FletchError::DecodePayload {
            reason: "bad node magic".to_string(),
        });
    }
    let version = r.read_u16::<LittleEndian>().map_err(truncated)?;
    if version != NODE_VERSION {
        return Err(FletchError::DecodePayload {
            reason: format!("unsupported payload version {version}"),
        });
    }

    let deleted = r.read_u8().map_err(truncated)? != 0;
    let parent_id = r.read_i32::<LittleEndian>().map_err(truncated)?;
    let id = r.read_i32::<LittleEndian>().map_err(truncated)?;

    let path_len = r.read_u32::<LittleEndian>().map_err(truncated)? as usize;
    if path_len * 4 > r.len() {
        return Err(FletchError::DecodePayload {
            reason: format!("path length {path_len} exceeds payload"),
        });
    }
    let mut path = Vec::with_capacity(path_len);
    for _ in 0..path_len {
        path.push(r.read_i32::<LittleEndian>().map_err(truncated)?);
    }

    let count = r.read_u32::<LittleEndian>().map_err(truncated)? as usize;
    let mut elements = Vec::with_capacity(count.min(r.len()));
    for _ in 0..count {
        let tag = r.read_u8().map_err(truncated)?;
        let kind = KeyKind::from_tag(tag).ok_or_else(|| FletchError::DecodePayload {
            reason: format!("unknown key kind tag {tag}"),
        })?;
        let key = match kind {
            KeyKind::Int => Key::Int(r.read_i64::<LittleEndian>().map_err(truncated)?),
            KeyKind::Ts => Key::Ts(r.read_i64::<LittleEndian>().map_err(truncated)?),
            KeyKind::Str => {
                let len = r.read_u32::<LittleEndian>().map_err(truncated)? as usize;
                if len > r.len() {
                    return Err(FletchError::DecodePayload {
                        reason: format!("string key length {len} exceeds payload"),
                    });
                }
                let mut s = vec![0u8; len];
                r.read_exact(&mut s).map_err(truncated)?;
                Key::Str(s)
            }
            KeyKind::Unset => unreachable!("from_tag never yields Unset"),
        };
        let location = r.read_i64::<LittleEndian>().map_err(truncated)?;
        let less_location = r.read_i64::<LittleEndian>().map_err(truncated)?;
        let more_location = r.read_i64::<LittleEndian>().map_err(truncated)?;
        elements.push(Element {
            key,
            location,
            less_location,
            more_location,
        });
    }

    if !r.is_empty() {
        return Err(FletchError::DecodePayload {
            reason: format!("{} trailing bytes after elements", r.len()),
        });
    }

    Ok(Node {
        deleted,
        self_location: NO_LOCATION,
        parent_id,
        id,
        path,
        elements,
    })
}

// --------------------------- Frame reader ---------------------------

/// Прочитать узел по смещению `at`, прозрачно следуя moved-кадрам.
/// `self_location` результата — исходное `at`, не конечное смещение:
/// это сохраняет за вызывающим кодом возможность переписать старый слот.
pub fn read_node<S: Read + Seek>(store: &mut S, at: i64) -> Result<Node> {
    if at < 0 {
        return Err(FletchError::SeekFailed(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("negative node offset {at}"),
        )));
    }
    store
        .seek(SeekFrom::Start(at as u64))
        .map_err(FletchError::SeekFailed)?;

    let mut status = [0u8; 1];
    store
        .read_exact(&mut status)
        .map_err(FletchError::ReadStatus)?;

    match status[0] {
        STATUS_MOVED => {
            let mut raw = [0u8; LEN_FIELD];
            store
                .read_exact(&mut raw)
                .map_err(FletchError::ReadForwardOffset)?;
            let forward = decode_offset(&raw).map_err(FletchError::ParseForwardOffset)?;
            record_forward_hop();
            let mut node = read_node(store, forward)?;
            node.self_location = at;
            Ok(node)
        }
        STATUS_DELETED => Ok(Node {
            deleted: true,
            self_location: NO_LOCATION,
            parent_id: NO_PARENT,
            id: 0,
            path: Vec::new(),
            elements: Vec::new(),
        }),
        STATUS_LIVE => {
            let mut raw = [0u8; LEN_FIELD];
            store
                .read_exact(&mut raw)
                .map_err(|e| FletchError::ReadLength(Box::new(e)))?;
            let length = decode_offset(&raw).map_err(FletchError::ReadLength)?;
            if length < 0 {
                return Err(FletchError::DecodePayload {
                    reason: format!("negative payload length {length}"),
                });
            }
            let mut payload = vec![0u8; length as usize];
            store
                .read_exact(&mut payload)
                .map_err(FletchError::ReadPayload)?;
            let mut node = decode_payload(&payload)?;
            node.self_location = at;
            Ok(node)
        }
        other => Err(FletchError::DecodePayload {
            reason: format!("unknown frame status byte {other:#04x}"),
        }),
    }
}
