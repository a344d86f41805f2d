//! error — типизированная таксономия ошибок FletchDB.
//!
//! Каждая ошибка несёт причину (underlying cause), когда она есть; сравнение
//! ошибок выполняется по идентичности варианта, а не по причине, чтобы
//! вызывающий код мог матчиться на kind без чувствительности к контексту.
//!
//! Сентинели (`NoRoot`, `ElementNotFound`, `NoNearestChild`) потребляются
//! движком для управления потоком и наружу из публичного API не выходят,
//! кроме `NoRoot` у `get_root`.

use std::io;

use thiserror::Error;

/// Result type alias using FletchError.
pub type Result<T> = std::result::Result<T, FletchError>;

/// Причина, тип которой не фиксирован (parse/utf8/вложенная ошибка).
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FletchError {
    // -------- structural decode --------
    #[error("unable to read node status byte")]
    ReadStatus(#[source] io::Error),

    #[error("unable to read moved-to offset of a relocated node")]
    ReadForwardOffset(#[source] io::Error),

    #[error("unable to parse moved-to offset of a relocated node")]
    ParseForwardOffset(#[source] Cause),

    #[error("unable to read node frame length")]
    ReadLength(#[source] Cause),

    #[error("unable to read node payload")]
    ReadPayload(#[source] io::Error),

    #[error("node payload is malformed: {reason}")]
    DecodePayload { reason: String },

    #[error("unable to encode node payload")]
    EncodePayload(#[source] io::Error),

    #[error("unable to read or deserialise the root node")]
    RootUnreadable(#[source] Cause),

    // -------- store I/O --------
    #[error("seek on the backing store failed")]
    SeekFailed(#[source] io::Error),

    #[error("write to the backing store failed")]
    WriteFailed(#[source] io::Error),

    #[error("read from the backing store failed")]
    ReadFailed(#[source] io::Error),

    // -------- logical --------
    #[error("index has no root yet")]
    NoRoot,

    #[error("key not found")]
    KeyNotFound,

    #[error("element not found in node")]
    ElementNotFound,

    #[error("node has no viable child to descend into")]
    NoNearestChild,

    #[error("duplicate key rejected by unique index")]
    DuplicateKey,

    #[error("element key kind differs from the node key kind")]
    MixedKinds,

    #[error("key kind tag and key value disagree")]
    UnknownKeyKind,

    // -------- policy --------
    #[error("leaf node is full; node splitting is not implemented")]
    LeafFull,
}

// Равенство по kind: причина (source) в сравнении не участвует.
impl PartialEq for FletchError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Eq for FletchError {}
