//! Общие константы формата (header, node frames, sentinels, key kinds).

// -------- Header --------
/// Первые 20 байт store: смещение текущего корня, ASCII-десятичное число
/// с ведущими нулями. До первой записи корня поле содержит нулевые байты.
pub const HEADER_LEN: usize = 20;

// -------- Node frames --------
// Кадр узла:
// [status u8]   -- STATUS_*
// [length 20b]  -- ASCII-десятичная длина payload с ведущими нулями
// [payload]     -- см. node/codec.rs
//
// Для STATUS_MOVED вместо length+payload записывается 20-байтовое
// ASCII-смещение актуальной копии узла; для STATUS_DELETED — ничего.
pub const LEN_FIELD: usize = 20;

pub const STATUS_LIVE: u8 = b'0';
pub const STATUS_MOVED: u8 = b'1';
pub const STATUS_DELETED: u8 = b'2';

// -------- Node payload --------
/// 4-байтовая магия payload узла.
pub const NODE_MAGIC: &[u8; 4] = b"F1BN";
/// Версия формата payload.
pub const NODE_VERSION: u16 = 1;
/// Длина CRC32-трейлера payload.
pub const NODE_TRAILER_LEN: usize = 4;

// -------- Key kind tags (в payload) --------
pub const KIND_INT: u8 = 0;
pub const KIND_STR: u8 = 1;
pub const KIND_TS: u8 = 2;

// -------- Sentinels --------
/// У элемента нет ребёнка с этой стороны.
pub const NO_CHILD: i64 = -1;
/// Узел является корнем.
pub const NO_PARENT: i32 = -1;
/// Узел ещё ни разу не записывался в store.
pub const NO_LOCATION: i64 = -1;
/// Зарезервированный ключ кэша для текущего корня.
pub const ROOT_CACHE_KEY: i64 = -1;
