//! node — формат узла B-дерева.
//!
//! Разделение по подмодулям:
//! - key.rs     — типизированные ключи (Int/Str/Ts), порядок и дистанции.
//! - element.rs — элемент узла: ключ -> data location + ссылки на детей.
//! - core.rs    — Node и локальные операции (sort/add/remove/lookup).
//! - codec.rs   — кадровый формат и детерминированная сериализация payload.

pub mod codec;
pub mod core;
pub mod element;
pub mod key;

// ---------------- re-exports (внешний API модуля node) ----------------

pub use codec::{read_node, serialise};
pub use core::Node;
pub use element::Element;
pub use key::{ByteDistance, Distance, Key, KeyKind};
