//! store — backing store индекса: байтово-адресуемый seekable канал.
//!
//! Движок не привязан к конкретному носителю: годится любой
//! `Read + Write + Seek`. Чтение за концом даёт end-of-stream (0 байт),
//! запись за концом расширяет store. Позиция курсора между вызовами
//! движка не предполагается — каждый оператор делает явный seek.
//!
//! Реализации:
//! - memory.rs — растущий буфер в памяти (тестовый harness и embedded-use).
//! - file.rs   — файл с эксклюзивной advisory-блокировкой (single writer).

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemStore;

use std::io::{Read, Seek, Write};

/// Контракт backing store. Blanket-реализация покрывает File, Cursor и т.п.
pub trait IndexStore: Read + Write + Seek {}

impl<T: Read + Write + Seek> IndexStore for T {}
