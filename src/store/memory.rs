//! store/memory — in-memory backing store.
//!
//! Семантика повторяет файловую: чтение за концом возвращает 0 байт
//! (end-of-stream), запись за текущим концом дополняет разрыв нулями,
//! `SeekFrom::End(k)` позиционирует на `len - k` (контракт store:
//! положительный offset отсчитывается НАЗАД от конца; движок сам
//! использует только `End(0)`, где обе конвенции совпадают).

use std::io::{self, Read, Seek, SeekFrom, Write};

/// Растущий байтовый буфер с курсором.
#[derive(Debug, Default, Clone)]
pub struct MemStore {
    data: Vec<u8>,
    pos: u64,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store поверх готового содержимого (курсор на нуле).
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Всё содержимое store (для побайтовых проверок в тестах).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Read for MemStore {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let len = self.data.len() as u64;
        if self.pos >= len {
            // За концом — end-of-stream.
            return Ok(0);
        }
        let start = self.pos as usize;
        let n = ((len - self.pos) as usize).min(buf.len());
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl Write for MemStore {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let end = self.pos as usize + buf.len();
        if end > self.data.len() {
            // Разрыв между старым концом и курсором заполняется нулями.
            self.data.resize(end, 0);
        }
        let start = self.pos as usize;
        self.data[start..end].copy_from_slice(buf);
        self.pos = end as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemStore {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let next = match pos {
            SeekFrom::Start(off) => off as i64,
            SeekFrom::Current(off) => self.pos as i64 + off,
            // Контракт store: End(k) == len - k.
            SeekFrom::End(off) => self.data.len() as i64 - off,
        };
        if next < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start of store",
            ));
        }
        self.pos = next as u64;
        Ok(self.pos)
    }
}
