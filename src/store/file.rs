//! store/file — файловый backing store с single-writer блокировкой.
//!
//! Cross-platform (fs2) advisory lock на самом файле индекса: пока жив
//! хэндл, второй писатель открыть store не может. Блокировка снимается
//! в Drop.
//!
//! data_fsync (см. config) включает sync_data после каждой записи;
//! по умолчанию выключено.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub struct FileStore {
    file: File,
    path: PathBuf,
    data_fsync: bool,
}

impl FileStore {
    /// Открыть store по пути; файл создаётся, если его ещё нет.
    /// Берёт эксклюзивную advisory-блокировку; занятый файл — ошибка.
    pub fn open(path: &Path) -> Result<FileStore> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)
            .with_context(|| format!("open index store {}", path.display()))?;

        file.try_lock_exclusive()
            .with_context(|| format!("try_lock_exclusive {}", path.display()))?;

        Ok(FileStore {
            file,
            path: path.to_path_buf(),
            data_fsync: false,
        })
    }

    pub fn with_data_fsync(mut self, on: bool) -> Self {
        self.data_fsync = on;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        // fs2 unlock errors on drop are ignored deliberately.
        let _ = self.file.unlock();
    }
}

impl Read for FileStore {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for FileStore {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        if self.data_fsync {
            self.file.sync_data()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for FileStore {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}
