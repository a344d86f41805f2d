//! btree/io — операции узлового ввода/вывода поверх store:
//! - read_node: чтение через кэш; moved-кадры догоняются прозрачно.
//! - get_root: разрешение корня по 20-байтовому заголовку (offset 0).
//! - write_node: append в конец store; релокация не-корня оставляет на
//!   старом месте форвардер и возвращает старое смещение.
//! - write_root: write_node + перезапись заголовка.
//!
//! Протокол «move вместо overwrite»: родители ссылаются на детей по их
//! исходному смещению; переписанный на месте форвардер позволяет читателю
//! догнать перенос без правки родителя. Корень форвардер не пишет —
//! вместо этого переписывается указатель в заголовке.
//!
//! Позиция курсора store между вызовами не предполагается: каждый шаг
//! начинается с явного seek.

use std::io::SeekFrom;

use log::trace;

use crate::consts::{HEADER_LEN, NO_LOCATION, ROOT_CACHE_KEY, STATUS_MOVED};
use crate::error::{FletchError, Result};
use crate::metrics::{
    record_cache_hit, record_cache_miss, record_node_read, record_node_relocation,
    record_node_write, record_root_rewrite,
};
use crate::node::{codec, Node};
use crate::store::IndexStore;

use super::core::Btree;

impl<S: IndexStore> Btree<S> {
    /// Прочитать узел по смещению, сперва спросив кэш.
    pub fn read_node(&mut self, at: i64) -> Result<Node> {
        if let Some(node) = self.cache.get(at) {
            record_cache_hit();
            return Ok(node);
        }
        let node = codec::read_node(&mut self.store, at)?;
        record_node_read();
        record_cache_miss();
        self.cache.put(at, &node);
        Ok(node)
    }

    /// Текущий корень индекса.
    ///
    /// Пустой store (короче заголовка) — сентинел `NoRoot`: вызывающий
    /// код отличает «индекс пуст» от настоящих сбоев. Любой другой сбой
    /// по пути — `RootUnreadable` с причиной.
    pub fn get_root(&mut self) -> Result<Node> {
        if let Some(node) = self.cache.get(ROOT_CACHE_KEY) {
            record_cache_hit();
            return Ok(node);
        }

        self.store
            .seek(SeekFrom::Start(0))
            .map_err(FletchError::SeekFailed)?;
        let mut raw = [0u8; HEADER_LEN];
        match self.store.read_exact(&mut raw) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(FletchError::NoRoot);
            }
            Err(e) => return Err(FletchError::ReadFailed(e)),
        }

        let at = codec::decode_offset(&raw).map_err(FletchError::RootUnreadable)?;
        let node = self
            .read_node(at)
            .map_err(|e| FletchError::RootUnreadable(Box::new(e)))?;
        self.cache.put(ROOT_CACHE_KEY, &node);
        Ok(node)
    }

    /// Записать узел и вернуть его действующее смещение.
    ///
    /// Узел всегда сериализуется в конец store. Дальше три случая:
    /// - свежий узел (self_location == NO_LOCATION): получает новое
    ///   смещение;
    /// - релокация не-корня: на старом месте остаётся форвардер, логической
    ///   идентичностью узла остаётся старое смещение — оно и возвращается;
    /// - релокация корня: форвардер не нужен, заголовок перепишет
    ///   write_root.
    pub fn write_node(&mut self, node: &mut Node) -> Result<i64> {
        let mut end = self
            .store
            .seek(SeekFrom::End(0))
            .map_err(FletchError::SeekFailed)? as i64;

        if (end as usize) < HEADER_LEN {
            // Store ещё без заголовка: резервируем 20 байт под root pointer.
            self.store
                .seek(SeekFrom::Start(0))
                .map_err(FletchError::SeekFailed)?;
            self.store
                .write_all(&[0u8; HEADER_LEN])
                .map_err(FletchError::WriteFailed)?;
            self.store
                .seek(SeekFrom::Start(HEADER_LEN as u64))
                .map_err(FletchError::SeekFailed)?;
            end = HEADER_LEN as i64;
        }

        let frame = codec::serialise(node)?;
        self.store
            .write_all(&frame)
            .map_err(FletchError::WriteFailed)?;
        record_node_write();

        let old = node.self_location;

        if old != NO_LOCATION && !node.is_root() {
            // Релокация: старый кадр становится форвардером на новую копию.
            self.store
                .seek(SeekFrom::Start(old as u64))
                .map_err(FletchError::SeekFailed)?;
            self.store
                .write_all(&[STATUS_MOVED])
                .map_err(FletchError::WriteFailed)?;
            self.store
                .write_all(&codec::encode_offset(end))
                .map_err(FletchError::WriteFailed)?;
            record_node_relocation();
            self.cache.invalidate(old);
            trace!("node {} relocated: {} -> {}", node.id, old, end);
            return Ok(old);
        }

        if old != NO_LOCATION {
            // Релокация корня: старый кадр просто осиротел.
            self.cache.invalidate(old);
        }
        node.self_location = end;
        Ok(end)
    }

    /// Записать корень и перевести на него указатель в заголовке.
    pub fn write_root(&mut self, node: &mut Node) -> Result<i64> {
        let at = self.write_node(node)?;
        self.store
            .seek(SeekFrom::Start(0))
            .map_err(FletchError::SeekFailed)?;
        self.store
            .write_all(&codec::encode_offset(at))
            .map_err(FletchError::WriteFailed)?;
        record_root_rewrite();
        self.cache.invalidate(ROOT_CACHE_KEY);
        self.cache.put(ROOT_CACHE_KEY, node);
        trace!("root pointer -> {}", at);
        Ok(at)
    }
}
