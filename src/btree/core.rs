//! btree/core — структура движка и открытие индекса.
//!
//! Движок единолично владеет store на всё время жизни хэндла; мутирующие
//! операции берут `&mut self`, так что пересечение вызовов на одном
//! индексе исключено на уровне типов. Для файлового store single-writer
//! дополнительно гарантирует advisory-блокировка (store/file.rs).

use log::debug;

use crate::config::FletchConfig;
use crate::store::IndexStore;

use super::cache::NodeCache;

/// Персистентный B-tree индекс поверх seekable byte store.
pub struct Btree<S> {
    pub store: S,
    pub(crate) cache: NodeCache,
    /// Ёмкость узла в элементах; при достижении insert отвечает LeafFull.
    pub max_elements_per_node: i8,
    /// Отклонять ли вставку точного дубликата ключа.
    pub unique: bool,
}

impl<S: IndexStore> Btree<S> {
    /// Открыть индекс с конфигурацией из ENV (F1_*).
    pub fn open(store: S, max_elements_per_node: i8, unique: bool) -> Btree<S> {
        Btree::open_with_config(
            store,
            max_elements_per_node,
            unique,
            &FletchConfig::from_env(),
        )
    }

    pub fn open_with_config(
        store: S,
        max_elements_per_node: i8,
        unique: bool,
        cfg: &FletchConfig,
    ) -> Btree<S> {
        debug!(
            "btree open: max_elements_per_node={}, unique={}, {}",
            max_elements_per_node, unique, cfg
        );
        Btree {
            store,
            cache: NodeCache::new(cfg.node_cache_nodes),
            max_elements_per_node,
            unique,
        }
    }

    /// Забрать store назад (тестам нужен побайтовый доступ).
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S> std::fmt::Debug for Btree<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Btree")
            .field("max_elements_per_node", &self.max_elements_per_node)
            .field("unique", &self.unique)
            .field("cached_nodes", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    #[test]
    fn open_injects_parameters() {
        let tree = Btree::open_with_config(
            MemStore::new(),
            4,
            true,
            &FletchConfig::default().with_node_cache_nodes(8),
        );
        assert_eq!(tree.max_elements_per_node, 4);
        assert!(tree.unique);
        assert_eq!(tree.cache.len(), 0);
    }
}
