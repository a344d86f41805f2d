//! btree/search — спуск по дереву и поиск ключа.

use crate::error::{FletchError, Result};
use crate::node::{Key, Node};
use crate::store::IndexStore;

use super::core::Btree;

/// Результат спуска: точное попадание или ближайший лист, в котором ключ
/// должен был бы находиться.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descent {
    Exact(Node),
    Nearest(Node),
}

impl Descent {
    pub fn node(&self) -> &Node {
        match self {
            Descent::Exact(n) | Descent::Nearest(n) => n,
        }
    }

    pub fn into_node(self) -> Node {
        match self {
            Descent::Exact(n) | Descent::Nearest(n) => n,
        }
    }
}

impl<S: IndexStore> Btree<S> {
    /// Спуск к узлу ключа. `start_location == 0` — начать с корня
    /// (отсутствующий корень даёт пустой корневой узел: новорождённый
    /// индекс ведёт себя как дерево из одного пустого листа); иное
    /// значение — продолжить спуск с узла по этому смещению.
    pub fn find_node_by_key(&mut self, start_location: i64, key: &Key) -> Result<Descent> {
        let mut node = if start_location == 0 {
            match self.get_root() {
                Ok(n) => n,
                Err(FletchError::NoRoot) => Node::empty_root(),
                Err(e) => return Err(e),
            }
        } else {
            self.read_node(start_location)?
        };

        loop {
            if node.get_by_key(key).is_ok() {
                return Ok(Descent::Exact(node));
            }
            match node.nearest_child_for(key) {
                Ok(child) => node = self.read_node(child)?,
                // Спускаться больше некуда: ключ жил бы в этом узле.
                Err(FletchError::NoNearestChild) => return Ok(Descent::Nearest(node)),
                Err(e) => return Err(e),
            }
        }
    }

    /// Смещение данных по ключу; `KeyNotFound`, если ключа в индексе нет.
    pub fn find(&mut self, key: &Key) -> Result<i64> {
        match self.find_node_by_key(0, key)? {
            Descent::Exact(node) => node
                .get_by_key(key)
                .map(|e| e.location)
                .map_err(|_| FletchError::KeyNotFound),
            Descent::Nearest(_) => Err(FletchError::KeyNotFound),
        }
    }
}
