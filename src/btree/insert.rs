//! btree/insert — вставка ключа.

use log::debug;

use crate::error::{FletchError, Result};
use crate::node::{Element, Key};
use crate::store::IndexStore;

use super::core::Btree;
use super::search::Descent;

impl<S: IndexStore> Btree<S> {
    /// Вставить `key -> location`. На уникальном индексе точный дубликат
    /// отклоняется до любой мутации store (`DuplicateKey`).
    pub fn insert(&mut self, key: Key, location: i64) -> Result<()> {
        let mut node = match self.find_node_by_key(0, &key)? {
            Descent::Exact(n) => {
                if self.unique {
                    return Err(FletchError::DuplicateKey);
                }
                n
            }
            Descent::Nearest(n) => n,
        };

        let capacity = usize::try_from(self.max_elements_per_node).unwrap_or(0);
        if node.elements.len() >= capacity {
            // TODO: node split; пока переполнение листа — типизированный отказ.
            return Err(FletchError::LeafFull);
        }

        node.add(Element::leaf(key, location))?;

        let at = if node.is_root() {
            self.write_root(&mut node)?
        } else {
            self.write_node(&mut node)?
        };
        debug!(
            "insert: node {} now holds {} element(s) at {}",
            node.id,
            node.elements.len(),
            at
        );
        Ok(())
    }
}
