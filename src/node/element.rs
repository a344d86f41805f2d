//! node/element — один элемент узла: ключ -> data location + дети.

use crate::consts::NO_CHILD;
use crate::error::{FletchError, Result};

use super::key::{Distance, Key, KeyKind};

/// Запись внутри узла. `location` указывает в data-регион (вне индекса),
/// `less_location`/`more_location` — смещения дочерних узлов в store,
/// `NO_CHILD` при отсутствии.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub key: Key,
    pub location: i64,
    pub less_location: i64,
    pub more_location: i64,
}

impl Element {
    /// Конструктор с проверкой согласованности kind'а и значения ключа.
    pub fn new(
        kind: KeyKind,
        key: Key,
        location: i64,
        less_location: i64,
        more_location: i64,
    ) -> Result<Element> {
        if kind == KeyKind::Unset || key.kind() != kind {
            return Err(FletchError::UnknownKeyKind);
        }
        Ok(Element {
            key,
            location,
            less_location,
            more_location,
        })
    }

    /// Листовой элемент без детей.
    pub fn leaf(key: Key, location: i64) -> Element {
        Element {
            key,
            location,
            less_location: NO_CHILD,
            more_location: NO_CHILD,
        }
    }

    /// Есть ли у элемента дочерние узлы с какой-либо стороны.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.less_location != NO_CHILD || self.more_location != NO_CHILD
    }

    /// Дистанция `key − self.key`; `None` при несовпадении kind'ов.
    #[inline]
    pub fn distance_to(&self, key: &Key) -> Option<Distance> {
        self.key.distance_to(key)
    }
}
