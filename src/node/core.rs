//! node/core — узел B-дерева: упорядоченное ведро элементов одного kind'а.
//!
//! Инварианты:
//! - Все элементы узла одного kind'а (Node::add это гарантирует).
//! - После sort() элементы упорядочены по возрастанию ключа.
//! - remove() нарушает порядок (swap-remove); вызывающий код, которому
//!   нужен порядок, обязан вызвать sort().

use std::cmp::Ordering;

use crate::consts::{NO_CHILD, NO_LOCATION, NO_PARENT};
use crate::error::{FletchError, Result};

use super::element::Element;
use super::key::{Key, KeyKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub deleted: bool,
    /// Смещение узла в store; `NO_LOCATION` до первой записи.
    pub self_location: i64,
    /// `NO_PARENT` у корня.
    pub parent_id: i32,
    pub id: i32,
    /// Id предков от корня вниз; движком не интерпретируется.
    pub path: Vec<i32>,
    pub elements: Vec<Element>,
}

impl Node {
    pub fn new(parent_id: i32, id: i32, elements: Vec<Element>, path: Vec<i32>) -> Node {
        Node {
            deleted: false,
            self_location: NO_LOCATION,
            parent_id,
            id,
            path,
            elements,
        }
    }

    /// Пустой корень новорождённого индекса.
    pub fn empty_root() -> Node {
        Node::new(NO_PARENT, 0, Vec::new(), Vec::new())
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id == NO_PARENT
    }

    /// Kind узла — kind нулевого элемента; у пустого узла kind не задан.
    /// Смешение kind'ов исключено в add(), так что нулевого элемента
    /// достаточно.
    pub fn key_kind(&self) -> KeyKind {
        match self.elements.first() {
            Some(e) => e.key.kind(),
            None => KeyKind::Unset,
        }
    }

    /// Стабильная сортировка элементов по возрастанию ключа.
    pub fn sort(&mut self) {
        self.elements.sort_by(|a, b| a.key.compare(&b.key));
    }

    /// Добавить элемент и отсортировать. `MixedKinds`, если kind элемента
    /// не совпадает с kind'ом непустого узла.
    pub fn add(&mut self, element: Element) -> Result<()> {
        if !self.elements.is_empty() && element.key.kind() != self.key_kind() {
            return Err(FletchError::MixedKinds);
        }
        self.elements.push(element);
        self.sort();
        Ok(())
    }

    /// Удалить первый элемент с данным ключом (swap-remove). No-op на
    /// пустом узле и при несовпадении kind'а.
    pub fn remove(&mut self, key: &Key) {
        if self.elements.is_empty() || key.kind() != self.key_kind() {
            return;
        }
        if let Some(i) = self.elements.iter().position(|e| e.key == *key) {
            self.elements.swap_remove(i);
        }
    }

    /// Найти элемент по точному значению ключа (линейный скан).
    pub fn get_by_key(&self, key: &Key) -> Result<&Element> {
        if self.elements.is_empty() || key.kind() != self.key_kind() {
            return Err(FletchError::ElementNotFound);
        }
        self.elements
            .iter()
            .find(|e| e.key == *key)
            .ok_or(FletchError::ElementNotFound)
    }

    /// Смещение дочернего узла для продолжения спуска: элемент с
    /// минимальной |дистанцией| до ключа (при равенстве — первый по
    /// порядку), сторона по знаку дистанции; если выбранной стороны нет,
    /// берётся противоположная; нет обеих — `NoNearestChild`.
    pub fn nearest_child_for(&self, key: &Key) -> Result<i64> {
        let first = match self.elements.first() {
            Some(e) => e,
            None => return Err(FletchError::NoNearestChild),
        };
        let mut best_d = match first.distance_to(key) {
            Some(d) => d,
            // Kind ключа не совпадает с kind'ом узла.
            None => return Err(FletchError::NoNearestChild),
        };
        let mut best_i = 0usize;
        for (i, e) in self.elements.iter().enumerate().skip(1) {
            if let Some(d) = e.distance_to(key) {
                if d.abs_cmp(&best_d) == Ordering::Less {
                    best_d = d;
                    best_i = i;
                }
            }
        }

        let e = &self.elements[best_i];
        let (chosen, fallback) = if best_d.is_negative() {
            (e.less_location, e.more_location)
        } else {
            (e.more_location, e.less_location)
        };
        if chosen != NO_CHILD {
            Ok(chosen)
        } else if fallback != NO_CHILD {
            Ok(fallback)
        } else {
            Err(FletchError::NoNearestChild)
        }
    }
}
