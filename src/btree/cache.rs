//! btree/cache — кэш декодированных узлов (second-chance).
//!
//! Отображение «смещение в store -> Node» с зарезервированным ключом
//! `ROOT_CACHE_KEY` (-1) за текущим корнем. Кэш приватен движку: записи
//! появляются при чтении, инвалидация происходит при записи узла, так
//! что внешний контракт от кэша не зависит. cap == 0 выключает кэш.

use std::collections::{HashMap, VecDeque};

use crate::node::Node;

struct CacheEntry {
    node: Node,
    refbit: bool,
}

pub(crate) struct NodeCache {
    // Максимум узлов в кэше; 0 — выключен.
    cap: usize,
    // Очередь для second-chance (FIFO с refbit)
    q: VecDeque<i64>,
    // Основное хранилище
    map: HashMap<i64, CacheEntry>,
    // Счётчик выселений (диагностика)
    evictions_total: u64,
}

impl NodeCache {
    pub(crate) fn new(cap: usize) -> Self {
        Self {
            cap,
            q: VecDeque::new(),
            map: HashMap::new(),
            evictions_total: 0,
        }
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.cap > 0
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn get(&mut self, offset: i64) -> Option<Node> {
        if !self.enabled() {
            return None;
        }
        if let Some(ent) = self.map.get_mut(&offset) {
            ent.refbit = true;
            return Some(ent.node.clone());
        }
        None
    }

    pub(crate) fn put(&mut self, offset: i64, node: &Node) {
        if !self.enabled() {
            return;
        }
        // Обновление существующей записи: только буфер и refbit.
        if let Some(ent) = self.map.get_mut(&offset) {
            ent.node = node.clone();
            ent.refbit = true;
            return;
        }

        // second-chance eviction до помещения нового элемента
        while self.map.len() >= self.cap {
            if !self.evict_one() {
                break;
            }
        }

        self.q.push_back(offset);
        self.map.insert(
            offset,
            CacheEntry {
                node: node.clone(),
                refbit: true,
            },
        );
    }

    fn evict_one(&mut self) -> bool {
        // Ищем ключ без refbit; refbit=1 обнуляем и отправляем в хвост.
        while let Some(k) = self.q.pop_front() {
            if let Some(e) = self.map.get_mut(&k) {
                if e.refbit {
                    e.refbit = false;
                    self.q.push_back(k);
                    continue;
                }
            }
            // Либо записи нет (ленивое очищение), либо refbit=0.
            let _ = self.map.remove(&k);
            self.evictions_total = self.evictions_total.saturating_add(1);
            return true;
        }
        false
    }

    pub(crate) fn invalidate(&mut self, offset: i64) {
        if !self.enabled() {
            return;
        }
        // Очередь чистится лениво в evict_one.
        let _ = self.map.remove(&offset);
    }

    #[allow(dead_code)]
    pub(crate) fn evictions_total(&self) -> u64 {
        self.evictions_total
    }
}
