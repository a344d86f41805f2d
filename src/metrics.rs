//! Lightweight global metrics for FletchDB.
//!
//! Потокобезопасные атомарные счётчики для подсистем:
//! - Node I/O (чтения/записи/релокации, forward hops)
//! - Root pointer (перезаписи заголовка)
//! - Node cache (hits/misses)

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Node I/O -----
static NODE_READS_TOTAL: AtomicU64 = AtomicU64::new(0);
static NODE_WRITES_TOTAL: AtomicU64 = AtomicU64::new(0);
static NODE_RELOCATIONS_TOTAL: AtomicU64 = AtomicU64::new(0);
static FORWARD_HOPS_TOTAL: AtomicU64 = AtomicU64::new(0);

// ----- Root pointer -----
static ROOT_REWRITES_TOTAL: AtomicU64 = AtomicU64::new(0);

// ----- Node cache -----
static NODE_CACHE_HITS: AtomicU64 = AtomicU64::new(0);
static NODE_CACHE_MISSES: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub node_reads_total: u64,
    pub node_writes_total: u64,
    pub node_relocations_total: u64,
    pub forward_hops_total: u64,

    pub root_rewrites_total: u64,

    pub node_cache_hits: u64,
    pub node_cache_misses: u64,
}

impl MetricsSnapshot {
    pub fn cache_hit_ratio(&self) -> f64 {
        let total = self.node_cache_hits + self.node_cache_misses;
        if total == 0 {
            0.0
        } else {
            self.node_cache_hits as f64 / total as f64
        }
    }
}

// ----- Recorders (Node I/O) -----
pub fn record_node_read() {
    NODE_READS_TOTAL.fetch_add(1, Ordering::Relaxed);
}
pub fn record_node_write() {
    NODE_WRITES_TOTAL.fetch_add(1, Ordering::Relaxed);
}
pub fn record_node_relocation() {
    NODE_RELOCATIONS_TOTAL.fetch_add(1, Ordering::Relaxed);
}
pub fn record_forward_hop() {
    FORWARD_HOPS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Root pointer) -----
pub fn record_root_rewrite() {
    ROOT_REWRITES_TOTAL.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Node cache) -----
pub fn record_cache_hit() {
    NODE_CACHE_HITS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_cache_miss() {
    NODE_CACHE_MISSES.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        node_reads_total: NODE_READS_TOTAL.load(Ordering::Relaxed),
        node_writes_total: NODE_WRITES_TOTAL.load(Ordering::Relaxed),
        node_relocations_total: NODE_RELOCATIONS_TOTAL.load(Ordering::Relaxed),
        forward_hops_total: FORWARD_HOPS_TOTAL.load(Ordering::Relaxed),

        root_rewrites_total: ROOT_REWRITES_TOTAL.load(Ordering::Relaxed),

        node_cache_hits: NODE_CACHE_HITS.load(Ordering::Relaxed),
        node_cache_misses: NODE_CACHE_MISSES.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    NODE_READS_TOTAL.store(0, Ordering::Relaxed);
    NODE_WRITES_TOTAL.store(0, Ordering::Relaxed);
    NODE_RELOCATIONS_TOTAL.store(0, Ordering::Relaxed);
    FORWARD_HOPS_TOTAL.store(0, Ordering::Relaxed);
    ROOT_REWRITES_TOTAL.store(0, Ordering::Relaxed);
    NODE_CACHE_HITS.store(0, Ordering::Relaxed);
    NODE_CACHE_MISSES.store(0, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_handles_zero_total() {
        let s = MetricsSnapshot::default();
        assert_eq!(s.cache_hit_ratio(), 0.0);

        let s = MetricsSnapshot {
            node_cache_hits: 3,
            node_cache_misses: 1,
            ..Default::default()
        };
        assert!((s.cache_hit_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
