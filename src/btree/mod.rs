//! btree — движок индекса.
//!
//! Разделение по подмодулям:
//! - core.rs   — структура Btree, open()/open_with_config().
//! - cache.rs  — кэш узлов движка (second-chance), ключ -1 за корнем.
//! - io.rs     — read_node/get_root/write_node/write_root поверх store.
//! - search.rs — спуск по дереву (find_node_by_key) и find().
//! - insert.rs — insert() с проверкой дубликатов и ёмкости листа.

pub mod cache;
pub mod core;
pub mod insert;
pub mod io;
pub mod search;

// Re-exports для внешнего API
pub use core::Btree;
pub use search::Descent;
