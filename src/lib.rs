#![allow(non_snake_case)]

// Базовые модули
pub mod config;
pub mod consts;
pub mod error;
pub mod metrics;

// Формат узлов (ключи, элементы, codec)
pub mod node; // src/node/{mod,key,element,core,codec}.rs

// Backing store (контракт + реализации)
pub mod store; // src/store/{mod,memory,file}.rs

// Движок индекса
pub mod btree; // src/btree/{mod,core,cache,io,search,insert}.rs

// Удобные реэкспорты
pub use btree::{Btree, Descent};
pub use config::{BtreeBuilder, FletchConfig};
pub use error::{FletchError, Result};
pub use node::{Element, Key, KeyKind, Node};
pub use store::{FileStore, MemStore};
