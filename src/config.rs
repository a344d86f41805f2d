//! Centralized configuration and builder for FletchDB.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - Every default works untouched; env vars only override.
//!
//! Tunables:
//! - node_cache_nodes: ёмкость кэша узлов (0 — выключен).
//! - data_fsync: fsync файла после каждой записи FileStore.

use std::fmt;

/// Top-level configuration for a FletchDB index handle.
#[derive(Clone, Debug)]
pub struct FletchConfig {
    /// Node cache capacity in nodes (0 disables).
    /// Env: F1_NODE_CACHE_NODES (default 1024)
    pub node_cache_nodes: usize,

    /// Whether FileStore fsyncs data after every write.
    /// Env: F1_DATA_FSYNC (default false; "1|true|on|yes" => true)
    pub data_fsync: bool,
}

impl Default for FletchConfig {
    fn default() -> Self {
        Self {
            node_cache_nodes: 1024,
            data_fsync: false,
        }
    }
}

impl FletchConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("F1_NODE_CACHE_NODES") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.node_cache_nodes = n;
            }
        }

        if let Ok(v) = std::env::var("F1_DATA_FSYNC") {
            let s = v.trim().to_ascii_lowercase();
            cfg.data_fsync = s == "1" || s == "true" || s == "on" || s == "yes";
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_node_cache_nodes(mut self, nodes: usize) -> Self {
        self.node_cache_nodes = nodes;
        self
    }

    pub fn with_data_fsync(mut self, on: bool) -> Self {
        self.data_fsync = on;
        self
    }
}

impl fmt::Display for FletchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FletchConfig {{ node_cache_nodes: {}, data_fsync: {} }}",
            self.node_cache_nodes, self.data_fsync,
        )
    }
}

/// Lightweight builder that produces a FletchConfig.
#[derive(Clone, Debug)]
pub struct BtreeBuilder {
    cfg: FletchConfig,
}

impl Default for BtreeBuilder {
    fn default() -> Self {
        // Start from env to keep env-based deployments working, then allow overrides.
        Self {
            cfg: FletchConfig::from_env(),
        }
    }
}

impl BtreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: FletchConfig::default(),
        }
    }

    pub fn node_cache_nodes(mut self, nodes: usize) -> Self {
        self.cfg.node_cache_nodes = nodes;
        self
    }

    pub fn data_fsync(mut self, on: bool) -> Self {
        self.cfg.data_fsync = on;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> FletchConfig {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_overrides() {
        let cfg = FletchConfig::default();
        assert_eq!(cfg.node_cache_nodes, 1024);
        assert!(!cfg.data_fsync);

        let cfg = BtreeBuilder::from_default()
            .node_cache_nodes(16)
            .data_fsync(true)
            .build();
        assert_eq!(cfg.node_cache_nodes, 16);
        assert!(cfg.data_fsync);
    }

    #[test]
    fn display_mentions_fields() {
        let s = FletchConfig::default().to_string();
        assert!(s.contains("node_cache_nodes"));
        assert!(s.contains("data_fsync"));
    }
}
