//! Server Configuration

use std::path::PathBuf;

/// Settings read from the environment at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// Optional JSON seed for the in-memory catalog
    pub catalog_path: Option<PathBuf>,

    /// Directory holding the built WASM front end
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            catalog_path: None,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            catalog_path: non_empty("CATALOG_PATH").map(PathBuf::from),
            static_dir: non_empty("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("CATALOG_PATH", "catalog.json"),
            ("STATIC_DIR", "dist"),
        ]);

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
        assert_eq!(config.static_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config_from(&[("BIND_ADDR", " "), ("CATALOG_PATH", "")]);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert!(config.catalog_path.is_none());
    }
}
