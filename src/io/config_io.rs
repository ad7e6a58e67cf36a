use std::fs;
use std::path::{Path, PathBuf};

use toml_edit::{DocumentMut, Item, Table, value};
use tracing::debug;

use crate::io::store::{StoreError, atomic_write};
use crate::model::config::Config;

/// Get the config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("tally").join("config.toml")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        dirs_home()
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs_home().join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Read the config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe rewriting. A missing file is
/// created with defaults.
pub fn read_config(path: &Path) -> Result<(Config, DocumentMut), StoreError> {
    if !path.exists() {
        let config = Config::default();
        let mut doc = DocumentMut::new();
        write_config(path, &mut doc, &config)?;
        debug!(path = %path.display(), "created default config");
        return Ok((config, doc));
    }

    let text = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| StoreError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let doc: DocumentMut = text.parse().map_err(|e| StoreError::DocumentError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok((config, doc))
}

/// Copy `config` into the document (keeping comments and key order) and
/// write it back to disk.
pub fn write_config(path: &Path, doc: &mut DocumentMut, config: &Config) -> Result<(), StoreError> {
    apply_config(doc, config);
    atomic_write(path, doc.to_string().as_bytes()).map_err(|e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn ensure_table<'a>(parent: &'a mut Table, key: &str) -> &'a mut Table {
    if !parent.get(key).is_some_and(Item::is_table) {
        parent.insert(key, Item::Table(Table::new()));
    }
    parent[key]
        .as_table_mut()
        .expect("table inserted above")
}

/// Update the document's values from the in-memory config
pub fn apply_config(doc: &mut DocumentMut, config: &Config) {
    let root = doc.as_table_mut();
    root["data_path"] = value(&config.data_path);
    root["debug"] = value(config.debug);

    let git = ensure_table(root, "git");
    git["username"] = value(&config.git.username);
    git["mail"] = value(&config.git.mail);
    git["token"] = value(&config.git.token);

    if !config.ui.colors.is_empty() {
        let ui = ensure_table(root, "ui");
        let colors = ensure_table(ui, "colors");
        for (slot, hex) in &config.ui.colors {
            colors[slot.as_str()] = value(hex);
        }
    }
}
