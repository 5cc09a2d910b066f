//! Loading of robot configuration files.
//!
//! Every configuration struct lives in its own toml file inside a configuration directory. A
//! robot specific overlay directory may contain a file with the same name that overrides a
//! subset of the values, e.g. a slightly different initial posture for one robot.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use toml::Table;

pub mod error;

pub use error::{Error, Result};

/// A configuration struct that is stored in a toml file named [`Config::PATH`].
pub trait Config: DeserializeOwned {
    /// File name of the configuration, relative to the configuration directory.
    const PATH: &'static str;

    /// Load the configuration from `dir`.
    fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(Self::PATH);
        let table = read_table(&path)?;

        deserialize(table, &path)
    }

    /// Load the configuration from `dir`, with the values found in `overlay_dir` taking precedence.
    ///
    /// A missing overlay file is not an error, the main configuration is used as is.
    fn load_with_overlay(dir: impl AsRef<Path>, overlay_dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(Self::PATH);
        let main = read_table(&path)?;

        let overlay_path = overlay_dir.as_ref().join(Self::PATH);
        if !overlay_path.exists() {
            tracing::debug!(?overlay_path, "no overlay found, using main configuration");
            return deserialize(main, &path);
        }

        let overlay = read_table(&overlay_path)?;
        deserialize(merge_tables(main, overlay, false), &overlay_path)
    }
}

fn read_table(path: &Path) -> Result<Table> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        source,
        path: path.to_path_buf(),
    })?;

    toml::from_str(&contents).map_err(|source| Error::Deserialize {
        source,
        path: path.to_path_buf(),
    })
}

fn deserialize<T: DeserializeOwned>(table: Table, path: &Path) -> Result<T> {
    toml::Value::Table(table)
        .try_into()
        .map_err(|source| Error::Deserialize {
            source,
            path: path.to_path_buf(),
        })
}

/// Merge `overlay` on top of `main`.
///
/// Nested tables are merged recursively, any other value in `overlay` replaces the value in
/// `main`. Keys that only exist in `overlay` are added when `add_keys` is set, and dropped
/// otherwise.
#[must_use]
pub fn merge_tables(main: Table, mut overlay: Table, add_keys: bool) -> Table {
    let mut merged = Table::new();

    for (key, value) in main {
        let merged_value = match (value, overlay.remove(&key)) {
            (toml::Value::Table(main_table), Some(toml::Value::Table(overlay_table))) => {
                toml::Value::Table(merge_tables(main_table, overlay_table, add_keys))
            }
            (_, Some(overlay_value)) => overlay_value,
            (value, None) => value,
        };

        merged.insert(key, merged_value);
    }

    for (key, value) in overlay {
        if add_keys {
            merged.insert(key, value);
        } else {
            tracing::warn!(%key, "ignoring overlay key that is not in the main configuration");
        }
    }

    merged
}

#[cfg(test)]
mod tests;
