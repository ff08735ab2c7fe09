use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use super::{Document, StoreError};

/// Whole-document JSON storage rooted at a single data directory.
///
/// Every operation reads or replaces one complete document; there is no
/// partial update and no locking across processes. Files are UTF-8 JSON,
/// pretty-printed with a 4-space indent to stay byte-compatible with data
/// files produced by earlier versions of the application.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, doc: Document) -> PathBuf {
        self.root.join(doc.file_name())
    }

    /// Load a document. A missing file is `StoreError::NotFound`, never an
    /// empty value; callers decide whether that is fatal.
    pub fn read<T: DeserializeOwned>(&self, doc: Document) -> Result<T, StoreError> {
        let path = self.path_for(doc);
        if !path.exists() {
            return Err(StoreError::NotFound(path));
        }
        let file = File::open(&path)?;
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(value)
    }

    /// Load a document, treating a missing file as the default value.
    /// Only the meal plan and settings use this.
    pub fn read_or_default<T>(&self, doc: Document) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        match self.read(doc) {
            Err(StoreError::NotFound(_)) => Ok(T::default()),
            other => other,
        }
    }

    /// Replace a document with the serialized value.
    pub fn write<T: Serialize>(&self, doc: Document, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(doc);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        {
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer =
                serde_json::Serializer::with_formatter(&mut writer, formatter);
            value.serialize(&mut serializer)?;
        }
        writer.flush()?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}
