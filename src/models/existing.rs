use crate::error::Result;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Identifiers already registered in a Galaxy data table
///
/// Only the first tab-separated column (the `value`) of each row is kept.
/// Used as a skip filter; never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingEntries {
    values: HashSet<String>,
}

impl ExistingEntries {
    /// Load from a `.loc`-style data table
    ///
    /// A missing path, or a path that does not exist, yields an empty set.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            tracing::debug!("Data table {} not found, nothing registered yet", path.display());
            return Ok(Self::default());
        }

        let file = File::open(path)?;
        let entries = Self::from_reader(BufReader::new(file))?;

        tracing::debug!(
            "Loaded {} existing entries from {}",
            entries.len(),
            path.display()
        );

        Ok(entries)
    }

    /// Parse data table rows from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut values = HashSet::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // split always yields at least one field
            if let Some(value) = line.split('\t').next() {
                values.insert(value.to_string());
            }
        }

        Ok(Self { values })
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExistingEntries {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}
