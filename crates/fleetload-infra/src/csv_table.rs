//! Whole-file CSV tables
//!
//! Each table is read completely, changed in memory, and written back with
//! its header row. A missing file reads as an empty table.

use std::fs;
use std::path::{Path, PathBuf};

use fleetload_types::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// A CSV file with a fixed header row
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
    headers: &'static [&'static str],
}

impl CsvTable {
    pub fn new(path: PathBuf, headers: &'static [&'static str]) -> Self {
        Self { path, headers }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row
    pub fn read_rows<R: DeserializeOwned>(&self) -> Result<Vec<R>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            rows.push(result?);
        }
        debug!(path = %self.path.display(), rows = rows.len(), "Loaded CSV table");
        Ok(rows)
    }

    /// Replace the file contents with `rows`
    pub fn write_rows<R: Serialize>(&self, rows: &[R]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(self.headers)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Count (Units)")]
        count: u32,
    }

    const HEADERS: &[&str] = &["Name", "Count (Units)"];

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("none.csv"), HEADERS);
        let rows: Vec<Row> = table.read_rows().unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let dir = tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("empty.csv"), HEADERS);
        table.write_rows::<Row>(&[]).unwrap();

        let content = fs::read_to_string(table.path()).unwrap();
        assert_eq!(content.trim(), "Name,Count (Units)");
    }

    #[test]
    fn test_rows_survive_rewrite() {
        let dir = tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("nested").join("rows.csv"), HEADERS);
        let rows = vec![
            Row {
                name: "alpha".into(),
                count: 3,
            },
            Row {
                name: "beta, gamma".into(),
                count: 0,
            },
        ];
        table.write_rows(&rows).unwrap();

        let back: Vec<Row> = table.read_rows().unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_hand_written_file_with_spaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hand.csv");
        fs::write(&path, "Name,Count (Units)\n  delta , 7 \n").unwrap();

        let rows: Vec<Row> = CsvTable::new(path, HEADERS).read_rows().unwrap();
        assert_eq!(
            rows,
            vec![Row {
                name: "delta".into(),
                count: 7
            }]
        );
    }
}
