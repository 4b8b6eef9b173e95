#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use encoding_rs::UTF_8;
use sales_lens::{
    config::ColumnNames,
    data,
    dataset::{Dataset, LoadOptions},
};
use tempfile::{TempDir, tempdir};

pub const SAMPLE_DATA: &str = "superstore_sample.csv";

pub const SCENARIO_CSV: &str = "Category,Sub_Category,Order_Date,Sales,Profit\n\
Furniture,Chairs,2023-01-05,100,10\n\
Furniture,Chairs,2023-02-10,50,-5\n\
Technology,Phones,2023-01-15,200,40\n";

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Parses CSV text with the default column names and date formats.
pub fn dataset_from_str(csv: &str) -> Dataset {
    let names = ColumnNames::default();
    let formats = data::default_date_formats();
    let options = LoadOptions {
        delimiter: b',',
        encoding: UTF_8,
        columns: &names,
        date_formats: &formats,
    };
    Dataset::from_reader(csv.as_bytes(), &options).expect("parse dataset")
}

/// Loads a fixture from `tests/data` with default settings.
pub fn load_fixture(name: &str) -> Dataset {
    let names = ColumnNames::default();
    let formats = data::default_date_formats();
    let options = LoadOptions {
        delimiter: b',',
        encoding: UTF_8,
        columns: &names,
        date_formats: &formats,
    };
    Dataset::load(&fixture_path(name), &options).expect("load fixture")
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents).expect("write temp file contents");
        path
    }
}
