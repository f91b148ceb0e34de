use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use crate::input::parse_record_line;
use crate::model::record::SalesRecord;
use crate::repository::traits::RecordSource;

const FILE_EXTENSION: &str = "txt";

/// Reads one `<yyyy-MM-dd>.txt` file per day; only its first line is used.
#[derive(Clone, Debug)]
pub struct FileRecordSource {
    base_dir: PathBuf,
}

impl FileRecordSource {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let base_dir = match base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Could not determine working directory")?,
        };
        if !base_dir.is_dir() {
            return Err(anyhow!("Data directory {} does not exist", base_dir.display()));
        }
        Ok(FileRecordSource { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", date.format("%Y-%m-%d"), FILE_EXTENSION))
    }
}

impl RecordSource for FileRecordSource {
    fn load(&self, date: NaiveDate) -> Result<SalesRecord> {
        let path = self.path_for(date);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let line = content
            .lines()
            .next()
            .ok_or_else(|| anyhow!("{} is empty", path.display()))?;

        parse_record_line(line).with_context(|| format!("Could not parse {}", path.display()))
    }
}
