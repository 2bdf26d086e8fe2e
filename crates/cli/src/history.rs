//! Per-iteration metrics of a run, written through polars (CSV or Parquet).

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub iteration: usize,
    pub density: f64,
    pub collisions: usize,
}

#[derive(Clone, Debug, Default)]
pub struct History {
    samples: Vec<Sample>,
}

impl History {
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        df!(
            "iteration" => self.samples.iter().map(|s| s.iteration as u64).collect::<Vec<_>>(),
            "density" => self.samples.iter().map(|s| s.density).collect::<Vec<_>>(),
            "collisions" => self.samples.iter().map(|s| s.collisions as u64).collect::<Vec<_>>(),
        )
    }

    /// Format picked by extension: `.parquet`, anything else is CSV.
    pub fn write(&self, path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("parquet") => self.write_parquet(path),
            _ => self.write_csv(path),
        }
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut df = self.to_frame()?;
        let mut file = create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn write_parquet(&self, path: &Path) -> Result<()> {
        let mut df = self.to_frame()?;
        let file = create(path)?;
        ParquetWriter::new(file)
            .finish(&mut df)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    File::create(path).with_context(|| format!("creating {}", path.display()))
}
