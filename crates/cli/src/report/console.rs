//! Headless progress table; a `STOP` or `ABORT` file requests termination.
//!
//! Stop files already present at launch are honoured; they are only removed
//! when the run finishes.

use super::{Progress, Reporter, Schedule};
use anyhow::{Context, Result};
use polypack::Polygon;
use std::io::Write;
use std::path::PathBuf;

const STOP_FILES: [&str; 2] = ["STOP", "ABORT"];
const COLUMN: usize = 20;
const HEADER_EVERY: usize = 20;
const FILL: char = '-';

pub struct ConsoleReporter<W: Write> {
    out: W,
    schedule: Schedule,
    stop_dir: PathBuf,
    rows: usize,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, schedule: Schedule, stop_dir: PathBuf) -> Self {
        Self {
            out,
            schedule,
            stop_dir,
            rows: 0,
        }
    }

    /// Remove stop files so the next run does not terminate immediately.
    pub fn reset_stop(&self) -> Result<()> {
        for name in STOP_FILES {
            let path = self.stop_dir.join(name);
            if path.is_file() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("removing {}", path.display()))?;
            }
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn digits(&self) -> usize {
        self.schedule.total.max(1).to_string().len()
    }

    fn header(&self) -> String {
        let l = self.digits();
        // width of "ITER: {l} of {l} = {5.1}%"
        let progress_width = 19 + 2 * l;
        let sep = format!("{FILL}|{FILL}");
        format!(
            "#{}{sep}{}{sep}{}{FILL}|",
            center("Progress", progress_width - 1),
            center("density", COLUMN),
            center("num_hits", COLUMN),
        )
    }

    fn row(&self, progress: &Progress<'_>) -> String {
        let l = self.digits();
        let done = progress.iteration + 1;
        let total = self.schedule.total.max(1);
        let pct = done as f64 / total as f64 * 100.0;
        let density = progress
            .density
            .map(|d| format!("{d:>COLUMN$.6}"))
            .unwrap_or_else(|| " ".repeat(COLUMN));
        let collisions = progress
            .collisions
            .map(|c| format!("{c:>COLUMN$}"))
            .unwrap_or_else(|| " ".repeat(COLUMN));
        format!("ITER: {done:>l$} of {total:>l$} = {pct:>5.1}% | {density} | {collisions} |")
    }
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count());
    let left = pad / 2;
    let right = pad - left;
    format!(
        "{}{text}{}",
        FILL.to_string().repeat(left),
        FILL.to_string().repeat(right)
    )
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn init(&mut self, _polygons: &[Polygon], _region: Option<&Polygon>) -> Result<()> {
        Ok(())
    }

    fn stop_requested(&self) -> bool {
        STOP_FILES
            .iter()
            .any(|name| self.stop_dir.join(name).is_file())
    }

    fn needs_update(&self, iteration: usize) -> bool {
        self.schedule.due(iteration)
    }

    fn update(&mut self, progress: &Progress<'_>) -> Result<()> {
        if self.rows % HEADER_EVERY == 0 {
            let header = self.header();
            writeln!(self.out, "{header}")?;
        }
        let row = self.row(progress);
        writeln!(self.out, "{row}")?;
        self.out.flush()?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.reset_stop()
    }
}
