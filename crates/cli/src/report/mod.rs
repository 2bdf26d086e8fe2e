//! Reporting collaborators polled by the driving loop.
//!
//! The packer knows nothing about these; the loop hands them the current
//! global polygons and metrics whenever `needs_update` says so, and asks
//! `stop_requested` after every step.

mod console;
mod svg;

pub use console::ConsoleReporter;
pub use svg::SvgReporter;

use anyhow::Result;
use polypack::Polygon;

/// Snapshot handed to `Reporter::update`.
#[derive(Clone, Copy, Debug)]
pub struct Progress<'a> {
    pub iteration: usize,
    pub polygons: Option<&'a [Polygon]>,
    pub density: Option<f64>,
    pub collisions: Option<usize>,
}

pub trait Reporter {
    fn init(&mut self, polygons: &[Polygon], region: Option<&Polygon>) -> Result<()>;
    fn stop_requested(&self) -> bool;
    fn needs_update(&self, iteration: usize) -> bool;
    fn update(&mut self, progress: &Progress<'_>) -> Result<()>;
    /// Called once after the loop ends (normally or by stop request).
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Update cadence: first, last, and every `every`-th iteration of `total`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub total: usize,
    pub every: usize,
}

impl Schedule {
    pub fn due(&self, iteration: usize) -> bool {
        update_due(iteration, self.total, self.every, true, true)
    }
}

/// `every == 0` disables the periodic part.
pub fn update_due(n: usize, n_max: usize, every: usize, at_start: bool, at_end: bool) -> bool {
    let is_start = at_start && n == 0;
    let is_end = at_end && n + 1 == n_max;
    let is_nth = every > 0 && n % every == 0;
    is_start || is_end || is_nth
}

/// Reporter that shows nothing and never stops the loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Reporter for Silent {
    fn init(&mut self, _polygons: &[Polygon], _region: Option<&Polygon>) -> Result<()> {
        Ok(())
    }
    fn stop_requested(&self) -> bool {
        false
    }
    fn needs_update(&self, _iteration: usize) -> bool {
        false
    }
    fn update(&mut self, _progress: &Progress<'_>) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_includes_first_and_last() {
        let s = Schedule { total: 12, every: 5 };
        let due: Vec<usize> = (0..12).filter(|&n| s.due(n)).collect();
        assert_eq!(due, vec![0, 5, 10, 11]);
    }

    #[test]
    fn zero_every_only_hits_ends() {
        assert!(update_due(0, 10, 0, true, true));
        assert!(!update_due(4, 10, 0, true, true));
        assert!(update_due(9, 10, 0, true, true));
        assert!(!update_due(9, 10, 0, true, false));
        assert!(!update_due(0, 10, 0, false, false));
    }
}
