//! The relaxation loop: step the packer, poll metrics, feed the reporter.

use crate::history::{History, Sample};
use crate::report::{Progress, Reporter};
use anyhow::Result;
use polypack::metrics::{overlap_area, OverlapMode};
use polypack::{Frame, PolyPacker, Polygon};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopCfg {
    pub steps: usize,
    pub attraction: f64,
    pub repulsion: f64,
    pub record_history: bool,
}

#[derive(Debug, Default)]
pub struct Outcome {
    pub steps_done: usize,
    pub stopped: bool,
    pub history: History,
}

/// Density and colliding-pair count of the current positions.
pub fn measure(packer: &PolyPacker, region: Option<&Polygon>) -> Result<(Vec<Polygon>, f64, usize)> {
    let polygons = packer.polygons(Frame::Global);
    let density = overlap_area(&polygons, region, OverlapMode::Relative)?;
    let collisions = packer.find_intersections().pair_count();
    Ok((polygons, density, collisions))
}

pub fn run_loop(
    packer: &mut PolyPacker,
    region: Option<&Polygon>,
    cfg: LoopCfg,
    reporter: &mut dyn Reporter,
) -> Result<Outcome> {
    let mut outcome = Outcome::default();
    reporter.init(&packer.polygons(Frame::Global), region)?;
    for iteration in 0..cfg.steps {
        packer.step(cfg.attraction, cfg.repulsion)?;
        outcome.steps_done = iteration + 1;

        let due = reporter.needs_update(iteration);
        if due || cfg.record_history {
            let (polygons, density, collisions) = measure(packer, region)?;
            if cfg.record_history {
                outcome.history.push(Sample {
                    iteration,
                    density,
                    collisions,
                });
            }
            if due {
                reporter.update(&Progress {
                    iteration,
                    polygons: Some(&polygons),
                    density: Some(density),
                    collisions: Some(collisions),
                })?;
            }
        }

        if reporter.stop_requested() {
            tracing::info!(iteration, "stop requested");
            outcome.stopped = true;
            break;
        }
    }
    reporter.finish()?;
    Ok(outcome)
}
