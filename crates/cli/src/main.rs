use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use polypack::sample::{demo_shapes, random_scene, StarCfg};
use polypack::vtk::{self, CellScalars};
use polypack::{Frame, PolyPacker, Polygon, ShapeInput};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod driver;
mod history;
mod provenance;
mod report;
mod scene;

use driver::{run_loop, LoopCfg};
use provenance::Payload;
use report::{ConsoleReporter, Reporter, Schedule, Silent, SvgReporter};
use scene::{box_region, Scene};

#[derive(Parser)]
#[command(name = "polypack")]
#[command(about = "Relax 2D polygons into a dense packing")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Pack polygons from a JSON or CSV scene file
    Run {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Pack the four-shape demo scene
    Demo {
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Pack randomly drawn star-shaped polygons
    Random {
        #[arg(long, default_value_t = 20)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Radius of the disk the initial centers are drawn from
        #[arg(long, default_value_t = 4.0)]
        spread: f64,
        /// Also write the drawn scene as JSON
        #[arg(long)]
        save_scene: Option<PathBuf>,
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug, Serialize)]
struct SimArgs {
    #[arg(long, default_value_t = 200)]
    steps: usize,
    #[arg(long, default_value_t = 0.01)]
    attraction: f64,
    #[arg(long, default_value_t = 0.2)]
    repulsion: f64,
    /// Report every n-th iteration (first and last are always reported)
    #[arg(long, default_value_t = 5)]
    update_every: usize,
    #[arg(long, value_enum, default_value_t = ReporterKind::Console)]
    reporter: ReporterKind,
    /// Directory watched for STOP/ABORT files (console reporter)
    #[arg(long, default_value = ".")]
    stop_dir: PathBuf,
    /// Output directory for SVG frames (svg reporter)
    #[arg(long, default_value = "frames")]
    frames_dir: PathBuf,
    /// Axis-aligned density region, overrides a scene region
    #[arg(long, num_args = 4, value_names = ["X0", "Y0", "X1", "Y1"], allow_negative_numbers = true)]
    region: Option<Vec<f64>>,
    /// Final packing as legacy VTK
    #[arg(long, default_value = "packing.vtk")]
    out: PathBuf,
    /// Per-iteration density and collision counts (.csv or .parquet)
    #[arg(long)]
    history: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum ReporterKind {
    Console,
    Svg,
    None,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run { input, sim } => {
            let scene = Scene::load(&input)?;
            let source = input.display().to_string();
            pack(scene.shapes(), scene.region_polygon(), &sim, &source)
        }
        Action::Demo { sim } => pack(to_inputs(demo_shapes()), None, &sim, "demo"),
        Action::Random {
            count,
            seed,
            spread,
            save_scene,
            sim,
        } => {
            let shapes = random_scene(count, spread, StarCfg::default(), seed);
            if let Some(path) = save_scene {
                let json = serde_json::to_vec_pretty(&Scene::from_polygons(&shapes))?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?;
                tracing::info!(path = %path.display(), "scene_saved");
            }
            let source = format!("random(count={count}, seed={seed}, spread={spread})");
            pack(to_inputs(shapes), None, &sim, &source)
        }
        Action::Report => report(),
    }
}

fn to_inputs(polys: Vec<Polygon>) -> Vec<ShapeInput> {
    polys.into_iter().map(ShapeInput::from).collect()
}

fn pack(
    shapes: Vec<ShapeInput>,
    scene_region: Option<Polygon>,
    sim: &SimArgs,
    source: &str,
) -> Result<()> {
    let region = match &sim.region {
        Some(corners) => Some(box_region(corners)?),
        None => scene_region,
    };
    let mut packer = PolyPacker::with_capacity(shapes.len());
    packer
        .add_polygons(shapes)
        .with_context(|| format!("loading polygons from {source}"))?;
    tracing::info!(
        source,
        polygons = packer.len(),
        steps = sim.steps,
        attraction = sim.attraction,
        repulsion = sim.repulsion,
        "run"
    );

    let schedule = Schedule {
        total: sim.steps,
        every: sim.update_every,
    };
    let mut reporter: Box<dyn Reporter> = match sim.reporter {
        ReporterKind::Console => Box::new(ConsoleReporter::new(
            io::stdout(),
            schedule,
            sim.stop_dir.clone(),
        )),
        ReporterKind::Svg => Box::new(SvgReporter::new(sim.frames_dir.clone(), schedule)),
        ReporterKind::None => Box::new(Silent),
    };
    let cfg = LoopCfg {
        steps: sim.steps,
        attraction: sim.attraction,
        repulsion: sim.repulsion,
        record_history: sim.history.is_some(),
    };
    let outcome = run_loop(&mut packer, region.as_ref(), cfg, reporter.as_mut())?;
    if outcome.stopped {
        println!("User-terminated stop");
    }

    let payload = Payload::new(serde_json::json!({
        "sim": sim,
        "steps_done": outcome.steps_done,
        "stopped": outcome.stopped,
    }))
    .with_input(source);

    let polygons = packer.polygons(Frame::Global);
    let counts: Vec<f64> = packer
        .collision_counts()
        .into_iter()
        .map(|c| c as f64)
        .collect();
    let vtk_path = vtk::write_polygons(
        &sim.out,
        &polygons,
        "Polygons",
        Some(CellScalars {
            name: "collisions",
            values: &counts,
        }),
    )
    .with_context(|| format!("writing {}", sim.out.display()))?;
    provenance::write_sidecar(&vtk_path, &payload)?;
    tracing::info!(path = %vtk_path.display(), "vtk_written");

    if let Some(path) = &sim.history {
        outcome.history.write(path)?;
        provenance::write_sidecar(path, &payload)?;
        tracing::info!(path = %path.display(), rows = outcome.history.len(), "history_written");
    }
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::document(&Payload::new(serde_json::json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sim_for(dir: &std::path::Path, steps: usize) -> SimArgs {
        let steps = steps.to_string();
        let out = dir.join("demo").display().to_string();
        let history = dir.join("history.csv").display().to_string();
        let cmd = Cmd::try_parse_from([
            "polypack",
            "demo",
            "--steps",
            steps.as_str(),
            "--reporter",
            "none",
            "--region",
            "-2",
            "-2",
            "2",
            "2",
            "--out",
            out.as_str(),
            "--history",
            history.as_str(),
        ])
        .unwrap();
        match cmd.action {
            Action::Demo { sim } => sim,
            _ => unreachable!(),
        }
    }

    #[test]
    fn flags_parse_with_defaults() {
        let cmd = Cmd::try_parse_from(["polypack", "random", "--count", "5"]).unwrap();
        let Action::Random { count, seed, sim, .. } = cmd.action else {
            panic!("expected random");
        };
        assert_eq!((count, seed), (5, 0));
        assert_eq!(sim.steps, 200);
        assert_eq!(sim.update_every, 5);
        assert_eq!(sim.reporter, ReporterKind::Console);
        assert!(sim.region.is_none());
    }

    #[test]
    fn demo_run_writes_artifacts() {
        let dir = tempdir().unwrap();
        let sim = sim_for(dir.path(), 4);
        assert_eq!(sim.region, Some(vec![-2.0, -2.0, 2.0, 2.0]));
        pack(to_inputs(demo_shapes()), None, &sim, "demo").unwrap();

        let vtk = std::fs::read_to_string(dir.path().join("demo.vtk")).unwrap();
        assert!(vtk.contains("POLYGONS 4 "));
        assert!(vtk.contains("SCALARS collisions float 1"));
        assert!(dir.path().join("demo.vtk.provenance.json").exists());

        let history = std::fs::read_to_string(dir.path().join("history.csv")).unwrap();
        assert_eq!(history.lines().count(), 5);
        assert!(dir.path().join("history.csv.provenance.json").exists());
    }
}
