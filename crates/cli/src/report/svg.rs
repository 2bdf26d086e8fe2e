//! Graphical reporter: one SVG frame per update.
//!
//! Each frame holds the global polygons (and region) on the left and the
//! density and collision histories on the right. The polygon view box is
//! fixed at `init` from the initial polygons and region, so consecutive
//! frames share coordinates and can be flipped through.

use super::{Progress, Reporter, Schedule};
use anyhow::{Context, Result};
use polypack::{Polygon, Vec2};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const PIXELS: f64 = 800.0;
const MARGIN_FRAC: f64 = 0.25;
const CHART_W: f64 = 400.0;
const CHART_H: f64 = PIXELS / 2.0;
const CHART_PAD: f64 = 40.0;

pub struct SvgReporter {
    dir: PathBuf,
    schedule: Schedule,
    view: (Vec2<f64>, Vec2<f64>),
    region: Option<Polygon>,
    density: Vec<(usize, f64)>,
    collisions: Vec<(usize, f64)>,
    written: Vec<PathBuf>,
}

impl SvgReporter {
    pub fn new(dir: PathBuf, schedule: Schedule) -> Self {
        Self {
            dir,
            schedule,
            view: (Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)),
            region: None,
            density: Vec::new(),
            collisions: Vec::new(),
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn frame_path(&self, iteration: usize) -> PathBuf {
        self.dir.join(format!("frame_{iteration:05}.svg"))
    }

    fn render(&self, progress: &Progress<'_>) -> String {
        let (lo, hi) = self.view;
        let size = hi - lo;
        let stroke = (size.x + size.y) / 2.0 * 0.004;
        let width = PIXELS + CHART_W;
        let mut doc = String::new();
        let _ = writeln!(
            doc,
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{width}" height="{PIXELS}" xmlns="http://www.w3.org/2000/svg">
  <rect x="0" y="0" width="{width}" height="{PIXELS}" fill="white" />"##
        );
        // y is flipped so the packing reads in mathematical orientation
        let _ = writeln!(
            doc,
            r##"  <svg x="0" y="0" width="{PIXELS}" height="{PIXELS}" viewBox="{} {} {} {}">
  <rect x="{}" y="{}" width="{}" height="{}" fill="#f0f0f0" />
  <g transform="scale(1,-1)">"##,
            lo.x, -hi.y, size.x, size.y, lo.x, -hi.y, size.x, size.y
        );
        if let Some(region) = &self.region {
            let _ = writeln!(
                doc,
                r##"    <polygon points="{}" fill="none" stroke="#d62728" stroke-width="{stroke}" stroke-dasharray="{},{}" />"##,
                points(region),
                stroke * 4.0,
                stroke * 2.0
            );
        }
        for poly in progress.polygons.unwrap_or_default() {
            let _ = writeln!(
                doc,
                r#"    <polygon points="{}" fill="rgba(31,119,180,0.6)" stroke="rgb(31,119,180)" stroke-width="{stroke}" />"#,
                points(poly)
            );
        }
        let _ = writeln!(doc, "  </g>\n  </svg>");
        let label = match (progress.density, progress.collisions) {
            (Some(d), Some(c)) => format!("iter {} density {d:.3} collisions {c}", progress.iteration + 1),
            _ => format!("iter {}", progress.iteration + 1),
        };
        let _ = writeln!(
            doc,
            r#"  <text x="8" y="20" font-family="monospace" font-size="14">{label}</text>"#
        );
        let last = self.schedule.total.saturating_sub(1).max(1);
        let max_hits = self
            .collisions
            .iter()
            .map(|&(_, c)| c)
            .fold(1.0, f64::max);
        chart(&mut doc, 0.0, "density", &self.density, last, 1.0, "#d62728");
        chart(&mut doc, CHART_H, "collisions", &self.collisions, last, max_hits, "#1f77b4");
        doc.push_str("</svg>\n");
        doc
    }
}

/// Line chart of `series` in the panel at `(PIXELS, top)`; x spans `0..=x_max`, y spans `0..=y_max`.
fn chart(
    doc: &mut String,
    top: f64,
    title: &str,
    series: &[(usize, f64)],
    x_max: usize,
    y_max: f64,
    color: &str,
) {
    let inner_w = CHART_W - 2.0 * CHART_PAD;
    let inner_h = CHART_H - 2.0 * CHART_PAD;
    let pts = series
        .iter()
        .map(|&(i, v)| {
            let x = CHART_PAD + (i as f64 / x_max as f64).min(1.0) * inner_w;
            let y = CHART_PAD + (1.0 - (v / y_max).clamp(0.0, 1.0)) * inner_h;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(
        doc,
        r##"  <g transform="translate({PIXELS},{top})">
    <rect x="{CHART_PAD}" y="{CHART_PAD}" width="{inner_w}" height="{inner_h}" fill="none" stroke="#808080" />
    <text x="{CHART_PAD}" y="{}" font-family="monospace" font-size="14">{title} (max {y_max})</text>
    <polyline points="{pts}" fill="none" stroke="{color}" stroke-width="1.5" />
  </g>"##,
        CHART_PAD - 8.0
    );
}

fn points(poly: &Polygon) -> String {
    poly.vertices()
        .iter()
        .map(|p| format!("{:.4},{:.4}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn padded_bounds<'a>(polys: impl Iterator<Item = &'a Polygon>) -> Option<(Vec2<f64>, Vec2<f64>)> {
    let (lo, hi) = polys.filter_map(Polygon::bounds).reduce(|(alo, ahi), (blo, bhi)| {
        (
            Vec2::new(alo.x.min(blo.x), alo.y.min(blo.y)),
            Vec2::new(ahi.x.max(bhi.x), ahi.y.max(bhi.y)),
        )
    })?;
    // square view so the aspect ratio is preserved
    let mid = (lo + hi) * 0.5;
    let half = (hi - lo).max() * 0.5 * (1.0 + MARGIN_FRAC);
    let half = if half > 0.0 { half } else { 1.0 };
    Some((mid.add_scalar(-half), mid.add_scalar(half)))
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}

impl Reporter for SvgReporter {
    fn init(&mut self, polygons: &[Polygon], region: Option<&Polygon>) -> Result<()> {
        ensure_dir(&self.dir)?;
        self.region = region.cloned();
        if let Some(view) = padded_bounds(polygons.iter().chain(region)) {
            self.view = view;
        }
        Ok(())
    }

    fn stop_requested(&self) -> bool {
        false
    }

    fn needs_update(&self, iteration: usize) -> bool {
        self.schedule.due(iteration)
    }

    fn update(&mut self, progress: &Progress<'_>) -> Result<()> {
        if let Some(d) = progress.density {
            self.density.push((progress.iteration, d));
        }
        if let Some(c) = progress.collisions {
            self.collisions.push((progress.iteration, c as f64));
        }
        let path = self.frame_path(progress.iteration);
        std::fs::write(&path, self.render(progress))
            .with_context(|| format!("writing {}", path.display()))?;
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        tracing::info!(frames = self.written.len(), dir = %self.dir.display(), "svg_frames");
        Ok(())
    }
}
