//! Scene files: polygons in global coordinates plus an optional target region.
//!
//! - JSON: `{ "polygons": [[[x, y], ...], ...], "region": [[x, y], ...] }`
//! - CSV: one vertex per row with columns `polygon,x,y`; rows sharing a
//!   `polygon` id form one ring, in order of first appearance.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use polypack::{Polygon, ShapeInput};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Scene {
    pub polygons: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    pub region: Option<Vec<[f64; 2]>>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::load_json(path),
            Some("csv") => Self::load_csv(path),
            _ => bail!("unsupported scene file {} (expected .json or .csv)", path.display()),
        }
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn load_csv(path: &Path) -> Result<Self> {
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .finish()?
            .collect()
            .with_context(|| format!("reading {}", path.display()))?;
        let ids = df.column("polygon")?.cast(&DataType::Int64)?;
        let xs = df.column("x")?.cast(&DataType::Float64)?;
        let ys = df.column("y")?.cast(&DataType::Float64)?;

        let mut order: Vec<i64> = Vec::new();
        let mut rings: Vec<Vec<[f64; 2]>> = Vec::new();
        let rows = ids.i64()?.into_iter().zip(xs.f64()?).zip(ys.f64()?);
        for (row, ((id, x), y)) in rows.enumerate() {
            let (Some(id), Some(x), Some(y)) = (id, x, y) else {
                bail!("row {row} of {} has an empty field", path.display());
            };
            let slot = match order.iter().position(|&known| known == id) {
                Some(slot) => slot,
                None => {
                    order.push(id);
                    rings.push(Vec::new());
                    rings.len() - 1
                }
            };
            rings[slot].push([x, y]);
        }
        Ok(Self {
            polygons: rings,
            region: None,
        })
    }

    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        Self {
            polygons: polygons.iter().map(to_xy).collect(),
            region: None,
        }
    }

    pub fn shapes(&self) -> Vec<ShapeInput> {
        self.polygons
            .iter()
            .map(|ring| ShapeInput::from(ring.clone()))
            .collect()
    }

    pub fn region_polygon(&self) -> Option<Polygon> {
        self.region
            .as_ref()
            .map(|ring| Polygon::from_xy(&ring.iter().map(|&[x, y]| (x, y)).collect::<Vec<_>>()))
    }
}

fn to_xy(poly: &Polygon) -> Vec<[f64; 2]> {
    poly.vertices().iter().map(|p| [p.x, p.y]).collect()
}

/// Axis-aligned box `[x0, y0, x1, y1]` as a region polygon.
pub fn box_region(corners: &[f64]) -> Result<Polygon> {
    let &[x0, y0, x1, y1] = corners else {
        bail!("region needs exactly 4 values, got {}", corners.len());
    };
    Ok(Polygon::from_xy(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)]))
}
