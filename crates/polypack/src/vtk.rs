//! Legacy VTK (ASCII POLYDATA) writer for polygon sets.
//!
//! 2D vertices are written with `z = 0`. An optional per-polygon scalar
//! (e.g. collision counts) is written as `CELL_DATA`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::polygon::Polygon;

const EXTENSION: &str = "vtk";

/// Named per-polygon scalar field.
#[derive(Clone, Copy, Debug)]
pub struct CellScalars<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
}

/// Write `polygons` to `path`, appending `.vtk` if missing. Returns the final path.
pub fn write_polygons<P: AsRef<Path>>(
    path: P,
    polygons: &[Polygon],
    comment: &str,
    scalars: Option<CellScalars<'_>>,
) -> io::Result<PathBuf> {
    let path = with_vtk_extension(path.as_ref());
    let mut out = BufWriter::new(File::create(&path)?);
    writeln!(out, "# vtk DataFile Version 2.0")?;
    // the header comment is a single line
    writeln!(out, "{}", comment.replace('\n', " "))?;
    writeln!(out, "ASCII")?;
    write_polydata(&mut out, polygons, scalars)?;
    out.flush()?;
    Ok(path)
}

/// Body after the three header lines.
pub fn write_polydata<W: Write>(
    out: &mut W,
    polygons: &[Polygon],
    scalars: Option<CellScalars<'_>>,
) -> io::Result<()> {
    if let Some(s) = scalars {
        if s.values.len() != polygons.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} scalar values for {} polygons",
                    s.values.len(),
                    polygons.len()
                ),
            ));
        }
    }
    let n_points: usize = polygons.iter().map(Polygon::len).sum();
    writeln!(out, "DATASET POLYDATA")?;
    writeln!(out, "POINTS {n_points} float")?;
    for poly in polygons {
        for p in poly.vertices() {
            writeln!(out, "{} {} 0", p.x, p.y)?;
        }
    }
    writeln!(out, "POLYGONS {} {}", polygons.len(), n_points + polygons.len())?;
    let mut next = 0usize;
    for poly in polygons {
        write!(out, "{}", poly.len())?;
        for idx in next..next + poly.len() {
            write!(out, " {idx}")?;
        }
        writeln!(out)?;
        next += poly.len();
    }
    if let Some(s) = scalars {
        writeln!(out, "CELL_DATA {}", polygons.len())?;
        writeln!(out, "SCALARS {} float 1", s.name)?;
        writeln!(out, "LOOKUP_TABLE default")?;
        for v in s.values {
            writeln!(out, "{v}")?;
        }
    }
    Ok(())
}

fn with_vtk_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|e| e == EXTENSION) {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(EXTENSION);
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn two_shapes() -> Vec<Polygon> {
        vec![
            Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]),
            Polygon::from_xy(&[(2.0, 0.0), (3.0, 0.0), (3.0, 1.0), (2.0, 1.0)]),
        ]
    }

    #[test]
    fn extension_appended_once() {
        assert_eq!(with_vtk_extension(Path::new("out/demo")), Path::new("out/demo.vtk"));
        assert_eq!(with_vtk_extension(Path::new("demo.vtk")), Path::new("demo.vtk"));
        assert_eq!(with_vtk_extension(Path::new("demo.txt")), Path::new("demo.txt.vtk"));
    }

    #[test]
    fn polydata_layout() {
        let mut buf = Vec::new();
        write_polydata(&mut buf, &two_shapes(), None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "DATASET POLYDATA");
        assert_eq!(lines[1], "POINTS 7 float");
        assert_eq!(lines[2], "0 0 0");
        assert_eq!(lines[9], "POLYGONS 2 9");
        assert_eq!(lines[10], "3 0 1 2");
        assert_eq!(lines[11], "4 3 4 5 6");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn file_with_cell_scalars() {
        let dir = tempdir().unwrap();
        let values = [1.0, 0.0];
        let path = write_polygons(
            dir.path().join("packing"),
            &two_shapes(),
            "Polygons",
            Some(CellScalars {
                name: "collisions",
                values: &values,
            }),
        )
        .unwrap();
        assert_eq!(path.extension().unwrap(), "vtk");
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# vtk DataFile Version 2.0\nPolygons\nASCII\n"));
        assert!(text.contains("CELL_DATA 2\nSCALARS collisions float 1\nLOOKUP_TABLE default\n1\n0\n"));
    }

    #[test]
    fn scalar_length_mismatch_is_an_error() {
        let mut buf = Vec::new();
        let err = write_polydata(
            &mut buf,
            &two_shapes(),
            Some(CellScalars {
                name: "c",
                values: &[1.0],
            }),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
