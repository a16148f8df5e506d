//! svgalign: snap shared borders of independently drawn SVG outlines.
//!
//! Adjacent region outlines rendered separately rarely agree on the exact
//! coordinates of their common border. This crate finds terminal vertices
//! of *different* paths that lie closer than a threshold and moves each
//! such pair onto its midpoint, removing hairline gaps and overlaps.
//!
//! # Example
//!
//! ```
//! use svgalign::{align_paths, AlignConfig};
//!
//! let config = AlignConfig::with_threshold(0.5);
//! let result = align_paths(&["M0,0 L10,0", "M10.2,0 L20,0"], &config)?;
//! assert_eq!(result.paths, vec!["M0,0 L10.1,0", "M10.1,0 L20,0"]);
//! # Ok::<(), svgalign::AlignError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod geom;

pub mod document;
pub mod error;
pub mod index;
pub mod path;
pub mod resolve;
pub mod vertex;

pub use kurbo;

pub use config::{AlignConfig, MalformedPolicy, MergeStrategy, MAX_PRECISION};
pub use document::SvgDocument;
pub use error::{AlignError, Degenerate};
pub use path::{Command, CommandKind, PathModel};

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use index::SpatialIndex;
use resolve::Resolver;
use vertex::VertexSet;

/// Summary of one alignment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignReport {
    /// Paths seen in the input.
    pub paths: usize,
    /// Indices of paths skipped as malformed.
    pub skipped: Vec<usize>,
    /// Vertices extracted from the well-formed paths.
    pub vertices: usize,
    /// Merges performed.
    pub pairs: usize,
    /// Vertices whose position changed.
    pub moved_vertices: usize,
    /// Paths whose data was re-serialized.
    pub rewritten: usize,
    /// Set when the input had nothing to align.
    pub degenerate: Option<Degenerate>,
}

impl fmt::Display for AlignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} paths ({} skipped) \u{00b7} {} vertices \u{00b7} {} merges \u{00b7} {} moved \u{00b7} {} rewritten",
            self.paths,
            self.skipped.len(),
            self.vertices,
            self.pairs,
            self.moved_vertices,
            self.rewritten,
        )?;
        if let Some(d) = self.degenerate {
            write!(f, " ({d})")?;
        }
        Ok(())
    }
}

/// Aligned path data, one entry per input path.
#[derive(Debug, Clone)]
pub struct AlignedPaths {
    /// Output path data. Untouched and skipped paths are returned as given.
    pub paths: Vec<String>,
    pub report: AlignReport,
}

/// An aligned SVG document.
#[derive(Debug, Clone)]
pub struct AlignedDocument {
    pub svg: String,
    pub report: AlignReport,
}

/// Align a set of path data strings.
pub fn align_paths(data: &[&str], config: &AlignConfig) -> Result<AlignedPaths, AlignError> {
    let (rewritten, report) = align(data, config)?;
    let paths = data
        .iter()
        .zip(rewritten)
        .map(|(original, new)| new.unwrap_or_else(|| original.to_string()))
        .collect();
    Ok(AlignedPaths { paths, report })
}

/// Align every `<path>` of an SVG document.
///
/// The returned text differs from the input only inside the `d`
/// attributes of paths that were rewritten.
pub fn align_document(svg: &str, config: &AlignConfig) -> Result<AlignedDocument, AlignError> {
    let doc = SvgDocument::parse(svg)?;
    let data: Vec<&str> = doc.paths().iter().map(|p| p.data.as_str()).collect();
    debug!(paths = data.len(), "document parsed");

    let (rewritten, report) = align(&data, config).map_err(|err| match err {
        AlignError::MalformedPath { index, message } => {
            let line = doc.paths().get(index).map_or(0, |p| p.line);
            AlignError::MalformedPath {
                index,
                message: format!("{message} (line {line})"),
            }
        }
        other => other,
    })?;

    Ok(AlignedDocument {
        svg: doc.render(&rewritten),
        report,
    })
}

/// Convenience: read an SVG file, align it and write the result.
///
/// Nothing is written unless reading and alignment both succeed.
pub fn align_file(input: &Path, output: &Path, config: &AlignConfig) -> Result<AlignReport, AlignError> {
    let svg = fs::read_to_string(input).map_err(|source| AlignError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let aligned = align_document(&svg, config)?;
    fs::write(output, aligned.svg).map_err(|source| AlignError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(aligned.report)
}

/// Full pipeline: parse → extract → index → resolve → serialize.
///
/// Returns new data for each rewritten path (`None` keeps the original).
fn align(data: &[&str], config: &AlignConfig) -> Result<(Vec<Option<String>>, AlignReport), AlignError> {
    config.validate()?;
    let t_start = Instant::now();
    let mut report = AlignReport {
        paths: data.len(),
        ..AlignReport::default()
    };

    // ── Parse ─────────────────────────────────────────────
    let mut models = Vec::with_capacity(data.len());
    for (i, d) in data.iter().enumerate() {
        match PathModel::parse_indexed(d, i) {
            Ok(model) => models.push(model),
            Err(err) => match config.on_malformed {
                MalformedPolicy::Abort => return Err(err),
                MalformedPolicy::Skip => {
                    warn!(path = i, error = %err, "skipping malformed path");
                    report.skipped.push(i);
                    models.push(PathModel::default());
                }
            },
        }
    }
    let commands: usize = models.iter().map(PathModel::len).sum();
    debug!(paths = models.len(), commands, "parsed");

    // ── Extract & index ───────────────────────────────────
    let mut vertices = VertexSet::extract(&models);
    report.vertices = vertices.len();
    let index = SpatialIndex::build(&vertices);
    debug!(vertices = vertices.len(), "indexed");

    // ── Resolve ───────────────────────────────────────────
    let stats = Resolver::new(config).resolve(&mut models, &mut vertices, &index);
    if let Some(d) = stats.degenerate {
        warn!("{d}; leaving geometry unchanged");
    }
    report.pairs = stats.pairs;
    report.moved_vertices = stats.moved_vertices;
    report.degenerate = stats.degenerate;

    // ── Serialize ─────────────────────────────────────────
    let rewritten: Vec<Option<String>> = models
        .iter()
        .enumerate()
        .map(|(i, model)| {
            let keep = report.skipped.contains(&i) || !(config.rewrite_all || model.is_dirty());
            (!keep).then(|| model.to_path_data(config.precision))
        })
        .collect();
    report.rewritten = rewritten.iter().filter(|r| r.is_some()).count();

    info!(
        elapsed_ms = t_start.elapsed().as_millis() as u64,
        "aligned: {report}"
    );
    Ok((rewritten, report))
}
