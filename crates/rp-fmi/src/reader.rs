//! FMI plain-text graph reader.
//!
//! # File format
//!
//! Whitespace-separated columns, one record per line.  Leading `#`-comment
//! lines and blank lines form the header and are skipped.
//!
//! | Section    | Lines | Columns                                          |
//! |------------|-------|--------------------------------------------------|
//! | node count | 1     | `n`                                              |
//! | edge count | 1     | `m`                                              |
//! | nodes      | `n`   | `id osm_id lat lon [elevation …]`                |
//! | edges      | `m`   | `source target weight [type …]`                  |
//!
//! Node records carry **latitude before longitude**.  Node ids are dense and
//! appear in file order; edge records carry no id of their own — an edge's
//! id is its position among the edge lines, and the file lists edges in
//! non-decreasing source order (which is what lets the graph builder work in
//! a single pass).  Trailing columns beyond the ones named above are
//! ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use rp_core::{EdgeId, GeoPoint, NodeId};
use rp_graph::{GraphBuilder, RoadGraph};

use crate::error::{FmiError, FmiResult};

/// Read an FMI graph file into a finalized [`RoadGraph`].
pub fn read_graph(path: &Path) -> FmiResult<RoadGraph> {
    let file = File::open(path)?;
    read_graph_from(BufReader::new(file))
}

/// Like [`read_graph`] but accepts any `BufRead` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or reading from network
/// streams.
pub fn read_graph_from<R: BufRead>(reader: R) -> FmiResult<RoadGraph> {
    let mut lines = CountedLines::new(reader);

    let node_count: usize = lines.next_record()?.parse_column(0, "node count")?;
    let edge_count: usize = lines.next_record()?.parse_column(0, "edge count")?;

    let mut builder = GraphBuilder::new(node_count, edge_count);

    for expected_id in 0..node_count {
        let record = lines.next_record()?;
        let id: u32 = record.parse_column(0, "node id")?;
        let lat: f64 = record.parse_column(2, "latitude")?;
        let lon: f64 = record.parse_column(3, "longitude")?;
        if id as usize != expected_id {
            return Err(FmiError::Parse {
                line: record.line,
                message: format!("node id {id} out of order (expected {expected_id})"),
            });
        }
        builder.add_node(NodeId(id), GeoPoint::new(lon, lat))?;
    }

    for edge_id in 0..edge_count {
        let record = lines.next_record()?;
        let source: u32 = record.parse_column(0, "source node")?;
        let target: u32 = record.parse_column(1, "target node")?;
        let weight: u32 = record.parse_column(2, "edge weight")?;
        builder.add_edge(EdgeId(edge_id as u32), NodeId(source), NodeId(target), weight)?;
    }

    Ok(builder.finalize())
}

// ── Line-oriented parsing helpers ─────────────────────────────────────────────

/// Wraps the input with 1-based line counting and header skipping.
struct CountedLines<R> {
    lines: std::io::Lines<R>,
    line: usize,
}

/// One non-comment, non-blank line, split lazily into columns.
struct Record {
    line: usize,
    text: String,
}

impl<R: BufRead> CountedLines<R> {
    fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line: 0 }
    }

    /// The next data line, skipping `#`-comments and blank lines.
    fn next_record(&mut self) -> FmiResult<Record> {
        loop {
            let Some(text) = self.lines.next().transpose()? else {
                return Err(FmiError::TruncatedFile { line: self.line + 1 });
            };
            self.line += 1;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(Record { line: self.line, text });
        }
    }
}

impl Record {
    /// Parse whitespace-separated column `index` as `T`.
    fn parse_column<T: FromStr>(&self, index: usize, what: &str) -> FmiResult<T> {
        let column = self.text.split_whitespace().nth(index).ok_or_else(|| FmiError::Parse {
            line: self.line,
            message: format!("missing {what} (column {index})"),
        })?;
        column.parse().map_err(|_| FmiError::Parse {
            line: self.line,
            message: format!("invalid {what}: {column:?}"),
        })
    }
}
