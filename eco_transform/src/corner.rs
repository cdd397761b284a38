//! Retargeting cell types to a different library corner.
//!
//! Library cells carry their corner as the last `_`-separated part of the
//! type name, e.g. `BUFx2_ASAP7_75t_L`. Renaming swaps that suffix and
//! leaves every other byte of the input alone.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use eco_common::{Marker, Section};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::TransformError;
use crate::stream::transform_file;

/// Cell types starting with this prefix are never renamed.
pub const TAP_CELL_PREFIX: &str = "TAPCELL";

lazy_static! {
    /// `<type> <instance> (` at the start of a netlist line. Instance names may
    /// be escaped identifiers, which run up to the next whitespace.
    static ref INSTANTIATION_RE: Regex =
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s+(?:\\\S+|[A-Za-z_][A-Za-z0-9_$/]*)\s*\(").unwrap();
}

/// A library process corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Corner {
    /// Low threshold voltage.
    L,
    /// Regular threshold voltage.
    R,
    /// Super-low threshold voltage.
    SL,
    /// SRAM threshold voltage.
    SRAM,
}

impl Corner {
    /// Every known corner.
    pub const ALL: [Corner; 4] = [Corner::L, Corner::R, Corner::SL, Corner::SRAM];

    /// Suffix code used in cell type names.
    pub const fn code(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::R => "R",
            Self::SL => "SL",
            Self::SRAM => "SRAM",
        }
    }
}

impl FromStr for Corner {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|corner| corner.code() == s)
            .ok_or_else(|| TransformError::UnknownCorner(s.to_string()))
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Rename `cell_type` to `corner`.
///
/// Tap cells and types whose last `_` part is not a corner code come back
/// unchanged.
pub fn rename(cell_type: &str, corner: Corner) -> String {
    if cell_type.starts_with(TAP_CELL_PREFIX) {
        return cell_type.to_string();
    }
    match cell_type.rsplit_once('_') {
        Some((stem, suffix)) if suffix.parse::<Corner>().is_ok() => {
            format!("{stem}_{}", corner.code())
        }
        _ => cell_type.to_string(),
    }
}

/// Counts from one renaming pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenameStats {
    /// Cell types inspected.
    pub processed: usize,
    /// Cell types actually rewritten.
    pub changed: usize,
}

impl RenameStats {
    fn record(&mut self, changed: bool) {
        self.processed += 1;
        if changed {
            self.changed += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    InstanceName,
    CellType,
    /// Rest of a record, up to its `;`.
    Body,
}

/// Rewrite the cell type of every component record of a snapshot stream.
///
/// Lines outside the `COMPONENTS` section are copied verbatim, as is every
/// byte of a record other than its cell type token.
pub fn rename_components<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    corner: Corner,
) -> io::Result<RenameStats> {
    let mut stats = RenameStats::default();
    let mut inside = false;
    let mut expect: Option<Expect> = None;
    let mut line = String::new();

    while reader.read_line(&mut line)? > 0 {
        let marker = Section::Components.marker(&line);
        match marker {
            Some(Marker::Start) => inside = true,
            Some(Marker::End) => {
                inside = false;
                expect = None;
            }
            None => {}
        }

        if inside && marker.is_none() {
            let rewritten = rename_record_line(&line, &mut expect, corner, &mut stats);
            writer.write_all(rewritten.as_bytes())?;
        } else {
            writer.write_all(line.as_bytes())?;
        }
        line.clear();
    }

    info!(
        "Renamed {} of {} component cell types to {}",
        stats.changed, stats.processed, corner
    );
    Ok(stats)
}

/// Advance the record state over one line, renaming the cell type if it
/// appears on this line.
fn rename_record_line(
    line: &str,
    expect: &mut Option<Expect>,
    corner: Corner,
    stats: &mut RenameStats,
) -> String {
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;

    for (start, token) in tokens(line) {
        match *expect {
            None if token.starts_with('-') => {
                *expect = Some(if token.len() > 1 {
                    Expect::CellType
                } else {
                    Expect::InstanceName
                });
            }
            Some(Expect::InstanceName) => *expect = Some(Expect::CellType),
            Some(Expect::CellType) => {
                *expect = Some(Expect::Body);
                let cell_type = token.split(';').next().unwrap_or_default();
                if !cell_type.is_empty() && !cell_type.starts_with('+') {
                    let renamed = rename(cell_type, corner);
                    let changed = renamed != cell_type;
                    stats.record(changed);
                    if changed {
                        debug!("{} -> {}", cell_type, renamed);
                        out.push_str(&line[copied..start]);
                        out.push_str(&renamed);
                        copied = start + cell_type.len();
                    }
                }
            }
            Some(Expect::Body) | None => {}
        }
        if token.contains(';') {
            *expect = None;
        }
    }

    out.push_str(&line[copied..]);
    out
}

/// Whitespace-separated tokens with their byte offsets.
fn tokens(line: &str) -> impl Iterator<Item = (usize, &str)> {
    line.split_whitespace()
        .map(move |token| (token.as_ptr() as usize - line.as_ptr() as usize, token))
}

/// Rewrite the cell type of every instantiation line of a gate-level netlist.
pub fn rename_netlist<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    corner: Corner,
) -> io::Result<RenameStats> {
    let mut stats = RenameStats::default();
    let mut line = String::new();

    while reader.read_line(&mut line)? > 0 {
        let replacement = INSTANTIATION_RE.captures(&line).and_then(|caps| {
            let cell_type = caps.get(1)?;
            let renamed = rename(cell_type.as_str(), corner);
            let changed = renamed != cell_type.as_str();
            stats.record(changed);
            changed.then(|| (cell_type.range(), renamed))
        });

        match replacement {
            Some((range, renamed)) => {
                writer.write_all(line[..range.start].as_bytes())?;
                writer.write_all(renamed.as_bytes())?;
                writer.write_all(line[range.end..].as_bytes())?;
            }
            None => writer.write_all(line.as_bytes())?,
        }
        line.clear();
    }

    info!(
        "Renamed {} of {} netlist instances to {}",
        stats.changed, stats.processed, corner
    );
    Ok(stats)
}

/// Rename the component table of `input` into `output`.
pub fn rename_components_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    corner: Corner,
) -> Result<RenameStats, TransformError> {
    transform_file(input.as_ref(), output.as_ref(), |reader, writer| {
        rename_components(reader, writer, corner)
    })
}

/// Rename the instantiations of netlist `input` into `output`.
pub fn rename_netlist_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    corner: Corner,
) -> Result<RenameStats, TransformError> {
    transform_file(input.as_ref(), output.as_ref(), |reader, writer| {
        rename_netlist(reader, writer, corner)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corner() {
        assert_eq!("SL".parse::<Corner>().unwrap(), Corner::SL);
        assert!(matches!(
            "sl".parse::<Corner>(),
            Err(TransformError::UnknownCorner(code)) if code == "sl"
        ));
    }

    #[test]
    fn test_rename_suffix_only_when_corner() {
        assert_eq!(rename("BUFx2_ASAP7_75t_L", Corner::SL), "BUFx2_ASAP7_75t_SL");
        assert_eq!(rename("DFF_ASAP7_75t_SRAM", Corner::R), "DFF_ASAP7_75t_R");
        assert_eq!(rename("BUFx2_ASAP7_75t", Corner::SL), "BUFx2_ASAP7_75t");
        assert_eq!(rename("BUFx2", Corner::SL), "BUFx2");
        assert_eq!(rename("TAPCELL_ASAP7_75t_L", Corner::SL), "TAPCELL_ASAP7_75t_L");
    }

    #[test]
    fn test_tokens_offsets() {
        let line = "  - u1\tINVx1 ;\n";
        let found: Vec<(usize, &str)> = tokens(line).collect();
        assert_eq!(found, vec![(2, "-"), (4, "u1"), (7, "INVx1"), (13, ";")]);
    }

    #[test]
    fn test_record_line_preserves_layout() {
        let mut expect = None;
        let mut stats = RenameStats::default();
        let out = rename_record_line(
            "    - u1   INVx1_ASAP7_75t_L  + PLACED ( 1 2 ) N ;\n",
            &mut expect,
            Corner::R,
            &mut stats,
        );
        assert_eq!(out, "    - u1   INVx1_ASAP7_75t_R  + PLACED ( 1 2 ) N ;\n");
        assert_eq!(stats, RenameStats { processed: 1, changed: 1 });
        assert_eq!(expect, None);
    }

    #[test]
    fn test_type_on_continuation_line() {
        let mut expect = None;
        let mut stats = RenameStats::default();
        let first = rename_record_line("- u1\n", &mut expect, Corner::SL, &mut stats);
        let second = rename_record_line("  BUFx2_ASAP7_75t_L;\n", &mut expect, Corner::SL, &mut stats);

        assert_eq!(first, "- u1\n");
        assert_eq!(second, "  BUFx2_ASAP7_75t_SL;\n");
        assert_eq!(stats.changed, 1);
    }

    #[test]
    fn test_negative_coordinates_do_not_start_records() {
        let mut expect = None;
        let mut stats = RenameStats::default();
        let out = rename_record_line(
            "- a BUF_L + PLACED ( -5 -7 ) N ;\n",
            &mut expect,
            Corner::R,
            &mut stats,
        );
        assert_eq!(out, "- a BUF_R + PLACED ( -5 -7 ) N ;\n");
        assert_eq!(stats, RenameStats { processed: 1, changed: 1 });
        assert_eq!(expect, None);
    }
}
