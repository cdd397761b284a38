//! The component table of one snapshot.
//!
//! A component record starts with a `-` entry inside the `COMPONENTS` section
//! and runs, possibly over several lines, up to its terminating `;`:
//!
//! ```text
//! - r\[0\] DFFHQNx1_ASAP7_75t_L
//!   + PLACED ( 700 200 ) N ;
//! ```

use std::io::{self, BufRead};
use std::path::Path;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::section::{Section, SectionLines};
use crate::{Diagnostics, RecordError, RecordField, Warning, open_source, unescape_brackets};

lazy_static! {
    static ref PLACED_RE: Regex = Regex::new(r"PLACED\s*\(\s*([^\s()]+)\s+([^\s()]+)").unwrap();
}

/// Placement origin of an instance, in database units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Horizontal origin.
    pub x: i64,
    /// Vertical origin.
    pub y: i64,
}

impl Placement {
    /// Create a placement at `(x, y)`.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`, saturating at `u64::MAX`.
    pub const fn manhattan(&self, other: &Placement) -> u64 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

/// What the table knows about one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Library cell the instance uses.
    pub cell_type: String,
    /// Origin from the `PLACED` clause, if any.
    pub placement: Option<Placement>,
}

impl Component {
    /// Create a component entry.
    pub fn new(cell_type: impl Into<String>, placement: Option<Placement>) -> Self {
        Self {
            cell_type: cell_type.into(),
            placement,
        }
    }
}

/// Instance name to (cell type, placement) for one snapshot.
///
/// Names are stored unescaped. Iteration follows record order, which keeps
/// everything derived from the table deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentTable {
    components: IndexMap<String, Component>,
}

impl ComponentTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `COMPONENTS` section of a snapshot stream.
    ///
    /// Malformed records are recovered and reported through `diagnostics`;
    /// only I/O failures are returned as errors.
    pub fn parse<R: BufRead>(reader: R, diagnostics: &mut Diagnostics) -> io::Result<Self> {
        let mut table = Self::new();
        let mut lines = SectionLines::new(reader, Section::Components);

        while let Some(next) = lines.next() {
            let (line_no, line) = next?;
            if !line.trim_start().starts_with('-') {
                continue;
            }

            let mut record = line;
            while !record.contains(';') {
                match lines.next() {
                    Some(next) => {
                        let (_, continuation) = next?;
                        record.push(' ');
                        record.push_str(&continuation);
                    }
                    None => {
                        diagnostics.record(Warning::UnterminatedRecord { line: line_no });
                        break;
                    }
                }
            }

            if let Some((name, component)) = parse_record(&record, line_no, diagnostics) {
                if table.components.contains_key(&name) {
                    diagnostics.record(Warning::DuplicateInstance {
                        instance: name.clone(),
                        line: line_no,
                    });
                }
                table.components.insert(name, component);
            }
        }

        debug!("Parsed {} components", table.len());
        Ok(table)
    }

    /// Open `path` and parse its component table.
    pub fn from_path(
        path: impl AsRef<Path>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, RecordError> {
        let path = path.as_ref();
        let reader = open_source(path)?;
        Self::parse(reader, diagnostics).map_err(|e| RecordError::read(path, e))
    }

    /// Insert or replace an instance, returning the previous entry.
    pub fn insert(&mut self, name: impl Into<String>, component: Component) -> Option<Component> {
        self.components.insert(name.into(), component)
    }

    /// Entry for instance `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Cell type of `name`, if present.
    pub fn cell_type(&self, name: &str) -> Option<&str> {
        self.components.get(name).map(|c| c.cell_type.as_str())
    }

    /// Whether instance `name` is in the table.
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the table has no instances.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate instances in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate placed instances in record order.
    pub fn placements(&self) -> impl Iterator<Item = (&str, Placement)> {
        self.iter()
            .filter_map(|(name, c)| c.placement.map(|p| (name, p)))
    }
}

impl FromIterator<(String, Component)> for ComponentTable {
    fn from_iter<T: IntoIterator<Item = (String, Component)>>(iter: T) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

/// Extract name, cell type and placement from one accumulated record.
///
/// Returns `None` when the instance name or cell type is missing; a bad
/// placement only drops the placement.
fn parse_record(
    record: &str,
    line: usize,
    diagnostics: &mut Diagnostics,
) -> Option<(String, Component)> {
    let body = record.trim_start();
    let body = body.strip_prefix('-').unwrap_or(body);
    let body = body.split(';').next().unwrap_or_default();
    let mut tokens = body.split_whitespace();

    let Some(raw_name) = tokens.next() else {
        diagnostics.record(Warning::MissingField {
            field: RecordField::InstanceName,
            line,
        });
        return None;
    };
    let Some(cell_type) = tokens.next().filter(|t| !t.starts_with('+')) else {
        diagnostics.record(Warning::MissingField {
            field: RecordField::CellType,
            line,
        });
        return None;
    };

    let name = unescape_brackets(raw_name).into_owned();
    let placement = parse_placement(body, &name, line, diagnostics);
    Some((name, Component::new(cell_type, placement)))
}

fn parse_placement(
    body: &str,
    instance: &str,
    line: usize,
    diagnostics: &mut Diagnostics,
) -> Option<Placement> {
    if !body.split_whitespace().any(|t| t == "PLACED") {
        return None;
    }

    let coordinates = PLACED_RE.captures(body).and_then(|caps| {
        let x = caps[1].parse::<i64>().ok()?;
        let y = caps[2].parse::<i64>().ok()?;
        Some(Placement::new(x, y))
    });
    if coordinates.is_none() {
        diagnostics.record(Warning::MalformedPlacement {
            instance: instance.to_string(),
            line,
        });
    }
    coordinates
}
