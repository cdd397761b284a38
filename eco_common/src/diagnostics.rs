//! Recoverable conditions found while reading snapshot records.
//!
//! Parsers never abort on a single bad record. They recover what they can,
//! record a [`Warning`] here and move on; callers surface the counts in their
//! run summary.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Which field of a component record failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    InstanceName,
    CellType,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstanceName => write!(f, "instance name"),
            Self::CellType => write!(f, "cell type"),
        }
    }
}

/// A single recovered condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A `PLACED` clause whose coordinates did not parse. The instance is kept
    /// without a placement.
    MalformedPlacement { instance: String, line: usize },
    /// A component record missing its instance name or cell type. The record
    /// is dropped.
    MissingField { field: RecordField, line: usize },
    /// Input ended before the record's terminating `;`.
    UnterminatedRecord { line: usize },
    /// An instance name seen twice in one component table; the later record wins.
    DuplicateInstance { instance: String, line: usize },
    /// A pin reference without exactly an instance and a pin name. Discarded.
    MalformedPin { net: String, token: String },
    /// A second newly inserted driver on a net that already has one. Discarded.
    DuplicateDriver { net: String, instance: String },
    /// A newly inserted instance that drives no net of the optimized snapshot.
    UndrivenInsertion { instance: String },
}

/// Discriminant of a [`Warning`], used for summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    MalformedPlacement,
    MissingField,
    UnterminatedRecord,
    DuplicateInstance,
    MalformedPin,
    DuplicateDriver,
    UndrivenInsertion,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedPlacement => "malformed placement",
            Self::MissingField => "missing field",
            Self::UnterminatedRecord => "unterminated record",
            Self::DuplicateInstance => "duplicate instance",
            Self::MalformedPin => "malformed pin",
            Self::DuplicateDriver => "duplicate driver",
            Self::UndrivenInsertion => "undriven insertion",
        };
        f.write_str(name)
    }
}

impl Warning {
    /// The kind of this warning.
    pub const fn kind(&self) -> WarningKind {
        match self {
            Self::MalformedPlacement { .. } => WarningKind::MalformedPlacement,
            Self::MissingField { .. } => WarningKind::MissingField,
            Self::UnterminatedRecord { .. } => WarningKind::UnterminatedRecord,
            Self::DuplicateInstance { .. } => WarningKind::DuplicateInstance,
            Self::MalformedPin { .. } => WarningKind::MalformedPin,
            Self::DuplicateDriver { .. } => WarningKind::DuplicateDriver,
            Self::UndrivenInsertion { .. } => WarningKind::UndrivenInsertion,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPlacement { instance, line } => {
                write!(f, "line {line}: unparseable placement for {instance}")
            }
            Self::MissingField { field, line } => {
                write!(f, "line {line}: component record has no {field}")
            }
            Self::UnterminatedRecord { line } => {
                write!(f, "line {line}: record not terminated by ';'")
            }
            Self::DuplicateInstance { instance, line } => {
                write!(f, "line {line}: instance {instance} already defined")
            }
            Self::MalformedPin { net, token } => {
                write!(f, "net {net}: malformed pin reference '{token}'")
            }
            Self::DuplicateDriver { net, instance } => {
                write!(f, "net {net}: extra inserted driver {instance} ignored")
            }
            Self::UndrivenInsertion { instance } => {
                write!(f, "inserted instance {instance} drives no net")
            }
        }
    }
}

/// Sink for recovered conditions.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    pub fn record(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Move every warning of `other` into this sink.
    pub fn merge(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    /// Number of recorded warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Iterate warnings in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }

    /// Number of warnings of the given kind.
    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind() == kind).count()
    }

    /// Warning counts per kind, only for kinds that occurred.
    pub fn counts(&self) -> BTreeMap<WarningKind, usize> {
        let mut counts = BTreeMap::new();
        for warning in &self.warnings {
            *counts.entry(warning.kind()).or_insert(0) += 1;
        }
        counts
    }
}
