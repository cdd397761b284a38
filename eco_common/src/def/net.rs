//! Net connectivity of the optimized snapshot.
//!
//! The `NETS` section is scanned one character at a time by a small state
//! machine. A net looks like
//!
//! ```text
//! - net_rebuf1 ( rebuf1 Y ) ( u2 A ) ( rebuf2 A ) + USE SIGNAL ;
//! ```
//!
//! Only nets whose driver pin belongs to a newly inserted instance are kept;
//! each such net becomes one [`InsertedBuffer`].

use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::section::{Section, SectionLines};
use crate::{Diagnostics, RecordError, Warning, open_source};

/// Output pin name of an inserted buffer.
pub const DEFAULT_DRIVER_PIN: &str = "Y";

/// One endpoint of a net connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinRef {
    /// Instance the pin belongs to, backslashes dropped.
    pub instance_name: String,
    /// Pin name on that instance.
    pub pin_name: String,
}

impl PinRef {
    /// Create a pin reference.
    pub fn new(instance_name: impl Into<String>, pin_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            pin_name: pin_name.into(),
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.instance_name, self.pin_name)
    }
}

/// A net driven by a newly inserted instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedBuffer {
    /// Name of the new instance.
    pub cell_name: String,
    /// Its cell type in the optimized snapshot.
    pub cell_type: String,
    /// The net it drives.
    pub net_name: String,
    /// Every other pin of the net, in record order.
    pub load_pins: Vec<PinRef>,
}

impl InsertedBuffer {
    /// Whether any load pin sits on instance `cell`.
    pub fn references(&self, cell: &str) -> bool {
        self.load_pins.iter().any(|p| p.instance_name == cell)
    }
}

/// Instances present only in the optimized snapshot, with their cell types.
///
/// Keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertionCandidates {
    cells: IndexMap<String, String>,
}

impl InsertionCandidates {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `instance` with its cell type.
    pub fn insert(&mut self, instance: impl Into<String>, cell_type: impl Into<String>) {
        self.cells.insert(instance.into(), cell_type.into());
    }

    /// Cell type of candidate `instance`.
    pub fn cell_type(&self, instance: &str) -> Option<&str> {
        self.cells.get(instance).map(String::as_str)
    }

    /// Whether `instance` is a candidate.
    pub fn contains(&self, instance: &str) -> bool {
        self.cells.contains_key(instance)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate `(instance, cell type)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for InsertionCandidates {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Scanner states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Between net records.
    OutsideNet,
    /// After the opening `-`, collecting the net name up to the first `(`.
    CapturingName,
    /// Inside a net record, between pin references.
    InNet,
    /// Between `(` and `)` of a pin reference.
    InsidePin,
    /// After a `+` clause; parentheses here are routing data, not pins.
    Attributes,
}

/// State of the net currently being scanned. Dropped at every `;`.
#[derive(Debug, Default)]
struct NetScan {
    name: String,
    pin_token: String,
    driver: Option<(String, String)>,
    loads: Vec<PinRef>,
}

/// Extracts [`InsertedBuffer`] records from the `NETS` section.
#[derive(Debug, Clone)]
pub struct NetTopologyParser<'a> {
    candidates: &'a InsertionCandidates,
    driver_pin: &'a str,
}

impl<'a> NetTopologyParser<'a> {
    /// Parser that recognizes drivers among `candidates`.
    pub fn new(candidates: &'a InsertionCandidates) -> Self {
        Self {
            candidates,
            driver_pin: DEFAULT_DRIVER_PIN,
        }
    }

    /// Use `pin` instead of [`DEFAULT_DRIVER_PIN`] as the buffer output pin.
    pub fn with_driver_pin(mut self, pin: &'a str) -> Self {
        self.driver_pin = pin;
        self
    }

    /// Scan the `NETS` section of a snapshot stream.
    ///
    /// Returns one record per net driven by a candidate, in record order.
    pub fn parse<R: BufRead>(
        &self,
        reader: R,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<Vec<InsertedBuffer>> {
        let mut scanner = NetScanner::new(self);
        let mut last_line = 0;
        for next in SectionLines::new(reader, Section::Nets) {
            let (line_no, line) = next?;
            last_line = line_no;
            for c in line.chars() {
                scanner.step(c, diagnostics);
            }
            // Keep tokens on adjacent lines apart.
            scanner.step(' ', diagnostics);
        }
        Ok(scanner.finish(last_line, diagnostics))
    }

    /// Open `path` and scan its `NETS` section.
    pub fn parse_path(
        &self,
        path: impl AsRef<Path>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<InsertedBuffer>, RecordError> {
        let path = path.as_ref();
        let reader = open_source(path)?;
        self.parse(reader, diagnostics)
            .map_err(|e| RecordError::read(path, e))
    }
}

struct NetScanner<'p, 'a> {
    parser: &'p NetTopologyParser<'a>,
    state: ScanState,
    net: NetScan,
    buffers: Vec<InsertedBuffer>,
}

impl<'p, 'a> NetScanner<'p, 'a> {
    fn new(parser: &'p NetTopologyParser<'a>) -> Self {
        Self {
            parser,
            state: ScanState::OutsideNet,
            net: NetScan::default(),
            buffers: Vec::new(),
        }
    }

    fn step(&mut self, c: char, diagnostics: &mut Diagnostics) {
        self.state = match (self.state, c) {
            (ScanState::InsidePin, ';') => {
                self.reject_pin(diagnostics);
                self.close_net()
            }
            (_, ';') => self.close_net(),

            (ScanState::OutsideNet, '-') => ScanState::CapturingName,
            (ScanState::OutsideNet, _) => ScanState::OutsideNet,

            (ScanState::CapturingName, '(') => {
                self.trim_name();
                ScanState::InsidePin
            }
            (ScanState::CapturingName, '+') => {
                self.trim_name();
                ScanState::Attributes
            }
            (ScanState::CapturingName, c) => {
                self.net.name.push(c);
                ScanState::CapturingName
            }

            (ScanState::InNet, '(') => ScanState::InsidePin,
            (ScanState::InNet, '+') => ScanState::Attributes,
            (ScanState::InNet, _) => ScanState::InNet,

            (ScanState::InsidePin, ')') => {
                self.finish_pin(diagnostics);
                ScanState::InNet
            }
            (ScanState::InsidePin, '(' | '\\') => ScanState::InsidePin,
            (ScanState::InsidePin, c) => {
                self.net.pin_token.push(c);
                ScanState::InsidePin
            }

            (ScanState::Attributes, _) => ScanState::Attributes,
        };
    }

    fn trim_name(&mut self) {
        let trimmed = self.net.name.trim();
        if trimmed.len() != self.net.name.len() {
            self.net.name = trimmed.to_string();
        }
    }

    fn finish_pin(&mut self, diagnostics: &mut Diagnostics) {
        let token = std::mem::take(&mut self.net.pin_token);
        let fields: Vec<&str> = token.split_whitespace().collect();
        let [instance, pin] = fields.as_slice() else {
            diagnostics.record(Warning::MalformedPin {
                net: self.net.name.clone(),
                token: token.trim().to_string(),
            });
            return;
        };

        let candidate_type = if *pin == self.parser.driver_pin {
            self.parser.candidates.cell_type(instance)
        } else {
            None
        };

        match (candidate_type, self.net.driver.is_some()) {
            (Some(cell_type), false) => {
                trace!("net {}: inserted driver {}", self.net.name, instance);
                self.net.driver = Some((instance.to_string(), cell_type.to_string()));
            }
            (Some(_), true) => {
                diagnostics.record(Warning::DuplicateDriver {
                    net: self.net.name.clone(),
                    instance: instance.to_string(),
                });
            }
            (None, _) => self.net.loads.push(PinRef::new(*instance, *pin)),
        }
    }

    fn reject_pin(&mut self, diagnostics: &mut Diagnostics) {
        let token = std::mem::take(&mut self.net.pin_token);
        diagnostics.record(Warning::MalformedPin {
            net: self.net.name.clone(),
            token: token.trim().to_string(),
        });
    }

    fn close_net(&mut self) -> ScanState {
        let mut net = std::mem::take(&mut self.net);
        if let Some((cell_name, cell_type)) = net.driver.take() {
            let net_name = net.name;
            debug!(
                "Inserted buffer {} ({}) on net {} with {} loads",
                cell_name,
                cell_type,
                net_name,
                net.loads.len()
            );
            self.buffers.push(InsertedBuffer {
                cell_name,
                cell_type,
                net_name,
                load_pins: net.loads,
            });
        }
        ScanState::OutsideNet
    }

    fn finish(self, last_line: usize, diagnostics: &mut Diagnostics) -> Vec<InsertedBuffer> {
        if self.state != ScanState::OutsideNet {
            diagnostics.record(Warning::UnterminatedRecord { line: last_line });
        }
        debug!("Found {} nets driven by inserted instances", self.buffers.len());
        self.buffers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WarningKind;

    fn scan(candidates: &InsertionCandidates, nets: &str) -> (Vec<InsertedBuffer>, Diagnostics) {
        let text = format!("NETS 1 ;\n{nets}\nEND NETS\n");
        let mut diagnostics = Diagnostics::new();
        let buffers = NetTopologyParser::new(candidates)
            .parse(text.as_bytes(), &mut diagnostics)
            .unwrap();
        (buffers, diagnostics)
    }

    #[test]
    fn test_driver_and_loads_in_order() {
        let candidates: InsertionCandidates = [("b1", "BUFx2")].into_iter().collect();
        let (buffers, diagnostics) = scan(&candidates, "- n1 ( u9 B ) ( b1 Y ) ( u2 A ) ;");

        assert!(diagnostics.is_empty());
        assert_eq!(
            buffers,
            vec![InsertedBuffer {
                cell_name: "b1".into(),
                cell_type: "BUFx2".into(),
                net_name: "n1".into(),
                load_pins: vec![PinRef::new("u9", "B"), PinRef::new("u2", "A")],
            }]
        );
    }

    #[test]
    fn test_new_instance_on_input_pin_is_a_load() {
        let candidates: InsertionCandidates = [("b1", "BUFx2")].into_iter().collect();
        let (buffers, _) = scan(&candidates, "- n1 ( u1 Y ) ( b1 A ) ;");
        assert!(buffers.is_empty());
    }

    #[test]
    fn test_backslashes_dropped_inside_pins() {
        let candidates: InsertionCandidates = [("b1", "BUFx2")].into_iter().collect();
        let (buffers, _) = scan(&candidates, "- n\\[1\\] ( b1 Y ) ( r\\[0\\] D ) ;");

        assert_eq!(buffers[0].load_pins, vec![PinRef::new("r[0]", "D")]);
        assert_eq!(buffers[0].net_name, "n\\[1\\]");
    }

    #[test]
    fn test_record_spanning_lines() {
        let candidates: InsertionCandidates = [("b1", "BUFx2")].into_iter().collect();
        let (buffers, _) = scan(&candidates, "- n1\n  ( b1\n Y )\n  ( u2 A )\n  + USE SIGNAL ;");

        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].net_name, "n1");
        assert_eq!(buffers[0].load_pins, vec![PinRef::new("u2", "A")]);
    }

    #[test]
    fn test_routing_parentheses_are_not_pins() {
        let candidates: InsertionCandidates = [("b1", "BUFx2")].into_iter().collect();
        let (buffers, diagnostics) = scan(
            &candidates,
            "- n1 ( b1 Y ) ( u2 A ) + ROUTED M1 ( 100 200 ) ( * 300 ) ;",
        );

        assert!(diagnostics.is_empty());
        assert_eq!(buffers[0].load_pins, vec![PinRef::new("u2", "A")]);
    }

    #[test]
    fn test_malformed_pin_is_discarded() {
        let candidates: InsertionCandidates = [("b1", "BUFx2")].into_iter().collect();
        let (buffers, diagnostics) = scan(&candidates, "- n1 ( b1 Y ) ( u2 ) ( u3 A ) ;");

        assert_eq!(buffers[0].load_pins, vec![PinRef::new("u3", "A")]);
        assert_eq!(diagnostics.count(WarningKind::MalformedPin), 1);
    }

    #[test]
    fn test_second_driver_is_ignored() {
        let candidates: InsertionCandidates =
            [("b1", "BUFx2"), ("b2", "BUFx4")].into_iter().collect();
        let (buffers, diagnostics) = scan(&candidates, "- n1 ( b1 Y ) ( b2 Y ) ( u3 A ) ;");

        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].cell_name, "b1");
        assert_eq!(buffers[0].load_pins, vec![PinRef::new("u3", "A")]);
        assert_eq!(diagnostics.count(WarningKind::DuplicateDriver), 1);
    }

    #[test]
    fn test_custom_driver_pin() {
        let candidates: InsertionCandidates = [("b1", "BUF_X2")].into_iter().collect();
        let text = "NETS 1 ;\n- n1 ( b1 Z ) ( u2 A ) ;\nEND NETS\n";
        let mut diagnostics = Diagnostics::new();
        let buffers = NetTopologyParser::new(&candidates)
            .with_driver_pin("Z")
            .parse(text.as_bytes(), &mut diagnostics)
            .unwrap();

        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].cell_type, "BUF_X2");
    }

    #[test]
    fn test_unterminated_net_is_reported() {
        let candidates: InsertionCandidates = [("b1", "BUFx2")].into_iter().collect();
        let (buffers, diagnostics) = scan(&candidates, "- n1 ( b1 Y ) ( u2 A )");

        assert!(buffers.is_empty());
        assert_eq!(diagnostics.count(WarningKind::UnterminatedRecord), 1);
    }
}
