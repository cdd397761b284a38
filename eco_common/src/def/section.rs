//! Section boundaries of a snapshot.

use std::io::{self, BufRead};

/// A top-level section of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `COMPONENTS ... END COMPONENTS`
    Components,
    /// `NETS ... END NETS`. `SPECIALNETS` is a different section.
    Nets,
}

/// A section boundary found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    End,
}

impl Section {
    /// The keyword that opens (and, after `END`, closes) the section.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Components => "COMPONENTS",
            Self::Nets => "NETS",
        }
    }

    /// Classify `line` as a boundary of this section.
    ///
    /// Matching is done on whole tokens and the end marker is checked first,
    /// since `END COMPONENTS` also contains the start keyword.
    pub fn marker(self, line: &str) -> Option<Marker> {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some("END"), Some(keyword)) if keyword == self.keyword() => Some(Marker::End),
            (Some(keyword), _) if keyword == self.keyword() => Some(Marker::Start),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanPosition {
    Before,
    Inside,
    Done,
}

/// Iterator over the lines strictly inside one section, with their 1-based
/// line numbers. Stops reading at the end marker.
pub struct SectionLines<R> {
    lines: io::Lines<R>,
    section: Section,
    position: ScanPosition,
    line_no: usize,
}

impl<R: BufRead> SectionLines<R> {
    /// Iterate the lines inside `section` of `reader`.
    pub fn new(reader: R, section: Section) -> Self {
        Self {
            lines: reader.lines(),
            section,
            position: ScanPosition::Before,
            line_no: 0,
        }
    }

    /// Whether the end marker of the section has been reached.
    pub fn finished(&self) -> bool {
        self.position == ScanPosition::Done
    }
}

impl<R: BufRead> Iterator for SectionLines<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position != ScanPosition::Done {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;

            match (self.position, self.section.marker(&line)) {
                (ScanPosition::Before, Some(Marker::Start)) => {
                    tracing::trace!("{} section opens at line {}", self.section.keyword(), self.line_no);
                    self.position = ScanPosition::Inside;
                }
                (ScanPosition::Inside, Some(Marker::End)) => {
                    tracing::trace!("{} section closes at line {}", self.section.keyword(), self.line_no);
                    self.position = ScanPosition::Done;
                }
                (ScanPosition::Inside, None) => return Some(Ok((self.line_no, line))),
                _ => {}
            }
        }
        None
    }
}
