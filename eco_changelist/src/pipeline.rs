//! End-to-end synthesis.

use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use eco_common::{
    ComponentTable, Diagnostics, InsertedBuffer, InsertionCandidates, NetTopologyParser,
    RecordError, Warning, open_source,
};
use tracing::info;

use crate::{
    BufferDependencyGraph, ChangelistSummary, Classification, Command, Config, EcoError, classify,
    write_changelist,
};

/// The result of a successful run: the ordered commands, their summary and
/// every warning recovered along the way.
#[derive(Debug, Clone)]
pub struct Changelist {
    /// All `size_cell` commands followed by all `insert_buffer` commands.
    pub commands: Vec<Command>,
    /// Counts for the run.
    pub summary: ChangelistSummary,
    /// Warnings recovered while parsing.
    pub diagnostics: Diagnostics,
}

impl Changelist {
    /// The changelist text, one command per line.
    pub fn render(&self) -> String {
        self.commands
            .iter()
            .map(|command| format!("{command}\n"))
            .collect()
    }

    /// Write the changelist to `path`. See [`write_changelist`].
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), EcoError> {
        write_changelist(path, &self.commands)
    }
}

/// Synthesize a changelist from parsed component tables and the optimized
/// snapshot's net section.
///
/// `diagnostics` should already hold whatever the table parsers recorded; it
/// is moved into the returned [`Changelist`].
pub fn synthesize<R: BufRead>(
    original: &ComponentTable,
    optimized: &ComponentTable,
    optimized_nets: R,
    config: &Config,
    mut diagnostics: Diagnostics,
) -> Result<Changelist, EcoError> {
    let classification = classify(original, optimized)?;

    let buffers = NetTopologyParser::new(&classification.candidates)
        .with_driver_pin(&config.driver_pin)
        .parse(optimized_nets, &mut diagnostics)?;
    report_undriven(&classification.candidates, &buffers, &mut diagnostics);

    assemble(classification, buffers, diagnostics)
}

/// Run the whole pipeline on in-memory snapshots.
pub fn synthesize_str(original: &str, optimized: &str, config: &Config) -> Result<Changelist, EcoError> {
    let mut diagnostics = Diagnostics::new();
    let original_table = ComponentTable::parse(original.as_bytes(), &mut diagnostics)?;
    let optimized_table = ComponentTable::parse(optimized.as_bytes(), &mut diagnostics)?;
    synthesize(
        &original_table,
        &optimized_table,
        optimized.as_bytes(),
        config,
        diagnostics,
    )
}

/// Run the whole pipeline on snapshot files.
///
/// With the `parallel` feature and `config.parallel` set, the two component
/// tables are parsed concurrently.
pub fn synthesize_paths(
    original: impl AsRef<Path>,
    optimized: impl AsRef<Path>,
    config: &Config,
) -> Result<Changelist, EcoError> {
    let (original, optimized) = (original.as_ref(), optimized.as_ref());
    info!(
        "Synthesizing changelist from {} -> {}",
        original.display(),
        optimized.display()
    );

    let (original_table, optimized_table, diagnostics) =
        load_tables(original, optimized, config)?;

    let nets = open_source(optimized)?;
    synthesize(&original_table, &optimized_table, nets, config, diagnostics).map_err(|e| match e {
        EcoError::Io(source) => RecordError::read(optimized, source).into(),
        other => other,
    })
}

type Tables = (ComponentTable, ComponentTable, Diagnostics);

fn load_tables(original: &Path, optimized: &Path, config: &Config) -> Result<Tables, EcoError> {
    let load = |path: &Path| {
        let mut diagnostics = Diagnostics::new();
        ComponentTable::from_path(path, &mut diagnostics).map(|table| (table, diagnostics))
    };

    #[cfg(feature = "parallel")]
    let (a, b) = if config.parallel {
        rayon::join(|| load(original), || load(optimized))
    } else {
        (load(original), load(optimized))
    };
    #[cfg(not(feature = "parallel"))]
    let (a, b) = {
        if config.parallel {
            tracing::debug!("Built without the parallel feature; parsing sequentially");
        }
        (load(original), load(optimized))
    };

    let (original_table, mut diagnostics) = a?;
    let (optimized_table, optimized_diagnostics) = b?;
    diagnostics.merge(optimized_diagnostics);
    Ok((original_table, optimized_table, diagnostics))
}

fn report_undriven(
    candidates: &InsertionCandidates,
    buffers: &[InsertedBuffer],
    diagnostics: &mut Diagnostics,
) {
    let driven: HashSet<&str> = buffers.iter().map(|b| b.cell_name.as_str()).collect();
    for (instance, _) in candidates.iter() {
        if !driven.contains(instance) {
            diagnostics.record(Warning::UndrivenInsertion {
                instance: instance.to_string(),
            });
        }
    }
}

fn assemble(
    classification: Classification,
    buffers: Vec<InsertedBuffer>,
    diagnostics: Diagnostics,
) -> Result<Changelist, EcoError> {
    let ordered = BufferDependencyGraph::new(buffers).into_ordered()?;

    let summary = ChangelistSummary {
        resized: classification.resizes.len(),
        inserted_buffers: ordered.len(),
        new_instances: classification.candidates.len(),
        unchanged: classification.unchanged,
        ..Default::default()
    }
    .with_diagnostics(&diagnostics);

    let mut commands = classification.resizes;
    commands.extend(ordered.into_iter().map(Command::from));

    info!(
        "Changelist ready: {} resized, {} buffers inserted",
        summary.resized, summary.inserted_buffers
    );
    Ok(Changelist {
        commands,
        summary,
        diagnostics,
    })
}
