//! File plumbing shared by the streaming transformations.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use eco_common::open_source;

use crate::TransformError;

/// Run `transform` from `input` into a freshly created `output`.
pub(crate) fn transform_file<T>(
    input: &Path,
    output: &Path,
    transform: impl FnOnce(BufReader<File>, &mut BufWriter<File>) -> std::io::Result<T>,
) -> Result<T, TransformError> {
    let reader = open_source(input)?;
    let file = File::create(output).map_err(|e| TransformError::output(output, e))?;
    let mut writer = BufWriter::new(file);
    let result = transform(reader, &mut writer)
        .and_then(|value| writer.flush().map(|()| value))
        .map_err(|e| TransformError::stream(input, output, e))?;
    Ok(result)
}
