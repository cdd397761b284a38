//! Backslash-escape removal.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::info;

use crate::TransformError;
use crate::stream::transform_file;

/// Copy `reader` to `writer`, dropping escape backslashes.
///
/// A backslash followed by ASCII whitespace is kept together with that byte.
/// A backslash followed by anything else is dropped and the byte kept, so
/// `\\` becomes `\`. A backslash at the very end of the input is dropped.
///
/// Returns the number of backslashes removed.
pub fn strip_backslashes<R: BufRead, W: Write>(mut reader: R, writer: &mut W) -> io::Result<u64> {
    let mut removed = 0u64;
    let mut pending = false;
    let mut out = Vec::new();

    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        out.clear();
        out.reserve(chunk.len() + 1);
        for &byte in chunk {
            if pending {
                pending = false;
                if byte.is_ascii_whitespace() {
                    out.push(b'\\');
                } else {
                    removed += 1;
                }
                out.push(byte);
            } else if byte == b'\\' {
                pending = true;
            } else {
                out.push(byte);
            }
        }
        let consumed = chunk.len();
        reader.consume(consumed);
        writer.write_all(&out)?;
    }

    if pending {
        removed += 1;
    }
    Ok(removed)
}

/// Strip escape backslashes from `input` into `output`.
pub fn strip_backslashes_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<u64, TransformError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let removed = transform_file(input, output, |reader, writer| {
        strip_backslashes(reader, writer)
    })?;
    info!("Removed {} backslashes from {}", removed, input.display());
    Ok(removed)
}
