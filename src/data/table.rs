//! Reader for the symbol table format.
//!
//! Format:
//! - line oriented, `\n` terminated (a trailing `\r` is dropped)
//! - the first line is a header; only its comma count is used, to derive
//!   the number of input columns
//! - every data row holds one single-byte symbol per column, each followed
//!   by a one-byte delimiter: symbol `k` lives at byte offset `2k`
//! - the first `output_len` symbols are the desired outputs, the next
//!   `input_len` are the inputs
//! - blank lines are skipped

use std::path::Path;

use crate::error::{NetError, Result};
use crate::symbols::LabeledExample;

/// A parsed table: the derived input width and every data row in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub input_len: usize,
    pub output_len: usize,
    pub examples: Vec<LabeledExample>,
}

/// Reads and parses the table at `path`.
pub fn read_table(path: impl AsRef<Path>, output_len: usize) -> Result<Table> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| NetError::file(path, e))?;
    let table = parse_table(&bytes, output_len)?;
    log::debug!(
        "read {} rows from {} (input length {}, output length {})",
        table.examples.len(),
        path.display(),
        table.input_len,
        table.output_len
    );
    Ok(table)
}

/// Parses raw table bytes. Symbols are bytes, so no text encoding is assumed.
pub fn parse_table(bytes: &[u8], output_len: usize) -> Result<Table> {
    if output_len == 0 {
        return Err(NetError::invalid("length of final output vector must be greater than 0"));
    }

    let mut lines = bytes.split(|&b| b == b'\n').map(strip_cr);
    let header = lines
        .next()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| NetError::invalid("table is empty: missing header line"))?;

    let columns = header.iter().filter(|&&b| b == b',').count() + 1;
    let input_len = columns.checked_sub(output_len).filter(|&n| n >= 1).ok_or_else(|| {
        NetError::invalid(format!(
            "header has {columns} columns; output length {output_len} must leave at least 1 input column"
        ))
    })?;

    let needed = 2 * (output_len + input_len) - 1;
    let mut examples = Vec::new();
    for (row, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        if line.len() < needed {
            return Err(NetError::invalid(format!(
                "row {} has {} bytes, {} columns need at least {needed}",
                row + 2,
                line.len(),
                output_len + input_len
            )));
        }
        let output = (0..output_len).map(|k| line[2 * k]).collect();
        let input = (0..input_len).map(|k| line[2 * (output_len + k)]).collect();
        examples.push(LabeledExample { input, output });
    }

    for ex in &examples {
        log::trace!("{ex}");
    }

    Ok(Table { input_len, output_len, examples })
}

/// Splits `examples` into a training prefix of `floor(len · ratio)` rows and
/// a trial suffix holding the rest.
pub fn partition(examples: &[LabeledExample], ratio: f64) -> Result<(&[LabeledExample], &[LabeledExample])> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(NetError::invalid(format!(
            "trainingPartitionRatio must be between 0 and 1 (exclusive), got {ratio}"
        )));
    }
    let cut = (examples.len() as f64 * ratio) as usize;
    if cut == 0 || cut == examples.len() {
        return Err(NetError::invalid(format!(
            "partition ratio {ratio} of {} rows leaves the training or trial set empty",
            examples.len()
        )));
    }
    Ok(examples.split_at(cut))
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
