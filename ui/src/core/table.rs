//! Comma-delimited table parsing for wide-format institution datasets.
//!
//! The parser is deliberately lenient: malformed quoting is not rejected and
//! short rows are padded with empty cells when zipped against the header.

use std::collections::HashMap;

use csv::{ReaderBuilder, Terminator};
use tracing::warn;

/// One data record keyed by column name. Every header column is present.
pub type Row = HashMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTable {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl ParsedTable {
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }
}

/// Parse delimited text into a header and positional rows.
///
/// Fully blank lines are skipped. `\n`, `\r\n` and bare `\r` all end a record
/// outside of quotes; a doubled quote inside a quoted field is a literal `"`.
/// A leading byte-order mark is ignored.
pub fn parse(text: &str) -> ParsedTable {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = read_records(text).into_iter();

    let header = match records.next() {
        Some(header) => header,
        None => return ParsedTable::default(),
    };

    let rows = records
        .map(|record| {
            header
                .iter()
                .enumerate()
                .map(|(idx, key)| (key.clone(), record.get(idx).cloned().unwrap_or_default()))
                .collect::<Row>()
        })
        .collect();

    ParsedTable { header, rows }
}

fn read_records(text: &str) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_reader(text.as_bytes());

    let records = reader
        .records()
        .filter_map(|record| match record {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(%err, "skipping unreadable record");
                None
            }
        })
        .map(|record| record.iter().map(str::to_string).collect::<Vec<_>>())
        .filter(|record| keeps_record(record))
        .collect();
    records
}

/// A record whose only field is blank is a blank line.
fn keeps_record(record: &[String]) -> bool {
    record.len() > 1 || record.iter().any(|cell| !cell.trim().is_empty())
}
