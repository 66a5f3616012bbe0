//! Generic delimited-table reader with encoding and delimiter auto-detection.
//!
//! Produces a [`Table`] of string cells. No ride-specific logic here; the
//! source-specific loaders live in [`crate::loader`].

use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// An in-memory table of string cells with a header row.
///
/// Rows are rectangular: short source rows are padded with empty strings
/// and extra trailing cells are dropped, so every row has exactly
/// `headers.len()` cells.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column names (file headers until renamed).
    pub headers: Vec<String>,
    /// Data rows, one `Vec<String>` per line.
    pub rows: Vec<Vec<String>>,
    /// Detected or assumed encoding.
    pub encoding: String,
    /// Detected or explicit delimiter.
    pub delimiter: char,
}

impl Table {
    /// Replace the header row with canonical column names, by position.
    ///
    /// The file's own header names are deliberately ignored: the loaders
    /// trust column *order*, not labels. The only check possible under
    /// that convention is the width.
    pub fn rename_columns(&mut self, table: &str, names: &[&str]) -> CsvResult<()> {
        if self.headers.len() != names.len() {
            return Err(CsvError::ColumnCountMismatch {
                table: table.to_string(),
                expected: names.len(),
                found: self.headers.len(),
            });
        }
        self.headers = names.iter().map(|s| s.to_string()).collect();
        Ok(())
    }

    /// Index of a named column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a named column, as an error if absent.
    pub fn require_column(&self, name: &str) -> CsvResult<usize> {
        self.column(name)
            .ok_or_else(|| CsvError::MissingColumn(name.to_string()))
    }
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.to_string(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Read a table from a file with auto-detection of encoding and delimiter.
pub fn read_table_auto<P: AsRef<Path>>(path: P) -> CsvResult<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

/// Parse table bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<Table> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    parse_table(&content, delimiter, encoding)
}

/// Read a table from a file with an explicit delimiter.
pub fn read_table<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);
    parse_table(&content, delimiter, encoding)
}

/// Split one line into cells, honoring double-quoted fields.
///
/// A quoted field may contain the delimiter (the city exports quote
/// comma-grouped numbers like `"8,405,837"`); a doubled quote inside a
/// quoted field is an escaped quote. Unquoted cells pass through
/// unchanged; trimming happens in the caller.
fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delimiter {
            cells.push(std::mem::take(&mut cell));
        } else {
            cell.push(c);
        }
    }
    cells.push(cell);

    cells
}

/// Parse table content with an explicit delimiter.
///
/// Cells are quote-aware (a quoted cell may contain the delimiter) and
/// trimmed; empty lines are skipped.
pub fn parse_table(content: &str, delimiter: char, encoding: String) -> CsvResult<Table> {
    let mut lines = content.lines();

    let header_line = lines.next().ok_or(CsvError::EmptyFile)?;

    let headers: Vec<String> = split_line(header_line, delimiter)
        .iter()
        .map(|s| s.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let width = headers.len();
    let mut rows = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let mut cells: Vec<String> = split_line(line, delimiter)
            .into_iter()
            .take(width)
            .map(|s| s.trim().to_string())
            .collect();
        cells.resize(width, String::new());

        rows.push(cells);
    }

    Ok(Table {
        headers,
        rows,
        encoding,
        delimiter,
    })
}
