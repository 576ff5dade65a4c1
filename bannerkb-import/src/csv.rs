//! Delimited-text parsing for spreadsheet exports and uploaded CSV files.
//!
//! Everything at this layer is a string; no type inference. The format is
//! the one the spreadsheet export actually produces: comma-delimited fields,
//! double-quote quoting with doubled quotes as the escape, one record per
//! line (no embedded newlines), values trimmed per field. Blank lines are
//! skipped entirely and the first non-blank line supplies the headers.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("CSV input is empty (need a header line and at least one data row)")]
    Empty,
}

/// One parsed row: a header → cell mapping. Cells for headers missing from
/// a short line are present as empty strings.
#[derive(Debug, Clone, Default)]
pub struct CsvRow {
    values: HashMap<String, String>,
}

impl CsvRow {
    /// Cell value for a header, if the column exists.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.values.get(header).map(String::as_str)
    }

    /// Cell value for a header when it is non-empty.
    pub fn get_non_empty(&self, header: &str) -> Option<&str> {
        self.get(header).filter(|v| !v.is_empty())
    }

    pub fn insert(&mut self, header: &str, value: &str) {
        self.values.insert(header.to_string(), value.to_string());
    }
}

/// Parse a raw CSV blob into rows keyed by the first line's headers.
///
/// Returns [`CsvError::Empty`] when fewer than two non-blank lines are
/// present (header only, or nothing). Unknown extra columns are carried
/// through; callers ignore what they don't map.
pub fn parse_csv(text: &str) -> Result<Vec<CsvRow>, CsvError> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    if lines.len() < 2 {
        return Err(CsvError::Empty);
    }

    let headers = parse_line(lines[0]);
    let mut rows = Vec::with_capacity(lines.len() - 1);

    for line in &lines[1..] {
        let cells = parse_line(line);
        let mut row = CsvRow::default();
        for (index, header) in headers.iter().enumerate() {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            row.insert(header, value);
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Split one CSV line into trimmed cell values.
///
/// A double quote toggles quoted mode; inside quotes a doubled quote is a
/// literal quote and commas are data. Trimming happens after unquoting.
fn parse_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());

    cells
}

/// Render one field for CSV output, quoting and escaping when needed.
pub fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render a row in a fixed header order.
pub fn serialize_row(headers: &[&str], row: &CsvRow) -> String {
    headers
        .iter()
        .map(|h| escape_field(row.get(h).unwrap_or("")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_rows() {
        let rows = parse_csv("a,b,c\n1,2,3\n4,5,6").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("a"), Some("1"));
        assert_eq!(rows[1].get("c"), Some("6"));
    }

    #[test]
    fn quoted_comma_and_escaped_quote_round_trip() {
        let rows = parse_csv("name\n\"a,\"\"b\"\"\"").unwrap();
        assert_eq!(rows[0].get("name"), Some("a,\"b\""));
        assert_eq!(escape_field("a,\"b\""), "\"a,\"\"b\"\"\"");
    }

    #[test]
    fn fields_are_trimmed() {
        let rows = parse_csv("a,b\n  x  ,\" y \"").unwrap();
        assert_eq!(rows[0].get("a"), Some("x"));
        assert_eq!(rows[0].get("b"), Some("y"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let rows = parse_csv("a,b\n\n1,2\n   \n3,4\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("a"), Some("3"));
    }

    #[test]
    fn header_only_is_empty_input() {
        assert!(matches!(parse_csv("a,b,c\n"), Err(CsvError::Empty)));
        assert!(matches!(parse_csv(""), Err(CsvError::Empty)));
        assert!(matches!(parse_csv("\n  \n"), Err(CsvError::Empty)));
    }

    #[test]
    fn short_lines_fill_missing_cells_with_empty() {
        let rows = parse_csv("a,b,c\n1,2").unwrap();
        assert_eq!(rows[0].get("c"), Some(""));
        assert_eq!(rows[0].get_non_empty("c"), None);
    }

    #[test]
    fn serialize_row_respects_header_order() {
        let rows = parse_csv("a,b\n1,\"x,y\"").unwrap();
        assert_eq!(serialize_row(&["b", "a"], &rows[0]), "\"x,y\",1");
    }
}
