use std::path::Path;

use crate::{ImportError, METADATA_ROWS, REQUIRED_COLUMNS};

const DELIMITER_CANDIDATES: [char; 3] = [',', ';', '\t'];

/// The tabular content of a trace file after the metadata rows were
/// skipped: one header row and the data rows below it, all cells kept
/// as trimmed text.
#[derive(Clone, Debug)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ImportError::NotFound(path.to_path_buf())
            } else {
                ImportError::Read {
                    path: path.to_path_buf(),
                    source: err,
                }
            }
        })?;
        Self::from_raw(&raw, METADATA_ROWS)
    }

    /// Parse tabular text, skipping `skip` leading metadata rows.
    ///
    /// The delimiter is sniffed from the header row: whichever candidate
    /// splits it into the most fields wins. Blank data rows are ignored.
    pub fn from_raw(raw: &str, skip: usize) -> Result<Self, ImportError> {
        let mut lines = raw.lines().skip(skip);
        let Some(header_line) = lines.next() else {
            // Too short for a header row, so every required column is
            // missing; report the first.
            return Err(ImportError::MissingColumn(REQUIRED_COLUMNS[0].to_string()));
        };

        let delimiter = sniff_delimiter(header_line);
        log::debug!("sniffed delimiter {:?} from header row", delimiter);

        let header = split_row(header_line, delimiter);
        let rows = lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| split_row(line, delimiter))
            .collect();

        Ok(Table { header, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Cell content at (data row, column), if the row is long enough.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

fn sniff_delimiter(header_line: &str) -> char {
    DELIMITER_CANDIDATES
        .into_iter()
        .max_by_key(|&candidate| header_line.matches(candidate).count())
        .expect("candidate list is non-empty")
}

/// Split one row into cells, honoring double quotes so that quoted
/// cells may contain the delimiter (the RGB schemas store "R,G,B"
/// triples in a single cell).
fn split_row(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for chr in line.chars() {
        match chr {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    cells.push(current);
    for cell in cells.iter_mut() {
        let trimmed = cell.trim();
        if trimmed.len() != cell.len() {
            *cell = trimmed.to_string();
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_prefers_most_frequent_candidate() {
        assert_eq!(sniff_delimiter("Date,Time,Value"), ',');
        assert_eq!(sniff_delimiter("Date;Time;Value"), ';');
        assert_eq!(sniff_delimiter("Date\tTime\tValue"), '\t');
    }

    #[test]
    fn test_split_row_honors_quotes() {
        assert_eq!(
            split_row("a,\"10,20,30\",b", ','),
            vec!["a".to_string(), "10,20,30".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_from_raw_skips_metadata_and_blank_lines() {
        let raw = "noise\nnoise\nDate,Time\n1,2\n\n3,4\n";
        let table = Table::from_raw(raw, 2).unwrap();
        assert_eq!(table.header, vec!["Date".to_string(), "Time".to_string()]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(1, 1), Some("4"));
    }

    #[test]
    fn test_from_raw_without_header_row() {
        let err = Table::from_raw("only\ntwo\n", 10).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(_)));
    }
}
