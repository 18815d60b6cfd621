//! The custom line-oriented tabular format.
//!
//! Two header variants exist across the archive and both are detected
//! explicitly, with no silent fallback beyond them:
//!
//! - `# FORMAT:   col1   col2   ...` — triple-space delimited column names.
//! - any other `# FORMAT:` line — a single implicit `value` column (this is
//!   how the shortest-path distance matrix file declares itself).
//!
//! A second `# FORMAT:` line anywhere in the file is fatal.

use std::path::Path;

use trek_core::errors::TableError;

const FORMAT_PREFIX: &str = "# FORMAT:";
const DECLARED_PREFIX: &str = "# FORMAT:   ";
const COLUMN_DELIMITER: &str = "   ";

/// How a table declared its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderFormat {
    /// Triple-space delimited column names after `# FORMAT:   `.
    Declared(Vec<String>),
    /// A `# FORMAT:` line without the delimiter: one implicit `value` column.
    SingleValue,
}

impl HeaderFormat {
    /// Detect the header variant of a `# FORMAT:` line.
    fn detect(line: &str) -> HeaderFormat {
        match line.strip_prefix(DECLARED_PREFIX) {
            Some(rest) => HeaderFormat::Declared(
                rest.split(COLUMN_DELIMITER).map(str::to_string).collect(),
            ),
            None => HeaderFormat::SingleValue,
        }
    }

    pub fn columns(&self) -> Vec<String> {
        match self {
            HeaderFormat::Declared(cols) => cols.clone(),
            HeaderFormat::SingleValue => vec!["value".to_string()],
        }
    }
}

/// A parsed raw table: column names plus untyped string rows.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse a raw table file.
    pub fn load(path: &Path) -> Result<RawTable, TableError> {
        let content = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse raw table content. `origin` is used in error messages only.
    pub fn parse(content: &str, origin: &str) -> Result<RawTable, TableError> {
        let mut header: Option<HeaderFormat> = None;
        let mut rows: Vec<Vec<String>> = Vec::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim_end();
            let line_no = idx + 1;

            if line.starts_with(FORMAT_PREFIX) {
                if header.is_some() {
                    return Err(TableError::FormatRedeclared {
                        path: origin.to_string(),
                        line: line_no,
                    });
                }
                header = Some(HeaderFormat::detect(line));
                continue;
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let columns = header.get_or_insert(HeaderFormat::SingleValue).columns();
            let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
            if fields.len() != columns.len() {
                return Err(TableError::RowArity {
                    path: origin.to_string(),
                    line: line_no,
                    expected: columns.len(),
                    found: fields.len(),
                });
            }
            rows.push(fields);
        }

        let columns = header.unwrap_or(HeaderFormat::SingleValue).columns();
        Ok(RawTable { columns, rows })
    }

    /// Index of a named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
