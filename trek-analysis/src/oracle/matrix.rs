//! The index-based shortest-path length matrix.

use trek_core::errors::OracleError;

/// Dense n x n matrix of optimal path lengths in article-table order.
/// `None` cells are unreachable pairs (`_` in the raw file).
#[derive(Debug)]
pub struct DistanceMatrix {
    cells: Vec<Option<u8>>,
    n: usize,
}

impl DistanceMatrix {
    /// Parse raw matrix rows: one string per article, one `_` or digit
    /// character per column. The shape must match the article count.
    pub fn parse(rows: &[&str], articles: usize) -> Result<DistanceMatrix, OracleError> {
        if rows.len() != articles {
            return Err(OracleError::ShapeMismatch {
                rows: rows.len(),
                cols: rows.first().map_or(0, |r| r.chars().count()),
                articles,
            });
        }

        let mut cells = Vec::with_capacity(articles * articles);
        for (row_idx, row) in rows.iter().enumerate() {
            let mut width = 0usize;
            for (col_idx, cell) in row.chars().enumerate() {
                let value = match cell {
                    '_' => None,
                    '0'..='9' => Some(cell as u8 - b'0'),
                    other => {
                        return Err(OracleError::BadCell {
                            row: row_idx,
                            col: col_idx,
                            cell: other,
                        })
                    }
                };
                cells.push(value);
                width += 1;
            }
            if width != articles {
                return Err(OracleError::ShapeMismatch {
                    rows: rows.len(),
                    cols: width,
                    articles,
                });
            }
        }

        Ok(DistanceMatrix { cells, n: articles })
    }

    /// Optimal path length from article `i` to article `j` (table order).
    pub fn get(&self, i: u32, j: u32) -> Option<u8> {
        self.cells[i as usize * self.n + j as usize]
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}
