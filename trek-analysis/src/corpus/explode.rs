//! The exploded per-step view.
//!
//! One row per (token, rank-in-path), with the remaining distance to the
//! target recomputed as `raw_length - rank`. Self-referential rows (the
//! token is the path's target) are dropped as noise, and implausibly long
//! paths are excluded up front.

use crate::corpus::NormalizedPath;

/// One visited token of one path.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplodedRow {
    /// The visited token: an article name, or `<` for a back click.
    pub source: String,
    /// The path's target article.
    pub target: String,
    /// Position in the raw step sequence, starting at 0.
    pub rank: usize,
    /// Steps left until the end of the attempt: `raw_length - rank`.
    pub remaining_length: usize,
}

/// Explode paths into per-step rows.
///
/// `max_path_length` discriminates attempts where the player was likely
/// not playing seriously; longer paths would unbalance the groups.
pub fn explode(paths: &[NormalizedPath], max_path_length: usize) -> Vec<ExplodedRow> {
    let mut rows = Vec::new();

    for path in paths {
        let length = path.raw_length();
        if length > max_path_length {
            continue;
        }
        for (rank, step) in path.steps.iter().enumerate() {
            let token = step.token();
            if token == path.target {
                continue;
            }
            rows.push(ExplodedRow {
                source: token.to_string(),
                target: path.target.clone(),
                rank,
                remaining_length: length - rank,
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::normalize;
    use crate::loader::RawPathRecord;

    fn path(tokens: &[&str], finished: bool, target: Option<&str>) -> NormalizedPath {
        normalize(&RawPathRecord {
            player: "p".to_string(),
            timestamp: 0,
            duration_secs: 10,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            finished,
            declared_target: target.map(str::to_string),
            rating: None,
            quit_reason: None,
        })
        .unwrap()
    }

    #[test]
    fn test_one_row_per_step_with_remaining_length() {
        let paths = vec![path(&["A", "B", "C"], true, None)];
        let rows = explode(&paths, 500);

        // The target row (C) is dropped.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source, "A");
        assert_eq!(rows[0].rank, 0);
        assert_eq!(rows[0].remaining_length, 3);
        assert_eq!(rows[1].source, "B");
        assert_eq!(rows[1].remaining_length, 2);
    }

    #[test]
    fn test_back_clicks_appear_as_rows() {
        let paths = vec![path(&["A", "B", "<", "C"], true, None)];
        let rows = explode(&paths, 500);
        assert!(rows.iter().any(|r| r.source == "<" && r.rank == 2));
    }

    #[test]
    fn test_long_paths_excluded() {
        let paths = vec![path(&["A", "B", "C"], true, None)];
        assert!(explode(&paths, 2).is_empty());
    }

    #[test]
    fn test_self_referential_rows_dropped() {
        // Target B revisited mid-path must not produce a row.
        let paths = vec![path(&["A", "B", "C", "B"], true, None)];
        let rows = explode(&paths, 500);
        assert!(rows.iter().all(|r| r.source != "B"));
    }
}
