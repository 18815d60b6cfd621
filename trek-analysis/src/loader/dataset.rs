//! Dataset assembly: the six logical tables, typed.
//!
//! Required tables: `articles`, `categories`, `links`, `paths_finished`,
//! `paths_unfinished`, `shortest-path-distance-matrix`. The link-position
//! table (the HTML scraper's export) is optional; without it the top-link
//! scorer simply sees no samples.

use std::path::Path;

use tracing::{info, warn};

use trek_core::config::TrekConfig;
use trek_core::errors::{ConfigError, PathError, PipelineError, TableError};
use trek_core::types::collections::FxHashMap;

use super::percent;
use super::raw_table::RawTable;
use crate::oracle::matrix::DistanceMatrix;

/// A node identity: decoded display name plus the raw percent-encoded
/// token. The encoded token is kept because plaintext bodies are stored
/// under the encoded filename.
#[derive(Debug, Clone)]
pub struct Article {
    pub name: String,
    pub encoded: String,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub article: String,
    pub category: String,
}

/// A directed hyperlink from the static link table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: String,
    pub target: String,
}

/// Why an unfinished path ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuitReason {
    Timeout,
    Restart,
    Other(String),
}

impl QuitReason {
    fn from_field(field: &str) -> QuitReason {
        match field {
            "timeout" => QuitReason::Timeout,
            "restart" => QuitReason::Restart,
            other => QuitReason::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            QuitReason::Timeout => "timeout",
            QuitReason::Restart => "restart",
            QuitReason::Other(s) => s,
        }
    }
}

/// One raw navigation attempt, decoded but not yet normalized.
#[derive(Debug, Clone)]
pub struct RawPathRecord {
    pub player: String,
    pub timestamp: i64,
    pub duration_secs: u64,
    /// Decoded `;`-separated tokens; may contain the back token `<`.
    pub tokens: Vec<String>,
    pub finished: bool,
    /// Declared target for unfinished paths.
    pub declared_target: Option<String>,
    /// Player rating of a finished path (`NULL` in the raw data -> None).
    pub rating: Option<u8>,
    pub quit_reason: Option<QuitReason>,
}

/// Per-article outgoing links in first-appearance page order, with
/// relative position in (0, 1].
#[derive(Debug, Clone, Default)]
pub struct LinkPositions {
    positions: FxHashMap<String, Vec<(String, f64)>>,
}

impl LinkPositions {
    /// Build from (article, link, 1-based absolute position) rows.
    pub fn from_rows(rows: Vec<(String, String, u32)>) -> LinkPositions {
        let mut by_article: FxHashMap<String, Vec<(String, u32)>> = FxHashMap::default();
        for (article, link, position) in rows {
            by_article.entry(article).or_default().push((link, position));
        }

        let mut positions: FxHashMap<String, Vec<(String, f64)>> = FxHashMap::default();
        for (article, mut links) in by_article {
            links.sort_by_key(|(_, pos)| *pos);
            let count = links.len() as f64;
            let relative = links
                .into_iter()
                .map(|(link, pos)| (link, f64::from(pos) / count))
                .collect();
            positions.insert(article, relative);
        }

        LinkPositions { positions }
    }

    /// Relative first-appearance position of `link` on `article`'s page.
    pub fn relative_position(&self, article: &str, link: &str) -> Option<f64> {
        self.positions
            .get(article)?
            .iter()
            .find(|(candidate, _)| candidate == link)
            .map(|(_, pos)| *pos)
    }

    pub fn knows_article(&self, article: &str) -> bool {
        self.positions.contains_key(article)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn article_count(&self) -> usize {
        self.positions.len()
    }
}

/// The fully loaded dataset. Immutable after load.
#[derive(Debug)]
pub struct Dataset {
    pub articles: Vec<Article>,
    /// Decoded name -> position in `articles` (the distance-matrix order).
    pub article_index: FxHashMap<String, u32>,
    pub categories: Vec<Category>,
    pub links: Vec<Link>,
    pub paths_finished: Vec<RawPathRecord>,
    pub paths_unfinished: Vec<RawPathRecord>,
    pub distance_matrix: DistanceMatrix,
    pub link_positions: LinkPositions,
}

impl Dataset {
    /// Load the dataset named by `config`.
    ///
    /// A missing or mis-structured dataset folder is a setup error, not a
    /// parse backtrace.
    pub fn load(config: &TrekConfig) -> Result<Dataset, PipelineError> {
        let tables_dir = config.dataset.tables_dir();
        if !tables_dir.is_dir() {
            return Err(ConfigError::DatasetNotFound {
                path: tables_dir.display().to_string(),
            }
            .into());
        }

        info!("loading raw data from tsv files...");
        let tables = load_raw_tables(&tables_dir)?;
        let get = |name: &str| -> Result<&RawTable, TableError> {
            tables.get(name).ok_or_else(|| TableError::MissingTable {
                name: name.to_string(),
            })
        };

        info!("formatting articles...");
        let articles = parse_articles(get("articles")?)?;
        let article_index: FxHashMap<String, u32> = articles
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name.clone(), i as u32))
            .collect();

        info!("formatting categories...");
        let categories = parse_categories(get("categories")?)?;

        info!("formatting links...");
        let links = parse_links(get("links")?)?;

        info!("formatting paths...");
        let paths_finished = parse_paths(get("paths_finished")?, true)?;
        let paths_unfinished = parse_paths(get("paths_unfinished")?, false)?;

        info!("formatting distance matrix...");
        let matrix_rows: Vec<&str> = get("shortest-path-distance-matrix")?
            .rows
            .iter()
            .map(|row| row[0].as_str())
            .collect();
        let distance_matrix = DistanceMatrix::parse(&matrix_rows, articles.len())?;

        let link_positions = load_link_positions(&config.dataset.link_positions_path())?;

        info!(
            articles = articles.len(),
            links = links.len(),
            finished = paths_finished.len(),
            unfinished = paths_unfinished.len(),
            "dataset loaded"
        );

        Ok(Dataset {
            articles,
            article_index,
            categories,
            links,
            paths_finished,
            paths_unfinished,
            distance_matrix,
            link_positions,
        })
    }

    /// All paths, finished first (the order the corpus-wide builds use).
    pub fn all_paths(&self) -> impl Iterator<Item = &RawPathRecord> {
        self.paths_finished.iter().chain(self.paths_unfinished.iter())
    }

    /// Encoded filename token for a decoded article name.
    pub fn encoded_name(&self, name: &str) -> Option<&str> {
        let idx = *self.article_index.get(name)? as usize;
        Some(self.articles[idx].encoded.as_str())
    }
}

/// Scan the tables folder for `.tsv`/`.txt` files, keyed by file stem
/// before the first `.`.
fn load_raw_tables(dir: &Path) -> Result<FxHashMap<String, RawTable>, TableError> {
    let mut tables = FxHashMap::default();
    let entries = std::fs::read_dir(dir).map_err(|source| TableError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| TableError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !(file_name.ends_with(".tsv") || file_name.ends_with(".txt")) {
            continue;
        }
        let key = file_name
            .split('.')
            .next()
            .unwrap_or(file_name.as_str())
            .to_string();
        tables.insert(key, RawTable::load(&path)?);
    }

    Ok(tables)
}

fn require_column(table: &RawTable, table_name: &str, column: &str) -> Result<usize, TableError> {
    table
        .column_index(column)
        .ok_or_else(|| TableError::MissingColumn {
            table: table_name.to_string(),
            column: column.to_string(),
        })
}

fn parse_articles(table: &RawTable) -> Result<Vec<Article>, TableError> {
    let article_col = require_column(table, "articles", "article")?;
    Ok(table
        .rows
        .iter()
        .map(|row| {
            let encoded = row[article_col].clone();
            Article {
                name: percent::decode(&encoded),
                encoded,
            }
        })
        .collect())
}

fn parse_categories(table: &RawTable) -> Result<Vec<Category>, TableError> {
    let article_col = require_column(table, "categories", "article")?;
    let category_col = require_column(table, "categories", "category")?;
    Ok(table
        .rows
        .iter()
        .map(|row| Category {
            article: percent::decode(&row[article_col]),
            category: row[category_col].clone(),
        })
        .collect())
}

fn parse_links(table: &RawTable) -> Result<Vec<Link>, TableError> {
    let source_col = require_column(table, "links", "linkSource")?;
    let target_col = require_column(table, "links", "linkTarget")?;
    Ok(table
        .rows
        .iter()
        .map(|row| Link {
            source: percent::decode(&row[source_col]),
            target: percent::decode(&row[target_col]),
        })
        .collect())
}

fn parse_paths(table: &RawTable, finished: bool) -> Result<Vec<RawPathRecord>, PipelineError> {
    let table_name = if finished { "paths_finished" } else { "paths_unfinished" };
    let player_col = require_column(table, table_name, "hashedIpAddress")?;
    let timestamp_col = require_column(table, table_name, "timestamp")?;
    let duration_col = require_column(table, table_name, "durationInSec")?;
    let path_col = require_column(table, table_name, "path")?;
    let rating_col = if finished {
        Some(require_column(table, table_name, "rating")?)
    } else {
        None
    };
    let target_col = if finished {
        None
    } else {
        Some(require_column(table, table_name, "target")?)
    };
    let type_col = if finished {
        None
    } else {
        Some(require_column(table, table_name, "type")?)
    };

    let mut records = Vec::with_capacity(table.len());
    for row in &table.rows {
        let timestamp: i64 =
            row[timestamp_col]
                .parse()
                .map_err(|_| PathError::BadTimestamp {
                    value: row[timestamp_col].clone(),
                })?;
        let duration_secs: u64 =
            row[duration_col]
                .parse()
                .map_err(|_| PathError::BadDuration {
                    value: row[duration_col].clone(),
                })?;
        let tokens: Vec<String> = row[path_col]
            .split(';')
            .map(percent::decode)
            .collect();

        let rating = rating_col.and_then(|col| {
            let field = row[col].as_str();
            if field == "NULL" {
                None
            } else {
                field.parse::<u8>().ok()
            }
        });
        let declared_target = target_col.map(|col| percent::decode(&row[col]));
        let quit_reason = type_col.map(|col| QuitReason::from_field(&row[col]));

        records.push(RawPathRecord {
            player: row[player_col].clone(),
            timestamp,
            duration_secs,
            tokens,
            finished,
            declared_target,
            rating,
            quit_reason,
        });
    }

    Ok(records)
}

/// The link-position table is optional: absent means the top-link scorer
/// has no samples to draw from.
fn load_link_positions(path: &Path) -> Result<LinkPositions, PipelineError> {
    if !path.is_file() {
        warn!(
            path = %path.display(),
            "link-position table not found; top-link ratios will have no samples"
        );
        return Ok(LinkPositions::default());
    }

    let table = RawTable::load(path)?;
    let article_col = require_column(&table, "link_positions", "article")?;
    let link_col = require_column(&table, "link_positions", "link")?;
    let position_col = require_column(&table, "link_positions", "position")?;

    let mut rows = Vec::with_capacity(table.len());
    for row in &table.rows {
        let position: u32 = row[position_col].parse().map_err(|_| TableError::BadField {
            path: path.display().to_string(),
            line: 0,
            message: format!("invalid link position `{}`", row[position_col]),
        })?;
        rows.push((
            percent::decode(&row[article_col]),
            percent::decode(&row[link_col]),
            position,
        ));
    }

    Ok(LinkPositions::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_positions_normalize_by_out_degree() {
        let positions = LinkPositions::from_rows(vec![
            ("A".into(), "B".into(), 1),
            ("A".into(), "C".into(), 2),
            ("A".into(), "D".into(), 4),
            ("A".into(), "E".into(), 3),
        ]);
        assert_eq!(positions.relative_position("A", "B"), Some(0.25));
        assert_eq!(positions.relative_position("A", "D"), Some(1.0));
        assert_eq!(positions.relative_position("A", "Z"), None);
        assert_eq!(positions.relative_position("Q", "B"), None);
    }

    #[test]
    fn test_quit_reason_mapping() {
        assert_eq!(QuitReason::from_field("timeout"), QuitReason::Timeout);
        assert_eq!(QuitReason::from_field("restart"), QuitReason::Restart);
        assert_eq!(
            QuitReason::from_field("gave_up"),
            QuitReason::Other("gave_up".to_string())
        );
    }
}
