//! Backtrack-stack resolution and path enrichment.

use smallvec::SmallVec;

use trek_core::errors::PathError;
use trek_core::types::PathStep;

use crate::loader::{QuitReason, RawPathRecord};

/// The outcome of replaying a raw step sequence through the backtrack
/// stack: the clean article sequence plus, per back click, the article
/// that was on top before the pop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub clean: Vec<String>,
    pub back_origins: Vec<String>,
}

/// Replay a raw step sequence: forward pushes, back pops.
///
/// A back click with an empty stack means the record is malformed; it is
/// rejected, never silently under-popped.
pub fn replay(steps: &[PathStep]) -> Result<Replay, PathError> {
    let mut stack: SmallVec<[&str; 16]> = SmallVec::new();
    let mut back_origins = Vec::new();

    for (idx, step) in steps.iter().enumerate() {
        match step {
            PathStep::Forward(name) => stack.push(name.as_str()),
            PathStep::Back => {
                let Some(origin) = stack.pop() else {
                    return Err(PathError::MalformedPath {
                        path: display_path(steps),
                        step: idx,
                    });
                };
                back_origins.push(origin.to_string());
            }
        }
    }

    Ok(Replay {
        clean: stack.into_iter().map(str::to_string).collect(),
        back_origins,
    })
}

fn display_path(steps: &[PathStep]) -> String {
    steps
        .iter()
        .map(PathStep::token)
        .collect::<Vec<_>>()
        .join(";")
}

/// One navigation attempt with backtracks resolved and endpoints derived.
#[derive(Debug, Clone)]
pub struct NormalizedPath {
    pub player: String,
    pub timestamp: i64,
    pub duration_secs: u64,
    /// The raw step sequence, back clicks included.
    pub steps: Vec<PathStep>,
    /// The clean article sequence after stack replay.
    pub clean: Vec<String>,
    /// Articles that were on top before each pop, in click order.
    pub back_origins: Vec<String>,
    pub source: String,
    pub target: String,
    pub finished: bool,
    pub rating: Option<u8>,
    pub quit_reason: Option<QuitReason>,
}

impl NormalizedPath {
    /// Raw token count, back clicks included.
    pub fn raw_length(&self) -> usize {
        self.steps.len()
    }

    pub fn clean_length(&self) -> usize {
        self.clean.len()
    }

    pub fn back_clicks(&self) -> usize {
        self.back_origins.len()
    }
}

/// Normalize one raw record.
///
/// The first token of a raw path is always the declared source; the target
/// is the last clean token for finished paths and the explicitly declared
/// article for unfinished ones.
pub fn normalize(record: &RawPathRecord) -> Result<NormalizedPath, PathError> {
    if record.tokens.is_empty() || record.tokens.iter().all(String::is_empty) {
        return Err(PathError::EmptyPath);
    }

    let steps: Vec<PathStep> = record
        .tokens
        .iter()
        .map(|token| PathStep::from_token(token))
        .collect();
    let Replay {
        clean,
        back_origins,
    } = replay(&steps)?;

    // A valid record of length >= 1 always keeps its source on the stack.
    let source = clean.first().cloned().ok_or(PathError::EmptyPath)?;
    let target = if record.finished {
        clean.last().cloned().ok_or(PathError::EmptyPath)?
    } else {
        record
            .declared_target
            .clone()
            .ok_or(PathError::MissingTarget)?
    };

    Ok(NormalizedPath {
        player: record.player.clone(),
        timestamp: record.timestamp,
        duration_secs: record.duration_secs,
        steps,
        clean,
        back_origins,
        source,
        target,
        finished: record.finished,
        rating: record.rating,
        quit_reason: record.quit_reason.clone(),
    })
}

/// Normalize a whole corpus. Any malformed record aborts the load: a path
/// with more backtracks than history means the dataset is inconsistent.
pub fn normalize_all(records: &[RawPathRecord]) -> Result<Vec<NormalizedPath>, PathError> {
    records.iter().map(normalize).collect()
}
