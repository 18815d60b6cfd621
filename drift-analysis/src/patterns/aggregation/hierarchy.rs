//! Phase 5: Parent-child pattern relationship building.
//!
//! After merging, builds a hierarchy where merged patterns become children
//! of the surviving (primary) pattern.

use drift_core::types::collections::FxHashMap;

use super::types::{AggregatedPattern, MergeCandidate, MergeDecision, PatternHierarchy};

/// Build parent-child hierarchies from merge candidates.
///
/// For each AutoMerge pair, the pattern with more locations becomes the parent.
/// The other becomes a child. The parent's hierarchy tracks all children and
/// aggregated location counts.
pub fn build_hierarchies(
    patterns: &mut FxHashMap<String, AggregatedPattern>,
    candidates: &[MergeCandidate],
) {
    for candidate in candidates {
        if candidate.decision != MergeDecision::AutoMerge {
            continue;
        }

        let (parent_id, child_id) = {
            let count_a = patterns.get(&candidate.pattern_a).map(|p| p.location_count).unwrap_or(0);
            let count_b = patterns.get(&candidate.pattern_b).map(|p| p.location_count).unwrap_or(0);
            if count_a >= count_b {
                (candidate.pattern_a.clone(), candidate.pattern_b.clone())
            } else {
                (candidate.pattern_b.clone(), candidate.pattern_a.clone())
            }
        };

        // Merge child into parent
        let child_locations = patterns.get(&child_id).map(|p| p.locations.clone()).unwrap_or_default();
        let child_pattern_id = child_id.clone();

        if let Some(parent) = patterns.get_mut(&parent_id) {
            // Add child locations to parent
            parent.locations.extend(child_locations);
            parent.location_count = parent.locations.len() as u32;
            parent.merged_from.push(child_pattern_id.clone());
            parent.aliases.push(child_pattern_id.clone());
            parent.is_dirty = true;

            // Recompute file spread
            let mut files = drift_core::types::collections::FxHashSet::default();
            for loc in &parent.locations {
                files.insert(loc.file.clone());
            }
            parent.file_spread = files.len() as u32;

            // Build/update hierarchy
            let hierarchy = parent.hierarchy.get_or_insert_with(|| PatternHierarchy {
                parent_id: None,
                child_ids: Vec::new(),
                aggregated_location_count: 0,
            });
            hierarchy.child_ids.push(child_pattern_id);
            hierarchy.aggregated_location_count = parent.location_count;
        }

        // Mark child with parent reference (don't remove — keep for audit trail)
        if let Some(child) = patterns.get_mut(&child_id) {
            child.hierarchy = Some(PatternHierarchy {
                parent_id: Some(parent_id.clone()),
                child_ids: Vec::new(),
                aggregated_location_count: child.location_count,
            });
        }
    }
}
