//! Best-composite selection
//!
//! Scenes are grouped, groups are ranked on metadata alone and only the
//! selected groups have their pixels loaded and merged.

use std::collections::BTreeMap;

use log::{debug, info};

use super::composite::CompositeImage;
use super::strategy::{GroupingKey, RankingMetric};
use crate::catalog::SceneRecord;
use crate::errors::{GrabError, GrabResult};
use crate::raster::Band;

/// Scenes sharing a grouping key, with their ranking score
#[derive(Debug, Clone)]
pub struct RankedGroup {
    pub key: String,
    pub score: f64,
    pub scenes: Vec<SceneRecord>,
}

/// Partition scenes by grouping key, keys in ascending order
pub fn group_scenes(scenes: &[SceneRecord], grouping: GroupingKey) -> BTreeMap<String, Vec<SceneRecord>> {
    let mut groups: BTreeMap<String, Vec<SceneRecord>> = BTreeMap::new();
    for scene in scenes {
        groups.entry(grouping.key_for(scene)).or_default().push(scene.clone());
    }
    groups
}

/// Group scenes and order the groups best-first
///
/// Ties on the score are broken by ascending key.
pub fn rank_groups(scenes: &[SceneRecord], grouping: GroupingKey, ranking: RankingMetric) -> Vec<RankedGroup> {
    let mut ranked: Vec<RankedGroup> = group_scenes(scenes, grouping)
        .into_iter()
        .map(|(key, scenes)| {
            let refs: Vec<&SceneRecord> = scenes.iter().collect();
            let score = ranking.score(&refs);
            RankedGroup { key, score, scenes }
        })
        .collect();

    ranked.sort_by(|a, b| ranking.compare(a.score, b.score).then_with(|| a.key.cmp(&b.key)));

    for (i, group) in ranked.iter().enumerate() {
        debug!("Rank {}: {} = {} ({} scenes, {} {:.2})",
               i + 1, grouping, group.key, group.scenes.len(), ranking, group.score);
    }

    ranked
}

/// Drop scenes cloudier than `max_cloud_percentage`
pub fn filter_by_cloud(scenes: &[SceneRecord], max_cloud_percentage: f64) -> Vec<SceneRecord> {
    let kept: Vec<SceneRecord> = scenes.iter()
        .filter(|s| s.cloud_percentage() <= max_cloud_percentage)
        .cloned()
        .collect();

    info!("Cloud filter <= {:.1}% kept {} of {} scenes", max_cloud_percentage, kept.len(), scenes.len());
    kept
}

/// Composite the best `max_results` groups of scenes
///
/// Returns at most `max_results` composites, fewer when there are fewer
/// groups, ordered best-first. An empty input gives an empty result.
pub fn select_best_composites(scenes: &[SceneRecord],
                              grouping: GroupingKey,
                              ranking: RankingMetric,
                              max_results: usize) -> GrabResult<Vec<CompositeImage>> {
    let ranked = rank_groups(scenes, grouping, ranking);
    let take = max_results.min(ranked.len());

    info!("Selecting {} of {} groups by {} (ranked by {})", take, ranked.len(), grouping, ranking);

    ranked.iter()
        .take(take)
        .map(|group| CompositeImage::merge(&group.key, &group.scenes, &Band::EXPORT_SET))
        .collect()
}

/// Grouping, ranking and filtering settings for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    pub grouping: GroupingKey,
    pub ranking: RankingMetric,
    pub max_results: usize,
    /// Scenes above this cloud percentage are discarded before grouping
    pub max_cloud_percentage: Option<f64>,
}

impl SelectionPolicy {
    pub fn new(grouping: GroupingKey, ranking: RankingMetric, max_results: usize) -> Self {
        SelectionPolicy {
            grouping,
            ranking,
            max_results,
            max_cloud_percentage: None,
        }
    }

    pub fn with_cloud_threshold(mut self, max_cloud_percentage: f64) -> Self {
        self.max_cloud_percentage = Some(max_cloud_percentage);
        self
    }

    /// Filter, group, rank and merge
    pub fn apply(&self, scenes: &[SceneRecord]) -> GrabResult<Vec<CompositeImage>> {
        if self.max_results == 0 {
            return Err(GrabError::ConfigError("max_results must be at least 1".to_string()));
        }

        match self.max_cloud_percentage {
            Some(threshold) => {
                let kept = filter_by_cloud(scenes, threshold);
                select_best_composites(&kept, self.grouping, self.ranking, self.max_results)
            }
            None => select_best_composites(scenes, self.grouping, self.ranking, self.max_results),
        }
    }
}
