//! Grouping and ranking strategies

use std::cmp::Ordering;
use std::fmt;

use crate::catalog::SceneRecord;
use crate::errors::{GrabError, GrabResult};

/// How scenes are grouped before compositing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingKey {
    /// One composite per MGRS tile
    MgrsTile,
    /// One composite per acquisition date ("YYYY-MM-DD")
    CalendarDate,
    /// One composite per day of year ("001".."366")
    DayOfYear,
}

impl GroupingKey {
    pub fn key_for(&self, scene: &SceneRecord) -> String {
        match self {
            GroupingKey::MgrsTile => scene.tile().to_string(),
            GroupingKey::CalendarDate => scene.formatted_date(),
            GroupingKey::DayOfYear => format!("{:03}", scene.day_of_year()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GroupingKey::MgrsTile => "mgrs_tile",
            GroupingKey::CalendarDate => "date",
            GroupingKey::DayOfYear => "day_of_year",
        }
    }

    pub fn from_name(name: &str) -> GrabResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "mgrs_tile" | "tile" => Ok(GroupingKey::MgrsTile),
            "date" | "calendar_date" => Ok(GroupingKey::CalendarDate),
            "day_of_year" | "doy" => Ok(GroupingKey::DayOfYear),
            _ => Err(GrabError::ConfigError(format!("Unknown grouping key: {}", name))),
        }
    }
}

impl fmt::Display for GroupingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Quality metric used to rank groups against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMetric {
    /// Cloud percentage of the least-cloudy scene, lower is better
    BestSceneCloud,
    /// Mean cloud percentage of the group, lower is better
    MeanCloud,
    /// Number of contributing scenes, higher is better
    SceneCount,
}

impl RankingMetric {
    /// Score of a non-empty group of scenes
    pub fn score(&self, scenes: &[&SceneRecord]) -> f64 {
        match self {
            RankingMetric::BestSceneCloud => scenes.iter()
                .map(|s| s.cloud_percentage())
                .fold(f64::INFINITY, f64::min),
            RankingMetric::MeanCloud => {
                let total: f64 = scenes.iter().map(|s| s.cloud_percentage()).sum();
                total / scenes.len().max(1) as f64
            }
            RankingMetric::SceneCount => scenes.len() as f64,
        }
    }

    /// Order two scores so the better one comes first
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        match self {
            RankingMetric::BestSceneCloud | RankingMetric::MeanCloud => a.total_cmp(&b),
            RankingMetric::SceneCount => b.total_cmp(&a),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RankingMetric::BestSceneCloud => "best_cloud",
            RankingMetric::MeanCloud => "mean_cloud",
            RankingMetric::SceneCount => "scene_count",
        }
    }

    pub fn from_name(name: &str) -> GrabResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "best_cloud" | "cloud" => Ok(RankingMetric::BestSceneCloud),
            "mean_cloud" => Ok(RankingMetric::MeanCloud),
            "scene_count" | "count" => Ok(RankingMetric::SceneCount),
            _ => Err(GrabError::ConfigError(format!("Unknown ranking metric: {}", name))),
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
