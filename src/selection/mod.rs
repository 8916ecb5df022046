//! Scene grouping, compositing and ranking

mod composite;
mod selector;
mod strategy;

pub use composite::{sort_for_layering, CompositeImage};
pub use selector::{filter_by_cloud, group_scenes, rank_groups, select_best_composites, RankedGroup, SelectionPolicy};
pub use strategy::{GroupingKey, RankingMetric};
