//! Tests for grouping, ranking and compositing

mod common;

use common::{date, grid, partial_scene, region_grid, scene};
use scenegrab::errors::GrabError;
use scenegrab::geometry::{BoundingBox, CoordinateSystem, RegionOfInterest};
use scenegrab::raster::{Band, GridSpec};
use scenegrab::selection::{rank_groups, select_best_composites, sort_for_layering, CompositeImage,
                           GroupingKey, RankingMetric, SelectionPolicy};

const TILE: &str = "34HBH";
const OTHER_TILE: &str = "34HCH";

#[test]
fn test_least_cloudy_scene_on_top() {
    let footprint = region_grid();
    let scenes = vec![
        scene("s40", TILE, date(2019, 6, 3), 40.0, footprint, 400),
        scene("s10", TILE, date(2019, 6, 13), 10.0, footprint, 100),
        scene("s70", TILE, date(2019, 6, 23), 70.0, footprint, 700),
    ];

    let composites = select_best_composites(&scenes, GroupingKey::MgrsTile, RankingMetric::BestSceneCloud, 1).unwrap();
    assert_eq!(composites.len(), 1);

    let composite = &composites[0];
    assert_eq!(composite.key(), TILE);
    assert_eq!(composite.cloud_percentage(), 10.0);
    assert_eq!(composite.mean_cloud_percentage(), 40.0);
    assert_eq!(composite.scene_ids(), &["s70", "s40", "s10"]);
    assert_eq!(composite.raster().pixel(0, 0), vec![100, 101, 102, 103]);
    assert_eq!(composite.raster().pixel(3, 7), vec![100, 101, 102, 103]);
}

#[test]
fn test_lower_layers_fill_gaps() {
    let footprint = region_grid();
    let scenes = vec![
        scene("s70", TILE, date(2019, 6, 23), 70.0, footprint, 700),
        scene("s40", TILE, date(2019, 6, 3), 40.0, footprint, 400),
        // Best scene only covers the two western columns
        partial_scene("s10", TILE, date(2019, 6, 13), 10.0, footprint, 100, |col, _| col < 2),
    ];

    let composite = CompositeImage::merge(TILE, &scenes, &Band::EXPORT_SET).unwrap();
    let raster = composite.raster();

    assert_eq!(raster.pixel(1, 4)[0], 100);
    // The next least cloudy scene shows through, not the cloudiest
    assert_eq!(raster.pixel(2, 4)[0], 400);
    assert_eq!(raster.pixel(3, 0)[0], 400);
    assert_eq!(raster.covered_pixel_count(), 32);
}

#[test]
fn test_merged_grid_is_union_of_footprints() {
    let west = grid(10.0, 24.0, 2, 8);
    let east = grid(11.0, 24.0, 2, 8);
    let scenes = vec![
        scene("west", TILE, date(2019, 6, 3), 20.0, west, 200),
        scene("east", TILE, date(2019, 6, 3), 30.0, east, 300),
    ];

    let composite = CompositeImage::merge(TILE, &scenes, &Band::EXPORT_SET).unwrap();
    let merged = composite.raster().grid();

    assert_eq!(merged.bbox(), BoundingBox::new(10.0, 20.0, 12.0, 24.0));
    assert_eq!(composite.raster().pixel(0, 0)[0], 200);
    assert_eq!(composite.raster().pixel(3, 0)[0], 300);
}

#[test]
fn test_misaligned_scenes_are_rejected() {
    let coarse = region_grid();
    let fine = GridSpec::new(10.0, 24.0, 0.25, 0.25, 8, 16, CoordinateSystem::WGS84).unwrap();
    let shifted = grid(10.1, 24.0, 4, 8);

    for other in [fine, shifted] {
        let scenes = vec![
            scene("a", TILE, date(2019, 6, 3), 20.0, coarse, 200),
            scene("b", TILE, date(2019, 6, 8), 30.0, other, 300),
        ];
        let result = CompositeImage::merge(TILE, &scenes, &Band::EXPORT_SET);
        assert!(matches!(result, Err(GrabError::GridMismatch(_))));
    }
}

#[test]
fn test_group_per_date() {
    let footprint = region_grid();
    let scenes = vec![
        scene("a", TILE, date(2019, 6, 3), 20.0, footprint, 200),
        scene("b", OTHER_TILE, date(2019, 6, 3), 30.0, footprint, 300),
        scene("c", TILE, date(2019, 6, 10), 5.0, footprint, 50),
    ];

    let composites = select_best_composites(&scenes, GroupingKey::CalendarDate, RankingMetric::BestSceneCloud, 3).unwrap();
    let keys: Vec<&str> = composites.iter().map(|c| c.key()).collect();
    assert_eq!(keys, vec!["2019-06-10", "2019-06-03"]);
    assert_eq!(composites[1].scene_count(), 2);
}

#[test]
fn test_group_per_day_of_year() {
    let footprint = region_grid();
    let scenes = vec![
        scene("a", TILE, date(2019, 6, 3), 20.0, footprint, 200),
        scene("b", TILE, date(2019, 1, 9), 30.0, footprint, 300),
    ];

    assert_eq!(GroupingKey::DayOfYear.key_for(&scenes[0]), "154");
    assert_eq!(GroupingKey::DayOfYear.key_for(&scenes[1]), "009");

    let ranked = rank_groups(&scenes, GroupingKey::DayOfYear, RankingMetric::BestSceneCloud);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].key, "154");
}

#[test]
fn test_ranking_metrics_disagree() {
    let footprint = region_grid();
    // Tile A: best 10, mean 50. Tile B: best 20, mean 25, one extra scene.
    let scenes = vec![
        scene("a1", TILE, date(2019, 6, 3), 10.0, footprint, 100),
        scene("a2", TILE, date(2019, 6, 8), 90.0, footprint, 900),
        scene("b1", OTHER_TILE, date(2019, 6, 3), 20.0, footprint, 200),
        scene("b2", OTHER_TILE, date(2019, 6, 8), 30.0, footprint, 300),
        scene("b3", OTHER_TILE, date(2019, 6, 13), 25.0, footprint, 250),
    ];

    let by_best = rank_groups(&scenes, GroupingKey::MgrsTile, RankingMetric::BestSceneCloud);
    assert_eq!(by_best[0].key, TILE);
    assert_eq!(by_best[0].score, 10.0);

    let by_mean = rank_groups(&scenes, GroupingKey::MgrsTile, RankingMetric::MeanCloud);
    assert_eq!(by_mean[0].key, OTHER_TILE);
    assert_eq!(by_mean[0].score, 25.0);

    let by_count = rank_groups(&scenes, GroupingKey::MgrsTile, RankingMetric::SceneCount);
    assert_eq!(by_count[0].key, OTHER_TILE);
    assert_eq!(by_count[0].score, 3.0);
}

#[test]
fn test_ties_ranked_by_key() {
    let footprint = region_grid();
    let scenes = vec![
        scene("b", OTHER_TILE, date(2019, 6, 3), 15.0, footprint, 200),
        scene("a", TILE, date(2019, 6, 3), 15.0, footprint, 100),
    ];

    let ranked = rank_groups(&scenes, GroupingKey::MgrsTile, RankingMetric::BestSceneCloud);
    let keys: Vec<&str> = ranked.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec![TILE, OTHER_TILE]);
}

#[test]
fn test_layering_order_ties() {
    let footprint = region_grid();
    let mut scenes = vec![
        scene("z", TILE, date(2019, 6, 3), 30.0, footprint, 1),
        scene("late", TILE, date(2019, 6, 20), 30.0, footprint, 2),
        scene("a", TILE, date(2019, 6, 3), 30.0, footprint, 3),
        scene("clear", TILE, date(2019, 6, 1), 0.0, footprint, 4),
    ];

    sort_for_layering(&mut scenes);
    let ids: Vec<&str> = scenes.iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["a", "z", "late", "clear"]);
}

#[test]
fn test_empty_and_single_scene() {
    let none = select_best_composites(&[], GroupingKey::MgrsTile, RankingMetric::BestSceneCloud, 5).unwrap();
    assert!(none.is_empty());

    let single = vec![scene("only", TILE, date(2019, 6, 3), 55.0, region_grid(), 500)];
    let composites = select_best_composites(&single, GroupingKey::MgrsTile, RankingMetric::MeanCloud, 5).unwrap();
    assert_eq!(composites.len(), 1);
    assert_eq!(composites[0].scene_ids(), &["only"]);
    assert_eq!(composites[0].cloud_percentage(), 55.0);
}

#[test]
fn test_policy_cloud_threshold() {
    let footprint = region_grid();
    let scenes = vec![
        scene("s40", TILE, date(2019, 6, 3), 40.0, footprint, 400),
        scene("s10", TILE, date(2019, 6, 13), 10.0, footprint, 100),
        scene("s70", TILE, date(2019, 6, 23), 70.0, footprint, 700),
        scene("cloudy", OTHER_TILE, date(2019, 6, 23), 95.0, footprint, 950),
    ];

    let policy = SelectionPolicy::new(GroupingKey::MgrsTile, RankingMetric::SceneCount, 10)
        .with_cloud_threshold(50.0);
    let composites = policy.apply(&scenes).unwrap();

    assert_eq!(composites.len(), 1);
    assert_eq!(composites[0].scene_ids(), &["s40", "s10"]);

    let zero = SelectionPolicy::new(GroupingKey::MgrsTile, RankingMetric::SceneCount, 0);
    assert!(zero.apply(&scenes).is_err());
}

#[test]
fn test_mosaic_puts_best_on_top() {
    let footprint = region_grid();
    let best = CompositeImage::merge("best", &[scene("b", TILE, date(2019, 6, 3), 5.0, footprint, 50)],
                                     &Band::EXPORT_SET).unwrap();
    let worse = CompositeImage::merge("worse", &[scene("w", OTHER_TILE, date(2019, 6, 3), 25.0, footprint, 250)],
                                      &Band::EXPORT_SET).unwrap();

    let mosaic = CompositeImage::mosaic("RGB_2019_6", &[best, worse]).unwrap();
    assert_eq!(mosaic.key(), "RGB_2019_6");
    assert_eq!(mosaic.raster().pixel(2, 2)[0], 50);
    assert_eq!(mosaic.scene_ids(), &["w", "b"]);
    assert_eq!(mosaic.cloud_percentage(), 5.0);
    assert_eq!(mosaic.mean_cloud_percentage(), 15.0);

    assert!(CompositeImage::mosaic("empty", &[]).is_err());
}

#[test]
fn test_clip_to_region() {
    let composite = CompositeImage::merge(TILE, &[scene("a", TILE, date(2019, 6, 3), 5.0, region_grid(), 50)],
                                          &Band::EXPORT_SET).unwrap();
    let roi = RegionOfInterest::from_rectangles(vec![BoundingBox::new(10.0, 20.0, 11.0, 24.0)],
                                                CoordinateSystem::WGS84).unwrap();

    let clipped = composite.clipped_to(&roi);
    assert_eq!(clipped.raster().pixel(1, 0), vec![50, 51, 52, 53]);
    assert_eq!(clipped.raster().pixel(2, 0), vec![0, 0, 0, 0]);
    assert_eq!(clipped.raster().covered_pixel_count(), 16);
    // The source composite is untouched
    assert_eq!(composite.raster().covered_pixel_count(), 32);
}

#[test]
fn test_strategy_names() {
    assert_eq!(GroupingKey::from_name("tile").unwrap(), GroupingKey::MgrsTile);
    assert_eq!(GroupingKey::from_name("DOY").unwrap(), GroupingKey::DayOfYear);
    assert_eq!(RankingMetric::from_name("count").unwrap(), RankingMetric::SceneCount);
    assert!(GroupingKey::from_name("orbit").is_err());
    assert!(RankingMetric::from_name("ndvi").is_err());
}
