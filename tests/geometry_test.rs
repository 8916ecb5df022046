//! Tests for bounding boxes, quadrants and regions of interest

use scenegrab::geometry::{buffer_point, BoundingBox, CoordinateSystem, Point, QuadrantPosition,
                          RegionOfInterest, METERS_PER_DEGREE};

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[test]
fn test_quadrants_of_region() {
    let bbox = BoundingBox::new(10.0, 20.0, 12.0, 24.0);
    let quadrants = bbox.quadrants();

    assert_eq!(quadrants[0].bbox, BoundingBox::new(10.0, 20.0, 11.0, 22.0));
    assert_eq!(quadrants[1].bbox, BoundingBox::new(11.0, 20.0, 12.0, 22.0));
    assert_eq!(quadrants[2].bbox, BoundingBox::new(11.0, 22.0, 12.0, 24.0));
    assert_eq!(quadrants[3].bbox, BoundingBox::new(10.0, 22.0, 11.0, 24.0));

    let positions: Vec<QuadrantPosition> = quadrants.iter().map(|q| q.position).collect();
    assert_eq!(positions, vec![QuadrantPosition::SouthWest, QuadrantPosition::SouthEast,
                               QuadrantPosition::NorthEast, QuadrantPosition::NorthWest]);
    for (i, quadrant) in quadrants.iter().enumerate() {
        assert_eq!(quadrant.index, i);
    }
}

#[test]
fn test_quadrants_tile_the_box() {
    let boxes = [
        BoundingBox::new(10.0, 20.0, 12.0, 24.0),
        BoundingBox::new(-73.5, -12.25, -71.0, -9.5),
        BoundingBox::new(500_000.0, 6_200_000.0, 510_000.0, 6_203_000.0),
    ];

    for bbox in boxes {
        let quadrants = bbox.quadrants();
        let area: f64 = quadrants.iter().map(|q| q.bbox.area()).sum();
        assert!((area - bbox.area()).abs() <= bbox.area() * 1e-12);

        let union = quadrants.iter()
            .map(|q| q.bbox)
            .reduce(|acc, b| acc.union(&b))
            .unwrap();
        assert_eq!(union, bbox);

        // Corners only come from min, mid and max
        let mid = bbox.center();
        for quadrant in &quadrants {
            assert!([bbox.min_x, mid.x].contains(&quadrant.bbox.min_x));
            assert!([mid.x, bbox.max_x].contains(&quadrant.bbox.max_x));
            assert!([bbox.min_y, mid.y].contains(&quadrant.bbox.min_y));
            assert!([mid.y, bbox.max_y].contains(&quadrant.bbox.max_y));
        }
    }
}

#[test]
fn test_degenerate_box_quadrants() {
    let point_box = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
    assert!(point_box.is_degenerate());

    let quadrants = point_box.quadrants();
    assert_eq!(quadrants.len(), 4);
    for quadrant in &quadrants {
        assert_eq!(quadrant.bbox, point_box);
        assert_eq!(quadrant.bbox.area(), 0.0);
    }
}

#[test]
fn test_bbox_parsing_and_display() {
    let bbox = BoundingBox::from_string("10, 20, 12, 24").unwrap();
    assert_eq!(bbox, BoundingBox::new(10.0, 20.0, 12.0, 24.0));
    assert_eq!(BoundingBox::from_string(&bbox.to_string()).unwrap(), bbox);

    assert!(BoundingBox::from_string("10,20,12").is_err());
    assert!(BoundingBox::from_string("a,b,c,d").is_err());
}

#[test]
fn test_bbox_relations() {
    let a = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
    let b = BoundingBox::new(1.0, 1.0, 3.0, 3.0);
    let c = BoundingBox::new(5.0, 5.0, 6.0, 6.0);

    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
    assert_eq!(a.intersection(&b), Some(BoundingBox::new(1.0, 1.0, 2.0, 2.0)));
    assert_eq!(a.intersection(&c), None);
    assert_eq!(a.union(&c), BoundingBox::new(0.0, 0.0, 6.0, 6.0));
    assert!(a.contains(&Point::new(1.0, 1.0)));
    assert!(!a.contains(&Point::new(2.5, 1.0)));
}

#[test]
fn test_buffer_point_geographic() {
    let equator = buffer_point(&Point::new(18.0, 0.0), 1000.0, &CoordinateSystem::WGS84);
    let degrees = 1000.0 / METERS_PER_DEGREE;
    assert_close(equator.height(), 2.0 * degrees);
    assert_close(equator.width(), 2.0 * degrees);
    assert_close(equator.center().x, 18.0);

    // Longitude degrees shrink by cos(lat)
    let north = buffer_point(&Point::new(18.0, 60.0), 1000.0, &CoordinateSystem::WGS84);
    assert_close(north.height(), 2.0 * degrees);
    assert!((north.width() - 4.0 * degrees).abs() < 1e-9);
}

#[test]
fn test_buffer_point_projected() {
    let bbox = buffer_point(&Point::new(500_000.0, 6_200_000.0), 1000.0, &CoordinateSystem::UTM(34, false));
    assert_eq!(bbox, BoundingBox::new(499_000.0, 6_199_000.0, 501_000.0, 6_201_000.0));
}

#[test]
fn test_region_from_points() {
    let points = [Point::new(10.0, 20.0), Point::new(10.5, 20.5)];
    let roi = RegionOfInterest::from_points(&points, 1000.0, CoordinateSystem::WGS84).unwrap();

    assert_eq!(roi.rectangles().len(), 2);
    assert!(roi.contains(&Point::new(10.0, 20.0)));
    assert!(roi.contains(&Point::new(10.5, 20.5)));
    // Inside the bounds but between the two buffers
    assert!(!roi.contains(&Point::new(10.25, 20.25)));
    assert!(roi.bounds().contains(&Point::new(10.25, 20.25)));

    assert!(roi.intersects(&BoundingBox::new(9.0, 19.0, 10.0, 20.0)));
    assert!(!roi.intersects(&BoundingBox::new(10.2, 20.2, 10.3, 20.3)));
}

#[test]
fn test_region_rejects_bad_input() {
    assert!(RegionOfInterest::from_points(&[], 1000.0, CoordinateSystem::WGS84).is_err());
    assert!(RegionOfInterest::from_points(&[Point::new(0.0, 0.0)], 0.0, CoordinateSystem::WGS84).is_err());
    assert!(RegionOfInterest::from_rectangles(Vec::new(), CoordinateSystem::WGS84).is_err());
}

#[test]
fn test_crs_parsing() {
    assert_eq!(CoordinateSystem::from_string("EPSG:4326").unwrap(), CoordinateSystem::WGS84);
    assert_eq!(CoordinateSystem::from_string("32734").unwrap(), CoordinateSystem::UTM(34, false));
    assert_eq!(CoordinateSystem::UTM(34, false).to_string(), "EPSG:32734");
    assert!(CoordinateSystem::from_string("WGS84").is_err());
}
