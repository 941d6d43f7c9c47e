use npc_sim::simulation::{AreaType, ConfigurationError, Position, Rect, Zone, ZoneMap};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_default_layout_rectangles() {
    let map = ZoneMap::default_layout(1000, 800).expect("default layout");

    let expected = [
        (AreaType::Residential, Rect::new(0.0, 0.0, 333.0, 400.0)),
        (AreaType::Commercial, Rect::new(333.0, 0.0, 666.0, 400.0)),
        (AreaType::Industrial, Rect::new(666.0, 0.0, 1000.0, 400.0)),
        (AreaType::Recreational, Rect::new(0.0, 400.0, 500.0, 800.0)),
        (AreaType::Rural, Rect::new(500.0, 400.0, 1000.0, 800.0)),
    ];

    assert_eq!(map.zones().len(), expected.len());
    for (zone, (kind, rect)) in map.zones().iter().zip(expected) {
        assert_eq!(zone.kind, kind);
        assert_eq!(zone.rect, rect);
    }
    assert_eq!(map.width(), 1000.0);
    assert_eq!(map.height(), 800.0);
}

#[test]
fn test_every_area_type_has_a_zone() {
    let map = ZoneMap::default_layout(640, 480).expect("default layout");
    for kind in AreaType::ALL {
        assert!(
            !map.zones_of_type(kind).is_empty(),
            "no zone of type {:?}",
            kind
        );
    }
}

#[test]
fn test_missing_area_type_is_rejected() {
    let zones = vec![
        Zone::new(AreaType::Residential, Rect::new(0.0, 0.0, 50.0, 100.0)),
        Zone::new(AreaType::Commercial, Rect::new(50.0, 0.0, 100.0, 50.0)),
        Zone::new(AreaType::Industrial, Rect::new(50.0, 50.0, 100.0, 100.0)),
        Zone::new(AreaType::Rural, Rect::new(0.0, 0.0, 100.0, 100.0)),
    ];

    match ZoneMap::new(100, 100, zones) {
        Err(ConfigurationError::MissingAreaType(kind)) => {
            assert_eq!(kind, AreaType::Recreational)
        }
        other => panic!("expected missing area type, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_empty_and_degenerate_layouts_are_rejected() {
    assert!(matches!(
        ZoneMap::new(100, 100, Vec::new()),
        Err(ConfigurationError::EmptyLayout)
    ));

    assert!(matches!(
        ZoneMap::default_layout(0, 800),
        Err(ConfigurationError::InvalidDimensions { .. })
    ));

    let inverted = vec![Zone::new(
        AreaType::Residential,
        Rect::new(50.0, 0.0, 10.0, 20.0),
    )];
    assert!(matches!(
        ZoneMap::new(100, 100, inverted),
        Err(ConfigurationError::InvalidZone { index: 0, .. })
    ));

    let outside = vec![Zone::new(
        AreaType::Residential,
        Rect::new(0.0, 0.0, 150.0, 20.0),
    )];
    assert!(matches!(
        ZoneMap::new(100, 100, outside),
        Err(ConfigurationError::InvalidZone { .. })
    ));
}

#[test]
fn test_random_points_stay_inside_their_zone() {
    let map = ZoneMap::default_layout(1000, 800).expect("default layout");
    let mut rng = StdRng::seed_from_u64(11);

    for kind in AreaType::ALL {
        for _ in 0..200 {
            let zone = map
                .random_zone_of_type(kind, &mut rng)
                .expect("every type has a zone");
            assert_eq!(zone.kind, kind);
            let point = ZoneMap::pick_random_point(zone, &mut rng);
            assert!(zone.rect.contains(&point), "{:?} outside {:?}", point, zone);
        }
    }
}

#[test]
fn test_zone_at_uses_layout_order() {
    let map = ZoneMap::default_layout(1000, 800).expect("default layout");

    let zone = map.zone_at(&Position::new(100.0, 100.0)).expect("zone");
    assert_eq!(zone.kind, AreaType::Residential);

    // On the shared edge both zones contain the point; the first listed wins
    let edge = map.zone_at(&Position::new(333.0, 100.0)).expect("zone");
    assert_eq!(edge.kind, AreaType::Residential);

    let rural = map.zone_at(&Position::new(900.0, 700.0)).expect("zone");
    assert_eq!(rural.kind, AreaType::Rural);
}

#[test]
fn test_rect_distance() {
    let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert_eq!(rect.distance_to(&Position::new(15.0, 15.0)), 0.0);
    assert_eq!(rect.distance_to(&Position::new(25.0, 15.0)), 5.0);
    assert_eq!(rect.distance_to(&Position::new(23.0, 24.0)), 5.0);
}
