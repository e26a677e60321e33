// Unit tests for Lume Discovery

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use lume_discovery::core::{
    distance::haversine_distance,
    online::is_online,
    pagination::pagination_meta,
    Discoverer,
};
use lume_discovery::models::{
    FilterSettings, Gender, Location, ProfileSummary, Relation, RelationSnapshot, SearchGender,
};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-06-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn create_profile(
    session_id: &str,
    gender: Gender,
    birthday: NaiveDate,
    lat: f64,
    lon: f64,
) -> ProfileSummary {
    ProfileSummary {
        id: 0,
        session_id: session_id.to_string(),
        gender,
        birthday,
        location: Some(Location::new(lat, lon)),
        looking_for: None,
        is_deleted: false,
        is_blocked: false,
        is_invisible: false,
        last_online: now() - TimeDelta::days(1),
        primary_image_ref: None,
    }
}

fn born(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn moscow_requester() -> ProfileSummary {
    create_profile("requester", Gender::Male, born(1994, 2, 2), 55.75, 37.62)
}

fn create_filter(max_distance_km: f64) -> FilterSettings {
    FilterSettings {
        session_id: "requester".to_string(),
        search_gender: SearchGender::Female,
        looking_for: None,
        age_from: 20,
        age_to: 30,
        max_distance_km,
        page: 1,
        page_size: 10,
    }
}

#[test]
fn test_distance_to_self_is_zero() {
    let points = [
        Location::new(0.0, 0.0),
        Location::new(55.75, 37.62),
        Location::new(-89.9, 179.9),
        Location::new(90.0, -180.0),
    ];

    for point in points {
        assert!(haversine_distance(&point, &point).unwrap().abs() < 1e-9);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let points = [
        Location::new(55.75, 37.62),
        Location::new(59.93, 30.34),
        Location::new(-33.86, 151.21),
        Location::new(40.71, -74.0),
        Location::new(0.0, 180.0),
    ];

    for a in &points {
        for b in &points {
            let ab = haversine_distance(a, b).unwrap();
            let ba = haversine_distance(b, a).unwrap();
            assert!((ab - ba).abs() < 1e-9, "{:?} vs {:?}", a, b);
            assert!(ab >= 0.0);
        }
    }
}

#[test]
fn test_moscow_to_saint_petersburg() {
    let moscow = Location::new(55.75, 37.62);
    let spb = Location::new(59.93, 30.34);

    let distance = haversine_distance(&moscow, &spb).unwrap();
    assert!((distance - 635.0).abs() < 5.0, "Distance should be ~635km, got {}", distance);
}

#[test]
fn test_total_pages_is_ceiling() {
    for n in 0..50u64 {
        for size in 1..12u32 {
            let meta = pagination_meta(n, 1, size).unwrap();
            let expected = (n as f64 / size as f64).ceil() as u64;
            assert_eq!(meta.total_pages, expected, "n={} size={}", n, size);
        }
    }

    assert_eq!(pagination_meta(10, 1, 3).unwrap().total_pages, 4);
}

#[test]
fn test_scenario_moscow_within_1000km() {
    let discoverer = Discoverer::default();
    let candidate = create_profile("spb", Gender::Female, born(1999, 1, 1), 59.93, 30.34);

    let result = discoverer
        .discover(
            &moscow_requester(),
            &create_filter(1000.0),
            &[candidate],
            &RelationSnapshot::default(),
            now(),
        )
        .unwrap();

    assert_eq!(result.items.len(), 1);
    assert!((result.items[0].distance_km - 635.0).abs() < 5.0);
}

#[test]
fn test_scenario_moscow_outside_500km() {
    let discoverer = Discoverer::default();
    let candidate = create_profile("spb", Gender::Female, born(1999, 1, 1), 59.93, 30.34);

    let result = discoverer
        .discover(
            &moscow_requester(),
            &create_filter(500.0),
            &[candidate],
            &RelationSnapshot::default(),
            now(),
        )
        .unwrap();

    assert_eq!(result.meta.total_count, 0);
    assert!(result.items.is_empty());
}

#[test]
fn test_scenario_seven_candidates_pages_of_three() {
    let discoverer = Discoverer::default();
    let candidates: Vec<ProfileSummary> = (0..7)
        .map(|i| {
            create_profile(
                &format!("c{}", i),
                Gender::Female,
                born(1998, 1, 1),
                55.75 + i as f64 * 0.01,
                37.62,
            )
        })
        .collect();

    let mut filter = create_filter(100.0);
    filter.page_size = 3;

    let first = discoverer
        .discover(&moscow_requester(), &filter, &candidates, &RelationSnapshot::default(), now())
        .unwrap();
    assert_eq!(first.items.len(), 3);
    assert!(first.meta.has_next);
    assert!(!first.meta.has_previous);

    filter.page = 3;
    let last = discoverer
        .discover(&moscow_requester(), &filter, &candidates, &RelationSnapshot::default(), now())
        .unwrap();
    assert_eq!(last.items.len(), 1);
    assert!(!last.meta.has_next);
    assert_eq!(last.meta.total_pages, 3);
    assert_eq!(last.items[0].session_id, "c6");
}

#[test]
fn test_scenario_requester_without_location() {
    let discoverer = Discoverer::default();
    let mut requester = moscow_requester();
    requester.location = None;

    let candidates: Vec<ProfileSummary> = (0..20)
        .map(|i| create_profile(&format!("c{}", i), Gender::Female, born(1998, 1, 1), 55.75, 37.62))
        .collect();

    let result = discoverer
        .discover(
            &requester,
            &create_filter(1000.0),
            &candidates,
            &RelationSnapshot::default(),
            now(),
        )
        .unwrap();

    assert_eq!(result.meta.total_count, 0);
}

#[test]
fn test_blocked_candidate_never_appears() {
    let discoverer = Discoverer::default();
    let candidates = vec![
        create_profile("blocked_by_me", Gender::Female, born(1998, 1, 1), 55.751, 37.62),
        create_profile("blocked_me", Gender::Female, born(1998, 1, 1), 55.752, 37.62),
        create_profile("free", Gender::Female, born(1998, 1, 1), 55.753, 37.62),
    ];
    let relations = RelationSnapshot {
        blocks: vec![
            Relation::new("requester", "blocked_by_me", now()),
            Relation::new("blocked_me", "requester", now()),
        ],
        ..Default::default()
    };

    let result = discoverer
        .discover(&moscow_requester(), &create_filter(1000.0), &candidates, &relations, now())
        .unwrap();

    let ids: Vec<&str> = result.items.iter().map(|r| r.session_id.as_str()).collect();
    assert_eq!(ids, vec!["free"]);
}

#[test]
fn test_age_bounds_inclusive() {
    let discoverer = Discoverer::default();
    // On 2025-06-15: 20, 30, 19 and 31 years old
    let candidates = vec![
        create_profile("age20", Gender::Female, born(2005, 6, 15), 55.751, 37.62),
        create_profile("age30", Gender::Female, born(1995, 6, 15), 55.752, 37.62),
        create_profile("age19", Gender::Female, born(2006, 6, 15), 55.753, 37.62),
        create_profile("age31", Gender::Female, born(1994, 6, 15), 55.754, 37.62),
    ];

    let result = discoverer
        .discover(
            &moscow_requester(),
            &create_filter(1000.0),
            &candidates,
            &RelationSnapshot::default(),
            now(),
        )
        .unwrap();

    let ids: Vec<&str> = result.items.iter().map(|r| r.session_id.as_str()).collect();
    assert_eq!(ids, vec!["age20", "age30"]);
}

#[test]
fn test_online_threshold_scenario() {
    let threshold = TimeDelta::minutes(5);
    assert!(is_online(now() - TimeDelta::minutes(2), now(), threshold));
    assert!(!is_online(now() - TimeDelta::minutes(10), now(), threshold));
}

#[test]
fn test_repeated_calls_are_identical() {
    let discoverer = Discoverer::default();
    // Same spot for everyone, so order falls back to session id
    let candidates: Vec<ProfileSummary> = ["e", "b", "d", "a", "c"]
        .iter()
        .map(|id| create_profile(id, Gender::Female, born(1998, 1, 1), 55.8, 37.6))
        .collect();
    let mut reversed = candidates.clone();
    reversed.reverse();

    let filter = create_filter(100.0);
    let first = discoverer
        .discover(&moscow_requester(), &filter, &candidates, &RelationSnapshot::default(), now())
        .unwrap();
    let second = discoverer
        .discover(&moscow_requester(), &filter, &reversed, &RelationSnapshot::default(), now())
        .unwrap();

    assert_eq!(first, second);
    let ids: Vec<&str> = first.items.iter().map(|r| r.session_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
}
