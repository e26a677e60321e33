use chrono::NaiveDate;
use crate::models::{FilterSettings, ProfileSummary};

/// Check that genders line up between requester and candidate
///
/// The candidate must satisfy the requester's `search_gender`, and the
/// requester must satisfy the candidate's own `looking_for` when the
/// candidate has one. Only the requester's filter decides the first half.
#[inline]
pub fn matches_gender(
    requester: &ProfileSummary,
    filter: &FilterSettings,
    candidate: &ProfileSummary,
) -> bool {
    if !filter.search_gender.accepts(candidate.gender) {
        return false;
    }

    match candidate.looking_for {
        Some(wanted) => wanted.accepts(requester.gender),
        None => true,
    }
}

/// Check the candidate's age against the inclusive `[age_from, age_to]` range
#[inline]
pub fn matches_age(filter: &FilterSettings, candidate: &ProfileSummary, today: NaiveDate) -> bool {
    let age = candidate.age_on(today);
    age >= i32::from(filter.age_from) && age <= i32::from(filter.age_to)
}

/// Check a precomputed distance against the filter's radius
#[inline]
pub fn matches_distance(filter: &FilterSettings, distance_km: f64) -> bool {
    distance_km <= filter.max_distance_km
}

/// All filter predicates for a candidate whose distance is already known
pub fn matches_filter(
    requester: &ProfileSummary,
    filter: &FilterSettings,
    candidate: &ProfileSummary,
    distance_km: f64,
    today: NaiveDate,
) -> bool {
    matches_gender(requester, filter, candidate)
        && matches_age(filter, candidate, today)
        && matches_distance(filter, distance_km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Location, SearchGender};
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn create_test_profile(
        session_id: &str,
        gender: Gender,
        birthday: NaiveDate,
    ) -> ProfileSummary {
        ProfileSummary {
            id: 7,
            session_id: session_id.to_string(),
            gender,
            birthday,
            location: Some(Location::new(55.75, 37.62)),
            looking_for: None,
            is_deleted: false,
            is_blocked: false,
            is_invisible: false,
            last_online: Utc::now(),
            primary_image_ref: None,
        }
    }

    fn create_test_filter() -> FilterSettings {
        FilterSettings {
            session_id: "me".to_string(),
            search_gender: SearchGender::Female,
            looking_for: None,
            age_from: 21,
            age_to: 35,
            max_distance_km: 50.0,
            page: 1,
            page_size: 20,
        }
    }

    fn born(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_gender_match() {
        let me = create_test_profile("me", Gender::Male, born(1995, 1, 1));
        let filter = create_test_filter();

        let woman = create_test_profile("w", Gender::Female, born(1995, 1, 1));
        let man = create_test_profile("m", Gender::Male, born(1995, 1, 1));

        assert!(matches_gender(&me, &filter, &woman));
        assert!(!matches_gender(&me, &filter, &man));
    }

    #[test]
    fn test_any_gender_wildcard() {
        let me = create_test_profile("me", Gender::Male, born(1995, 1, 1));
        let mut filter = create_test_filter();
        filter.search_gender = SearchGender::Any;

        let man = create_test_profile("m", Gender::Male, born(1995, 1, 1));
        assert!(matches_gender(&me, &filter, &man));
    }

    #[test]
    fn test_candidate_looking_for_respected() {
        let me = create_test_profile("me", Gender::Male, born(1995, 1, 1));
        let filter = create_test_filter();

        let mut woman = create_test_profile("w", Gender::Female, born(1995, 1, 1));
        woman.looking_for = Some(SearchGender::Female);
        assert!(!matches_gender(&me, &filter, &woman));

        woman.looking_for = Some(SearchGender::Any);
        assert!(matches_gender(&me, &filter, &woman));
    }

    #[test]
    fn test_age_bounds_inclusive() {
        let filter = create_test_filter();

        // Exactly 21 and exactly 35 on 2025-06-15
        let youngest = create_test_profile("a", Gender::Female, born(2004, 6, 15));
        let oldest = create_test_profile("b", Gender::Female, born(1990, 6, 15));
        assert!(matches_age(&filter, &youngest, today()));
        assert!(matches_age(&filter, &oldest, today()));

        let too_young = create_test_profile("c", Gender::Female, born(2005, 6, 15));
        let too_old = create_test_profile("d", Gender::Female, born(1989, 6, 15));
        assert!(!matches_age(&filter, &too_young, today()));
        assert!(!matches_age(&filter, &too_old, today()));
    }

    #[test]
    fn test_distance_boundary() {
        let filter = create_test_filter();
        assert!(matches_distance(&filter, 50.0));
        assert!(!matches_distance(&filter, 50.0001));
    }

    #[test]
    fn test_matches_filter_requires_all() {
        let me = create_test_profile("me", Gender::Male, born(1995, 1, 1));
        let filter = create_test_filter();
        let woman = create_test_profile("w", Gender::Female, born(1995, 1, 1));

        assert!(matches_filter(&me, &filter, &woman, 10.0, today()));
        assert!(!matches_filter(&me, &filter, &woman, 80.0, today()));
    }
}
