//! Query-string construction for Discovery API requests.

use chrono::{DateTime, Utc};

/// The date profile the Discovery API accepts: UTC, second precision,
/// literal `Z` suffix. Anything else is rejected by the remote, so this is
/// a hard contract rather than a formatting preference.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The sparse set of caller-supplied search constraints.
///
/// Absent fields contribute no query parameter at all; they are never sent
/// as empty or null markers.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    pub keyword: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub country_code: Option<String>,
    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

/// Serialize a date filter in the Discovery date profile.
pub fn format_date_time(value: &DateTime<Utc>) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Build the query string for a request.
///
/// Parameters are emitted in a fixed order: `apikey` first, then keyword,
/// city, stateCode, countryCode, startDateTime, endDateTime, page, size.
/// Values are percent-encoded. This function cannot fail; it only
/// stringifies the values that are present.
pub fn build_query(api_key: &str, filter: &FilterSet) -> String {
    let mut params = vec![format!("apikey={}", urlencoding::encode(api_key))];

    if let Some(keyword) = &filter.keyword {
        params.push(format!("keyword={}", urlencoding::encode(keyword)));
    }
    if let Some(city) = &filter.city {
        params.push(format!("city={}", urlencoding::encode(city)));
    }
    if let Some(state_code) = &filter.state_code {
        params.push(format!("stateCode={}", urlencoding::encode(state_code)));
    }
    if let Some(country_code) = &filter.country_code {
        params.push(format!("countryCode={}", urlencoding::encode(country_code)));
    }
    if let Some(start) = &filter.start_date_time {
        params.push(format!("startDateTime={}", format_date_time(start)));
    }
    if let Some(end) = &filter.end_date_time {
        params.push(format!("endDateTime={}", format_date_time(end)));
    }
    if let Some(page) = filter.page {
        params.push(format!("page={page}"));
    }
    if let Some(size) = filter.size {
        params.push(format!("size={size}"));
    }

    params.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn present_count(filter: &FilterSet) -> usize {
        [
            filter.keyword.is_some(),
            filter.city.is_some(),
            filter.state_code.is_some(),
            filter.country_code.is_some(),
            filter.start_date_time.is_some(),
            filter.end_date_time.is_some(),
            filter.page.is_some(),
            filter.size.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    #[test]
    fn empty_filter_emits_only_the_api_key() {
        let query = build_query("key123", &FilterSet::default());
        assert_eq!(query, "apikey=key123");
    }

    #[test]
    fn parameter_count_equals_present_fields_plus_api_key() {
        let filters = [
            FilterSet {
                keyword: Some("rock".to_string()),
                ..Default::default()
            },
            FilterSet {
                keyword: Some("rock".to_string()),
                city: Some("Oslo".to_string()),
                country_code: Some("NO".to_string()),
                ..Default::default()
            },
            FilterSet {
                city: Some("Oslo".to_string()),
                page: Some(4),
                size: Some(200),
                ..Default::default()
            },
            FilterSet {
                keyword: Some("jazz".to_string()),
                city: Some("New Orleans".to_string()),
                state_code: Some("LA".to_string()),
                country_code: Some("US".to_string()),
                start_date_time: Some(Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap()),
                end_date_time: Some(Utc.with_ymd_and_hms(2026, 5, 31, 23, 59, 59).unwrap()),
                page: Some(0),
                size: Some(20),
            },
        ];

        for filter in filters {
            let query = build_query("k", &filter);
            assert_eq!(query.split('&').count(), present_count(&filter) + 1, "{query}");
        }
    }

    #[test]
    fn absent_fields_never_appear_as_empty_markers() {
        let filter = FilterSet {
            keyword: Some("rock".to_string()),
            ..Default::default()
        };
        let query = build_query("k", &filter);
        assert!(!query.contains("city"));
        assert!(!query.contains("stateCode"));
        assert!(!query.contains("startDateTime"));
        assert!(!query.contains("page"));
    }

    #[test]
    fn parameters_are_emitted_in_the_documented_order() {
        let filter = FilterSet {
            keyword: Some("opera".to_string()),
            city: Some("Wien".to_string()),
            state_code: Some("9".to_string()),
            country_code: Some("AT".to_string()),
            start_date_time: Some(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()),
            end_date_time: Some(Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap()),
            page: Some(2),
            size: Some(100),
        };
        let query = build_query("k", &filter);
        assert_eq!(
            query,
            "apikey=k&keyword=opera&city=Wien&stateCode=9&countryCode=AT\
             &startDateTime=2026-01-02T03:04:05Z&endDateTime=2026-02-03T04:05:06Z\
             &page=2&size=100"
        );
    }

    #[test]
    fn values_are_percent_encoded() {
        let filter = FilterSet {
            keyword: Some("rock & roll".to_string()),
            city: Some("São Paulo".to_string()),
            ..Default::default()
        };
        let query = build_query("k", &filter);
        assert!(query.contains("keyword=rock%20%26%20roll"));
        assert!(query.contains("city=S%C3%A3o%20Paulo"));
    }

    #[test]
    fn date_round_trip_preserves_the_instant() {
        let rendered = "2026-07-04T19:30:00Z";
        let parsed = DateTime::parse_from_rfc3339(rendered)
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date_time(&parsed), rendered);
    }

    #[test]
    fn dates_use_second_precision_with_a_literal_z() {
        let instant = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_date_time(&instant), "2026-12-31T23:59:59Z");
    }
}
