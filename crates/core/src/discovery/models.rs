//! Discovery API response models.
//!
//! The remote schema is a deep graph of optional fields. Everything here is a
//! plain immutable value type: there is no polymorphism in the API, only
//! optionality, so every nested section is an `Option` and unknown sections
//! are simply absent after deserialization.

use serde::{Deserialize, Serialize};

/// Top-level response shape shared by every listing endpoint.
///
/// The `page` section is kept as a raw value so that a garbled envelope never
/// fails the whole deserialization; see [`super::paging::PageEnvelope`].
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct DiscoveryRoot {
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Embedded>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<serde_json::Value>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<serde_json::Value>,
}

impl DiscoveryRoot {
    /// Wrap an aggregated venue list. The `page` section is intentionally
    /// dropped: it described a single remote page, not the aggregate.
    pub fn from_venues(venues: Vec<Venue>) -> Self {
        Self {
            embedded: Some(Embedded {
                venues: Some(venues),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Wrap an aggregated event list.
    pub fn from_events(events: Vec<Event>) -> Self {
        Self {
            embedded: Some(Embedded {
                events: Some(events),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Venues under `_embedded.venues`, if any.
    pub fn venues(&self) -> &[Venue] {
        self.embedded
            .as_ref()
            .and_then(|e| e.venues.as_deref())
            .unwrap_or_default()
    }

    /// Events under `_embedded.events`, if any.
    pub fn events(&self) -> &[Event] {
        self.embedded
            .as_ref()
            .and_then(|e| e.events.as_deref())
            .unwrap_or_default()
    }
}

/// The `_embedded` collection, keyed by entity type.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Embedded {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venues: Option<Vec<Venue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attractions: Option<Vec<Attraction>>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Venue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(rename = "postalCode", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markets: Option<Vec<Market>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmas: Option<Vec<Dma>>,
    #[serde(rename = "boxOfficeInfo", default, skip_serializing_if = "Option::is_none")]
    pub box_office_info: Option<BoxOfficeInfo>,
    #[serde(rename = "parkingDetail", default, skip_serializing_if = "Option::is_none")]
    pub parking_detail: Option<String>,
    #[serde(
        rename = "accessibleSeatingDetail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub accessible_seating_detail: Option<String>,
    #[serde(rename = "generalInfo", default, skip_serializing_if = "Option::is_none")]
    pub general_info: Option<GeneralInfo>,
    #[serde(rename = "upcomingEvents", default, skip_serializing_if = "Option::is_none")]
    pub upcoming_events: Option<UpcomingEvents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ada: Option<Ada>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<Sales>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<EventDates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifications: Option<Vec<Classification>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoter: Option<Promoter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(rename = "pleaseNote", default, skip_serializing_if = "Option::is_none")]
    pub please_note: Option<String>,
    #[serde(rename = "priceRanges", default, skip_serializing_if = "Option::is_none")]
    pub price_ranges: Option<Vec<PriceRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seatmap: Option<Seatmap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
    #[serde(rename = "ticketLimit", default, skip_serializing_if = "Option::is_none")]
    pub ticket_limit: Option<TicketLimit>,
    #[serde(rename = "ageRestrictions", default, skip_serializing_if = "Option::is_none")]
    pub age_restrictions: Option<AgeRestrictions>,
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EventEmbedded>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Attraction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub attraction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifications: Option<Vec<Classification>>,
    #[serde(rename = "upcomingEvents", default, skip_serializing_if = "Option::is_none")]
    pub upcoming_events: Option<UpcomingEvents>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<serde_json::Value>,
}

/// Venues and attractions embedded in an event record.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct EventEmbedded {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venues: Option<Vec<Venue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attractions: Option<Vec<Attraction>>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct City {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "stateCode", default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Country {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "countryCode", default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Market {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Dma {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct BoxOfficeInfo {
    #[serde(
        rename = "phoneNumberDetail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_number_detail: Option<String>,
    #[serde(rename = "openHoursDetail", default, skip_serializing_if = "Option::is_none")]
    pub open_hours_detail: Option<String>,
    #[serde(
        rename = "acceptedPaymentDetail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub accepted_payment_detail: Option<String>,
    #[serde(rename = "willCallDetail", default, skip_serializing_if = "Option::is_none")]
    pub will_call_detail: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct GeneralInfo {
    #[serde(rename = "generalRule", default, skip_serializing_if = "Option::is_none")]
    pub general_rule: Option<String>,
    #[serde(rename = "childRule", default, skip_serializing_if = "Option::is_none")]
    pub child_rule: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct UpcomingEvents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticketmaster: Option<u64>,
    #[serde(rename = "_total", default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(rename = "_filtered", default, skip_serializing_if = "Option::is_none")]
    pub filtered: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Ada {
    #[serde(rename = "adaPhones", default, skip_serializing_if = "Option::is_none")]
    pub ada_phones: Option<String>,
    #[serde(rename = "adaCustomCopy", default, skip_serializing_if = "Option::is_none")]
    pub ada_custom_copy: Option<String>,
    #[serde(rename = "adaHours", default, skip_serializing_if = "Option::is_none")]
    pub ada_hours: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Sales {
    #[serde(rename = "public", default, skip_serializing_if = "Option::is_none")]
    pub public_sale: Option<SaleInfo>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct SaleInfo {
    #[serde(rename = "startDateTime", default, skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<String>,
    #[serde(rename = "startTBD", default, skip_serializing_if = "Option::is_none")]
    pub start_tbd: Option<bool>,
    #[serde(rename = "endDateTime", default, skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct EventDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateStart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DateStatus>,
    #[serde(
        rename = "spanMultipleDays",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub span_multiple_days: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct DateStart {
    #[serde(rename = "localDate", default, skip_serializing_if = "Option::is_none")]
    pub local_date: Option<String>,
    #[serde(rename = "localTime", default, skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(rename = "dateTBD", default, skip_serializing_if = "Option::is_none")]
    pub date_tbd: Option<bool>,
    #[serde(rename = "dateTBA", default, skip_serializing_if = "Option::is_none")]
    pub date_tba: Option<bool>,
    #[serde(rename = "timeTBA", default, skip_serializing_if = "Option::is_none")]
    pub time_tba: Option<bool>,
    #[serde(
        rename = "noSpecificTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub no_specific_time: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct DateStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Classification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<ClassificationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<ClassificationItem>,
    #[serde(rename = "subGenre", default, skip_serializing_if = "Option::is_none")]
    pub sub_genre: Option<ClassificationItem>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub classification_type: Option<ClassificationItem>,
    #[serde(rename = "subType", default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<ClassificationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ClassificationItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Promoter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct PriceRange {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub range_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifications: Option<Vec<Classification>>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Seatmap {
    #[serde(rename = "staticUrl", default, skip_serializing_if = "Option::is_none")]
    pub static_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Accessibility {
    #[serde(rename = "ticketLimit", default, skip_serializing_if = "Option::is_none")]
    pub ticket_limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct TicketLimit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct AgeRestrictions {
    #[serde(
        rename = "legalAgeEnforced",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub legal_age_enforced: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_venue_listing_page() {
        let body = r#"{
            "_embedded": {
                "venues": [
                    {
                        "name": "The Fillmore",
                        "type": "venue",
                        "id": "KovZpZAEdntA",
                        "url": "https://www.ticketmaster.com/the-fillmore",
                        "postalCode": "94115",
                        "city": {"name": "San Francisco"},
                        "state": {"name": "California", "stateCode": "CA"},
                        "country": {"name": "United States Of America", "countryCode": "US"},
                        "address": {"line1": "1805 Geary Blvd"},
                        "location": {"longitude": "-122.43", "latitude": "37.78"},
                        "upcomingEvents": {"ticketmaster": 42, "_total": 42}
                    }
                ]
            },
            "page": {"size": 20, "totalElements": 1, "totalPages": 1, "number": 0}
        }"#;

        let root: DiscoveryRoot = serde_json::from_str(body).unwrap();
        let venues = root.venues();
        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].name.as_deref(), Some("The Fillmore"));
        assert_eq!(
            venues[0].city.as_ref().and_then(|c| c.name.as_deref()),
            Some("San Francisco")
        );
        assert!(root.page.is_some());
    }

    #[test]
    fn missing_embedded_section_yields_empty_lists() {
        let root: DiscoveryRoot = serde_json::from_str(r#"{"page": {"totalPages": 0}}"#).unwrap();
        assert!(root.venues().is_empty());
        assert!(root.events().is_empty());
    }

    #[test]
    fn aggregate_wrapper_drops_the_page_section() {
        let root = DiscoveryRoot::from_venues(vec![Venue {
            id: Some("v1".to_string()),
            ..Default::default()
        }]);
        let json = serde_json::to_value(&root).unwrap();
        assert!(json.get("page").is_none());
        assert_eq!(json["_embedded"]["venues"][0]["id"], "v1");
    }

    #[test]
    fn deserializes_an_event_with_nested_sections() {
        let body = r#"{
            "name": "Example Concert",
            "type": "event",
            "id": "Z7r9jZ1Ad",
            "dates": {"start": {"localDate": "2026-09-01", "dateTime": "2026-09-01T19:00:00Z"}},
            "classifications": [{"primary": true, "segment": {"name": "Music"}, "genre": {"name": "Rock"}}],
            "priceRanges": [{"type": "standard", "currency": "USD", "min": 39.5, "max": 129.5}],
            "_embedded": {"venues": [{"name": "Big Arena", "id": "v9"}]}
        }"#;

        let event: Event = serde_json::from_str(body).unwrap();
        assert_eq!(event.name.as_deref(), Some("Example Concert"));
        let genre = event.classifications.as_ref().unwrap()[0]
            .genre
            .as_ref()
            .and_then(|g| g.name.as_deref());
        assert_eq!(genre, Some("Rock"));
        let venue = &event.embedded.as_ref().unwrap().venues.as_ref().unwrap()[0];
        assert_eq!(venue.name.as_deref(), Some("Big Arena"));
    }
}
