//! Pagination envelope extraction and loop-termination decisions.
//!
//! The fetch loop in the shell crate drives I/O; everything that can be
//! decided from data alone lives here so it can be tested with fixtures.

use serde_json::Value;

/// Pagination metadata extracted best-effort from a response's `page` object.
///
/// Every field is optional: the remote occasionally omits or garbles the
/// envelope, and a missing `total_pages` simply means the loop falls back to
/// stopping on the first empty page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageEnvelope {
    pub number: Option<u64>,
    pub size: Option<u64>,
    pub total_elements: Option<u64>,
    pub total_pages: Option<u64>,
}

impl PageEnvelope {
    /// Extract whatever numeric fields are present. Returns `None` when the
    /// value is not an object at all; wrong-typed fields are dropped rather
    /// than failing the extraction.
    pub fn from_value(page: &Value) -> Option<Self> {
        let object = page.as_object()?;
        let field = |key: &str| object.get(key).and_then(Value::as_u64);
        Some(Self {
            number: field("number"),
            size: field("size"),
            total_elements: field("totalElements"),
            total_pages: field("totalPages"),
        })
    }
}

/// What the fetch loop should do after a successfully extracted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDecision {
    /// Fetch the next page index.
    Continue,
    /// The aggregate is complete.
    Stop(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// An empty page always means "no more data", whatever the envelope says.
    EmptyPage,
    /// The envelope's declared page count has been reached.
    TotalPagesReached,
    /// The hard safety ceiling fired.
    PageCeiling,
}

/// Decide whether to keep paging after page `page` yielded `items_on_page`
/// items. The empty-page rule wins over a stale or incorrect `totalPages`.
pub fn advance(
    page: u64,
    items_on_page: usize,
    envelope: Option<&PageEnvelope>,
    max_pages: u64,
) -> PageDecision {
    if items_on_page == 0 {
        return PageDecision::Stop(StopReason::EmptyPage);
    }

    let next = page + 1;
    if let Some(total_pages) = envelope.and_then(|e| e.total_pages) {
        if next >= total_pages {
            return PageDecision::Stop(StopReason::TotalPagesReached);
        }
    }
    if next >= max_pages {
        return PageDecision::Stop(StopReason::PageCeiling);
    }

    PageDecision::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_a_full_envelope() {
        let value = json!({"size": 200, "totalElements": 412, "totalPages": 3, "number": 1});
        let envelope = PageEnvelope::from_value(&value).unwrap();
        assert_eq!(envelope.number, Some(1));
        assert_eq!(envelope.size, Some(200));
        assert_eq!(envelope.total_elements, Some(412));
        assert_eq!(envelope.total_pages, Some(3));
    }

    #[test]
    fn wrong_typed_fields_are_dropped_not_fatal() {
        let value = json!({"totalPages": "three", "number": 0});
        let envelope = PageEnvelope::from_value(&value).unwrap();
        assert_eq!(envelope.total_pages, None);
        assert_eq!(envelope.number, Some(0));
    }

    #[test]
    fn non_object_envelope_is_none() {
        assert_eq!(PageEnvelope::from_value(&json!(7)), None);
        assert_eq!(PageEnvelope::from_value(&json!("page")), None);
    }

    #[test]
    fn empty_page_stops_even_when_more_pages_are_claimed() {
        let envelope = PageEnvelope {
            total_pages: Some(10),
            ..Default::default()
        };
        assert_eq!(
            advance(0, 0, Some(&envelope), 100),
            PageDecision::Stop(StopReason::EmptyPage)
        );
    }

    #[test]
    fn stops_when_total_pages_is_reached() {
        let envelope = PageEnvelope {
            total_pages: Some(1),
            ..Default::default()
        };
        assert_eq!(
            advance(0, 20, Some(&envelope), 100),
            PageDecision::Stop(StopReason::TotalPagesReached)
        );

        let envelope = PageEnvelope {
            total_pages: Some(3),
            ..Default::default()
        };
        assert_eq!(advance(1, 20, Some(&envelope), 100), PageDecision::Continue);
        assert_eq!(
            advance(2, 20, Some(&envelope), 100),
            PageDecision::Stop(StopReason::TotalPagesReached)
        );
    }

    #[test]
    fn missing_envelope_continues_until_an_empty_page() {
        assert_eq!(advance(5, 20, None, 100), PageDecision::Continue);
        assert_eq!(
            advance(5, 0, None, 100),
            PageDecision::Stop(StopReason::EmptyPage)
        );
    }

    #[test]
    fn page_ceiling_bounds_a_misbehaving_endpoint() {
        assert_eq!(
            advance(99, 20, None, 100),
            PageDecision::Stop(StopReason::PageCeiling)
        );
        assert_eq!(advance(98, 20, None, 100), PageDecision::Continue);
    }
}
