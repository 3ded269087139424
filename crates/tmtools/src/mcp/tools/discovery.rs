use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{CallToolResult, Content, JsonRpcError};

fn parse_args<T: for<'de> Deserialize<'de>>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| JsonRpcError {
        code: -32602,
        message: format!("Invalid arguments: {e}"),
        data: None,
    })
}

fn tool_result(text: String, is_error: bool) -> Result<serde_json::Value, JsonRpcError> {
    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error: if is_error { Some(true) } else { None },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

/// Boundary adapter: the calling protocol always receives a well-formed
/// result. Failures from the engine become an error payload with a short
/// message and a diagnostic detail string, never a raised error.
fn render<T: serde::Serialize>(data: Result<T>) -> Result<serde_json::Value, JsonRpcError> {
    match data {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value).map_err(|e| JsonRpcError {
                code: -32603,
                message: format!("Serialization error: {e}"),
                data: None,
            })?;
            tool_result(json, false)
        }
        Err(err) => {
            let envelope = serde_json::json!({
                "error": err.to_string(),
                "details": format!("{err:?}"),
            });
            let json = serde_json::to_string_pretty(&envelope).map_err(|e| JsonRpcError {
                code: -32603,
                message: format!("Serialization error: {e}"),
                data: None,
            })?;
            tool_result(json, true)
        }
    }
}

pub async fn handle_search_venues(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SearchVenuesArgs {
        keyword: String,
        city: Option<String>,
        state: Option<String>,
        country: Option<String>,
    }

    let args: SearchVenuesArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling search_venues: keyword={}, city={:?}, state={:?}, country={:?}",
            args.keyword, args.city, args.state, args.country
        );
    }

    render(
        crate::discovery::search_venues_data(global, args.keyword, args.city, args.state, args.country)
            .await,
    )
}

pub async fn handle_venue_details(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct VenueDetailsArgs {
        venue_id: String,
    }

    let args: VenueDetailsArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling get_venue_details: venue_id={}", args.venue_id);
    }

    render(crate::discovery::venue_details_data(global, &args.venue_id).await)
}

pub async fn handle_search_events(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SearchEventsArgs {
        keyword: String,
        city: Option<String>,
        state: Option<String>,
        country: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    }

    let args: SearchEventsArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling search_events: keyword={}, city={:?}, start={:?}, end={:?}",
            args.keyword, args.city, args.start_date, args.end_date
        );
    }

    render(
        crate::discovery::search_events_data(
            global,
            args.keyword,
            args.city,
            args.state,
            args.country,
            args.start_date,
            args.end_date,
        )
        .await,
    )
}

pub async fn handle_event_details(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct EventDetailsArgs {
        event_id: String,
    }

    let args: EventDetailsArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling get_event_details: event_id={}", args.event_id);
    }

    render(crate::discovery::event_details_data(global, &args.event_id).await)
}

pub async fn handle_all_venues(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct AllVenuesArgs {
        timeout_secs: Option<u64>,
    }

    let args: AllVenuesArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling get_all_venues: timeout_secs={:?}", args.timeout_secs);
    }

    render(crate::discovery::all_venues_data(global, args.timeout_secs).await)
}

pub async fn handle_venues_by_city(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct VenuesByCityArgs {
        city: String,
        country: Option<String>,
        timeout_secs: Option<u64>,
    }

    let args: VenuesByCityArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling get_all_venues_by_city: city={}, country={:?}",
            args.city, args.country
        );
    }

    render(
        crate::discovery::venues_by_city_data(global, args.city, args.country, args.timeout_secs)
            .await,
    )
}

pub async fn handle_limited_venues(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct LimitedVenuesArgs {
        limit: Option<u64>,
        city: Option<String>,
        country: Option<String>,
    }

    let args: LimitedVenuesArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling get_limited_venues: limit={:?}, city={:?}",
            args.limit, args.city
        );
    }

    render(
        crate::discovery::limited_venues_data(
            global,
            args.limit.unwrap_or(10),
            args.city,
            args.country,
        )
        .await,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmtools_core::discovery::models::DiscoveryRoot;

    #[test]
    fn failures_become_an_error_envelope_not_a_protocol_error() {
        let value = render::<DiscoveryRoot>(Err(eyre!("Discovery API error [500]: boom"))).unwrap();

        assert_eq!(value["isError"], true);
        let text = value["content"][0]["text"].as_str().unwrap();
        let payload: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["error"], "Discovery API error [500]: boom");
        assert!(payload["details"].as_str().unwrap().contains("boom"));
    }

    #[test]
    fn success_is_rendered_as_pretty_json_content() {
        let value = render(Ok(DiscoveryRoot::from_venues(vec![]))).unwrap();

        assert!(value.get("isError").is_none());
        let text = value["content"][0]["text"].as_str().unwrap();
        let payload: serde_json::Value = serde_json::from_str(text).unwrap();
        assert!(payload["_embedded"]["venues"].as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_required_arguments_are_a_protocol_error() {
        let result = parse_args::<serde_json::Value>(None);
        assert!(result.is_ok());

        #[derive(Debug, Deserialize)]
        struct Args {
            #[allow(dead_code)]
            city: String,
        }
        let err = parse_args::<Args>(Some(serde_json::json!({}))).unwrap_err();
        assert_eq!(err.code, -32602);
    }
}
