mod discovery;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "tmtools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "search_venues".to_string(),
            description: "Search Ticketmaster venues by keyword with optional location filters (city, state code, country code). Returns the first page of matching venues.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "keyword": {
                        "type": "string",
                        "description": "Search keyword for venues"
                    },
                    "city": {
                        "type": "string",
                        "description": "City name (optional)"
                    },
                    "state": {
                        "type": "string",
                        "description": "State code, e.g. 'CA' (optional)"
                    },
                    "country": {
                        "type": "string",
                        "description": "Country code, e.g. 'US' (optional)"
                    }
                },
                "required": ["keyword"]
            }),
        },
        Tool {
            name: "get_venue_details".to_string(),
            description: "Get detailed information about a specific venue by its Ticketmaster venue ID.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "venue_id": {
                        "type": "string",
                        "description": "Venue ID to get details for"
                    }
                },
                "required": ["venue_id"]
            }),
        },
        Tool {
            name: "search_events".to_string(),
            description: "Search Ticketmaster events by keyword with optional location and date-range filters. Dates accept 'yyyy-MM-dd' or RFC 3339. Returns the first page of matching events.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "keyword": {
                        "type": "string",
                        "description": "Search keyword for events"
                    },
                    "city": {
                        "type": "string",
                        "description": "City name (optional)"
                    },
                    "state": {
                        "type": "string",
                        "description": "State code, e.g. 'CA' (optional)"
                    },
                    "country": {
                        "type": "string",
                        "description": "Country code, e.g. 'US' (optional)"
                    },
                    "start_date": {
                        "type": "string",
                        "description": "Earliest event start, 'yyyy-MM-dd' or RFC 3339 (optional)"
                    },
                    "end_date": {
                        "type": "string",
                        "description": "Latest event start, 'yyyy-MM-dd' or RFC 3339 (optional)"
                    }
                },
                "required": ["keyword"]
            }),
        },
        Tool {
            name: "get_event_details".to_string(),
            description: "Get detailed information about a specific event by its Ticketmaster event ID.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "event_id": {
                        "type": "string",
                        "description": "Event ID to get details for"
                    }
                },
                "required": ["event_id"]
            }),
        },
        Tool {
            name: "get_all_venues".to_string(),
            description: "Enumerate every venue by walking the paginated listing to completion. Rate-limit (429) responses retry the same page after a flat delay; pass timeout_secs to bound the worst case.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "timeout_secs": {
                        "type": "number",
                        "description": "Abort the enumeration after this many seconds (optional)"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "get_all_venues_by_city".to_string(),
            description: "Enumerate every venue in a city by walking the paginated listing to completion. Results are cached in-process for a few minutes since the enumeration is expensive.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "City name"
                    },
                    "country": {
                        "type": "string",
                        "description": "Country code, e.g. 'NO' (optional)"
                    },
                    "timeout_secs": {
                        "type": "number",
                        "description": "Abort the enumeration after this many seconds (optional)"
                    }
                },
                "required": ["city"]
            }),
        },
        Tool {
            name: "get_limited_venues".to_string(),
            description: "Fetch the first page of venues with an explicit page size, optionally filtered by city and country.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "number",
                        "description": "Number of venues to return (default: 10)"
                    },
                    "city": {
                        "type": "string",
                        "description": "City name (optional)"
                    },
                    "country": {
                        "type": "string",
                        "description": "Country code (optional)"
                    }
                },
                "required": []
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "search_venues" => discovery::handle_search_venues(params.arguments, global).await,
        "get_venue_details" => discovery::handle_venue_details(params.arguments, global).await,
        "search_events" => discovery::handle_search_events(params.arguments, global).await,
        "get_event_details" => discovery::handle_event_details(params.arguments, global).await,
        "get_all_venues" => discovery::handle_all_venues(params.arguments, global).await,
        "get_all_venues_by_city" => {
            discovery::handle_venues_by_city(params.arguments, global).await
        }
        "get_limited_venues" => discovery::handle_limited_venues(params.arguments, global).await,
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_reports_the_server_name() {
        let value = handle_initialize().unwrap();
        assert_eq!(value["serverInfo"]["name"], "tmtools");
        assert_eq!(value["protocolVersion"], "2024-11-05");
    }

    #[test]
    fn tools_list_exposes_every_discovery_operation() {
        let value = handle_tools_list().unwrap();
        let tools = value["tools"].as_array().unwrap();
        let names: Vec<&str> = tools
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "search_venues",
                "get_venue_details",
                "search_events",
                "get_event_details",
                "get_all_venues",
                "get_all_venues_by_city",
                "get_limited_venues",
            ]
        );
        for tool in tools {
            assert!(tool["inputSchema"]["type"] == "object");
        }
    }
}
