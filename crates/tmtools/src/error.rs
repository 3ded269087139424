/// Engine error taxonomy.
///
/// Only these variants cross the fetch-engine boundary. A 429 throttle
/// response is deliberately absent: it is recoverable and handled inside the
/// pagination loop, never surfaced to callers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Discovery API error [{status}]: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Deadline exceeded while paging")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}
