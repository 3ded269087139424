use crate::prelude::{println, *};
use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;

pub mod cache;
pub mod client;
pub mod config;

use tmtools_core::discovery::models::{DiscoveryRoot, Event, Venue};

/// Discovery module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "discovery")]
#[command(about = "Ticketmaster Discovery (venues, events) operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search venues by keyword and location
    #[clap(name = "search-venues")]
    SearchVenues(SearchVenuesOptions),

    /// Get detailed information about a specific venue
    #[clap(name = "venue")]
    Venue(DetailsOptions),

    /// Search events by keyword, location and date range
    #[clap(name = "search-events")]
    SearchEvents(SearchEventsOptions),

    /// Get detailed information about a specific event
    #[clap(name = "event")]
    Event(DetailsOptions),

    /// Enumerate every venue, page by page
    #[clap(name = "all-venues")]
    AllVenues(AllVenuesOptions),

    /// Enumerate every venue in a city, page by page
    #[clap(name = "venues-by-city")]
    VenuesByCity(VenuesByCityOptions),

    /// Fetch the first page of venues with an explicit page size
    #[clap(name = "limited-venues")]
    LimitedVenues(LimitedVenuesOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct SearchVenuesOptions {
    /// Search keyword for venues
    pub keyword: String,

    /// City name
    #[arg(short, long)]
    pub city: Option<String>,

    /// State code (e.g. "CA")
    #[arg(short, long)]
    pub state: Option<String>,

    /// Country code (e.g. "US")
    #[arg(long)]
    pub country: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct DetailsOptions {
    /// Venue or event ID
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct SearchEventsOptions {
    /// Search keyword for events
    pub keyword: String,

    /// City name
    #[arg(short, long)]
    pub city: Option<String>,

    /// State code (e.g. "CA")
    #[arg(short, long)]
    pub state: Option<String>,

    /// Country code (e.g. "US")
    #[arg(long)]
    pub country: Option<String>,

    /// Earliest event start, `yyyy-MM-dd` or RFC 3339
    #[arg(long)]
    pub start_date: Option<String>,

    /// Latest event start, `yyyy-MM-dd` or RFC 3339
    #[arg(long)]
    pub end_date: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct AllVenuesOptions {
    /// Abort the enumeration after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Every venue in Oslo:
  tmtools discovery venues-by-city Oslo --country NO

  # Bound the worst case under sustained rate limiting:
  tmtools discovery venues-by-city Oslo --country NO --timeout 120

NOTES:
  - Pages are fetched strictly in order; a 429 retries the same page after
    a flat delay, so an unthrottled deadline can run long without --timeout
  - Results are cached in-process for cache_ttl_secs (default 300)")]
pub struct VenuesByCityOptions {
    /// City name
    pub city: String,

    /// Country code (e.g. "NO")
    #[arg(long)]
    pub country: Option<String>,

    /// Abort the enumeration after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct LimitedVenuesOptions {
    /// Number of venues to return
    #[arg(short, long, default_value = "10")]
    pub limit: u64,

    /// City name
    #[arg(short, long)]
    pub city: Option<String>,

    /// Country code (e.g. "US")
    #[arg(long)]
    pub country: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Discovery API Base: {}", config::DEFAULT_BASE_URL);
        println!();
    }

    match app.command {
        Commands::SearchVenues(options) => search_venues(options, global).await,
        Commands::Venue(options) => venue_details(options, global).await,
        Commands::SearchEvents(options) => search_events(options, global).await,
        Commands::Event(options) => event_details(options, global).await,
        Commands::AllVenues(options) => all_venues(options, global).await,
        Commands::VenuesByCity(options) => venues_by_city(options, global).await,
        Commands::LimitedVenues(options) => limited_venues(options, global).await,
    }
}

pub(crate) fn build_client(global: &crate::Global) -> Result<client::Client> {
    let config = config::DiscoveryConfig::load(global.config.as_deref())?
        .with_overrides(global.api_key.clone());
    Ok(client::Client::new(config)?)
}

/// Accepts either a plain date (`2026-05-01`, midnight UTC) or a full
/// RFC 3339 instant.
pub(crate) fn parse_date_arg(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| eyre!("Invalid date: {value} (expected yyyy-MM-dd or RFC 3339)"))?;
    Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
}

fn deadline_from(timeout: Option<u64>) -> Option<tokio::time::Instant> {
    timeout.map(|secs| tokio::time::Instant::now() + Duration::from_secs(secs))
}

// Data functions below are shared by the CLI handlers and the MCP tools.

pub async fn search_venues_data(
    global: &crate::Global,
    keyword: String,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
) -> Result<DiscoveryRoot> {
    let client = build_client(global)?;
    Ok(client.search_venues(keyword, city, state, country).await?)
}

pub async fn venue_details_data(global: &crate::Global, venue_id: &str) -> Result<Venue> {
    let client = build_client(global)?;
    Ok(client.venue_details(venue_id).await?)
}

pub async fn search_events_data(
    global: &crate::Global,
    keyword: String,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
) -> Result<DiscoveryRoot> {
    let start = start_date.as_deref().map(parse_date_arg).transpose()?;
    let end = end_date.as_deref().map(parse_date_arg).transpose()?;
    let client = build_client(global)?;
    Ok(client
        .search_events(keyword, city, state, country, start, end)
        .await?)
}

pub async fn event_details_data(global: &crate::Global, event_id: &str) -> Result<Event> {
    let client = build_client(global)?;
    Ok(client.event_details(event_id).await?)
}

pub async fn all_venues_data(
    global: &crate::Global,
    timeout: Option<u64>,
) -> Result<DiscoveryRoot> {
    let client = build_client(global)?;
    Ok(client.all_venues(deadline_from(timeout)).await?)
}

pub async fn venues_by_city_data(
    global: &crate::Global,
    city: String,
    country: Option<String>,
    timeout: Option<u64>,
) -> Result<DiscoveryRoot> {
    let client = build_client(global)?;
    Ok(client
        .all_venues_by_city(city, country, deadline_from(timeout))
        .await?)
}

pub async fn limited_venues_data(
    global: &crate::Global,
    limit: u64,
    city: Option<String>,
    country: Option<String>,
) -> Result<DiscoveryRoot> {
    let client = build_client(global)?;
    Ok(client.limited_venues(limit, city, country).await?)
}

// CLI handlers.

async fn search_venues(options: SearchVenuesOptions, global: crate::Global) -> Result<()> {
    let data = search_venues_data(
        &global,
        options.keyword.clone(),
        options.city.clone(),
        options.state.clone(),
        options.country.clone(),
    )
    .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_venue_table(data.venues());
    }

    Ok(())
}

async fn venue_details(options: DetailsOptions, global: crate::Global) -> Result<()> {
    let venue = venue_details_data(&global, &options.id).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&venue)?);
    } else {
        print_venue_details(&venue);
    }

    Ok(())
}

async fn search_events(options: SearchEventsOptions, global: crate::Global) -> Result<()> {
    let data = search_events_data(
        &global,
        options.keyword.clone(),
        options.city.clone(),
        options.state.clone(),
        options.country.clone(),
        options.start_date.clone(),
        options.end_date.clone(),
    )
    .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_event_table(data.events());
    }

    Ok(())
}

async fn event_details(options: DetailsOptions, global: crate::Global) -> Result<()> {
    let event = event_details_data(&global, &options.id).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        print_event_details(&event);
    }

    Ok(())
}

async fn all_venues(options: AllVenuesOptions, global: crate::Global) -> Result<()> {
    let data = all_venues_data(&global, options.timeout).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_venue_table(data.venues());
    }

    Ok(())
}

async fn venues_by_city(options: VenuesByCityOptions, global: crate::Global) -> Result<()> {
    let data = venues_by_city_data(
        &global,
        options.city.clone(),
        options.country.clone(),
        options.timeout,
    )
    .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_venue_table(data.venues());
    }

    Ok(())
}

async fn limited_venues(options: LimitedVenuesOptions, global: crate::Global) -> Result<()> {
    let data = limited_venues_data(
        &global,
        options.limit,
        options.city.clone(),
        options.country.clone(),
    )
    .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_venue_table(data.venues());
    }

    Ok(())
}

// Formatted output.

fn print_venue_table(venues: &[Venue]) {
    println!("Found {} venue(s):\n", venues.len());

    if venues.is_empty() {
        println!("No venues found.");
        return;
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["ID", "Name", "City", "Country"]);

    for venue in venues {
        table.add_row(prettytable::row![
            venue.id.as_deref().unwrap_or("-"),
            venue.name.as_deref().unwrap_or("(unnamed)"),
            venue
                .city
                .as_ref()
                .and_then(|c| c.name.as_deref())
                .unwrap_or("-"),
            venue
                .country
                .as_ref()
                .and_then(|c| c.country_code.as_deref())
                .unwrap_or("-"),
        ]);
    }

    table.printstd();
}

fn print_event_table(events: &[Event]) {
    println!("Found {} event(s):\n", events.len());

    if events.is_empty() {
        println!("No events found.");
        return;
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["ID", "Name", "Date", "Venue"]);

    for event in events {
        let date = event
            .dates
            .as_ref()
            .and_then(|d| d.start.as_ref())
            .and_then(|s| s.local_date.as_deref())
            .unwrap_or("-");
        let venue = event
            .embedded
            .as_ref()
            .and_then(|e| e.venues.as_ref())
            .and_then(|v| v.first())
            .and_then(|v| v.name.as_deref())
            .unwrap_or("-");
        table.add_row(prettytable::row![
            event.id.as_deref().unwrap_or("-"),
            event.name.as_deref().unwrap_or("(unnamed)"),
            date,
            venue,
        ]);
    }

    table.printstd();
}

fn print_venue_details(venue: &Venue) {
    println!("VENUE: {}", venue.name.as_deref().unwrap_or("(unnamed)"));
    println!("ID: {}", venue.id.as_deref().unwrap_or("-"));

    if let Some(url) = &venue.url {
        println!("URL: {url}");
    }
    if let Some(line1) = venue.address.as_ref().and_then(|a| a.line1.as_deref()) {
        println!("Address: {line1}");
    }
    if let Some(city) = venue.city.as_ref().and_then(|c| c.name.as_deref()) {
        println!("City: {city}");
    }
    if let Some(country) = venue.country.as_ref().and_then(|c| c.name.as_deref()) {
        println!("Country: {country}");
    }
    if let Some(total) = venue.upcoming_events.as_ref().and_then(|u| u.total) {
        println!("Upcoming events: {total}");
    }
}

fn print_event_details(event: &Event) {
    println!("EVENT: {}", event.name.as_deref().unwrap_or("(unnamed)"));
    println!("ID: {}", event.id.as_deref().unwrap_or("-"));

    if let Some(start) = event.dates.as_ref().and_then(|d| d.start.as_ref()) {
        if let Some(date) = &start.local_date {
            println!("Date: {date}");
        }
        if let Some(time) = &start.local_time {
            println!("Time: {time}");
        }
    }
    if let Some(classification) = event
        .classifications
        .as_ref()
        .and_then(|list| list.first())
    {
        if let Some(genre) = classification.genre.as_ref().and_then(|g| g.name.as_deref()) {
            println!("Genre: {genre}");
        }
        if let Some(segment) = classification
            .segment
            .as_ref()
            .and_then(|s| s.name.as_deref())
        {
            println!("Category: {segment}");
        }
    }
    if let Some(venue) = event
        .embedded
        .as_ref()
        .and_then(|e| e.venues.as_ref())
        .and_then(|v| v.first())
    {
        println!("Venue: {}", venue.name.as_deref().unwrap_or("(unnamed)"));
    }
    if let Some(url) = &event.url {
        println!("URL: {url}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_args_accept_plain_dates_and_instants() {
        let midnight = parse_date_arg("2026-05-01").unwrap();
        assert_eq!(midnight, Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap());

        let instant = parse_date_arg("2026-05-01T19:30:00Z").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 5, 1, 19, 30, 0).unwrap());
    }

    #[test]
    fn bad_date_args_are_rejected() {
        assert!(parse_date_arg("May 1st").is_err());
        assert!(parse_date_arg("2026-13-01").is_err());
    }
}
