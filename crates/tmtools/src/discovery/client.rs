//! The paginated retrieval engine.
//!
//! One logical call walks a page-based listing endpoint strictly in order:
//! build the query for page `i`, fetch, classify the response, extract the
//! pagination envelope and item list, append, decide. A 429 re-issues the
//! same page after a flat backoff; any other failure aborts the whole call
//! without returning a partial aggregate.

use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tokio::time::Instant;

use tmtools_core::discovery::models::{DiscoveryRoot, Event, Venue};
use tmtools_core::discovery::paging::{advance, PageDecision, PageEnvelope, StopReason};
use tmtools_core::discovery::query::{build_query, FilterSet};

use super::cache::AggregateCache;
use super::config::DiscoveryConfig;
use crate::error::Error;

/// The only status that is retried, and only inside the pagination loop.
const THROTTLE_STATUS: u16 = 429;

/// One raw page response, reduced to what classification needs.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub status: u16,
    pub body: String,
}

/// Knobs for one paging session.
#[derive(Debug, Clone)]
pub struct PagingOptions {
    pub max_pages: u64,
    pub throttle_delay: Duration,
    pub page_delay: Duration,
    /// Checked at both suspension points (response await, backoff sleep).
    /// Throttle retries are otherwise unbounded, so this is the caller's
    /// only way to bound worst-case latency.
    pub deadline: Option<Instant>,
}

impl PagingOptions {
    fn check_deadline(&self) -> Result<(), Error> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    async fn wait(&self, delay: Duration) -> Result<(), Error> {
        if let Some(deadline) = self.deadline {
            if Instant::now() + delay >= deadline {
                tokio::time::sleep_until(deadline).await;
                return Err(Error::Cancelled);
            }
        }
        tokio::time::sleep(delay).await;
        Ok(())
    }
}

/// Walk a listing endpoint to completion.
///
/// `fetch` issues the request for one page index; `extract` pulls the page
/// envelope and item list out of a response body. Items are appended in
/// fetch order, so the aggregate is page-ascending with within-page order
/// preserved.
pub async fn fetch_all_pages<T, F, Fut, X>(
    opts: &PagingOptions,
    mut fetch: F,
    extract: X,
) -> Result<Vec<T>, Error>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<RawPage, Error>>,
    X: Fn(&str) -> Result<(Option<PageEnvelope>, Vec<T>), Error>,
{
    let mut aggregate: Vec<T> = Vec::new();
    let mut page: u64 = 0;

    loop {
        opts.check_deadline()?;
        let response = fetch(page).await?;

        if response.status == THROTTLE_STATUS {
            log::warn!(
                "rate limit hit, waiting {:?} before retrying page {page}",
                opts.throttle_delay
            );
            opts.wait(opts.throttle_delay).await?;
            continue;
        }
        if !(200..300).contains(&response.status) {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }

        let (envelope, items) = extract(&response.body)?;
        if envelope.is_none() {
            log::warn!("could not parse pagination info on page {page}, will stop on the first empty page");
        }
        let found = items.len();
        aggregate.extend(items);
        log::info!("page {page}: {found} items, {} aggregated so far", aggregate.len());

        match advance(page, found, envelope.as_ref(), opts.max_pages) {
            PageDecision::Continue => {
                page += 1;
                // Courtesy delay between pages keeps us under the rate limit.
                opts.wait(opts.page_delay).await?;
            }
            PageDecision::Stop(reason) => {
                if reason == StopReason::PageCeiling {
                    log::warn!("reached safety limit of {} pages, stopping", opts.max_pages);
                }
                return Ok(aggregate);
            }
        }
    }
}

/// Envelope and item extraction for a venue listing page. A body that is not
/// JSON at all is fatal; a missing or garbled `page` section is not.
fn extract_venues(body: &str) -> Result<(Option<PageEnvelope>, Vec<Venue>), Error> {
    let root: DiscoveryRoot =
        serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))?;
    let envelope = root.page.as_ref().and_then(PageEnvelope::from_value);
    let venues = root.embedded.and_then(|e| e.venues).unwrap_or_default();
    Ok((envelope, venues))
}

static VENUE_CACHE: OnceLock<AggregateCache<DiscoveryRoot>> = OnceLock::new();

/// Discovery API client: single-shot lookups plus the pagination engine.
pub struct Client {
    http: reqwest::Client,
    config: DiscoveryConfig,
}

impl Client {
    pub fn new(config: DiscoveryConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    fn paging_options(&self, deadline: Option<Instant>) -> PagingOptions {
        PagingOptions {
            max_pages: self.config.max_pages,
            throttle_delay: self.config.throttle_delay,
            page_delay: self.config.page_delay,
            deadline,
        }
    }

    async fn get_raw(&self, path_and_query: String) -> Result<RawPage, Error> {
        let url = format!("{}{}", self.config.base_url, path_and_query);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(RawPage { status, body })
    }

    /// Single request, no retries. Rate limits are only expected (and only
    /// handled) under sustained bulk listing, not one-shot lookups.
    async fn get_json<T: DeserializeOwned>(&self, path_and_query: String) -> Result<T, Error> {
        let page = self.get_raw(path_and_query).await?;
        if !(200..300).contains(&page.status) {
            return Err(Error::Status {
                status: page.status,
                body: page.body,
            });
        }
        serde_json::from_str(&page.body).map_err(|e| Error::Decode(e.to_string()))
    }

    pub async fn search_venues(
        &self,
        keyword: String,
        city: Option<String>,
        state: Option<String>,
        country: Option<String>,
    ) -> Result<DiscoveryRoot, Error> {
        let filter = FilterSet {
            keyword: Some(keyword),
            city,
            state_code: state,
            country_code: country,
            ..Default::default()
        };
        self.get_json(self.listing_query("venues", &filter)).await
    }

    pub async fn search_events(
        &self,
        keyword: String,
        city: Option<String>,
        state: Option<String>,
        country: Option<String>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<DiscoveryRoot, Error> {
        let filter = FilterSet {
            keyword: Some(keyword),
            city,
            state_code: state,
            country_code: country,
            start_date_time: start,
            end_date_time: end,
            ..Default::default()
        };
        self.get_json(self.listing_query("events", &filter)).await
    }

    pub async fn venue_details(&self, venue_id: &str) -> Result<Venue, Error> {
        log::info!("getting venue details for {venue_id}");
        self.get_json(self.detail_query("venues", venue_id)).await
    }

    pub async fn event_details(&self, event_id: &str) -> Result<Event, Error> {
        log::info!("getting event details for {event_id}");
        self.get_json(self.detail_query("events", event_id)).await
    }

    /// First page only, with an explicit page size.
    pub async fn limited_venues(
        &self,
        limit: u64,
        city: Option<String>,
        country: Option<String>,
    ) -> Result<DiscoveryRoot, Error> {
        let filter = FilterSet {
            city,
            country_code: country,
            page: Some(0),
            size: Some(limit),
            ..Default::default()
        };
        self.get_json(self.listing_query("venues", &filter)).await
    }

    /// Enumerate every venue page by page.
    pub async fn all_venues(&self, deadline: Option<Instant>) -> Result<DiscoveryRoot, Error> {
        let venues = self
            .all_venues_filtered(FilterSet::default(), deadline)
            .await?;
        Ok(DiscoveryRoot::from_venues(venues))
    }

    /// Enumerate every venue in a city. Served through the aggregate cache:
    /// the enumeration is expensive, so repeated calls inside the TTL reuse
    /// the previous result.
    pub async fn all_venues_by_city(
        &self,
        city: String,
        country: Option<String>,
        deadline: Option<Instant>,
    ) -> Result<DiscoveryRoot, Error> {
        let cache = VENUE_CACHE.get_or_init(|| AggregateCache::new(self.config.cache_ttl));
        let key = format!("{city}|{}", country.as_deref().unwrap_or_default());

        if let Some(cached) = cache.get(&key) {
            log::info!("serving venues for {city} from cache");
            return Ok(cached);
        }

        let filter = FilterSet {
            city: Some(city.clone()),
            country_code: country,
            ..Default::default()
        };
        let venues = self.all_venues_filtered(filter, deadline).await?;
        log::info!("retrieved a total of {} venues for city {city}", venues.len());

        let root = DiscoveryRoot::from_venues(venues);
        cache.put(key, root.clone());
        Ok(root)
    }

    async fn all_venues_filtered(
        &self,
        base: FilterSet,
        deadline: Option<Instant>,
    ) -> Result<Vec<Venue>, Error> {
        let opts = self.paging_options(deadline);
        let path = self.config.path_style.listing_path("venues");

        fetch_all_pages(
            &opts,
            |page| {
                let filter = FilterSet {
                    page: Some(page),
                    size: Some(self.config.page_size),
                    ..base.clone()
                };
                let query = build_query(&self.config.api_key, &filter);
                self.get_raw(format!("{path}?{query}"))
            },
            extract_venues,
        )
        .await
    }

    fn listing_query(&self, resource: &str, filter: &FilterSet) -> String {
        format!(
            "{}?{}",
            self.config.path_style.listing_path(resource),
            build_query(&self.config.api_key, filter)
        )
    }

    fn detail_query(&self, resource: &str, id: &str) -> String {
        format!(
            "{}?{}",
            self.config.path_style.detail_path(resource, id),
            build_query(&self.config.api_key, &FilterSet::default())
        )
    }
}
