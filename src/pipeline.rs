use crate::browser::{Browser, NavigationError};
use crate::config::model::Config;
use crate::five_rhythms::dates::yesterday_key;
use crate::five_rhythms::dto::Report;
use crate::five_rhythms::enrich::resolve_on_demand_dates;
use crate::five_rhythms::filter::discard_past_events;
use crate::five_rhythms::listing::{extract_events, ListingError};
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid search URL '{url}': {source}")]
    InvalidSearchUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to fetch the event listing: {0}")]
    ListingUnavailable(#[from] NavigationError),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error("no events found from source")]
    NoEventsFound,
    #[error("no current events remaining after filtering past events")]
    NoCurrentEvents,
}

/**
Runs the whole fetch: listing page -> extraction -> on-demand resolution ->
past-event filtering -> report. Per-event problems are handled inside their
stage; anything returned as `Err` here is fatal for the run.
*/
#[instrument(skip(browser, config))]
pub async fn run(browser: &impl Browser, config: &Config) -> Result<Report, PipelineError> {
    info!("Fetching events from 5Rhythms...");

    let search_url =
        Url::parse(&config.search_url).map_err(|source| PipelineError::InvalidSearchUrl {
            url: config.search_url.clone(),
            source,
        })?;

    let listing_html = browser.goto(config.search_url.as_str()).await?;
    let events = extract_events(&listing_html, &search_url)?;

    if events.is_empty() {
        return Err(PipelineError::NoEventsFound);
    }

    let events = resolve_on_demand_dates(browser, events, config.fetch_delay).await;
    let events = discard_past_events(events, &yesterday_key());

    if events.is_empty() {
        return Err(PipelineError::NoCurrentEvents);
    }

    Ok(Report::new(&config.search_url, events))
}
