use super::dates::{normalize_single, DateKey, DateState};
use super::model::Event;
use crate::browser::Browser;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{info, instrument, warn};

const DATE_TOKEN: &str = r"\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{4}";

lazy_static! {
    static ref DETAIL_RANGE: Regex = Regex::new(&format!(r"({DATE_TOKEN})\s*-\s*({DATE_TOKEN})"))
        .expect("Failed to create detail range regex");
    static ref DETAIL_SINGLE: Regex =
        Regex::new(DATE_TOKEN).expect("Failed to create detail date regex");
    static ref BODY: Selector = Selector::parse("body").expect("Failed to create body selector");
}

/**
Second pass: events the listing marked on-demand get their dates from their
own detail page. Pages are visited strictly in listing order, one at a time,
with a pause between consecutive visits to go easy on the source site.
*/
#[instrument(skip(browser, events, fetch_delay))]
pub async fn resolve_on_demand_dates(
    browser: &impl Browser,
    events: Vec<Event>,
    fetch_delay: Duration,
) -> Vec<Event> {
    let pending = events.iter().filter(|event| needs_resolution(event)).count();

    if pending == 0 {
        return events;
    }

    info!("Fetching dates for {} on-demand events...", pending);

    let mut resolved = Vec::with_capacity(events.len());
    let mut visited = 0;

    for event in events {
        if !needs_resolution(&event) {
            resolved.push(event);
            continue;
        }

        if visited > 0 {
            tokio::time::sleep(fetch_delay).await;
        }
        visited += 1;

        info!("  [{}/{}] {}", visited, pending, event.name);
        resolved.push(resolve_event(browser, event).await);
    }

    resolved
}

fn needs_resolution(event: &Event) -> bool {
    event.schedule.is_on_demand() && event.url.is_some()
}

async fn resolve_event(browser: &impl Browser, mut event: Event) -> Event {
    let url = match &event.url {
        Some(url) => url.clone(),
        None => return event,
    };

    match browser.goto(&url).await {
        Ok(page_html) => {
            if let Some((from, to)) = scrape_detail_dates(&page_html) {
                info!("    -> {} - {}", from, to);
                event.schedule = DateState::Dated { from, to };
            }
        }
        // the event simply stays on-demand; the batch carries on
        Err(err) => warn!("Error fetching dates from {}: {}", url, err),
    }

    event
}

/// Pulls the first date range, or failing that a single date, out of the
/// detail page's visible text.
fn scrape_detail_dates(page_html: &str) -> Option<(DateKey, DateKey)> {
    let document = Html::parse_document(page_html);
    let body = document.select(&BODY).next()?;
    let text = body.text().collect::<String>();

    if let Some(captures) = DETAIL_RANGE.captures(&text) {
        return normalize_single(&captures[1]).zip(normalize_single(&captures[2]));
    }

    let token = DETAIL_SINGLE.find(&text)?;
    let date = normalize_single(token.as_str())?;

    Some((date.clone(), date))
}
