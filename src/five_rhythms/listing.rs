use super::cells::{element_text, parse_cell, CellValue};
use super::dates::normalize_range;
use super::model::{Contact, Event, Level, Person};
use itertools::Itertools;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;
use url::Url;

// One event on the source site lists itself as its own level.
const SELF_TITLED_LEVEL: &str = "God, Sex and the Body";

lazy_static! {
    static ref RESULTS_CONTAINER: Selector = selector("#searchresults_classes");
    static ref RESULT_ROWS: Selector = selector("#searchresults_rows");
    static ref NAME_CELL: Selector = selector("#name");
    static ref DATES_CELL: Selector = selector("#dates");
    static ref TEACHER_CELL: Selector = selector("#teacher");
    static ref MAP_CELL: Selector = selector("#map");
    static ref CITY_CELL: Selector = selector("#city");
    static ref COUNTRY_CELL: Selector = selector("#country");
    static ref CONTACT_CELL: Selector = selector("#contactInfo");
    static ref CONTACT_FORM_ANCHOR: Selector = selector(r##"a[href^="#search_result_contact_form"]"##);
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|_| panic!("Failed to create selector '{}'", css))
}

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("could not find the '#searchresults_classes' container in the listing page")]
    ResultsContainerMissing,
}

/// Extracts every result row of the listing page, in document order.
/// A missing results container is a structural break in the source and fails
/// the whole extraction; everything below the row level is best-effort.
pub fn extract_events(page_html: &str, page_url: &Url) -> Result<Vec<Event>, ListingError> {
    let document = Html::parse_document(page_html);
    let container = document
        .select(&RESULTS_CONTAINER)
        .next()
        .ok_or(ListingError::ResultsContainerMissing)?;

    let events = container
        .select(&RESULT_ROWS)
        .map(|row| extract_row(row, page_url))
        .collect();

    Ok(events)
}

fn extract_row(row: ElementRef, page_url: &Url) -> Event {
    let (name, url) = extract_name(row, page_url);
    let schedule = normalize_range(&cell_text(row, &DATES_CELL).unwrap_or_default());
    let teachers = extract_teachers(row, page_url);
    let level = extract_level(row, page_url, &name);

    debug!(
        "Extracted '{}' with teachers [{}]",
        name,
        teachers.iter().map(|teacher| teacher.title.as_str()).join(", ")
    );

    Event {
        name,
        url,
        schedule,
        teachers,
        level,
        city: cell_text(row, &CITY_CELL),
        country: cell_text(row, &COUNTRY_CELL),
        contact: extract_contact(row),
    }
}

fn extract_name(row: ElementRef, page_url: &Url) -> (String, Option<String>) {
    match row
        .select(&NAME_CELL)
        .next()
        .map(|cell| parse_cell(cell, page_url))
    {
        Some(CellValue::Link(link)) => (link.title, Some(link.url)),
        // several anchors in a name cell: the first one names the event
        Some(CellValue::Links(mut links)) => {
            let link = links.remove(0);
            (link.title, Some(link.url))
        }
        Some(CellValue::Text(text)) => (text, None),
        None => (String::new(), None),
    }
}

fn extract_teachers(row: ElementRef, page_url: &Url) -> Vec<Person> {
    match row
        .select(&TEACHER_CELL)
        .next()
        .map(|cell| parse_cell(cell, page_url))
    {
        Some(CellValue::Links(links)) => links.into_iter().map(Person::from_link).collect(),
        Some(CellValue::Link(link)) => vec![Person::from_link(link)],
        Some(CellValue::Text(title)) if !title.is_empty() => vec![Person { title, url: None }],
        _ => Vec::new(),
    }
}

fn extract_level(row: ElementRef, page_url: &Url, event_name: &str) -> Option<Level> {
    if event_name == SELF_TITLED_LEVEL {
        return Some(Level::Label(SELF_TITLED_LEVEL.to_string()));
    }

    match row
        .select(&MAP_CELL)
        .next()
        .map(|cell| parse_cell(cell, page_url))
    {
        Some(CellValue::Links(links)) => Some(Level::Linked(links)),
        Some(CellValue::Link(link)) => Some(Level::Linked(vec![link])),
        Some(CellValue::Text(label)) if !label.is_empty() => Some(Level::Label(label)),
        _ => None,
    }
}

fn extract_contact(row: ElementRef) -> Option<Contact> {
    let cell = row.select(&CONTACT_CELL).next()?;
    let form_anchor = cell.select(&CONTACT_FORM_ANCHOR).next();

    let full_text = element_text(cell);
    let phone = match form_anchor.map(element_text) {
        Some(label) if !label.is_empty() => full_text.replace(&label, "").trim().to_string(),
        _ => full_text,
    };

    let has_contact_form = form_anchor.is_some();
    let teacher_id = form_anchor
        .and_then(|anchor| anchor.value().attr("data-teacher"))
        .map(str::to_string);
    let phone = (!phone.is_empty()).then_some(phone);

    if !has_contact_form && phone.is_none() {
        return None;
    }

    Some(Contact {
        has_contact_form,
        teacher_id,
        phone,
    })
}

fn cell_text(row: ElementRef, cell_selector: &Selector) -> Option<String> {
    row.select(cell_selector).next().map(element_text)
}
