use super::cells::Link;
use super::dates::DateState;
use super::model::{Contact, Event, Level, Person};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// The one JSON document the run emits on stdout. The shape is consumed by
/// the website build and must stay stable.
#[derive(Debug, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    #[serde(rename = "sourceUrl")]
    pub source_url: String,
    #[serde(rename = "eventCount")]
    pub event_count: usize,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: String,
}

impl Report {
    pub fn new(source_url: &str, events: Vec<Event>) -> Self {
        let events: Vec<EventRecord> = events.into_iter().map(EventRecord::from_model).collect();

        Self {
            metadata: ReportMetadata {
                source_url: source_url.to_string(),
                event_count: events.len(),
                fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
            events,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub is_ondemand: bool,
    pub date_from: String,
    pub date_to: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teachers: Vec<PersonRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactRecord>,
}

impl EventRecord {
    pub fn from_model(event: Event) -> Self {
        let (is_ondemand, date_from, date_to) = match event.schedule {
            DateState::OnDemand => (true, String::new(), String::new()),
            DateState::Dated { from, to } => (false, from.to_string(), to.to_string()),
        };

        let (level, levels) = match event.level {
            None => (None, None),
            Some(Level::Label(label)) => (Some(label), None),
            Some(Level::Linked(links)) => (None, Some(links)),
        };

        Self {
            name: event.name,
            url: event.url,
            is_ondemand,
            date_from,
            date_to,
            teachers: event
                .teachers
                .into_iter()
                .map(PersonRecord::from_model)
                .collect(),
            level,
            levels,
            city: event.city,
            country: event.country,
            contact: event.contact.map(ContactRecord::from_model),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PersonRecord {
    fn from_model(person: Person) -> Self {
        Self {
            title: person.title,
            url: person.url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactRecord {
    #[serde(rename = "hasContactForm")]
    pub has_contact_form: bool,
    #[serde(rename = "teacherId", skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactRecord {
    fn from_model(contact: Contact) -> Self {
        Self {
            has_contact_form: contact.has_contact_form,
            teacher_id: contact.teacher_id,
            phone: contact.phone,
        }
    }
}
