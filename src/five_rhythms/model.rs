use super::cells::Link;
use super::dates::DateState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    /// Detail-page link; absent for plain-text-only listings.
    pub url: Option<String>,
    pub schedule: DateState,
    pub teachers: Vec<Person>,
    pub level: Option<Level>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub title: String,
    pub url: Option<String>,
}

impl Person {
    pub fn from_link(link: Link) -> Self {
        Self {
            title: link.title,
            url: Some(link.url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Label(String),
    Linked(Vec<Link>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub has_contact_form: bool,
    pub teacher_id: Option<String>,
    pub phone: Option<String>,
}
