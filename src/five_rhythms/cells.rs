use lazy_static::lazy_static;
use scraper::{ElementRef, Selector};
use serde::Serialize;
use url::Url;

lazy_static! {
    static ref ANCHOR: Selector = Selector::parse("a").expect("Failed to create anchor selector");
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

/// What a single listing cell holds. Columns on the source site mix plain
/// labels, one linked entity and comma-separated groups of linked entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Link(Link),
    Links(Vec<Link>),
}

/// Resolves a cell into one of the three shapes. Fragment anchors (in-page
/// `#...` triggers such as the contact form) are annotation, not links: a
/// cell whose only anchor is a fragment resolves to its text minus the
/// anchor label, and fragment anchors among real links are dropped.
pub fn parse_cell(cell: ElementRef, page_url: &Url) -> CellValue {
    let anchors: Vec<ElementRef> = cell.select(&ANCHOR).collect();
    let full_text = element_text(cell);

    if anchors.is_empty() {
        return CellValue::Text(full_text);
    }

    if anchors.len() == 1 && is_fragment_anchor(anchors[0]) {
        let label = element_text(anchors[0]);
        let remaining = full_text.replace(&label, "").trim().to_string();

        return CellValue::Text(if remaining.is_empty() {
            full_text
        } else {
            remaining
        });
    }

    let mut links: Vec<Link> = anchors
        .into_iter()
        .filter(|anchor| !is_fragment_anchor(*anchor))
        .map(|anchor| to_link(anchor, page_url))
        .collect();

    match links.len() {
        0 => CellValue::Text(full_text),
        1 => CellValue::Link(links.remove(0)),
        _ => CellValue::Links(links),
    }
}

/// Text content of an element, trimmed.
pub fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn is_fragment_anchor(anchor: ElementRef) -> bool {
    anchor
        .value()
        .attr("href")
        .map(|href| href.starts_with('#'))
        .unwrap_or(false)
}

fn to_link(anchor: ElementRef, page_url: &Url) -> Link {
    let href = anchor.value().attr("href").unwrap_or_default();
    let url = page_url
        .join(href)
        .map(String::from)
        .unwrap_or_else(|_| href.to_string());

    Link {
        title: element_text(anchor),
        url,
    }
}
