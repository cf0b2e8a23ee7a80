use chrono::{Duration, Local};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt::Display;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const ON_DEMAND_TOKEN: &str = "on-demand";

lazy_static! {
    static ref SINGLE_DATE: Regex =
        Regex::new(r"^(\d{1,2})\s+(\w{3})\s+(\d{4})$").expect("Failed to create date regex");
    static ref RANGE_SPLIT: Regex =
        Regex::new(r"^(.+?)\s+-\s+(.+)$").expect("Failed to create range regex");
}

/// `YYMMDD` key. Lexicographic order equals chronological order, which is
/// what the filter and the downstream calendar sort rely on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateState {
    OnDemand,
    Dated { from: DateKey, to: DateKey },
}

impl DateState {
    pub fn is_on_demand(&self) -> bool {
        matches!(self, DateState::OnDemand)
    }
}

/**
Turns a "10 Dec 2025" token into its "251210" key.
Unknown month abbreviations map to the "00" sentinel instead of dropping the record.
*/
pub fn normalize_single(text: &str) -> Option<DateKey> {
    let captures = SINGLE_DATE.captures(text.trim())?;
    let day = &captures[1];
    let month = month_number(&captures[2]);
    let year = &captures[3];

    Some(DateKey(format!("{}{}{:0>2}", &year[2..], month, day)))
}

fn month_number(abbreviation: &str) -> String {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|month| *month == abbreviation)
        .map(|index| format!("{:02}", index + 1))
        .unwrap_or_else(|| "00".to_string())
}

/// Resolves a listing dates cell into a schedule. Anything unrecognized is
/// treated as still needing resolution from the detail page, never an error.
pub fn normalize_range(text: &str) -> DateState {
    let text = text.trim();

    if text.is_empty() || text.eq_ignore_ascii_case(ON_DEMAND_TOKEN) {
        return DateState::OnDemand;
    }

    if let Some(captures) = RANGE_SPLIT.captures(text) {
        return match (normalize_single(&captures[1]), normalize_single(&captures[2])) {
            (Some(from), Some(to)) => DateState::Dated { from, to },
            _ => DateState::OnDemand,
        };
    }

    match normalize_single(text) {
        Some(date) => DateState::Dated {
            from: date.clone(),
            to: date,
        },
        None => DateState::OnDemand,
    }
}

/// Yesterday in `YYMMDD`, the boundary below which an event counts as past.
pub fn yesterday_key() -> DateKey {
    let yesterday = Local::now().date_naive() - Duration::days(1);

    DateKey(yesterday.format("%y%m%d").to_string())
}
