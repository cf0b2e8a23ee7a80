use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub search_url: String,
    /// Pause between consecutive detail-page visits.
    pub fetch_delay: Duration,
    pub navigation_timeout: Duration,
}
