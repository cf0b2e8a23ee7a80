use crate::config::model::Config;
use std::env;
use std::time::Duration;

const DEFAULT_SEARCH_URL: &str = "https://www.5rhythms.com/EventSearch.php?validate_event_level=&event_type_id=2&event_country=&event_state=&event_city%5B%5D=&event_days%5B%5D=&event_startDate=mm%2Fdd%2Fyy&event_endDate=mm%2Fdd%2Fyy&location_lat=&location_long=&findIt=FIND+IT&isAdvancedSearch=1&SearchName=&SearchEvent=&event_level_id%5B%5D=";

const DEFAULT_FETCH_DELAY_MS: u64 = 1000;
const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 60;

pub fn load_config() -> Config {
    let search_url =
        env::var("EVENT_SEARCH_URL").unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string());
    let fetch_delay_ms = load_u64_config("FETCH_DELAY_MS", DEFAULT_FETCH_DELAY_MS);
    let navigation_timeout_secs =
        load_u64_config("NAVIGATION_TIMEOUT_SECS", DEFAULT_NAVIGATION_TIMEOUT_SECS);

    Config {
        search_url,
        fetch_delay: Duration::from_millis(fetch_delay_ms),
        navigation_timeout: Duration::from_secs(navigation_timeout_secs),
    }
}

fn load_u64_config(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("Invalid config '{}'. Expected an integer number.", name)),
        Err(_) => default,
    }
}
