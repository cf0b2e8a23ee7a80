use httpmock::prelude::*;
use rhythmwatch::browser::HttpBrowser;
use rhythmwatch::config::model::Config;
use rhythmwatch::pipeline::{self, PipelineError};
use std::time::{Duration, Instant};

fn test_config(search_url: String) -> Config {
    Config {
        search_url,
        fetch_delay: Duration::from_millis(50),
        navigation_timeout: Duration::from_secs(5),
    }
}

fn listing_row(name: &str, href: Option<&str>, dates: &str) -> String {
    let name_cell = match href {
        Some(href) => format!(r#"<a href="{}">{}</a>"#, href, name),
        None => name.to_string(),
    };

    format!(
        r##"
        <div id="searchresults_rows">
          <div id="name">{}</div>
          <div id="dates">{}</div>
          <div id="teacher"><a href="/t/1">Alice</a></div>
          <div id="map">Waves</div>
          <div id="city">Berlin</div>
          <div id="country">Germany</div>
        </div>
        "##,
        name_cell, dates
    )
}

fn listing_page(rows: &[String]) -> String {
    format!(
        r##"<html><body><div id="searchresults_classes">{}</div></body></html>"##,
        rows.concat()
    )
}

fn detail_page(dates: &str) -> String {
    format!(
        "<html><body><h1>Workshop</h1><p>{}</p><p>Bring comfortable clothes.</p></body></html>",
        dates
    )
}

#[test_log::test(tokio::test)]
async fn should_keep_future_and_resolved_events_in_listing_order() {
    let server = MockServer::start();

    let listing_mock = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).body(listing_page(&[
            listing_row("Elapsed Waves", Some("/events/a"), "10 Dec 2020 - 14 Dec 2020"),
            listing_row("Waves of Renewal", Some("/events/b"), "on-demand"),
            listing_row("Future Heartbeat", Some("/events/c"), "10 Dec 2098 - 14 Dec 2098"),
        ]));
    });
    let detail_mock = server.mock(|when, then| {
        when.method(GET).path("/events/b");
        then.status(200)
            .body(detail_page("12 Mar 2099 - 15 Mar 2099"));
    });

    let config = test_config(server.url("/search"));
    let browser = HttpBrowser::new(config.navigation_timeout);

    let report = pipeline::run(&browser, &config).await.unwrap();

    assert_eq!(report.metadata.event_count, 2);
    assert_eq!(report.metadata.source_url, server.url("/search"));
    assert_eq!(report.events[0].name, "Waves of Renewal");
    assert!(!report.events[0].is_ondemand);
    assert_eq!(report.events[0].date_from, "990312");
    assert_eq!(report.events[0].date_to, "990315");
    assert_eq!(report.events[1].name, "Future Heartbeat");

    listing_mock.assert();
    detail_mock.assert();
}

#[test_log::test(tokio::test)]
async fn should_visit_detail_pages_sequentially_with_a_pause_in_between() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).body(listing_page(&[
            listing_row("First", Some("/events/1"), "on-demand"),
            listing_row("Second", Some("/events/2"), "on-demand"),
            listing_row("Third", Some("/events/3"), "on-demand"),
        ]));
    });
    let detail_mocks: Vec<_> = (1..=3)
        .map(|id| {
            server.mock(move |when, then| {
                when.method(GET).path(format!("/events/{}", id));
                then.status(200).body(detail_page("12 Mar 2099"));
            })
        })
        .collect();

    let config = test_config(server.url("/search"));
    let browser = HttpBrowser::new(config.navigation_timeout);

    let started = Instant::now();
    let report = pipeline::run(&browser, &config).await.unwrap();
    let elapsed = started.elapsed();

    for detail_mock in &detail_mocks {
        detail_mock.assert();
    }
    // three visits, two pauses between them
    assert!(
        elapsed >= config.fetch_delay * 2,
        "expected at least two inter-request pauses, took {:?}",
        elapsed
    );
    assert_eq!(report.metadata.event_count, 3);
}

#[test_log::test(tokio::test)]
async fn when_a_detail_page_fails_the_event_should_stay_on_demand() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).body(listing_page(&[
            listing_row("Broken Detail", Some("/events/broken"), "on-demand"),
            listing_row("Future Heartbeat", Some("/events/c"), "10 Dec 2098 - 14 Dec 2098"),
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/events/broken");
        then.status(500);
    });

    let config = test_config(server.url("/search"));
    let browser = HttpBrowser::new(config.navigation_timeout);

    let report = pipeline::run(&browser, &config).await.unwrap();

    assert_eq!(report.metadata.event_count, 2);
    assert!(report.events[0].is_ondemand);
    assert_eq!(report.events[0].date_from, "");
}

#[test_log::test(tokio::test)]
async fn when_the_results_container_is_missing_should_fail_the_run() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .body("<html><body><p>Under maintenance</p></body></html>");
    });

    let config = test_config(server.url("/search"));
    let browser = HttpBrowser::new(config.navigation_timeout);

    let result = pipeline::run(&browser, &config).await;

    assert!(matches!(result, Err(PipelineError::Listing(_))));
}

#[test_log::test(tokio::test)]
async fn when_the_listing_cannot_be_fetched_should_fail_the_run() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(503);
    });

    let config = test_config(server.url("/search"));
    let browser = HttpBrowser::new(config.navigation_timeout);

    let result = pipeline::run(&browser, &config).await;

    assert!(matches!(result, Err(PipelineError::ListingUnavailable(_))));
}

#[test_log::test(tokio::test)]
async fn when_the_listing_has_no_rows_should_fail_the_run() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).body(listing_page(&[]));
    });

    let config = test_config(server.url("/search"));
    let browser = HttpBrowser::new(config.navigation_timeout);

    let result = pipeline::run(&browser, &config).await;

    assert!(matches!(result, Err(PipelineError::NoEventsFound)));
}

#[test_log::test(tokio::test)]
async fn when_every_event_is_past_should_fail_the_run() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).body(listing_page(&[listing_row(
            "Elapsed Waves",
            Some("/events/a"),
            "10 Dec 2020 - 14 Dec 2020",
        )]));
    });

    let config = test_config(server.url("/search"));
    let browser = HttpBrowser::new(config.navigation_timeout);

    let result = pipeline::run(&browser, &config).await;

    assert!(matches!(result, Err(PipelineError::NoCurrentEvents)));
}
