use rhythmwatch::browser::HttpBrowser;
use rhythmwatch::config::env_loader::load_config;
use rhythmwatch::pipeline;
use std::io;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries exactly one JSON document; everything else goes to stderr
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = load_config();
    let browser = HttpBrowser::new(config.navigation_timeout);

    match pipeline::run(&browser, &config).await {
        Ok(report) => {
            let json =
                serde_json::to_string_pretty(&report).expect("Report is always serializable");
            println!("{json}");

            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Error fetching events: {err}");

            ExitCode::FAILURE
        }
    }
}
