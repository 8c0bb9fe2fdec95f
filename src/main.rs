use argh::FromArgs;
use cgesp_bridge::{HubClient, StationMonitor};

#[derive(FromArgs)]
/// CGESP weather-station bridge for Home Assistant
struct Args {
    /// station code to monitor (e.g. 1000840 for Ipiranga)
    #[argh(option, default = "String::from(\"1000840\")")]
    station_code: String,

    /// scan interval in seconds
    #[argh(option, default = "3600")]
    scan_interval: u64,

    /// home Assistant base URL
    #[argh(option, default = "String::from(\"http://supervisor/core\")")]
    ha_url: String,

    /// home Assistant long-lived access token
    #[argh(option)]
    ha_token: String,
}

#[tokio::main]
async fn main() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();

    let shutdown_tx = tokio::sync::watch::Sender::new(());
    {
        let shutdown_tx = shutdown_tx.clone();
        ctrlc::set_handler(move || {
            log::info!("Received Ctrl+C, shutting down...");
            let _ = shutdown_tx.send(());
        })
        .expect("Error setting Ctrl+C handler");
    }

    let monitor = StationMonitor::builder()
        .station_code(args.station_code)
        .hub(HubClient::new(&args.ha_url, &args.ha_token))
        .interval_secs(args.scan_interval)
        .build();

    monitor.run(shutdown_tx.subscribe()).await;

    log::info!("Monitor stopped, exiting");
}
