mod common;
mod config;
mod network;
mod ui;

use clap::Parser;
use dotenvy::dotenv;
use network::DeliveryBridge;
use tokio::sync::mpsc;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "pusher_chat",
    version,
    about = "Minimal real-time chat client bridged over Pusher"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);

    // UI -> bridge
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // bridge -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    tokio::spawn(async move {
        let bridge = DeliveryBridge::new(app_config, event_tx, cmd_rx);
        bridge.run().await;
        log::info!("Delivery bridge stopped");
    });

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Pusher Chat",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            Ok(Box::new(ChatApp::new(cc, cmd_tx.clone(), event_receiver)))
        }),
    )
}
