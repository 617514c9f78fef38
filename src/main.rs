//! Taskboard Frontend Entry Point

mod app;
mod components;
mod context;
mod logger;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;
use taskboard_sync::SyncConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = storage::load_config();
    let level = config
        .as_ref()
        .ok()
        .and_then(|c| c.level_filter().ok())
        .unwrap_or(log::LevelFilter::Info);
    logger::init(level);

    let config = config.unwrap_or_else(|err| {
        log::warn!("[APP] ignoring stored config: {}", err);
        SyncConfig::default()
    });

    mount_to_body(move || view! { <App config=config.clone() /> });
}
