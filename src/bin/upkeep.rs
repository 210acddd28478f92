use std::path::Path;

use upkeep::cache::Cache;
use upkeep::client::Client;
use upkeep::settings::{self, Settings};
use upkeep::traits::AssetSource;
use upkeep::tasks::Timeframe;
use upkeep::utils::comparison::compare_assets_by_due_date;
use upkeep::Dashboard;

#[tokio::main]
async fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        None => Settings::default(),
        Some(path) => match Settings::from_file(Path::new(&path)) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Invalid settings: {}", err);
                std::process::exit(1);
            },
        },
    }.with_env_overrides();

    let mut cache = match Cache::from_file(&settings.cache_file) {
        Ok(cache) => cache,
        Err(err) => {
            log::warn!("Invalid cache file: {}. Using a default cache", err);
            Cache::new(&settings.cache_file)
        }
    };

    match settings::token_from_env() {
        None => log::info!("No API token in {}, using cached assets only", settings::TOKEN_ENV_VAR),
        Some(token) => {
            if let Err(err) = refresh(&settings, &token, &mut cache).await {
                log::warn!("Unable to refresh assets: {}. Using cached assets", err);
            }
        },
    }

    let today = upkeep::utils::dates::today();
    let mut assets = cache.assets().to_vec();
    assets.sort_by(compare_assets_by_due_date);

    println!("---- Assets -----");
    upkeep::utils::print_asset_list(&assets, today, settings.asset_due_soon_days);

    println!("---- Dashboard -----");
    let dashboard = Dashboard::build_with_limit(cache.assets(), today, Timeframe::Week, settings.recent_completions);
    upkeep::utils::print_dashboard(&dashboard);

    println!("---- Calendar, next {} months -----", settings.horizon_months);
    match upkeep::schedule::project_events_with(cache.assets(), today, &settings.projection_options()) {
        Ok(events) => upkeep::utils::print_events(&events),
        Err(err) => log::error!("Unable to build the calendar: {}", err),
    }
}

async fn refresh(settings: &Settings, token: &str, cache: &mut Cache) -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new(&settings.api_url, token)?;
    let assets = client.get_assets().await?;
    cache.replace_all(assets);
    cache.save_to_file()?;
    Ok(())
}
