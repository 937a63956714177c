mod options;
mod runner;
mod script;

use tracing_subscriber::EnvFilter;

use bomber_jumper::BomberMatch;
use bomber_jumper::config::BomberConfig;

use options::RunOptions;
use runner::run_match;
use script::ScriptedInput;

#[tokio::main]
async fn main() {
    let opts = RunOptions::parse(std::env::args().skip(1));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if opts.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(seed = opts.seed, realtime = opts.realtime, "Bomber Jumper headless starting");

    let config = BomberConfig::load();
    let mut game = match BomberMatch::new(config) {
        Ok(game) => game,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        },
    };

    let mut script = ScriptedInput::new(opts.seed);
    run_match(&mut game, &mut script, &opts).await;

    if let Some(path) = &opts.snapshot_path {
        let written = serde_json::to_string_pretty(&game.snapshot())
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => tracing::info!(%path, "Snapshot written"),
            Err(e) => tracing::error!(%path, error = %e, "Failed to write snapshot"),
        }
    }
}
