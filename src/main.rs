mod config;
mod engine;
mod logging;
mod model;
mod ui;

use config::AppConfig;

fn main() -> eframe::Result<()> {
    let (config, load_err) = AppConfig::load();
    logging::init_logging(&config);
    if let Some(err) = load_err {
        tracing::debug!("using default config: {:#}", err);
    }
    tracing::info!(base_url = %config.base_url, model = %config.model, "starting Promptius");

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Promptius",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ui::app::PromptGridApp::new(&config)?))
        }),
    )
}
