use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::DefaultTerminal;

use gacha_ev::config::Config;
use gacha_ev::gacha::GachaRestClient;
use gacha_ev::input::{parse_command, UiCommand};
use gacha_ev::logging;
use gacha_ev::pipeline;
use gacha_ev::preferences::{
    load_theme, save_theme, JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
};
use gacha_ev::ui::{self, AppState};

async fn refresh(
    client: &GachaRestClient,
    tiers: &[String],
    state: &mut AppState,
    terminal: &mut DefaultTerminal,
) -> Result<()> {
    state.status = "refreshing".to_string();
    terminal.draw(|frame| ui::render(frame, state))?;

    match pipeline::run_report(client, tiers).await {
        Ok(outcomes) => {
            let now = chrono::Local::now().format("%H:%M:%S").to_string();
            state.apply_outcomes(outcomes, &now);
        }
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Report refresh failed");
            state.set_error(&format!("{:#}", e));
        }
    }
    Ok(())
}

async fn run_app(
    terminal: &mut DefaultTerminal,
    config: &Config,
    client: &GachaRestClient,
    prefs: &mut dyn PreferenceStore,
) -> Result<()> {
    let tiers = config.report.report_tiers();
    let mut state = AppState::new(load_theme(&*prefs, config.ui.default_theme));
    refresh(client, &tiers, &mut state, terminal).await?;

    loop {
        terminal.draw(|frame| ui::render(frame, &state))?;

        if !crossterm::event::poll(Duration::from_millis(config.ui.refresh_rate_ms))? {
            continue;
        }
        let Event::Key(key) = crossterm::event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match parse_command(&key.code) {
            Some(UiCommand::Quit) => break,
            Some(UiCommand::NextTier) => state.select_next(),
            Some(UiCommand::PrevTier) => state.select_prev(),
            Some(UiCommand::ScrollUp) => state.scroll_cards(-1),
            Some(UiCommand::ScrollDown) => state.scroll_cards(1),
            Some(UiCommand::Refresh) => refresh(client, &tiers, &mut state, terminal).await?,
            Some(UiCommand::ToggleTheme) => {
                let theme = state.toggle_theme();
                if let Err(e) = save_theme(&mut *prefs, theme) {
                    tracing::warn!(error = %format!("{:#}", e), "Failed to persist theme");
                }
            }
            None => {}
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure config/default.toml exists or set GACHA_CONFIG_PATH");
            std::process::exit(1);
        }
    };

    logging::init_file(&config.logging.level, Path::new("gacha-ev.log"))?;
    tracing::info!(
        base_url = %config.api.base_url,
        tiers = ?config.report.report_tiers(),
        "Starting gacha-ev"
    );

    let client = GachaRestClient::new(&config.api.base_url, config.api.timeout())?;
    let mut prefs: Box<dyn PreferenceStore> =
        match JsonFilePreferenceStore::open(&config.preferences.path) {
            Ok(store) => {
                tracing::info!(path = %store.path().display(), "Loaded preferences");
                Box::new(store)
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "Preferences unavailable, using memory store");
                Box::new(MemoryPreferenceStore::default())
            }
        };

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &config, &client, prefs.as_mut()).await;
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!(error = %format!("{:#}", e), "gacha-ev exited with error");
    }
    result
}
