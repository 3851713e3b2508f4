mod app;
use vocab_trainer::*;

use anyhow::Context;
use app::TrainerApp;
use clock::{Clock, OffsetClock, SystemClock};
use config::Config;
use database::db::{get_day_offset, init_database, load_decks};
use speech::{CommandSpeaker, SilentSpeaker, Speaker};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::load().context("Failed to load configuration")?;
    let conn = init_database(&config.database_path).context("Failed to open deck store")?;

    let clock = OffsetClock::new(SystemClock, get_day_offset(&conn)?);
    let deck_set = load_decks(&conn, clock.now()).context("Failed to load decks")?;

    log::info!("Loaded {} decks from database", deck_set.decks.len());
    for deck in &deck_set.decks {
        log::info!("  - {} ({} cards)", deck.name, deck.cards.len());
    }

    let speaker: Box<dyn Speaker> = if config.speech.enabled {
        Box::new(CommandSpeaker::new(config.speech.program.clone()))
    } else {
        Box::new(SilentSpeaker)
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([560.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Vocabulary Trainer",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(TrainerApp::new(
                deck_set, conn, clock, speaker, &config,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
