//! Main application UI and state management.
//! Handles deck selection, study sessions and the deck manager.

use chrono::{DateTime, Local, Utc};
use eframe::egui;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use rusqlite::Connection;
use vocab_trainer::clock::{Clock, OffsetClock, SystemClock};
use vocab_trainer::config::Config;
use vocab_trainer::database::db;
use vocab_trainer::error::StoreError;
use vocab_trainer::export::json::{export_deck_to_path, import_deck};
use vocab_trainer::models::{
    Card, Deck, DeckSet, DeckStats, Maturity, SessionAction, SessionPolicy, SessionStatus,
    StudySession, advance, build_queue,
};
use vocab_trainer::speech::{Speaker, SpeechOptions};

/// Application screen states
#[derive(Default, PartialEq)]
enum AppScreen {
    #[default]
    DeckSelect,
    Study,
    Manage,
}

/// Input fields of the add/edit card form
#[derive(Default)]
struct CardForm {
    term: String,
    phonetic: String,
    translation: String,
}

impl CardForm {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Deletions waiting for confirmation
enum PendingDelete {
    Deck { deck_id: String, name: String },
    Card { deck_id: String, card_id: String },
}

/// Grade buttons shown in due-date sessions
const GRADE_BUTTONS: [(u8, &str, &str); 4] = [
    (0, "Again", "Complete blackout"),
    (3, "Hard", "Difficult recall"),
    (4, "Good", "Correct with hesitation"),
    (5, "Easy", "Perfect recall"),
];

/// Main application state
pub struct TrainerApp {
    conn: Connection,
    all_decks: DeckSet,
    clock: OffsetClock<SystemClock>,
    rng: Mcg128Xsl64,
    speaker: Box<dyn Speaker>,
    speech_options: SpeechOptions,
    policy: SessionPolicy,

    current_screen: AppScreen,
    learning_session: Option<StudySession>,
    session_stats: DeckStats,

    selected_deck_id: Option<String>,
    new_deck_name: String,
    card_form: CardForm,
    editing_card_id: Option<String>,
    show_card_form: bool,
    pending_delete: Option<PendingDelete>,

    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    show_export_dialog: bool,
    show_message_dialog: bool,
    message: String,
}

/// Formats a timestamp as a local YYYY-MM-DD string
fn format_date(time: DateTime<Utc>) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d").to_string()
}

fn maturity_label(card: &Card) -> &'static str {
    if card.mastered {
        return "mastered";
    }
    match card.maturity() {
        Maturity::New => "new",
        Maturity::Learning => "learning",
        Maturity::Mature => "mature",
    }
}

impl eframe::App for TrainerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_bar(ctx);

        match self.current_screen {
            AppScreen::DeckSelect => self.render_deck_select_screen(ctx),
            AppScreen::Study => self.render_study_screen(ctx),
            AppScreen::Manage => self.render_manage_screen(ctx),
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_export_dialog {
            self.render_export_dialog(ctx);
        }

        if self.pending_delete.is_some() {
            self.render_delete_dialog(ctx);
        }

        if self.show_message_dialog {
            egui::Window::new("Vocabulary Trainer")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_message_dialog = false;
                    }
                });
        }
    }
}

impl TrainerApp {
    /// Creates a new application instance with decks loaded from the database
    pub fn new(
        all_decks: DeckSet,
        conn: Connection,
        clock: OffsetClock<SystemClock>,
        speaker: Box<dyn Speaker>,
        config: &Config,
    ) -> Self {
        Self {
            conn,
            all_decks,
            clock,
            rng: Mcg128Xsl64::from_entropy(),
            speaker,
            speech_options: config.speech.options(),
            policy: config.session_policy,
            current_screen: AppScreen::DeckSelect,
            learning_session: None,
            session_stats: DeckStats::default(),
            selected_deck_id: None,
            new_deck_name: String::new(),
            card_form: CardForm::default(),
            editing_card_id: None,
            show_card_form: false,
            pending_delete: None,
            show_confirmation_dialog: false,
            allowed_to_close: false,
            show_export_dialog: false,
            show_message_dialog: false,
            message: String::new(),
        }
    }

    fn show_message(&mut self, message: String) {
        self.message = message;
        self.show_message_dialog = true;
    }

    /// Persists a new deck set, replacing the in-memory copy only on success.
    fn commit(&mut self, decks: DeckSet) -> Result<(), StoreError> {
        db::save_decks(&self.conn, &decks)?;
        self.all_decks = decks;
        Ok(())
    }

    /// Runs an edit against the current decks and saves it, reporting failures.
    fn apply_edit<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&DeckSet) -> Result<DeckSet, StoreError>,
    {
        match edit(&self.all_decks).and_then(|decks| self.commit(decks)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Deck update failed: {}", e);
                self.show_message(format!("Could not save changes: {}", e));
                false
            }
        }
    }

    fn speak(&mut self, text: &str) {
        if !self.speaker.speak(text, &self.speech_options) {
            log::debug!("Speech unavailable for '{}'", text);
        }
    }

    /// Renders navigation, session policy and the app date
    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut target: Option<AppScreen> = None;
                let studying = matches!(
                    self.current_screen,
                    AppScreen::DeckSelect | AppScreen::Study
                );
                if ui.selectable_label(studying, "Study").clicked() {
                    target = Some(AppScreen::DeckSelect);
                }
                if ui
                    .selectable_label(self.current_screen == AppScreen::Manage, "Manage Decks")
                    .clicked()
                {
                    target = Some(AppScreen::Manage);
                }

                ui.separator();
                ui.label(format_date(self.clock.now()));
                if self.clock.offset_days() > 0 {
                    ui.label(format!("(+{} days)", self.clock.offset_days()));
                }
                if ui.button("Next Day").clicked() {
                    match db::advance_day(&self.conn) {
                        Ok(offset) => self.clock.set_offset_days(offset),
                        Err(e) => self.show_message(format!("Could not advance day: {}", e)),
                    }
                }
                if self.clock.offset_days() > 0 && ui.button("Today").clicked() {
                    match db::reset_day_offset(&self.conn) {
                        Ok(()) => self.clock.set_offset_days(0),
                        Err(e) => self.show_message(format!("Could not reset day: {}", e)),
                    }
                }

                // Leaving the study screen discards the running session
                if let Some(screen) = target {
                    if screen != self.current_screen {
                        self.learning_session = None;
                        self.current_screen = screen;
                    }
                }
            });
        });
    }

    /// Renders the deck list with per-deck stats and study buttons
    fn render_deck_select_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Select a Deck");
            ui.horizontal(|ui| {
                ui.label("Session mode:");
                ui.radio_value(&mut self.policy, SessionPolicy::DueDate, "Due cards");
                ui.radio_value(&mut self.policy, SessionPolicy::Mastery, "Until mastered");
            });
            ui.separator();

            if self.all_decks.decks.is_empty() {
                ui.label("No decks yet! Create one in the Manage Decks tab.");
                return;
            }

            let now = self.clock.now();
            let mut action_learn: Option<String> = None;

            egui::ScrollArea::vertical()
                .id_source("study_decks")
                .show(ui, |ui| {
                    for deck in &self.all_decks.decks {
                        let stats = deck.stats(now);
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.strong(&deck.name);
                                    ui.label(format!(
                                        "{} cards · {} due · {} new · {} learning · {} mature · {} mastered",
                                        stats.total,
                                        stats.due,
                                        stats.new,
                                        stats.learning,
                                        stats.mature,
                                        deck.mastered_count()
                                    ));
                                });
                                if ui.button("Study Now").clicked() {
                                    action_learn = Some(deck.id.clone());
                                }
                            });
                        });
                    }
                });

            if let Some(deck_id) = action_learn {
                self.start_learning_session(&deck_id);
            }
        });
    }

    /// Starts a session for a deck under the selected policy
    fn start_learning_session(&mut self, deck_id: &str) {
        if let Some(deck) = self.all_decks.deck(deck_id) {
            let now = self.clock.now();
            self.session_stats = deck.stats(now);
            self.learning_session = Some(build_queue(deck, self.policy, now, &mut self.rng));
            self.current_screen = AppScreen::Study;
        }
    }

    fn leave_session(&mut self) {
        self.learning_session = None;
        self.current_screen = AppScreen::DeckSelect;
    }

    /// Advances the session, saving any changed card before moving on
    fn handle_session_action(&mut self, action: SessionAction) {
        let Some(session) = self.learning_session.clone() else {
            return;
        };

        let step = match advance(session, action, self.clock.now()) {
            Ok(step) => step,
            Err(e) => {
                log::warn!("Session action failed: {}", e);
                self.show_message(format!("{}", e));
                return;
            }
        };

        if let Some(card) = step.committed {
            let deck_id = step.session.deck_id().to_string();
            let saved = self.apply_edit(|decks| Ok(decks.with_card_replaced(&deck_id, card)?));
            if !saved {
                return;
            }
        }

        self.learning_session = Some(step.session);
    }

    /// Renders the study screen: current card, answer buttons and end screens
    fn render_study_screen(&mut self, ctx: &egui::Context) {
        let mut action: Option<SessionAction> = None;
        let mut speak_text: Option<String> = None;
        let mut action_back = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &self.learning_session else {
                action_back = true;
                return;
            };

            ui.heading(format!("Studying: {}", session.deck_name()));

            match session.status() {
                SessionStatus::NothingDue => {
                    let stats = self.session_stats;
                    ui.add_space(20.0);
                    ui.heading("All done for now!");
                    ui.label("No cards are due for review.");
                    ui.add_space(10.0);
                    egui::Grid::new("nothing_due_stats").show(ui, |ui| {
                        for (label, value) in [
                            ("Total Cards", stats.total),
                            ("Mature", stats.mature),
                            ("Learning", stats.learning),
                            ("New", stats.new),
                        ] {
                            ui.label(label);
                            ui.strong(value.to_string());
                            ui.end_row();
                        }
                    });
                }
                SessionStatus::AllMastered => {
                    ui.add_space(20.0);
                    ui.heading("Everything mastered!");
                    ui.label("Every card in this deck is marked as mastered.");
                }
                SessionStatus::Complete => {
                    ui.add_space(20.0);
                    ui.heading("Session Complete!");
                    ui.label(format!(
                        "You've reviewed {} cards.",
                        session.completed_count()
                    ));
                }
                SessionStatus::InProgress => {
                    if let Some(card) = session.current_card() {
                        ui.label(session.phase_message());
                        ui.add(
                            egui::ProgressBar::new(
                                session.position() as f32 / session.total_count().max(1) as f32,
                            )
                            .text(format!("{} / {}", session.position(), session.total_count())),
                        );
                        if session.deferred_count() > 0 {
                            ui.label(format!("{} skipped for later", session.deferred_count()));
                        }

                        ui.add_space(20.0);

                        let revealed = session.is_revealed();
                        ui.group(|ui| {
                            ui.set_min_height(200.0);
                            ui.vertical_centered(|ui| {
                                ui.add_space(20.0);
                                ui.label(egui::RichText::new(&card.term).size(40.0));
                                if ui.button("🔊").clicked() {
                                    speak_text = Some(card.term.clone());
                                }

                                ui.add_space(20.0);

                                if revealed {
                                    ui.label(egui::RichText::new(&card.phonetic).size(22.0));
                                    ui.label(egui::RichText::new(&card.translation).size(18.0));
                                } else {
                                    ui.label("(Click 'Show Answer' to reveal)");
                                }
                                ui.add_space(20.0);
                            });
                        });

                        ui.add_space(20.0);

                        if !revealed {
                            if ui.button("Show Answer").clicked() {
                                action = Some(SessionAction::Flip);
                            }
                        } else {
                            match session.policy() {
                                SessionPolicy::DueDate => {
                                    ui.label("How well did you know this?");
                                    ui.horizontal(|ui| {
                                        for (grade, label, description) in GRADE_BUTTONS {
                                            if ui
                                                .button(format!("{}\n{}", label, description))
                                                .clicked()
                                            {
                                                action = Some(SessionAction::Grade(grade));
                                            }
                                        }
                                    });
                                }
                                SessionPolicy::Mastery => {
                                    ui.horizontal(|ui| {
                                        if ui.button("Next").clicked() {
                                            action = Some(SessionAction::Next);
                                        }
                                        if ui.button("Skip").clicked() {
                                            action = Some(SessionAction::Skip);
                                        }
                                        if ui.button("Mastered").clicked() {
                                            action = Some(SessionAction::Master);
                                        }
                                    });
                                }
                            }
                        }
                    }
                }
            }

            ui.add_space(20.0);

            let label = if session.status().is_finished() {
                "Back to Decks"
            } else {
                "Exit Session"
            };
            if ui.button(label).clicked() {
                action_back = true;
            }
        });

        // Execute deferred actions
        if let Some(text) = speak_text {
            self.speak(&text);
        }
        if let Some(action) = action {
            self.handle_session_action(action);
        }
        if action_back {
            self.leave_session();
        }
    }

    /// Renders the deck manager: deck list on the left, cards on the right
    fn render_manage_screen(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("deck_sidebar")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| self.render_deck_sidebar(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.render_deck_content(ui));
    }

    fn render_deck_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Your Decks");

        ui.horizontal(|ui| {
            if ui.button("Export Deck").clicked() {
                self.show_export_dialog = true;
            }
            if ui.button("Import Deck").clicked() {
                self.handle_import();
            }
        });
        ui.separator();

        ui.label("New deck:");
        ui.text_edit_singleline(&mut self.new_deck_name);
        if ui.button("Create Deck").clicked() {
            self.handle_create_deck();
        }
        ui.separator();

        // We store actions to execute after UI rendering to avoid borrowing conflicts
        let mut action_select: Option<String> = None;
        let mut action_delete: Option<PendingDelete> = None;

        egui::ScrollArea::vertical()
            .id_source("decks_list")
            .show(ui, |ui| {
                for deck in &self.all_decks.decks {
                    let is_selected = self.selected_deck_id.as_deref() == Some(deck.id.as_str());
                    if ui
                        .selectable_label(
                            is_selected,
                            format!("{} ({} cards)", deck.name, deck.cards.len()),
                        )
                        .clicked()
                    {
                        action_select = Some(deck.id.clone());
                    }
                    if is_selected && ui.small_button("Delete deck").clicked() {
                        action_delete = Some(PendingDelete::Deck {
                            deck_id: deck.id.clone(),
                            name: deck.name.clone(),
                        });
                    }
                }
            });

        if let Some(deck_id) = action_select {
            self.selected_deck_id = Some(deck_id);
            self.cancel_card_form();
        }
        if action_delete.is_some() {
            self.pending_delete = action_delete;
        }
    }

    fn render_deck_content(&mut self, ui: &mut egui::Ui) {
        let Some(deck) = self
            .selected_deck_id
            .as_deref()
            .and_then(|id| self.all_decks.deck(id))
            .cloned()
        else {
            ui.label("Select a deck to manage its cards");
            return;
        };

        ui.horizontal(|ui| {
            ui.heading(&deck.name);
            if ui.button("+ Add Card").clicked() {
                self.editing_card_id = None;
                self.card_form.clear();
                self.show_card_form = true;
            }
        });
        ui.separator();

        if self.show_card_form {
            self.render_card_form(ui, &deck);
            ui.separator();
        }

        if deck.cards.is_empty() {
            ui.label("No cards yet. Add some cards to get started!");
            return;
        }

        let mut action_edit: Option<Card> = None;
        let mut action_delete: Option<String> = None;
        let mut speak_text: Option<String> = None;

        egui::ScrollArea::vertical()
            .id_source("cards_list")
            .show(ui, |ui| {
                for card in &deck.cards {
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.strong(&card.term);
                                ui.label(&card.phonetic);
                                ui.label(&card.translation);
                                ui.small(format!(
                                    "{} · every {} days · due {}",
                                    maturity_label(card),
                                    card.interval,
                                    format_date(card.due_date)
                                ));
                            });
                            if ui.small_button("🔊").clicked() {
                                speak_text = Some(card.term.clone());
                            }
                            if ui.small_button("Edit").clicked() {
                                action_edit = Some(card.clone());
                            }
                            if ui.small_button("Delete").clicked() {
                                action_delete = Some(card.id.clone());
                            }
                        });
                    });
                }
            });

        if let Some(text) = speak_text {
            self.speak(&text);
        }
        if let Some(card) = action_edit {
            self.card_form = CardForm {
                term: card.term,
                phonetic: card.phonetic,
                translation: card.translation,
            };
            self.editing_card_id = Some(card.id);
            self.show_card_form = true;
        }
        if let Some(card_id) = action_delete {
            self.pending_delete = Some(PendingDelete::Card {
                deck_id: deck.id.clone(),
                card_id,
            });
        }
    }

    fn render_card_form(&mut self, ui: &mut egui::Ui, deck: &Deck) {
        let editing = self.editing_card_id.clone();
        ui.strong(if editing.is_some() { "Edit Card" } else { "New Card" });

        egui::Grid::new("card_form").show(ui, |ui| {
            ui.label("Term:");
            ui.text_edit_singleline(&mut self.card_form.term);
            ui.end_row();
            ui.label("Phonetic:");
            ui.text_edit_singleline(&mut self.card_form.phonetic);
            ui.end_row();
            ui.label("Translation:");
            ui.text_edit_singleline(&mut self.card_form.translation);
            ui.end_row();
        });

        let mut action_save = false;
        let mut action_test = false;
        let mut action_cancel = false;
        ui.horizontal(|ui| {
            if ui
                .button(if editing.is_some() { "Update" } else { "Add" })
                .clicked()
            {
                action_save = true;
            }
            if ui.button("🔊 Test").clicked() {
                action_test = true;
            }
            if ui.button("Cancel").clicked() {
                action_cancel = true;
            }
        });

        if action_test && !self.card_form.term.is_empty() {
            let term = self.card_form.term.clone();
            self.speak(&term);
        }
        if action_cancel {
            self.cancel_card_form();
        }
        if action_save {
            let deck_id = deck.id.clone();
            let now = self.clock.now();
            let form = &self.card_form;
            let (term, phonetic, translation) = (
                form.term.clone(),
                form.phonetic.clone(),
                form.translation.clone(),
            );
            let saved = self.apply_edit(|decks| {
                let deck = decks
                    .deck(&deck_id)
                    .ok_or_else(|| vocab_trainer::error::DeckError::UnknownDeck(deck_id.clone()))?;
                let updated = match &editing {
                    Some(card_id) => deck.with_card_text(card_id, &term, &phonetic, &translation)?,
                    None => deck.with_card_added(Card::new(
                        term.trim(),
                        phonetic.trim(),
                        translation.trim(),
                        now,
                    ))?,
                };
                Ok(decks.with_deck_replaced(updated)?)
            });
            if saved {
                self.cancel_card_form();
            }
        }
    }

    fn cancel_card_form(&mut self) {
        self.card_form.clear();
        self.editing_card_id = None;
        self.show_card_form = false;
    }

    fn handle_create_deck(&mut self) {
        let name = self.new_deck_name.clone();
        let mut created_id = None;
        let saved = self.apply_edit(|decks| {
            let deck = Deck::new(&name)?;
            created_id = Some(deck.id.clone());
            Ok(decks.with_deck_added(deck)?)
        });
        if saved {
            self.new_deck_name.clear();
            self.selected_deck_id = created_id;
        }
    }

    fn render_delete_dialog(&mut self, ctx: &egui::Context) {
        let prompt = match &self.pending_delete {
            Some(PendingDelete::Deck { name, .. }) => format!("Delete deck \"{}\"?", name),
            Some(PendingDelete::Card { .. }) => "Delete this card?".to_string(),
            None => return,
        };

        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Confirm delete")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(prompt);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if cancelled {
            self.pending_delete = None;
        }
        if confirmed {
            match self.pending_delete.take() {
                Some(PendingDelete::Deck { deck_id, .. }) => {
                    if self.apply_edit(|decks| Ok(decks.without_deck(&deck_id)?)) {
                        self.selected_deck_id = None;
                        self.cancel_card_form();
                    }
                }
                Some(PendingDelete::Card { deck_id, card_id }) => {
                    self.apply_edit(|decks| {
                        let deck = decks.deck(&deck_id).ok_or_else(|| {
                            vocab_trainer::error::DeckError::UnknownDeck(deck_id.clone())
                        })?;
                        Ok(decks.with_deck_replaced(deck.without_card(&card_id)?)?)
                    });
                    if self.editing_card_id.as_deref() == Some(card_id.as_str()) {
                        self.cancel_card_form();
                    }
                }
                None => {}
            }
        }
    }

    fn render_export_dialog(&mut self, ctx: &egui::Context) {
        let mut export_deck_id: Option<String> = None;
        let mut should_cancel = false;

        egui::Window::new("Export Deck")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Select a deck to export:");
                ui.separator();

                for deck in &self.all_decks.decks {
                    if ui
                        .button(format!("{} ({} cards)", deck.name, deck.cards.len()))
                        .clicked()
                    {
                        export_deck_id = Some(deck.id.clone());
                    }
                }

                ui.separator();

                if ui.button("Cancel").clicked() {
                    should_cancel = true;
                }
            });

        if let Some(deck_id) = export_deck_id {
            self.handle_export(&deck_id);
        }
        if should_cancel {
            self.show_export_dialog = false;
        }
    }

    /// Handles deck export to JSON file
    fn handle_export(&mut self, deck_id: &str) {
        self.show_export_dialog = false;
        let Some(deck) = self.all_decks.deck(deck_id).cloned() else {
            return;
        };

        // Open file save dialog
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.json", deck.name))
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            match export_deck_to_path(&deck, &path) {
                Ok(()) => self.show_message(format!("Deck '{}' exported successfully!", deck.name)),
                Err(e) => self.show_message(format!("Export failed: {}", e)),
            }
        }
    }

    /// Handles deck import from JSON file
    fn handle_import(&mut self) {
        // Open file selection dialog
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        let deck = match import_deck(&path) {
            Ok(deck) => deck,
            Err(e) => {
                self.show_message(format!(
                    "Import failed: {}\n\nPlease check that the file is a deck exported by this app:\n{{\n  \"id\": \"...\",\n  \"name\": \"Deck Name\",\n  \"cards\": [...]\n}}",
                    e
                ));
                return;
            }
        };

        let (name, count) = (deck.name.clone(), deck.cards.len());
        if self.apply_edit(|decks| Ok(decks.with_deck_added(deck)?)) {
            self.show_message(format!(
                "Deck '{}' imported successfully with {} cards!",
                name, count
            ));
        }
    }
}
