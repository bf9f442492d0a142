use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::time::{Duration, Instant};
use uuid::Uuid;

use crate::cli::Cli;
use crate::clipboard::ClipboardManager;
use crate::collection::Collection;
use crate::config::AppConfig;
use crate::events::{EventHandler, EventResult};
use crate::record::Record;
use crate::ui::{CardAction, EditableCard, SaveCallback, UI};

pub struct App {
    should_quit: bool,
    ui: UI,
    event_handler: EventHandler,
    collection: Arc<Mutex<Collection>>,
    clipboard: ClipboardManager,
    config: AppConfig,
    dry_run: bool,
}

impl App {
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = match &cli.config_dir {
            Some(dir) => AppConfig::load_from_dir(dir),
            None => AppConfig::load(),
        }
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        if let Err(reason) = config.validate() {
            tracing::warn!("Configuration problem: {}", reason);
        }

        let mut ui = UI::new();
        if let Some(name) = cli.theme.as_deref().or(config.theme.as_deref()) {
            if let Err(e) = ui.theme_manager_mut().set_theme(name) {
                tracing::warn!("{}", e);
            }
        }
        ui.set_list_width_percent(config.list_width_percent);

        Ok(Self {
            should_quit: false,
            ui,
            event_handler: EventHandler::new(),
            collection: Arc::new(Mutex::new(Collection::from_records(Vec::new()))),
            clipboard: ClipboardManager::new(),
            config,
            dry_run: false,
        })
    }

    /// Resolve and load the bookmark collection.
    ///
    /// Precedence: the --collection flag, then the configured path, then
    /// the default data location. A missing explicit file starts empty; a
    /// missing default file is seeded with the sample set so a first run
    /// has something to show.
    pub fn initialize_collection(&mut self, cli: &Cli) -> Result<()> {
        let configured = cli
            .collection
            .clone()
            .or_else(|| self.config.collection_path.clone());

        let mut collection = match configured {
            Some(path) if path.exists() => Collection::load(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load collection {}: {}", path.display(), e)
            })?,
            Some(path) => {
                tracing::info!("Starting a new collection at {}", path.display());
                let mut collection = Collection::from_records(Vec::new());
                if !cli.dry_run {
                    collection.save_as(&path).map_err(|e| {
                        anyhow::anyhow!("Failed to create collection {}: {}", path.display(), e)
                    })?;
                }
                collection
            }
            None => {
                let path = Self::default_collection_path();
                if path.exists() {
                    Collection::load(&path).map_err(|e| {
                        anyhow::anyhow!("Failed to load collection {}: {}", path.display(), e)
                    })?
                } else {
                    tracing::info!("No collection found, seeding samples at {}", path.display());
                    let mut collection = Collection::with_samples();
                    if !cli.dry_run {
                        collection.save_as(&path).map_err(|e| {
                            anyhow::anyhow!(
                                "Failed to create collection {}: {}",
                                path.display(),
                                e
                            )
                        })?;
                    }
                    collection
                }
            }
        };

        collection.set_dry_run(cli.dry_run);
        self.dry_run = cli.dry_run;

        let mut label = match collection.path() {
            Some(path) => format!("{} bookmarks | {}", collection.len(), path.display()),
            None => format!("{} bookmarks | unsaved", collection.len()),
        };
        if cli.dry_run {
            label.push_str(" (dry run)");
        }

        let records = collection.records().to_vec();
        self.collection = Arc::new(Mutex::new(collection));
        self.ui.set_records(&records);
        self.ui.status_bar_mut().set_collection_label(label);
        self.sync_card_with_selection();

        Ok(())
    }

    fn default_collection_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("marcador")
            .join("bookmarks.json")
    }

    fn lock_collection(&self) -> MutexGuard<'_, Collection> {
        self.collection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Build the save callback handed to an edit card.
    ///
    /// The card fires it with the edited record and gets nothing back; the
    /// collection applies the save and deals with persistence on its own.
    fn make_save_callback(&self) -> SaveCallback {
        let collection = Arc::clone(&self.collection);
        Box::new(move |record: &Record| {
            let mut collection = collection
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            collection.apply_save(record);
        })
    }

    /// Keep the card in step with the list selection. Never swaps the card
    /// out mid-edit; the switch happens once the edit finishes.
    fn sync_card_with_selection(&mut self) {
        if self.ui.is_editing() {
            return;
        }

        let selected = self.ui.selected_record_id();
        let current = self.ui.card().map(|card| card.record().id);
        if selected == current {
            return;
        }

        match selected.and_then(|id| self.lock_collection().get(id).cloned()) {
            Some(record) => {
                let callback = self.make_save_callback();
                self.ui.set_card(EditableCard::new(record, callback));
            }
            None => self.ui.clear_card(),
        }
    }

    fn handle_card_action(&mut self, action: CardAction) -> Result<()> {
        match action {
            CardAction::StartedEdit => {
                self.ui
                    .status_bar_mut()
                    .set_info("Editing (Ctrl+S saves, Esc cancels)");
            }
            CardAction::Saved { title } => {
                // The collection already applied the save through the
                // callback; refresh the list so the new title shows up.
                let records = self.lock_collection().records().to_vec();
                self.ui.set_records(&records);
                let message = if self.dry_run {
                    format!("Saved \"{}\" (dry run, not written)", title)
                } else {
                    format!("Saved \"{}\"", title)
                };
                self.ui.status_bar_mut().set_success(message);
            }
            CardAction::Cancelled => {
                self.ui.status_bar_mut().set_info("Edit cancelled");
            }
            CardAction::OpenUrl(url) => match webbrowser::open(&url) {
                Ok(()) => {
                    self.ui.status_bar_mut().set_info(format!("Opened {}", url));
                }
                Err(e) => {
                    tracing::error!("Failed to open {}: {}", url, e);
                    self.ui.status_bar_mut().set_error("Failed to open browser");
                }
            },
            CardAction::CopyUrl(url) => match self.clipboard.copy(&url) {
                Ok(()) => {
                    self.ui.status_bar_mut().set_success("URL copied");
                }
                Err(e) => {
                    tracing::warn!("Clipboard copy failed: {}", e);
                    self.ui.status_bar_mut().set_error("Clipboard unavailable");
                }
            },
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        // Check if we're running in a proper terminal
        if !std::io::stdout().is_tty() {
            return Err(anyhow::anyhow!(
                "Marcador requires a proper terminal (TTY) to run. Please run this application in a terminal emulator."
            ));
        }

        // Setup terminal
        enable_raw_mode().map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}. Make sure you're running in a proper terminal.", e))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| anyhow::anyhow!("Failed to setup terminal: {}. Make sure your terminal supports these features.", e))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)
            .map_err(|e| anyhow::anyhow!("Failed to create terminal: {}", e))?;

        // Run the main loop
        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_millis(50);
        let mut previous_selection: Option<Uuid> = None;

        loop {
            // Clear expired status messages
            self.ui.tick();

            // Check if the list selection changed and rebuild the card
            let current_selection = self.ui.selected_record_id();
            if current_selection != previous_selection {
                self.sync_card_with_selection();
                previous_selection = current_selection;
            }

            // Draw UI
            terminal.draw(|f| self.ui.render(f))?;

            // Handle events
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    let event_result = self.event_handler.handle_key_event(key, &mut self.ui).await;

                    match event_result {
                        EventResult::Continue => {}
                        EventResult::CardAction(action) => {
                            self.handle_card_action(action)?;
                        }
                    }

                    // Check for quit command
                    if self.event_handler.should_quit() {
                        self.should_quit = true;
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }
}
