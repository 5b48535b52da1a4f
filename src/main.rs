use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gemchat::{
    api::GeminiClient,
    app::{request_reply, App, SubmissionOutcome},
    key_handlers::handle_key_event,
    key_store::KeyStore,
    logging,
    status::StatusVariant,
    ui,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    let store = KeyStore::open()?;
    let client = GeminiClient::new();

    let mut app = App::new();
    if let Some(key) = store.load() {
        app.key_input = key;
        app.banner
            .set("Loaded saved key from this machine.", StatusVariant::Muted);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &store, &client).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &KeyStore,
    client: &GeminiClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<SubmissionOutcome>();

    loop {
        app.update_processing_animation();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(message) = handle_key_event(key, app, store) {
                        spawn_submission(app, store, client, &tx, message);
                    }
                }
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            app.apply_outcome(outcome);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Kicks off the in-flight request on its own task so the UI loop keeps
/// polling. A non-blank key field is silently re-persisted first, matching
/// the save-on-send behavior of the key form.
fn spawn_submission(
    app: &App,
    store: &KeyStore,
    client: &GeminiClient,
    tx: &mpsc::UnboundedSender<SubmissionOutcome>,
    message: String,
) {
    let api_key = app.key_input.trim().to_string();
    if !api_key.is_empty() {
        if let Err(err) = store.save(&api_key) {
            warn!("unable to persist API key on send: {err}");
        }
    }

    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = request_reply(&client, &message, &api_key).await;
        let _ = tx.send(outcome);
    });
}
