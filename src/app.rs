use crate::api::GeminiClient;
use crate::chat::Message;
use crate::errors::GemchatError;
use crate::status::{StatusBanner, StatusVariant};
use std::time::{Duration, Instant};
use tracing::error;

/// Rendered whenever the completion call fails for any reason. Error kinds
/// are logged in full but never distinguished in the conversation log.
pub const FALLBACK_REPLY: &str =
    "I couldn't reach Gemini right now. Double-check your API key and internet connection, then try again.";

/// Rendered when a message is submitted with no API key available.
pub const MISSING_KEY_REPLY: &str =
    "Please add your Gemini API key below so I can reach Gemini.";

pub const MISSING_KEY_STATUS: &str = "Add your Gemini API key before chatting.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Message,
    ApiKey,
}

/// Result of one submission cycle, handed back to the UI loop.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Reply(String),
    MissingKey,
    Failed(GemchatError),
}

pub struct App {
    pub messages: Vec<Message>,
    pub input: String,
    pub key_input: String,
    pub focus: Focus,
    pub banner: StatusBanner,
    pub awaiting_reply: bool,
    pub scroll: u16,
    pub processing_frame: usize,
    pub last_frame_update: Instant,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> App {
        App {
            messages: Vec::new(),
            input: String::new(),
            key_input: String::new(),
            focus: Focus::Message,
            banner: StatusBanner::new(),
            awaiting_reply: false,
            scroll: u16::MAX,
            processing_frame: 0,
            last_frame_update: Instant::now(),
            should_quit: false,
        }
    }

    /// Starts one submission cycle: drains the input, appends the user
    /// message and raises the typing indicator. Returns `None` when the
    /// input is blank or a reply is still pending — submissions are
    /// serialized, never overlapped.
    pub fn begin_submission(&mut self) -> Option<String> {
        if self.awaiting_reply {
            return None;
        }
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input.clear();
        self.messages.push(Message::user(text.clone()));
        self.awaiting_reply = true;
        self.scroll_to_bottom();
        Some(text)
    }

    /// Renders the outcome of a submission and returns the app to idle. The
    /// typing indicator comes down on every path, success or failure.
    pub fn apply_outcome(&mut self, outcome: SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Reply(text) => {
                self.messages.push(Message::assistant(text));
            }
            SubmissionOutcome::MissingKey => {
                self.banner.set(MISSING_KEY_STATUS, StatusVariant::Error);
                self.messages.push(Message::assistant(MISSING_KEY_REPLY));
                self.focus = Focus::ApiKey;
            }
            SubmissionOutcome::Failed(err) => {
                error!("Gemini request failed: {err}");
                self.messages.push(Message::assistant(FALLBACK_REPLY));
            }
        }
        self.awaiting_reply = false;
        self.scroll_to_bottom();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Message => Focus::ApiKey,
            Focus::ApiKey => Focus::Message,
        };
    }

    pub fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            Focus::Message => &mut self.input,
            Focus::ApiKey => &mut self.key_input,
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Pins the log to the newest message; the draw pass clamps this back to
    /// the real maximum.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = u16::MAX;
    }

    pub fn update_processing_animation(&mut self) {
        if self.awaiting_reply && self.last_frame_update.elapsed() >= Duration::from_millis(80) {
            self.processing_frame = (self.processing_frame + 1) % 4;
            self.last_frame_update = Instant::now();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Submission handler with the credential passed in explicitly rather than
/// read from ambient state. A blank key short-circuits before any client
/// call is made.
pub async fn request_reply(
    client: &GeminiClient,
    message: &str,
    api_key: &str,
) -> SubmissionOutcome {
    if api_key.trim().is_empty() {
        return SubmissionOutcome::MissingKey;
    }
    match client.complete(message, api_key).await {
        Ok(text) => SubmissionOutcome::Reply(text),
        Err(GemchatError::MissingCredential) => SubmissionOutcome::MissingKey,
        Err(err) => SubmissionOutcome::Failed(err),
    }
}
