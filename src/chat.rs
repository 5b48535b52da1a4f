use chrono::{DateTime, Local};

/// Which conversational party produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    User,
    Assistant,
}

impl Owner {
    pub fn display_name(self) -> &'static str {
        match self {
            Owner::User => "You",
            Owner::Assistant => "Gemini",
        }
    }
}

/// One entry in the conversation log. Immutable once created; lives only for
/// the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub owner: Owner,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    fn new(owner: Owner, text: impl Into<String>) -> Self {
        Self {
            owner,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Owner::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Owner::Assistant, text)
    }

    /// Hour:minute label shown in the bubble header.
    pub fn timestamp_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
