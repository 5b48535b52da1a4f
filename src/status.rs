use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Severity of the credential feedback shown in the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusVariant {
    Info,
    Success,
    Muted,
    Error,
}

impl StatusVariant {
    fn color(self) -> Color {
        match self {
            StatusVariant::Info => Color::Cyan,
            StatusVariant::Success => Color::Green,
            StatusVariant::Muted => Color::DarkGray,
            StatusVariant::Error => Color::Red,
        }
    }
}

/// One-line status banner for credential-related feedback. Hidden while the
/// text is empty.
#[derive(Debug)]
pub struct StatusBanner {
    text: String,
    variant: StatusVariant,
}

impl StatusBanner {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            variant: StatusVariant::Info,
        }
    }

    pub fn set(&mut self, text: impl Into<String>, variant: StatusVariant) {
        self.text = text.into();
        self.variant = variant;
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn variant(&self) -> StatusVariant {
        self.variant
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let line = Line::from(Span::styled(
            self.text.clone(),
            Style::default().fg(self.variant.color()),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear() {
        let mut banner = StatusBanner::new();
        assert!(banner.is_empty());

        banner.set("Key saved locally on this machine.", StatusVariant::Success);
        assert_eq!(banner.text(), "Key saved locally on this machine.");
        assert_eq!(banner.variant(), StatusVariant::Success);

        banner.clear();
        assert!(banner.is_empty());
    }
}
