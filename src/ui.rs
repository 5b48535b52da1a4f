use crate::app::{App, Focus};
use crate::chat::{Message, Owner};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .margin(1)
        .split(size);

    draw_messages(f, app, chunks[0]);
    app.banner.render(f, chunks[1]);
    draw_message_input(f, app, chunks[2]);
    draw_key_input(f, app, chunks[3]);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();
    for message in &app.messages {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message_lines(message, area.width));
    }

    if app.awaiting_reply {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let frame = SPINNER_FRAMES[app.processing_frame % SPINNER_FRAMES.len()];
        lines.push(Line::from(Span::styled(
            format!("{frame} Gemini is typing…"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    // Clamp and write back so paging up from the bottom works.
    if app.scroll > max_scroll {
        app.scroll = max_scroll;
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph.scroll((app.scroll, 0)), area);
}

fn message_lines(message: &Message, width: u16) -> Vec<Line<'static>> {
    let style = Style::default().fg(match message.owner {
        Owner::User => Color::Rgb(255, 223, 128),
        Owner::Assistant => Color::Rgb(144, 238, 144),
    });

    let mut lines = Vec::new();
    lines.push(Line::from(vec![
        Span::styled("┌─ ".to_string(), style),
        Span::styled(
            message.owner.display_name().to_string(),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(" · ".to_string(), style.add_modifier(Modifier::DIM)),
        Span::styled(message.timestamp_label(), style.add_modifier(Modifier::DIM)),
    ]));

    let wrap_width = (width as usize).saturating_sub(4).max(1);
    for text_line in message.text.lines() {
        if text_line.is_empty() {
            lines.push(Line::from(Span::styled("│".to_string(), style)));
            continue;
        }
        for wrapped in wrap(text_line, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped.to_string(), style),
            ]));
        }
    }

    lines.push(Line::from(Span::styled("╰─".to_string(), style)));
    lines
}

fn draw_message_input(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Message;
    let block = input_block("Message", focused);
    let inner_width = area.width.saturating_sub(2);
    let scroll_offset = horizontal_scroll(&app.input, inner_width);

    let input = Paragraph::new(Line::from(Span::styled(
        app.input.clone(),
        Style::default().fg(Color::White),
    )))
    .block(block)
    .scroll((0, scroll_offset));
    f.render_widget(input, area);

    if focused {
        set_input_cursor(f, area, &app.input, scroll_offset);
    }
}

fn draw_key_input(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::ApiKey;
    let block = input_block(
        "Gemini API key — Enter saves, Ctrl+K clears, Tab switches",
        focused,
    );
    let inner_width = area.width.saturating_sub(2);
    let scroll_offset = horizontal_scroll(&app.key_input, inner_width);

    let input = Paragraph::new(Line::from(Span::styled(
        app.key_input.clone(),
        Style::default().fg(Color::White),
    )))
    .block(block)
    .scroll((0, scroll_offset));
    f.render_widget(input, area);

    if focused {
        set_input_cursor(f, area, &app.key_input, scroll_offset);
    }
}

fn input_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string())
}

// Display columns, not chars: wide characters occupy two cells.
fn horizontal_scroll(text: &str, visible_width: u16) -> u16 {
    let text_width = text.width() as u16;
    text_width.saturating_sub(visible_width.saturating_sub(1))
}

fn set_input_cursor(f: &mut Frame, area: Rect, text: &str, scroll_offset: u16) {
    let cursor_x = area.x + 1 + text.width() as u16 - scroll_offset;
    f.set_cursor_position((cursor_x, area.y + 1));
}
