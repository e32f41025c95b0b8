//! Decider view: result box, filter bar, and restaurant list

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::cli::tui::app::{App, ConfirmAction, InputMode};
use crate::cli::tui::utils::{checkbox, truncate_str};
use crate::domain::{is_eligible, FilterTag};

/// Draw the decider layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Result
            Constraint::Length(3), // Filters
            Constraint::Min(5),    // Restaurants
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    draw_result(frame, app, chunks[0]);
    draw_filters(frame, app, chunks[1]);
    draw_restaurants(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);
}

/// Draw the result box
fn draw_result(frame: &mut Frame, app: &App, area: Rect) {
    let decider = app.decider();

    let (text, style) = if let (true, Some(shown)) = (decider.is_rolling(), decider.displayed_result()) {
        (
            shown.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if let Some(chosen) = decider.committed() {
        (
            format!("{}  ({})", chosen.name, chosen.category.label()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else if let Some(message) = decider.displayed_result() {
        (message.to_string(), Style::default().fg(Color::Red))
    } else {
        (
            "Press space to pick tonight's dinner".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    let title = format!("Tonight ({} in the pool)", decider.eligible_count());

    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Draw the filter checkboxes
fn draw_filters(frame: &mut Frame, app: &App, area: Rect) {
    let filters = app.decider().filters();

    let spans: Vec<Span> = FilterTag::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, tag)| {
            let on = filters.contains(*tag);
            let style = if on {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [
                Span::styled(format!("{}:{} {}", i + 1, checkbox(on), tag.label()), style),
                Span::raw("   "),
            ]
        })
        .collect();

    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().title("Filters").borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Draw the restaurant list
fn draw_restaurants(frame: &mut Frame, app: &App, area: Rect) {
    let decider = app.decider();
    let filters = decider.filters();

    let items: Vec<ListItem> = decider
        .restaurants()
        .iter()
        .map(|r| {
            let content = format!("{:<32} {}", truncate_str(&r.name, 32), r.category.label());
            if is_eligible(r, filters) {
                ListItem::new(content)
            } else {
                ListItem::new(content).style(Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let title = format!("Restaurants ({})", decider.restaurants().len());

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !decider.restaurants().is_empty() {
        state.select(Some(app.selected()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the status bar
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let msg = app
                .status_message()
                .unwrap_or("[space]roll [1-3]filters [a]dd [e]dit [x]delete [q]uit [?]help");
            (msg.to_string(), Style::default())
        }
        InputMode::Add(draft) => (
            format!("New: {}_  [{}] (tab: category)", draft.name, draft.category.label()),
            Style::default().fg(Color::Green),
        ),
        InputMode::Edit(_, draft) => (
            format!("Edit: {}_  [{}] (tab: category)", draft.name, draft.category.label()),
            Style::default().fg(Color::Green),
        ),
        InputMode::Confirm(ConfirmAction::Remove(id)) => {
            let name = app
                .decider()
                .restaurants()
                .iter()
                .find(|r| &r.id == id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| id.to_string());
            (
                format!("Remove {}? [y/n]", name),
                Style::default().fg(Color::Yellow),
            )
        }
    };

    let paragraph = Paragraph::new(format!("Dinner {}", content))
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
