//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use shelf_core::{ColorTokens, Rgb};

use super::app::{App, FormField, InputMode};

fn color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(r, g, b)
}

/// Base style for the current theme
fn base_style(tokens: &ColorTokens) -> Style {
    Style::default()
        .fg(color(tokens.foreground()))
        .bg(color(tokens.background()))
}

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let tokens = app.browser.tokens();
    let base = base_style(&tokens);

    // Paint the whole screen in the theme colors
    frame.render_widget(Block::default().style(base), frame.area());

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(outer_chunks[0]);

    draw_list_pane(frame, app, pane_chunks[0], base);
    draw_detail_pane(frame, app, pane_chunks[1], base);

    match app.input_mode {
        InputMode::Normal | InputMode::SearchForm => {
            draw_status_bar(frame, app, outer_chunks[1], base)
        }
        InputMode::QuickSearch => draw_prompt(frame, app, "/", outer_chunks[1], base),
        InputMode::Review => draw_prompt(frame, app, "review> ", outer_chunks[1], base),
    }

    if app.input_mode == InputMode::SearchForm {
        draw_search_form(frame, app, base);
    }

    if app.show_help {
        draw_help_overlay(frame, base);
    }
}

/// Draw the preview list (left)
fn draw_list_pane(frame: &mut Frame, app: &App, area: Rect, base: Style) {
    let is_active = app.browser.detail().is_none();

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| {
            let title = Line::from(vec![Span::styled(row.title.as_str(), base)]);
            let author = Line::from(vec![Span::styled(
                row.author_name.as_str(),
                base.add_modifier(Modifier::DIM),
            )]);
            ListItem::new(vec![title, author])
        })
        .collect();

    let border_style = if is_active {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    };

    let title = format!(
        " Books ({}/{}) ",
        app.rows.len(),
        app.browser.matches().len()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(base);

    let list = List::new(items)
        .block(block)
        .highlight_style(base.add_modifier(Modifier::BOLD | Modifier::REVERSED));

    let mut state = ListState::default();
    if !app.rows.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the detail pane (right)
fn draw_detail_pane(frame: &mut Frame, app: &App, area: Rect, base: Style) {
    let is_active = app.browser.detail().is_some();
    let bold = base.add_modifier(Modifier::BOLD);
    let dim = base.add_modifier(Modifier::DIM);

    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_style(if is_active { bold } else { base })
        .style(base);

    let content = if let Some(detail) = app.detail() {
        let book = detail.book;
        let mut lines = vec![
            Line::from(Span::styled(book.title.as_str(), bold)),
            Line::from(Span::styled(detail.subtitle(), dim)),
            Line::from(""),
        ];

        if !detail.genre_names.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Genres: ", bold),
                Span::raw(detail.genre_names.join(", ")),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("Published: ", bold),
            Span::raw(book.published.format("%Y-%m-%d").to_string()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Cover: ", bold),
            Span::raw(book.image.as_str()),
        ]));

        if !book.description.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(book.description.as_str()));
        }

        // Reviews section with separator
        lines.push(Line::from(""));
        let reviews = app.browser.reviews().reviews(&book.id);
        match app.browser.reviews().average(&book.id) {
            None => {
                lines.push(Line::from(Span::styled(
                    "── No reviews (r to add one) ──",
                    dim,
                )));
            }
            Some(average) => {
                let header = format!("── Reviews ({}, average {:.1}) ", reviews.len(), average);
                let remaining =
                    area.width.saturating_sub(header.chars().count() as u16 + 2) as usize;
                lines.push(Line::from(Span::styled(
                    format!("{}{}", header, "─".repeat(remaining)),
                    dim,
                )));
                for review in reviews {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{} ", review.rating.stars()), bold),
                        Span::styled(review.reviewer.as_str(), dim),
                    ]));
                    lines.push(Line::from(format!("  {}", review.body)));
                }
            }
        }

        lines
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled("Select a book and press Enter", dim)),
        ]
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, base: Style) {
    let content = if let Some(msg) = &app.status_message {
        msg.clone()
    } else if app.browser.is_empty_result() {
        "No results. s:search  /:quick  ?:help  q:quit".to_string()
    } else if app.browser.remaining() > 0 {
        format!(
            "{} more  m:more  s:search  /:quick  t:theme  ?:help  q:quit",
            app.browser.remaining()
        )
    } else {
        "s:search  /:quick  t:theme  r:review  o:cover  ?:help  q:quit".to_string()
    };

    let paragraph = Paragraph::new(content).style(base.add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Draw a one-line text prompt at the bottom
fn draw_prompt(frame: &mut Frame, app: &App, prefix: &str, area: Rect, base: Style) {
    let mut spans = vec![
        Span::styled(prefix, base.add_modifier(Modifier::BOLD)),
        Span::styled(app.input.as_str(), base),
    ];
    if app.input_mode == InputMode::QuickSearch {
        spans.push(Span::styled(
            format!("  ({} matches)", app.browser.matches().len()),
            base.add_modifier(Modifier::DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);

    // Position cursor
    let cursor_x = area.x + (prefix.chars().count() + app.input.chars().count()) as u16;
    frame.set_cursor_position((cursor_x, area.y));
}

/// Centered popup area
fn popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Draw the search form popup
fn draw_search_form(frame: &mut Frame, app: &App, base: Style) {
    let popup_area = popup(frame.area(), 50, 9);
    frame.render_widget(Clear, popup_area);

    let form = &app.form;
    let field_style = |field: FormField| {
        if form.field == field {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Title:  ", base.add_modifier(Modifier::BOLD)),
            Span::styled(format!("{}_", form.title), field_style(FormField::Title)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Author: ", base.add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("◀ {} ▶", form.author.label()),
                field_style(FormField::Author),
            ),
        ]),
        Line::from(vec![
            Span::styled("Genre:  ", base.add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("◀ {} ▶", form.genre.label()),
                field_style(FormField::Genre),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Tab:field  ←/→:choose  Enter:search  Esc:cancel",
            base.add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(base.add_modifier(Modifier::BOLD))
        .style(base);

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame, base: Style) {
    let popup_area = popup(frame.area(), 50, 22);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            base.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  gg          Jump to first book"),
        Line::from("  G           Jump to last book"),
        Line::from("  m           Show more"),
        Line::from("  Enter       Open details"),
        Line::from("  Esc         Close details"),
        Line::from(""),
        Line::from("Commands:"),
        Line::from("  s           Search form"),
        Line::from("  /           Quick search"),
        Line::from("  t           Toggle day/night"),
        Line::from("  r           Review open book"),
        Line::from("  o           Open cover image"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            base.add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(base.add_modifier(Modifier::BOLD))
        .style(base);

    frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
}
