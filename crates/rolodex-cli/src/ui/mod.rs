//! TUI rendering: orchestrates all panes.

pub mod contact_detail;
pub mod contact_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Mode, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let sort = app.query.sort;

  let left = Span::styled(
    format!(
      " rolodex  sort: {} {}  group: {}{}",
      sort.field,
      sort.direction,
      app.query.grouping,
      if app.dirty { "  [modified]" } else { "" },
    ),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  contact_list::draw(f, cols[0], app);

  match app.selected_contact() {
    Some(contact) if app.screen == Screen::ContactDetail => {
      contact_detail::draw(f, cols[1], contact)
    }
    _ => draw_empty_detail(f, cols[1]),
  }
}

fn draw_empty_detail(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(vec![Span::styled(
      "Select a contact and press Enter.",
      Style::default().fg(Color::DarkGray),
    )])),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, text) = match app.mode {
    Mode::Search => ("SEARCH", format!("/{}_", app.input)),
    Mode::Command => ("COMMAND", format!(":{}_", app.input)),
    Mode::Normal => {
      let hints = match app.screen {
        Screen::ContactList => "↑↓/jk move  Enter open  / search  : command  s flip sort  u undo  q quit",
        Screen::ContactDetail => "↑↓/jk next contact  Esc back  : command  u undo  q quit",
      };
      let label = if app.screen == Screen::ContactDetail { "DETAIL" } else { "NORMAL" };
      let text = if app.status_msg.is_empty() { hints.to_string() } else { app.status_msg.clone() };
      (label, text)
    }
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let text_style = match app.mode {
    Mode::Normal => Style::default().fg(Color::DarkGray),
    _ => Style::default().fg(Color::Yellow),
  };
  let text_span = Span::styled(format!("  {text}"), text_style);

  let line = Line::from(vec![mode_span, text_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
