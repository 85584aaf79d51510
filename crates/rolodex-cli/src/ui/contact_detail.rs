//! Contact detail pane: right panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use rolodex_core::{Contact, Field};

/// Render `contact` into `area`, one row per present field.
pub fn draw(f: &mut Frame, area: Rect, contact: &Contact) {
  let block = Block::default()
    .title(format!(" {} ", contact.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();
  for field in Field::ALL {
    // Blank line between the editable fields and the store-maintained dates.
    if field == Field::DateAdded {
      lines.push(Line::from(""));
    }
    let Some(value) = contact.text(field) else { continue };
    let value_style = if field.is_temporal() {
      Style::default().fg(Color::DarkGray)
    } else {
      Style::default()
    };
    lines.push(Line::from(vec![
      Span::styled(
        format!("{:<14}", field.as_str()),
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::styled(value.into_owned(), value_style),
    ]));
  }

  lines.push(Line::from(""));
  lines.push(Line::from(vec![Span::styled(
    format!("id {}", contact.id),
    Style::default().fg(Color::DarkGray),
  )]));

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
