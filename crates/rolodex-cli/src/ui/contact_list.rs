//! Contact list pane: left panel, one header row per bucket.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the grouped contact list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let view = app.view();

  let title = if view.matched == view.total {
    format!(" Contacts ({}) ", view.total)
  } else {
    format!(" Contacts ({}/{}) ", view.matched, view.total)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let header_style = Style::default()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

  // Headers are interleaved with contacts, so the cursor index has to be
  // translated into a list row.
  let mut items: Vec<ListItem> = Vec::new();
  let mut cursor_row = None;
  let mut seen = 0;
  for bucket in &view.buckets {
    items.push(ListItem::new(Line::from(Span::styled(
      format!("{} ({})", bucket.label(), bucket.len()),
      header_style,
    ))));
    for contact in &bucket.contacts {
      if seen == app.list_cursor {
        cursor_row = Some(items.len());
      }
      seen += 1;
      items.push(ListItem::new(Line::from(vec![
        Span::raw("  "),
        Span::raw(contact.name.clone()),
        Span::styled(
          format!("  {}", contact.company),
          Style::default().fg(Color::DarkGray),
        ),
      ])));
    }
  }

  let inner_area = block.inner(area);
  f.render_widget(block, area);

  if !app.query.text.is_empty() || !app.query.filters.is_empty() {
    let filter_line = Paragraph::new(filter_summary(app))
      .style(Style::default().fg(Color::Yellow));
    let bar = Rect { height: 1, ..inner_area };
    f.render_widget(filter_line, bar);
    let rest = Rect {
      y:      inner_area.y + 1,
      height: inner_area.height.saturating_sub(1),
      ..inner_area
    };
    render_list(f, rest, items, cursor_row);
  } else {
    render_list(f, inner_area, items, cursor_row);
  }
}

fn render_list(f: &mut Frame, area: Rect, items: Vec<ListItem>, cursor_row: Option<usize>) {
  let mut state = ListState::default();
  state.select(cursor_row);

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    area,
    &mut state,
  );
}

fn filter_summary(app: &App) -> String {
  let filters = &app.query.filters;
  let mut parts = Vec::new();
  if !app.query.text.is_empty() {
    parts.push(format!("/{}", app.query.text));
  }
  if let Some(industry) = &filters.industry {
    parts.push(format!("industry={industry}"));
  }
  if let Some(country) = &filters.country {
    parts.push(format!("country={country}"));
  }
  if !filters.tags.is_empty() {
    parts.push(format!("tags={}", filters.tags.join(",")));
  }
  parts.join("  ")
}
