//! Application state machine and event dispatcher for `rolodex browse`.

use std::{mem, path::PathBuf, time::Duration};

use anyhow::{Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rolodex_core::{
  Contact, ContactId, Directory, DirectoryView, Filters, NewContact, ViewQuery,
  debounce::{Debouncer, Settled},
};

use crate::{
  command::{Command, FilterField},
  data,
};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the contact list; right pane is empty.
  ContactList,
  /// A contact is open in the detail pane.
  ContactDetail,
}

/// What printable keys do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Normal,
  /// Keystrokes edit the search query.
  Search,
  /// Keystrokes edit a `:` command line.
  Command,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,
  pub mode:   Mode,

  pub directory: Directory,
  pub query:     ViewQuery,

  /// Search text or command line being typed, depending on `mode`.
  pub input: String,

  /// Cursor position within the flattened view.
  pub list_cursor: usize,

  /// Contact shown in the detail pane.
  pub selected: Option<ContactId>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Where `:write` saves by default.
  pub data_path: Option<PathBuf>,

  /// Unsaved changes exist.
  pub dirty: bool,

  search: Debouncer<String>,
}

impl App {
  /// Create an [`App`] and the receiver on which settled search text
  /// arrives. Feed whatever arrives back through [`App::apply_query`].
  pub fn new(
    directory: Directory,
    data_path: Option<PathBuf>,
    debounce: Duration,
  ) -> (Self, Settled<String>) {
    let (search, rx) = Debouncer::new(debounce);
    let app = Self {
      screen: Screen::ContactList,
      mode: Mode::Normal,
      directory,
      query: ViewQuery::default(),
      input: String::new(),
      list_cursor: 0,
      selected: None,
      status_msg: String::new(),
      data_path,
      dirty: false,
      search,
    };
    (app, rx)
  }

  // ── Derived state ─────────────────────────────────────────────────────────

  pub fn view(&self) -> DirectoryView<'_> { self.directory.view(&self.query) }

  /// The contact under the list cursor, if any.
  pub fn cursor_contact(&self) -> Option<&Contact> {
    self.view().contacts().nth(self.list_cursor)
  }

  pub fn selected_contact(&self) -> Option<&Contact> {
    self.selected.as_ref().and_then(|id| self.directory.get(id))
  }

  /// The contact a command acts on: the open one, else the one under the
  /// cursor.
  fn target(&self) -> Result<ContactId> {
    self
      .selected
      .clone()
      .or_else(|| self.cursor_contact().map(|c| c.id.clone()))
      .ok_or_else(|| anyhow!("no contact selected"))
  }

  fn clamp_cursor(&mut self) {
    let matched = self.view().matched;
    self.list_cursor = self.list_cursor.min(matched.saturating_sub(1));
  }

  /// Replace the search text and recompute the view.
  pub fn apply_query(&mut self, text: String) {
    self.query.text = text;
    self.list_cursor = 0;
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.mode {
      Mode::Search => self.handle_search_key(key),
      Mode::Command => self.handle_command_key(key),
      Mode::Normal => self.handle_normal_key(key),
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.search.cancel();
        self.input.clear();
        self.apply_query(String::new());
        self.mode = Mode::Normal;
      }
      KeyCode::Enter => {
        self.search.cancel();
        let text = mem::take(&mut self.input);
        self.apply_query(text);
        self.mode = Mode::Normal;
      }
      KeyCode::Backspace => {
        self.input.pop();
        self.search.push(self.input.clone());
      }
      KeyCode::Char(c) => {
        self.input.push(c);
        self.search.push(self.input.clone());
      }
      _ => {}
    }
    true
  }

  fn handle_command_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.input.clear();
        self.mode = Mode::Normal;
      }
      KeyCode::Enter => {
        self.mode = Mode::Normal;
        let line = mem::take(&mut self.input);
        return self.run_line(&line);
      }
      KeyCode::Backspace => {
        if self.input.pop().is_none() {
          self.mode = Mode::Normal;
        }
      }
      KeyCode::Char(c) => self.input.push(c),
      _ => {}
    }
    true
  }

  fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      // Quit
      KeyCode::Char('q') => return false,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        if self.list_cursor + 1 < self.view().matched {
          self.list_cursor += 1;
          self.follow_cursor();
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
          self.follow_cursor();
        }
      }

      // Open / close detail
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => return self.dispatch(Command::Open),
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::ContactList;
        self.selected = None;
      }

      // Modes
      KeyCode::Char('/') => {
        self.input = self.query.text.clone();
        self.mode = Mode::Search;
      }
      KeyCode::Char(':') => {
        self.input.clear();
        self.mode = Mode::Command;
      }

      // Shortcuts
      KeyCode::Char('u') => return self.dispatch(Command::Undo),
      KeyCode::Char('s') => return self.dispatch(Command::toggle_direction(self.query.sort)),

      _ => {}
    }
    true
  }

  /// Keep the detail pane on the cursor while it is open.
  fn follow_cursor(&mut self) {
    if self.screen == Screen::ContactDetail {
      self.selected = self.cursor_contact().map(|c| c.id.clone());
    }
  }

  // ── Commands ──────────────────────────────────────────────────────────────

  /// Parse and run one command line. Errors end up in the status bar.
  pub fn run_line(&mut self, line: &str) -> bool {
    match line.parse::<Command>() {
      Ok(cmd) => self.dispatch(cmd),
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        true
      }
    }
  }

  fn dispatch(&mut self, cmd: Command) -> bool {
    self.execute(cmd).unwrap_or_else(|e| {
      self.status_msg = format!("Error: {e:#}");
      true
    })
  }

  /// Apply `cmd`. Returns `Ok(false)` when the session should end.
  pub fn execute(&mut self, cmd: Command) -> Result<bool> {
    self.status_msg.clear();

    match cmd {
      Command::Sort(spec) => {
        self.query.sort = spec;
        self.status_msg = format!("Sorted by {} {}", spec.field, spec.direction);
      }
      Command::Group(grouping) => {
        self.query.grouping = grouping;
        self.list_cursor = 0;
      }
      Command::Filter(FilterField::Industry, value) => self.query.filters.industry = value,
      Command::Filter(FilterField::Country, value) => self.query.filters.country = value,
      Command::Tag(tag) => {
        let tags = &mut self.query.filters.tags;
        match tags.iter().position(|t| t.eq_ignore_ascii_case(&tag)) {
          Some(pos) => {
            tags.remove(pos);
          }
          None => tags.push(tag),
        }
      }
      Command::Clear => {
        self.search.cancel();
        self.query.text.clear();
        self.query.filters = Filters::default();
        self.list_cursor = 0;
      }
      Command::Open => {
        let id = self
          .cursor_contact()
          .map(|c| c.id.clone())
          .ok_or_else(|| anyhow!("no contact under the cursor"))?;
        self.directory.touch(&id)?;
        self.selected = Some(id);
        self.screen = Screen::ContactDetail;
        self.dirty = true;
      }
      Command::Remove => {
        let id = self.target()?;
        let removed = self.directory.remove(&id)?;
        if self.selected.as_ref() == Some(&id) {
          self.selected = None;
          self.screen = Screen::ContactList;
        }
        self.status_msg = format!("Deleted {} (u to undo)", removed.name);
        self.dirty = true;
      }
      Command::Edit(pairs) => {
        let id = self.target()?;
        let mut input = self
          .directory
          .get(&id)
          .map(Contact::to_new)
          .ok_or_else(|| anyhow!("contact {id} is gone"))?;
        for (field, value) in &pairs {
          input.set(*field, value)?;
        }
        let updated = self.directory.update(&id, input)?;
        self.status_msg = format!("Updated {}", updated.name);
        self.dirty = true;
      }
      Command::Add(pairs) => {
        let mut input = NewContact::default();
        for (field, value) in &pairs {
          input.set(*field, value)?;
        }
        let added = self.directory.add(input)?;
        self.status_msg = format!("Added {}", added.name);
        self.dirty = true;
      }
      Command::Undo => match self.directory.undo()? {
        Some(entry) => {
          self.status_msg = format!("Undone: {}", entry.describe());
          self.dirty = true;
        }
        None => self.status_msg = "Nothing to undo".into(),
      },
      Command::Import(path) => {
        let rows = rolodex_csv::import_path(&path)?;
        let added = self.directory.add_batch(rows)?;
        self.status_msg = format!("Imported {} contacts from {}", added.len(), path.display());
        self.dirty = true;
      }
      Command::Write(path) => {
        let path = path
          .or_else(|| self.data_path.clone())
          .ok_or_else(|| anyhow!("no data file; use :write <path>"))?;
        data::save(&path, self.directory.contacts())?;
        self.status_msg = format!("Wrote {} contacts to {}", self.directory.len(), path.display());
        self.dirty = false;
      }
      Command::Quit => return Ok(false),
    }

    self.clamp_cursor();
    Ok(true)
  }
}
