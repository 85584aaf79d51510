//! `rolodex`: command-line front end for the contact directory.
//!
//! # Usage
//!
//! ```text
//! rolodex list --group industry --sort dateAdded --desc
//! rolodex --data contacts.json import new-leads.csv
//! rolodex --url http://localhost:5000 browse
//! ```

mod app;
mod client;
mod command;
mod data;
mod render;
mod ui;

use std::{
  io,
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use client::ApiClient;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rolodex_core::{
  Contact, Direction, Directory, Field, Filters, Grouping, NewContact, SortSpec, ViewQuery,
  debounce::{self, Settled},
  seed,
};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rolodex", about = "Search, sort and group a contact directory")]
struct Args {
  /// Path to a TOML config file (url, data, debounce_ms).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of a rolodex server.
  #[arg(long, env = "ROLODEX_URL")]
  url: Option<String>,

  /// Local JSON data file; takes precedence over `--url`.
  #[arg(long, env = "ROLODEX_DATA", value_name = "FILE")]
  data: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
  /// Print the grouped view.
  List(ListArgs),
  /// Validate a CSV file and add every row, or nothing.
  Import {
    csv: PathBuf,
  },
  /// Interactive directory browser (the default).
  Browse,
}

#[derive(clap::Args, Debug)]
struct ListArgs {
  /// Free-text search.
  #[arg(short, long, default_value = "")]
  query: String,

  #[arg(long)]
  industry: Option<String>,

  #[arg(long)]
  country: Option<String>,

  /// Require a tag; repeat for several.
  #[arg(long = "tag")]
  tags: Vec<String>,

  /// Field to sort by.
  #[arg(long, default_value = "name")]
  sort: Field,

  /// Sort descending.
  #[arg(long)]
  desc: bool,

  /// Field to group by, or `none`.
  #[arg(long, default_value = "none")]
  group: Grouping,
}

impl ListArgs {
  fn to_query(&self) -> ViewQuery {
    let direction = if self.desc { Direction::Desc } else { Direction::Asc };
    ViewQuery {
      text:     self.query.clone(),
      filters:  Filters {
        industry: self.industry.clone(),
        country:  self.country.clone(),
        tags:     self.tags.clone(),
      },
      sort:     SortSpec::new(self.sort, direction),
      grouping: self.group,
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:         String,
  #[serde(default)]
  data:        Option<PathBuf>,
  #[serde(default)]
  debounce_ms: Option<u64>,
}

/// Where contacts come from.
enum Source {
  File(PathBuf),
  Api(ApiClient),
  Bundled,
}

impl Source {
  async fn load(&self) -> Result<Vec<Contact>> {
    match self {
      Source::File(path) => data::load(path),
      Source::Api(client) => client.list_contacts().await,
      Source::Bundled => seed::bundled().context("bundled seed data is invalid"),
    }
  }

  fn data_path(&self) -> Option<PathBuf> {
    match self {
      Source::File(path) => Some(path.clone()),
      _ => None,
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so they never mix with command output.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let data = args.data.or(file_cfg.data);
  let url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()));
  let debounce = file_cfg
    .debounce_ms
    .map_or(debounce::SEARCH_DELAY, Duration::from_millis);

  let source = match (data, url) {
    (Some(path), _) => Source::File(path),
    (None, Some(url)) => Source::Api(ApiClient::new(url)?),
    (None, None) => Source::Bundled,
  };

  match args.command.unwrap_or(Cmd::Browse) {
    Cmd::List(list) => run_list(&source, &list).await,
    Cmd::Import { csv } => run_import(&source, &csv).await,
    Cmd::Browse => run_browse(&source, debounce).await,
  }
}

// ─── Subcommands ──────────────────────────────────────────────────────────────

async fn run_list(source: &Source, args: &ListArgs) -> Result<()> {
  let directory = Directory::from_contacts(source.load().await?)?;
  let view = directory.view(&args.to_query());
  render::write_view(&mut io::stdout().lock(), &view)?;
  Ok(())
}

async fn run_import(source: &Source, csv: &Path) -> Result<()> {
  let rows = rolodex_csv::import_path(csv)
    .with_context(|| format!("importing {}", csv.display()))?;
  // Nothing is written or posted unless every row validates.
  NewContact::validate_batch(&rows).with_context(|| format!("importing {}", csv.display()))?;

  match source {
    Source::File(path) => {
      let mut directory = Directory::from_contacts(data::load(path)?)?;
      let added = directory.add_batch(rows)?;
      data::save(path, directory.contacts())?;
      println!("Imported {} contacts into {}", added.len(), path.display());
    }
    Source::Api(client) => {
      let mut created = 0;
      for row in &rows {
        client.create_contact(row).await?;
        created += 1;
      }
      println!("Imported {created} contacts");
    }
    Source::Bundled => {
      println!(
        "{} rows are valid; pass --data or --url to store them",
        rows.len()
      );
    }
  }
  Ok(())
}

async fn run_browse(source: &Source, debounce: Duration) -> Result<()> {
  let directory = Directory::from_contacts(source.load().await?)?;
  let (mut app, search_rx) = App::new(directory, source.data_path(), debounce);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app, search_rx).await;

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  if app.dirty {
    tracing::warn!("exiting with unsaved changes");
  }
  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  mut search_rx: Settled<String>,
) -> Result<()> {
  loop {
    // Settled search text from the debouncer.
    while let Some(text) = search_rx.try_recv() {
      app.apply_query(text);
    }

    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key)
    {
      break;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use rolodex_server::ServerConfig;
  use rolodex_store_sqlite::SqliteStore;

  use super::*;

  /// Serve the record API on an ephemeral port.
  async fn serve(store: Arc<SqliteStore>) -> ApiClient {
    let app = rolodex_server::router(store, &ServerConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    ApiClient::new(format!("http://{addr}")).unwrap()
  }

  fn write_csv(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("leads.csv");
    std::fs::write(&path, body).unwrap();
    path
  }

  #[tokio::test]
  async fn api_import_posts_nothing_when_a_row_is_invalid() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let source = Source::Api(serve(store.clone()).await);
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, "name,email,company\nAnn,a@x.com,Acme\nBob,,Globex\n");

    let err = run_import(&source, &csv).await.unwrap_err();
    assert!(
      format!("{err:#}").contains("record 2: missing required fields: email"),
      "{err:#}"
    );
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn api_import_posts_every_valid_row() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let source = Source::Api(serve(store.clone()).await);
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, "name,email,company\nAnn,a@x.com,Acme\nBob,b@y.com,Globex\n");

    run_import(&source, &csv).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 2);
  }

  #[tokio::test]
  async fn file_import_leaves_the_data_file_alone_on_a_bad_row() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("contacts.json");
    data::save(&data_path, &[]).unwrap();
    let csv = write_csv(&dir, "name,email,company\nAnn,a@x.com,Acme\nCid,,Initech\n");

    assert!(run_import(&Source::File(data_path.clone()), &csv).await.is_err());
    assert!(data::load(&data_path).unwrap().is_empty());
  }

  #[test]
  fn list_flags_build_the_view_query() {
    let args = Args::try_parse_from([
      "rolodex", "list", "--sort", "dateAdded", "--desc", "--group", "industry", "--tag", "vip",
      "--tag", "client", "-q", "acme",
    ])
    .unwrap();

    let Some(Cmd::List(list)) = args.command else { panic!("expected list") };
    let query = list.to_query();
    assert_eq!(query.text, "acme");
    assert_eq!(query.sort, SortSpec::new(Field::DateAdded, Direction::Desc));
    assert_eq!(query.grouping, Grouping::By(Field::Industry));
    assert_eq!(query.filters.tags, ["vip", "client"]);
  }

  #[test]
  fn list_defaults() {
    let args = Args::try_parse_from(["rolodex", "list"]).unwrap();
    let Some(Cmd::List(list)) = args.command else { panic!("expected list") };
    assert_eq!(list.to_query(), ViewQuery::default());
  }

  #[test]
  fn unknown_sort_field_is_rejected() {
    assert!(Args::try_parse_from(["rolodex", "list", "--sort", "shoe-size"]).is_err());
  }

  #[test]
  fn config_file_parses() {
    let cfg: ConfigFile =
      toml::from_str("url = \"http://localhost:5000\"\ndebounce_ms = 150\n").unwrap();
    assert_eq!(cfg.url, "http://localhost:5000");
    assert_eq!(cfg.debounce_ms, Some(150));
    assert!(cfg.data.is_none());
  }
}
