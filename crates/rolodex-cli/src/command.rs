//! The `:` command language of the browse screen.

use std::{path::PathBuf, str::FromStr};

use rolodex_core::{Direction, Field, Grouping, SortSpec};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
  #[error("empty command")]
  Empty,

  #[error("unknown command: {0}")]
  Unknown(String),

  #[error("{0} needs an argument")]
  MissingArgument(&'static str),

  #[error("expected field=value, got {0:?}")]
  BadAssignment(String),

  #[error("can only filter by industry or country, not {0:?}")]
  BadFilter(String),

  #[error(transparent)]
  Core(#[from] rolodex_core::Error),
}

/// Which single-valued filter a `filter` command sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
  Industry,
  Country,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Sort(SortSpec),
  Group(Grouping),
  /// `None` clears the filter.
  Filter(FilterField, Option<String>),
  /// Toggle membership of a tag in the tag filter.
  Tag(String),
  Clear,
  Open,
  Remove,
  Edit(Vec<(Field, String)>),
  Add(Vec<(Field, String)>),
  Undo,
  Import(PathBuf),
  Write(Option<PathBuf>),
  Quit,
}

impl FromStr for Command {
  type Err = CommandError;

  fn from_str(line: &str) -> Result<Self, CommandError> {
    let line = line.trim().trim_start_matches(':').trim();
    let (verb, rest) = line
      .split_once(char::is_whitespace)
      .map_or((line, ""), |(v, r)| (v, r.trim()));

    let cmd = match verb {
      "" => return Err(CommandError::Empty),
      "sort" => {
        let mut words = rest.split_whitespace();
        let field = words.next().ok_or(CommandError::MissingArgument("sort"))?;
        let direction = words.next().map(str::parse::<Direction>).transpose()?.unwrap_or_default();
        Command::Sort(SortSpec::new(field.parse()?, direction))
      }
      "group" => Command::Group(rest.parse()?),
      "filter" => {
        let (which, value) = rest
          .split_once(char::is_whitespace)
          .map_or((rest, ""), |(w, v)| (w, v.trim()));
        let field = match which.to_ascii_lowercase().as_str() {
          "" => return Err(CommandError::MissingArgument("filter")),
          "industry" => FilterField::Industry,
          "country" => FilterField::Country,
          other => return Err(CommandError::BadFilter(other.to_owned())),
        };
        Command::Filter(field, (!value.is_empty()).then(|| value.to_owned()))
      }
      "tag" => Command::Tag(required(rest, "tag")?.to_owned()),
      "clear" => Command::Clear,
      "open" => Command::Open,
      "rm" | "delete" => Command::Remove,
      "edit" => Command::Edit(assignments(required(rest, "edit")?)?),
      "add" => Command::Add(assignments(required(rest, "add")?)?),
      "undo" => Command::Undo,
      "import" => Command::Import(PathBuf::from(required(rest, "import")?)),
      "write" | "w" => Command::Write((!rest.is_empty()).then(|| PathBuf::from(rest))),
      "quit" | "q" => Command::Quit,
      other => return Err(CommandError::Unknown(other.to_owned())),
    };
    Ok(cmd)
  }
}

fn required<'a>(rest: &'a str, verb: &'static str) -> Result<&'a str, CommandError> {
  if rest.is_empty() { Err(CommandError::MissingArgument(verb)) } else { Ok(rest) }
}

/// Parse `field=value; field=value`. Values may contain spaces and commas.
fn assignments(rest: &str) -> Result<Vec<(Field, String)>, CommandError> {
  rest
    .split(';')
    .map(str::trim)
    .filter(|pair| !pair.is_empty())
    .map(|pair| {
      let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| CommandError::BadAssignment(pair.to_owned()))?;
      Ok((key.trim().parse()?, value.trim().to_owned()))
    })
    .collect()
}

impl Command {
  /// Direction-only shorthand used by the `s` key.
  pub fn toggle_direction(spec: SortSpec) -> Self {
    Command::Sort(SortSpec::new(spec.field, spec.direction.reversed()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(s: &str) -> Command { s.parse().unwrap() }

  #[test]
  fn sort_with_and_without_direction() {
    assert_eq!(
      parse(":sort dateAdded desc"),
      Command::Sort(SortSpec::new(Field::DateAdded, Direction::Desc))
    );
    assert_eq!(
      parse("sort company"),
      Command::Sort(SortSpec::new(Field::Company, Direction::Asc))
    );
    assert!(matches!(
      "sort".parse::<Command>(),
      Err(CommandError::MissingArgument("sort"))
    ));
    assert!(matches!(
      "sort name sideways".parse::<Command>(),
      Err(CommandError::Core(_))
    ));
  }

  #[test]
  fn group_accepts_field_or_none() {
    assert_eq!(parse("group industry"), Command::Group(Grouping::By(Field::Industry)));
    assert_eq!(parse("group none"), Command::Group(Grouping::None));
    assert_eq!(parse("group"), Command::Group(Grouping::None));
  }

  #[test]
  fn filter_sets_and_clears() {
    assert_eq!(
      parse("filter industry Real Estate"),
      Command::Filter(FilterField::Industry, Some("Real Estate".into()))
    );
    assert_eq!(parse("filter Country"), Command::Filter(FilterField::Country, None));
    assert!(matches!(
      "filter title CTO".parse::<Command>(),
      Err(CommandError::BadFilter(_))
    ));
  }

  #[test]
  fn assignments_split_on_semicolons() {
    assert_eq!(
      parse("edit title = Head of Sales; tags=vip, client"),
      Command::Edit(vec![
        (Field::Title, "Head of Sales".into()),
        (Field::Tags, "vip, client".into()),
      ])
    );
    assert!(matches!(
      "add name Ann".parse::<Command>(),
      Err(CommandError::BadAssignment(_))
    ));
    assert!(matches!(
      "edit colour=red".parse::<Command>(),
      Err(CommandError::Core(_))
    ));
  }

  #[test]
  fn simple_verbs() {
    assert_eq!(parse("undo"), Command::Undo);
    assert_eq!(parse("rm"), Command::Remove);
    assert_eq!(parse("q"), Command::Quit);
    assert_eq!(parse("write"), Command::Write(None));
    assert_eq!(parse("w out.json"), Command::Write(Some("out.json".into())));
    assert_eq!(parse("import new.csv"), Command::Import("new.csv".into()));
  }

  #[test]
  fn unknown_and_empty() {
    assert!(matches!("".parse::<Command>(), Err(CommandError::Empty)));
    assert!(matches!("frobnicate".parse::<Command>(), Err(CommandError::Unknown(_))));
  }
}
