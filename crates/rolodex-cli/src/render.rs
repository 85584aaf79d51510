//! Plain-text rendering of a directory view for `rolodex list`.

use std::io::{self, Write};

use rolodex_core::{Contact, DirectoryView, Field};

/// Write every bucket with its label and count, then a summary line.
pub fn write_view(out: &mut impl Write, view: &DirectoryView<'_>) -> io::Result<()> {
  for bucket in &view.buckets {
    writeln!(out, "{} ({})", bucket.label(), bucket.len())?;
    for contact in &bucket.contacts {
      writeln!(out, "  {}", line(contact))?;
    }
    writeln!(out)?;
  }
  writeln!(out, "{} of {} contacts", view.matched, view.total)
}

fn line(c: &Contact) -> String {
  let mut parts = vec![c.name.as_str(), c.email.as_str(), c.company.as_str()];
  parts.extend(c.title.as_deref());
  parts.extend(c.country.as_deref());
  let mut s = parts.join(" | ");
  if let Some(tags) = c.text(Field::Tags) {
    s.push_str(&format!(" [{tags}]"));
  }
  s
}

#[cfg(test)]
mod tests {
  use rolodex_core::{Directory, Grouping, NewContact, ViewQuery};

  use super::*;

  fn render(directory: &Directory, query: &ViewQuery) -> String {
    let mut buf = Vec::new();
    write_view(&mut buf, &directory.view(query)).unwrap();
    String::from_utf8(buf).unwrap()
  }

  #[test]
  fn renders_buckets_and_summary() {
    let mut d = Directory::new();
    let mut ann = NewContact::new("Ann", "ann@example.com", "Acme");
    ann.industry = Some("Tech".into());
    ann.tags = vec!["vip".into()];
    d.add(ann).unwrap();
    d.add(NewContact::new("Bob", "bob@example.com", "Zeta")).unwrap();

    let query = ViewQuery { grouping: Grouping::By(Field::Industry), ..Default::default() };
    let out = render(&d, &query);

    assert_eq!(
      out,
      "Tech (1)\n  Ann | ann@example.com | Acme [vip]\n\n\
       Other (1)\n  Bob | bob@example.com | Zeta\n\n\
       2 of 2 contacts\n"
    );
  }

  #[test]
  fn empty_match_still_reports_totals() {
    let mut d = Directory::new();
    d.add(NewContact::new("Ann", "ann@example.com", "Acme")).unwrap();
    let query = ViewQuery { text: "zzz".into(), ..Default::default() };
    assert!(render(&d, &query).ends_with("0 of 1 contacts\n"));
  }
}
