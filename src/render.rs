// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Markdown rendering of grouped records.
//!
//! The layout is consumed by existing readers of the generated documents and
//! must stay byte-for-byte stable:
//!
//! ```text
//! - [Go](#go) (2)
//! - [Others](#others) (1)
//!
//! ## Go
//!
//! - [octo/A-repo](https://github.com/octo/A-repo) pushed_at:2024-03 star:0.1k fork:0.0k description
//! ...
//!
//! ```
//!
//! Rendering is a pure function of its input: timestamps come from the
//! records themselves, never from the clock.

use std::fmt::Write as _;

use crate::{group::Group, record::Record};

/// Renders the index followed by one section per group.
///
/// Groups and records are emitted in the order given; callers obtain the
/// canonical order from [`group_records`](crate::group_records).
pub fn render(groups: &[Group],) -> String
{
    let mut out = String::new();

    for group in groups {
        let _ = writeln!(out, "- [{}](#{}) ({})", group.name, anchor(&group.name), group.len());
    }
    out.push('\n',);

    for group in groups {
        let _ = writeln!(out, "## {}\n", group.name);
        for record in &group.records {
            out.push_str(&render_record(record,),);
            out.push('\n',);
        }
        out.push('\n',);
    }

    out
}

/// Renders a single record line without the trailing newline.
pub fn render_record(record: &Record,) -> String
{
    let pushed_at = record
        .pushed_at
        .map(|timestamp| timestamp.format("%Y-%m",).to_string(),)
        .unwrap_or_default();

    format!(
        "- [{}]({}) pushed_at:{} star:{} fork:{} {}",
        record.full_name,
        record.url,
        pushed_at,
        format_thousands(record.stars,),
        format_thousands(record.forks,),
        record.description.replace('\n', " ",),
    )
}

/// Builds the in-page anchor for a group heading.
pub fn anchor(name: &str,) -> String
{
    name.to_lowercase().replace(' ', "-",)
}

/// Formats a count in thousands with one decimal digit, rounded to nearest.
///
/// ```
/// use repo_digest::format_thousands;
///
/// assert_eq!(format_thousands(1500,), "1.5k");
/// assert_eq!(format_thousands(50,), "0.1k");
/// ```
pub fn format_thousands(count: u64,) -> String
{
    format!("{:.1}k", count as f64 / 1000.0)
}

#[cfg(test)]
mod tests
{
    use chrono::{TimeZone, Utc};

    use super::{anchor, format_thousands, render, render_record};
    use crate::{group::group_records, record::Record};

    fn record(name: &str, language: &str, stars: u64, forks: u64,) -> Record
    {
        Record {
            full_name: format!("octo/{name}"),
            name: name.to_owned(),
            owner: "octo".to_owned(),
            language: language.to_owned(),
            description: format!("{name} description"),
            url: format!("https://github.com/octo/{name}"),
            stars,
            forks,
            pushed_at: Some(Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0,).unwrap(),),
        }
    }

    #[test]
    fn formats_counts_in_thousands()
    {
        assert_eq!(format_thousands(0,), "0.0k");
        assert_eq!(format_thousands(50,), "0.1k");
        assert_eq!(format_thousands(999,), "1.0k");
        assert_eq!(format_thousands(1500,), "1.5k");
        assert_eq!(format_thousands(12345,), "12.3k");
        assert_eq!(format_thousands(250000,), "250.0k");
    }

    #[test]
    fn anchors_are_lowercase_and_hyphenated()
    {
        assert_eq!(anchor("Vim Script",), "vim-script");
        assert_eq!(anchor("C++",), "c++");
        assert_eq!(anchor("Others",), "others");
    }

    #[test]
    fn record_line_collapses_newlines_and_handles_missing_push()
    {
        let mut entry = record("multi", "Rust", 1500, 10,);
        entry.description = "first line\nsecond line".to_owned();
        entry.pushed_at = None;

        assert_eq!(
            render_record(&entry,),
            "- [octo/multi](https://github.com/octo/multi) pushed_at: star:1.5k fork:0.0k first \
             line second line"
        );
    }

    #[test]
    fn record_line_keeps_trailing_space_for_empty_description()
    {
        let mut entry = record("bare", "Rust", 0, 0,);
        entry.description.clear();

        assert!(render_record(&entry,).ends_with("fork:0.0k ",));
    }

    #[test]
    fn renders_index_and_sections()
    {
        let groups = group_records(vec![
            record("b-repo", "Go", 1500, 10,),
            record("A-repo", "Go", 50, 0,),
            record("c-repo", "", 0, 0,),
        ],);

        let expected = "\
- [Go](#go) (2)
- [Others](#others) (1)

## Go

- [octo/A-repo](https://github.com/octo/A-repo) pushed_at:2024-03 star:0.1k fork:0.0k A-repo description
- [octo/b-repo](https://github.com/octo/b-repo) pushed_at:2024-03 star:1.5k fork:0.0k b-repo description

## Others

- [octo/c-repo](https://github.com/octo/c-repo) pushed_at:2024-03 star:0.0k fork:0.0k c-repo description

";
        assert_eq!(render(&groups,), expected);
    }

    #[test]
    fn rendering_is_idempotent()
    {
        let groups = group_records(vec![
            record("one", "Rust", 12345, 678,),
            record("two", "Python", 3, 1,),
        ],);

        assert_eq!(render(&groups,), render(&groups,));
    }

    #[test]
    fn empty_groups_render_separator_only()
    {
        assert_eq!(render(&[],), "\n");
    }
}
