// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Partitioning of records into language groups.

use std::collections::BTreeMap;

use crate::record::Record;

/// Group name assigned to records without a language label.
pub const FALLBACK_GROUP: &str = "Others";

/// Records sharing a language label.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Group
{
    /// Language label, or [`FALLBACK_GROUP`].
    pub name:    String,
    /// Records ordered by lower-cased name.
    pub records: Vec<Record,>,
}

impl Group
{
    /// Number of records in the group.
    pub fn len(&self,) -> usize
    {
        self.records.len()
    }

    /// Returns `true` when the group holds no records.
    pub fn is_empty(&self,) -> bool
    {
        self.records.is_empty()
    }
}

/// Returns the group key derived from a record's language label.
pub fn group_key(record: &Record,) -> &str
{
    if record.language.is_empty() { FALLBACK_GROUP } else { &record.language }
}

/// Partitions `records` into groups keyed by language.
///
/// The result satisfies two ordering guarantees that the renderer relies on:
///
/// * groups are sorted by name using plain byte-wise string comparison, so
///   case matters and [`FALLBACK_GROUP`] sorts among the language names like
///   any other label;
/// * records inside a group are sorted by lower-cased name. The sort is
///   stable, so records whose names compare equal keep their input order.
///
/// Every input record appears in exactly one group.
///
/// # Example
///
/// ```
/// use repo_digest::{Record, group_records};
///
/// let records = vec![
///     Record { name: "zeta".into(), language: "Rust".into(), ..Record::default() },
///     Record { name: "Alpha".into(), language: "Rust".into(), ..Record::default() },
///     Record { name: "misc".into(), ..Record::default() },
/// ];
///
/// let groups = group_records(records,);
/// assert_eq!(groups[0].name, "Others");
/// assert_eq!(groups[1].name, "Rust");
/// assert_eq!(groups[1].records[0].name, "Alpha");
/// ```
pub fn group_records(mut records: Vec<Record,>,) -> Vec<Group,>
{
    records.sort_by_cached_key(|record| record.name.to_lowercase(),);

    let mut buckets: BTreeMap<String, Vec<Record,>,> = BTreeMap::new();
    for record in records {
        buckets.entry(group_key(&record,).to_owned(),).or_default().push(record,);
    }

    buckets
        .into_iter()
        .map(|(name, records,)| Group {
            name,
            records,
        },)
        .collect()
}
