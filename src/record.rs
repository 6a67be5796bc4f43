// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository records fetched from the hosting provider.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single repository description as returned by a record source.
///
/// Records are immutable once fetched. Optional provider fields collapse to
/// empty strings or zero so downstream grouping and rendering never branch on
/// absent values, with the exception of [`pushed_at`](Self::pushed_at), which
/// renders differently when missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize,)]
pub struct Record
{
    /// `owner/name` identifier.
    #[serde(default)]
    pub full_name:   String,
    /// Short repository name used for ordering within a group.
    #[serde(default)]
    pub name:        String,
    /// Login of the owning account.
    #[serde(default, deserialize_with = "deserialize_owner_login", rename = "owner")]
    pub owner:       String,
    /// Primary language label, empty when the provider reports none.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub language:    String,
    /// Free-form description, possibly spanning multiple lines.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub description: String,
    /// Browser URL of the repository.
    #[serde(default, deserialize_with = "deserialize_nullable_string", rename = "html_url")]
    pub url:         String,
    /// Stargazer count.
    #[serde(default, rename = "stargazers_count")]
    pub stars:       u64,
    /// Fork count.
    #[serde(default, rename = "forks_count")]
    pub forks:       u64,
    /// Timestamp of the last push, absent for never-pushed repositories.
    #[serde(default)]
    pub pushed_at:   Option<DateTime<Utc,>,>,
}

#[derive(Deserialize,)]
struct OwnerPayload
{
    #[serde(default)]
    login: String,
}

fn deserialize_nullable_string<'de, D,>(deserializer: D,) -> Result<String, D::Error,>
where
    D: serde::Deserializer<'de,>,
{
    let value: Option<String,> = Option::deserialize(deserializer,)?;
    Ok(value.unwrap_or_default(),)
}

fn deserialize_owner_login<'de, D,>(deserializer: D,) -> Result<String, D::Error,>
where
    D: serde::Deserializer<'de,>,
{
    let value: Option<OwnerPayload,> = Option::deserialize(deserializer,)?;
    Ok(value.map(|owner| owner.login,).unwrap_or_default(),)
}
