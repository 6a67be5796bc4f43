// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Configuration types describing collection targets and publish settings.
//!
//! Target files are YAML sequences. Each entry names an account, its kind,
//! and an optional output file:
//!
//! ```yaml
//! - name: octocat
//!   userType: user
//!   file: stars/octocat.md
//! - name: rust-lang
//!   userType: org
//!   file: orgs/rust-lang.md
//! ```
//!
//! Entries whose kind is not recognized are dropped silently, matching the
//! behaviour existing configuration files were written against.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::debug;

use crate::error::{self, Error};

/// Default commit author used when publishing.
pub const DEFAULT_COMMIT_AUTHOR: &str = "github-actions[bot]";
/// Default commit email used when publishing.
pub const DEFAULT_COMMIT_EMAIL: &str = "41898282+github-actions[bot]@users.noreply.github.com";

/// Kinds of accounts a target can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum TargetKind
{
    /// Collect the repositories starred by a user.
    User,
    /// Collect the repositories owned by an organization.
    Organization,
}

impl TargetKind
{
    /// Parses the raw `userType` value, returning `None` for unknown kinds.
    ///
    /// ```
    /// use repo_digest::TargetKind;
    ///
    /// assert_eq!(TargetKind::parse("org",), Some(TargetKind::Organization));
    /// assert_eq!(TargetKind::parse("team",), None);
    /// ```
    pub fn parse(raw: &str,) -> Option<Self,>
    {
        match raw.trim() {
            "user" => Some(Self::User,),
            "org" | "organization" => Some(Self::Organization,),
            _ => None,
        }
    }
}

/// A single configured collection target.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Target
{
    /// Account login of the user or organization.
    pub name:   String,
    /// Which listing to collect for the account.
    pub kind:   TargetKind,
    /// Output designator, empty when the document should be printed.
    pub output: String,
}

impl Target
{
    /// Creates a target from its parts.
    pub fn new(name: impl Into<String,>, kind: TargetKind, output: impl Into<String,>,) -> Self
    {
        Self {
            name: name.into(), kind, output: output.into(),
        }
    }

    /// Returns `true` when the rendered document has a named destination.
    pub fn has_output(&self,) -> bool
    {
        !self.output.is_empty()
    }
}

/// Raw YAML entry before the kind is validated.
#[derive(Debug, Deserialize,)]
struct TargetEntry
{
    name:      String,
    #[serde(rename = "userType", alias = "user_type", alias = "type", default)]
    user_type: String,
    #[serde(default, alias = "output")]
    file:      Option<String,>,
}

/// Loads targets from the YAML file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and [`Error::Parse`]
/// when the YAML cannot be decoded.
pub fn load_targets(path: &Path,) -> Result<Vec<Target,>, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_targets(&contents,)
}

/// Parses targets from a YAML document, dropping entries of unknown kind.
///
/// An empty document yields no targets.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the YAML is not a sequence of target entries.
///
/// # Example
///
/// ```
/// use repo_digest::{TargetKind, parse_targets};
///
/// let yaml = r#"
/// - name: octocat
///   userType: user
///   file: stars.md
/// - name: ghost
///   userType: bot
/// "#;
/// let targets = parse_targets(yaml,)?;
/// assert_eq!(targets.len(), 1);
/// assert_eq!(targets[0].kind, TargetKind::User);
/// # Ok::<(), repo_digest::Error>(())
/// ```
pub fn parse_targets(contents: &str,) -> Result<Vec<Target,>, Error,>
{
    if contents.trim().is_empty() {
        return Ok(Vec::new(),);
    }

    let entries: Vec<TargetEntry,> = serde_yaml::from_str(contents,)?;
    let targets = entries
        .into_iter()
        .filter_map(|entry| match TargetKind::parse(&entry.user_type,) {
            Some(kind,) => Some(Target::new(entry.name, kind, entry.file.unwrap_or_default(),),),
            None => {
                debug!("Dropping target '{}' with unknown kind '{}'", entry.name, entry.user_type);
                None
            }
        },)
        .collect();

    Ok(targets,)
}

/// Account and repository that receives published documents.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct RemoteSettings
{
    /// Owner of the destination repository; also the licensed account.
    pub owner:        String,
    /// Destination repository name.
    pub repository:   String,
    /// Branch advanced by the publish commit.
    pub branch:       String,
    /// Commit author name.
    pub author_name:  String,
    /// Commit author email.
    pub author_email: String,
}

impl RemoteSettings
{
    /// Returns remote publish settings when owner, repository, and branch are
    /// all supplied; otherwise documents are written locally.
    ///
    /// Blank author values fall back to [`DEFAULT_COMMIT_AUTHOR`] and
    /// [`DEFAULT_COMMIT_EMAIL`].
    pub fn resolve(
        owner: &str,
        repository: Option<&str,>,
        branch: Option<&str,>,
        author_name: &str,
        author_email: &str,
    ) -> Option<Self,>
    {
        let owner = owner.trim();
        let repository = repository.map(str::trim,).filter(|value| !value.is_empty(),)?;
        let branch = branch.map(str::trim,).filter(|value| !value.is_empty(),)?;
        if owner.is_empty() {
            return None;
        }

        let author_name = Some(author_name.trim(),)
            .filter(|value| !value.is_empty(),)
            .unwrap_or(DEFAULT_COMMIT_AUTHOR,);
        let author_email = Some(author_email.trim(),)
            .filter(|value| !value.is_empty(),)
            .unwrap_or(DEFAULT_COMMIT_EMAIL,);

        Some(Self {
            owner:        owner.to_owned(),
            repository:   repository.to_owned(),
            branch:       branch.to_owned(),
            author_name:  author_name.to_owned(),
            author_email: author_email.to_owned(),
        },)
    }
}
