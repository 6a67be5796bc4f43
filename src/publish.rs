// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Commit composition through a git object store.
//!
//! Publishing never touches a working copy. [`CommitComposer`] walks a fixed
//! five-step chain against an [`ObjectStore`]:
//!
//! 1. resolve `heads/<branch>` to the tip commit;
//! 2. create one tree holding every published file on top of the tip;
//! 3. load the tip commit, which becomes the sole parent;
//! 4. create the commit;
//! 5. move `heads/<branch>` to the new commit without forcing.
//!
//! Any failure stops the chain. The reference only moves in the last step, so
//! a failed publish leaves the branch on its original tip; objects created by
//! earlier steps stay unreferenced on the remote.

use std::{collections::BTreeMap, fmt};

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{config::RemoteSettings, error::Error};

/// Message attached to every published commit.
pub const COMMIT_MESSAGE: &str = "Update repository collections";

/// File mode of a regular, non-executable blob.
pub const REGULAR_FILE_MODE: &str = "100644";

/// Object id as reported by the object store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,)]
#[serde(transparent)]
pub struct Sha(String,);

impl Sha
{
    /// Wraps a raw object id.
    pub fn new(value: impl Into<String,>,) -> Self
    {
        Self(value.into(),)
    }

    /// Returns the raw object id.
    pub fn as_str(&self,) -> &str
    {
        &self.0
    }
}

impl fmt::Display for Sha
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(&self.0,)
    }
}

/// Owner and name of the destination repository.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct RepositoryId
{
    pub owner: String,
    pub name:  String,
}

impl fmt::Display for RepositoryId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Commit author identity.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Identity
{
    pub name:  String,
    pub email: String,
}

/// Author identity stamped with the commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct Signature
{
    pub name:  String,
    pub email: String,
    pub date:  DateTime<Utc,>,
}

/// One blob entry of a new tree, carrying its content inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct TreeEntry
{
    pub path:    String,
    pub mode:    &'static str,
    #[serde(rename = "type")]
    pub kind:    &'static str,
    pub content: String,
}

impl TreeEntry
{
    /// Creates a regular-file blob entry.
    pub fn blob(path: impl Into<String,>, content: impl Into<String,>,) -> Self
    {
        Self {
            path:    path.into(),
            mode:    REGULAR_FILE_MODE,
            kind:    "blob",
            content: content.into(),
        }
    }
}

/// Commit object as stored remotely.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Commit
{
    pub sha:     Sha,
    pub tree:    Sha,
    pub parents: Vec<Sha,>,
    pub message: String,
}

/// Commit object to be created.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct NewCommit
{
    pub message: String,
    pub tree:    Sha,
    pub parents: Vec<Sha,>,
    pub author:  Signature,
}

/// Low-level git object API of the hosting provider.
///
/// References are given relative to `refs/`, e.g. `heads/main`.
#[async_trait]
pub trait ObjectStore: Send + Sync
{
    /// Returns the commit id a reference points at.
    async fn get_ref(&self, repo: &RepositoryId, reference: &str,) -> Result<Sha, Error,>;

    /// Creates a tree from `entries` layered on `base_tree`.
    async fn create_tree(
        &self,
        repo: &RepositoryId,
        base_tree: &Sha,
        entries: &[TreeEntry],
    ) -> Result<Sha, Error,>;

    /// Loads a commit object.
    async fn get_commit(&self, repo: &RepositoryId, sha: &Sha,) -> Result<Commit, Error,>;

    /// Creates a commit object.
    async fn create_commit(&self, repo: &RepositoryId, commit: &NewCommit,)
    -> Result<Commit, Error,>;

    /// Moves a reference to `sha`. Without `force` the update must be a
    /// fast-forward.
    async fn update_ref(
        &self,
        repo: &RepositoryId,
        reference: &str,
        sha: &Sha,
        force: bool,
    ) -> Result<(), Error,>;
}

/// Steps of the commit protocol, used to report where a publish failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum PublishStep
{
    ResolveRef,
    BuildTree,
    ResolveParent,
    CreateCommit,
    UpdateRef,
}

impl fmt::Display for PublishStep
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        let label = match self {
            Self::ResolveRef => "resolve ref",
            Self::BuildTree => "build tree",
            Self::ResolveParent => "resolve parent commit",
            Self::CreateCommit => "create commit",
            Self::UpdateRef => "update ref",
        };
        f.write_str(label,)
    }
}

/// Everything needed to publish one set of documents.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct CommitRequest
{
    pub repository: RepositoryId,
    pub branch:     String,
    pub author:     Identity,
    /// Repository path → file content.
    pub files:      BTreeMap<String, String,>,
}

impl CommitRequest
{
    /// Builds a request from resolved remote settings.
    pub fn from_settings(settings: &RemoteSettings, files: BTreeMap<String, String,>,) -> Self
    {
        Self {
            repository: RepositoryId {
                owner: settings.owner.clone(),
                name:  settings.repository.clone(),
            },
            branch: settings.branch.clone(),
            author: Identity {
                name:  settings.author_name.clone(),
                email: settings.author_email.clone(),
            },
            files,
        }
    }

    fn reference(&self,) -> String
    {
        format!("heads/{}", self.branch)
    }
}

/// Object ids produced by a successful publish.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct PublishReceipt
{
    /// Tip the branch pointed at before publishing.
    pub parent: Sha,
    /// Tree created for the published files.
    pub tree:   Sha,
    /// New branch tip.
    pub commit: Sha,
}

/// Publishes documents as a single commit on a branch.
#[derive(Debug,)]
pub struct CommitComposer<'a, S: ?Sized,>
{
    store: &'a S,
}

impl<'a, S: ObjectStore + ?Sized,> CommitComposer<'a, S,>
{
    pub fn new(store: &'a S,) -> Self
    {
        Self {
            store,
        }
    }

    /// Runs the commit protocol for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the request has no files and
    /// [`Error::Publish`] naming the failed step otherwise. The branch
    /// reference is untouched unless this returns `Ok`.
    pub async fn publish(&self, request: &CommitRequest,) -> Result<PublishReceipt, Error,>
    {
        if request.files.is_empty() {
            return Err(Error::validation("no documents to publish",),);
        }

        let repo = &request.repository;
        let reference = request.reference();

        let tip = self
            .store
            .get_ref(repo, &reference,)
            .await
            .map_err(|error| Error::publish(PublishStep::ResolveRef, error,),)?;
        debug!("Resolved {} on {} to {}", reference, repo, tip);

        let entries: Vec<TreeEntry,> = request
            .files
            .iter()
            .map(|(path, content,)| TreeEntry::blob(path.as_str(), content.as_str(),),)
            .collect();
        let tree = self
            .store
            .create_tree(repo, &tip, &entries,)
            .await
            .map_err(|error| Error::publish(PublishStep::BuildTree, error,),)?;
        debug!("Created tree {} with {} entries", tree, entries.len());

        let parent = self
            .store
            .get_commit(repo, &tip,)
            .await
            .map_err(|error| Error::publish(PublishStep::ResolveParent, error,),)?;

        let commit = NewCommit {
            message: COMMIT_MESSAGE.to_owned(),
            tree:    tree.clone(),
            parents: vec![parent.sha.clone()],
            author:  Signature {
                name:  request.author.name.clone(),
                email: request.author.email.clone(),
                date:  Utc::now().trunc_subsecs(0,),
            },
        };
        let created = self
            .store
            .create_commit(repo, &commit,)
            .await
            .map_err(|error| Error::publish(PublishStep::CreateCommit, error,),)?;
        debug!("Created commit {} on top of {}", created.sha, parent.sha);

        self.store
            .update_ref(repo, &reference, &created.sha, false,)
            .await
            .map_err(|error| Error::publish(PublishStep::UpdateRef, error,),)?;
        info!("Published {} files to {} at {}", request.files.len(), repo, created.sha);

        Ok(PublishReceipt {
            parent: parent.sha,
            tree,
            commit: created.sha,
        },)
    }
}
