// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Collects starred or organization-owned repositories and renders them into
//! Markdown digests grouped by primary language.
//!
//! The pipeline is split into small, independently testable stages:
//! paginated fetching ([`fetch_all`]), grouping ([`group_records`]),
//! rendering ([`render`]), per-target orchestration ([`Collector`]), and
//! publishing through the git data API ([`CommitComposer`]). Remote services
//! are reached through the [`RepositoryCatalog`] and [`ObjectStore`] traits,
//! with GitHub-backed implementations in [`GitHubCatalog`] and
//! [`GitHubObjectStore`].

mod collect;
mod config;
mod document;
mod error;
mod github;
mod group;
mod paginate;
mod publish;
mod record;
mod render;
mod sink;
mod source;

pub use collect::{Collection, Collector};
pub use config::{
    DEFAULT_COMMIT_AUTHOR, DEFAULT_COMMIT_EMAIL, RemoteSettings, Target, TargetKind, load_targets,
    parse_targets,
};
pub use document::{compose_document, header, license_footer};
pub use error::{Error, io_error, write_error};
pub use github::{GitHubCatalog, GitHubObjectStore, build_client};
pub use group::{FALLBACK_GROUP, Group, group_key, group_records};
pub use paginate::{Collected, FIRST_PAGE, PageChunk, PageSource, PageToken, fetch_all};
pub use publish::{
    COMMIT_MESSAGE, Commit, CommitComposer, CommitRequest, Identity, NewCommit, ObjectStore,
    PublishReceipt, PublishStep, REGULAR_FILE_MODE, RepositoryId, Sha, Signature, TreeEntry,
};
pub use record::Record;
pub use render::{anchor, format_thousands, render, render_record};
pub use sink::{WriteReport, write_documents};
pub use source::{RecordSource, RepositoryCatalog};
