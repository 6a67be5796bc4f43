// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record sources selected per target.
//!
//! A [`RepositoryCatalog`] exposes the two listing capabilities of the hosting
//! provider. [`RecordSource`] binds one of them to a configured target so the
//! paginator can drive it through the [`PageSource`] trait.

use async_trait::async_trait;

use crate::{
    config::{Target, TargetKind},
    error::Error,
    paginate::{PageChunk, PageSource, PageToken},
    record::Record,
};

/// Paged repository listings offered by the hosting provider.
#[async_trait]
pub trait RepositoryCatalog: Send + Sync
{
    /// Lists repositories starred by `user`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the provider request fails.
    async fn starred_by(&self, user: &str, page: PageToken,)
    -> Result<PageChunk<Record,>, Error,>;

    /// Lists repositories owned by the organization `org`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the provider request fails.
    async fn owned_by_org(&self, org: &str, page: PageToken,)
    -> Result<PageChunk<Record,>, Error,>;
}

/// Listing bound to a single target, dispatched once on the target kind.
#[derive(Debug,)]
pub enum RecordSource<'a, C: ?Sized,>
{
    /// Repositories starred by a user account.
    Starred
    {
        catalog: &'a C,
        user:    &'a str,
    },
    /// Repositories owned by an organization.
    Organization
    {
        catalog: &'a C,
        org:     &'a str,
    },
}

impl<'a, C: RepositoryCatalog + ?Sized,> RecordSource<'a, C,>
{
    /// Selects the listing matching the kind of `target`.
    pub fn for_target(catalog: &'a C, target: &'a Target,) -> Self
    {
        match target.kind {
            TargetKind::User => Self::Starred {
                catalog,
                user: &target.name,
            },
            TargetKind::Organization => Self::Organization {
                catalog,
                org: &target.name,
            },
        }
    }
}

#[async_trait]
impl<C: RepositoryCatalog + ?Sized,> PageSource for RecordSource<'_, C,>
{
    type Item = Record;

    async fn fetch_page(&self, page: PageToken,) -> Result<PageChunk<Record,>, Error,>
    {
        match self {
            Self::Starred {
                catalog,
                user,
            } => catalog.starred_by(user, page,).await,
            Self::Organization {
                catalog,
                org,
            } => catalog.owned_by_org(org, page,).await,
        }
    }
}
