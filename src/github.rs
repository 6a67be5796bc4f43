// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// GitHub REST bindings for record listing and the git data API.
///
/// Both adapters issue raw routes through [`Octocrab`] with typed payloads so
/// only the fields the pipeline needs are decoded.
use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::Error,
    paginate::{PageChunk, PageToken},
    publish::{Commit, NewCommit, ObjectStore, RepositoryId, Sha, Signature, TreeEntry},
    record::Record,
    source::RepositoryCatalog,
};

/// Page size requested from listing endpoints.
const PER_PAGE: u8 = 100;

/// Builds a GitHub client, authenticated when `token` is non-empty.
///
/// # Errors
///
/// Returns [`Error::Service`] when the client cannot be constructed.
///
/// # Example
///
/// ```no_run
/// use repo_digest::build_client;
///
/// # fn example() -> Result<(), repo_digest::Error> {
/// let anonymous = build_client(None,)?;
/// let authenticated = build_client(Some("ghp_token",),)?;
/// # Ok(())
/// # }
/// ```
pub fn build_client(token: Option<&str,>,) -> Result<Octocrab, Error,>
{
    let builder = Octocrab::builder();
    let builder = match token.map(str::trim,).filter(|value| !value.is_empty(),) {
        Some(token,) => builder.personal_token(token.to_owned(),),
        None => builder,
    };

    builder
        .build()
        .map_err(|e| Error::service(format!("failed to initialize GitHub client: {e}"),),)
}

#[derive(Debug, Serialize,)]
struct ListParams
{
    page:     PageToken,
    per_page: u8,
}

/// Repository listings backed by the GitHub REST API.
#[derive(Debug, Clone,)]
pub struct GitHubCatalog
{
    client: Octocrab,
}

impl GitHubCatalog
{
    pub fn new(client: Octocrab,) -> Self
    {
        Self {
            client,
        }
    }

    async fn list(&self, route: String, page: PageToken,) -> Result<PageChunk<Record,>, Error,>
    {
        let params = ListParams {
            page,
            per_page: PER_PAGE,
        };
        let listing: Page<Record,> = self
            .client
            .get(&route, Some(&params,),)
            .await
            .map_err(|e| Error::service(format!("GET {route} page {page} failed: {e}"),),)?;

        debug!("GET {} page {} returned {} repositories", route, page, listing.items.len());
        let next = next_token(page, listing.next.as_ref(),);

        Ok(PageChunk {
            items: listing.items,
            next,
        },)
    }
}

/// Token of the page after `page`, present only when the provider advertised
/// a `next` link for the listing.
fn next_token<L,>(page: PageToken, next_link: Option<&L,>,) -> Option<PageToken,>
{
    next_link.and_then(|_| page.checked_add(1,),)
}

#[async_trait]
impl RepositoryCatalog for GitHubCatalog
{
    async fn starred_by(&self, user: &str, page: PageToken,) -> Result<PageChunk<Record,>, Error,>
    {
        self.list(format!("/users/{user}/starred"), page,).await
    }

    async fn owned_by_org(&self, org: &str, page: PageToken,)
    -> Result<PageChunk<Record,>, Error,>
    {
        self.list(format!("/orgs/{org}/repos"), page,).await
    }
}

#[derive(Debug, Deserialize,)]
struct RefPayload
{
    object: ObjectPayload,
}

#[derive(Debug, Deserialize,)]
struct ObjectPayload
{
    sha: Sha,
}

#[derive(Debug, Serialize,)]
struct CreateTreeBody<'a,>
{
    base_tree: &'a Sha,
    tree:      &'a [TreeEntry],
}

#[derive(Debug, Deserialize,)]
struct CommitPayload
{
    sha:     Sha,
    tree:    ObjectPayload,
    #[serde(default)]
    parents: Vec<ObjectPayload,>,
    #[serde(default)]
    message: String,
}

impl From<CommitPayload,> for Commit
{
    fn from(payload: CommitPayload,) -> Self
    {
        Self {
            sha:     payload.sha,
            tree:    payload.tree.sha,
            parents: payload.parents.into_iter().map(|parent| parent.sha,).collect(),
            message: payload.message,
        }
    }
}

#[derive(Debug, Serialize,)]
struct CreateCommitBody<'a,>
{
    message: &'a str,
    tree:    &'a Sha,
    parents: &'a [Sha],
    author:  &'a Signature,
}

#[derive(Debug, Serialize,)]
struct UpdateRefBody<'a,>
{
    sha:   &'a Sha,
    force: bool,
}

/// Git data API (`/repos/{owner}/{repo}/git/...`) of GitHub.
#[derive(Debug, Clone,)]
pub struct GitHubObjectStore
{
    client: Octocrab,
}

impl GitHubObjectStore
{
    pub fn new(client: Octocrab,) -> Self
    {
        Self {
            client,
        }
    }
}

fn git_route(repo: &RepositoryId, path: &str,) -> String
{
    format!("/repos/{}/{}/git/{path}", repo.owner, repo.name)
}

#[async_trait]
impl ObjectStore for GitHubObjectStore
{
    async fn get_ref(&self, repo: &RepositoryId, reference: &str,) -> Result<Sha, Error,>
    {
        let route = git_route(repo, &format!("ref/{reference}"),);
        let payload: RefPayload = self.client.get(&route, None::<&(),>,).await?;
        Ok(payload.object.sha,)
    }

    async fn create_tree(
        &self,
        repo: &RepositoryId,
        base_tree: &Sha,
        entries: &[TreeEntry],
    ) -> Result<Sha, Error,>
    {
        let body = CreateTreeBody {
            base_tree,
            tree: entries,
        };
        let payload: ObjectPayload = self.client.post(git_route(repo, "trees",), Some(&body,),).await?;
        Ok(payload.sha,)
    }

    async fn get_commit(&self, repo: &RepositoryId, sha: &Sha,) -> Result<Commit, Error,>
    {
        let route = git_route(repo, &format!("commits/{sha}"),);
        let payload: CommitPayload = self.client.get(&route, None::<&(),>,).await?;
        Ok(payload.into(),)
    }

    async fn create_commit(&self, repo: &RepositoryId, commit: &NewCommit,)
    -> Result<Commit, Error,>
    {
        let body = CreateCommitBody {
            message: &commit.message,
            tree:    &commit.tree,
            parents: &commit.parents,
            author:  &commit.author,
        };
        let payload: CommitPayload =
            self.client.post(git_route(repo, "commits",), Some(&body,),).await?;
        Ok(payload.into(),)
    }

    async fn update_ref(
        &self,
        repo: &RepositoryId,
        reference: &str,
        sha: &Sha,
        force: bool,
    ) -> Result<(), Error,>
    {
        let body = UpdateRefBody {
            sha,
            force,
        };
        let _: RefPayload =
            self.client.patch(git_route(repo, &format!("refs/{reference}"),), Some(&body,),).await?;
        Ok((),)
    }
}
