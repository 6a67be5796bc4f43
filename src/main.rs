// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command-line interface for the repo-digest binary.
//!
//! Collects repositories for the configured targets, then either commits the
//! routed documents to a repository branch or writes them to disk. Documents
//! without a destination are printed to stdout.

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use repo_digest::{
    Collector, CommitComposer, CommitRequest, DEFAULT_COMMIT_AUTHOR, DEFAULT_COMMIT_EMAIL, Error,
    GitHubCatalog, GitHubObjectStore, ObjectStore, RemoteSettings, Target, TargetKind,
    build_client, load_targets, write_documents,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Top-level CLI options parsed from user input.
#[derive(Debug, Parser,)]
#[command(
    name = "repo-digest",
    version,
    about = "Collect repositories into Markdown digests grouped by language"
)]
struct Cli
{
    /// Personal access token used for every GitHub request.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String,>,

    /// Account whose stars are collected and who is credited in documents.
    #[arg(long = "username", value_name = "LOGIN")]
    username: Option<String,>,

    /// Repository receiving the published documents.
    #[arg(long = "repository", value_name = "NAME")]
    repository: Option<String,>,

    /// Output file for the default target when no configuration is given.
    #[arg(long = "file", value_name = "PATH")]
    file: Option<String,>,

    /// Branch advanced by the publish commit.
    #[arg(long = "branch", value_name = "NAME")]
    branch: Option<String,>,

    /// Path to the YAML file describing collection targets.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf,>,

    /// Commit author name.
    #[arg(long = "commit-author", alias = "commitAuthor", default_value = DEFAULT_COMMIT_AUTHOR)]
    commit_author: String,

    /// Commit author email.
    #[arg(long = "commit-email", alias = "commitEmail", default_value = DEFAULT_COMMIT_EMAIL)]
    commit_email: String,

    /// Maximum number of repositories collected per target.
    #[arg(long = "limit", value_name = "COUNT")]
    limit: Option<usize,>,
}

/// Where routed documents end up.
#[derive(Debug, PartialEq, Eq,)]
enum Destination
{
    Remote(RemoteSettings,),
    Local(PathBuf,),
}

#[tokio::main(flavor = "current_thread")]
async fn main()
{
    init_tracing();

    if let Err(error,) = run(Cli::parse(),).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),),)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr,),)
        .init();
}

/// Executes one collection run.
///
/// # Errors
///
/// Returns configuration errors before any network call and publish errors
/// after collection. Unrouted documents are printed in both success and
/// publish-failure cases.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let username = require_username(cli.username.as_deref(),)?;
    let targets = resolve_targets(cli.config.as_deref(), username, cli.file.as_deref(),)?;
    info!("Collecting {} target(s) for {}", targets.len(), username);

    let client = build_client(cli.token.as_deref(),)?;
    let catalog = GitHubCatalog::new(client.clone(),);
    let collection =
        Collector::new(&catalog, username,).with_limit(cli.limit,).collect(&targets,).await;

    let outcome = match destination(&cli, username,) {
        Destination::Remote(settings,) => {
            let store = GitHubObjectStore::new(client,);
            publish(&store, &settings, collection.publish,).await
        }
        Destination::Local(root,) => {
            write_local(&root, &collection.publish,);
            Ok((),)
        }
    };

    for document in &collection.unrouted {
        println!("{document}");
    }

    outcome
}

fn require_username(username: Option<&str,>,) -> Result<&str, Error,>
{
    username
        .map(str::trim,)
        .filter(|value| !value.is_empty(),)
        .ok_or_else(|| Error::validation("no username provided; pass --username <LOGIN>",),)
}

/// Loads targets from `config`, or falls back to the stars of `username`.
fn resolve_targets(
    config: Option<&Path,>,
    username: &str,
    file: Option<&str,>,
) -> Result<Vec<Target,>, Error,>
{
    match config {
        Some(path,) => load_targets(path,),
        None => Ok(vec![Target::new(username, TargetKind::User, file.unwrap_or_default(),)],),
    }
}

fn destination(cli: &Cli, username: &str,) -> Destination
{
    match RemoteSettings::resolve(
        username,
        cli.repository.as_deref(),
        cli.branch.as_deref(),
        &cli.commit_author,
        &cli.commit_email,
    ) {
        Some(settings,) => Destination::Remote(settings,),
        None => Destination::Local(PathBuf::from(".",),),
    }
}

async fn publish<S,>(
    store: &S,
    settings: &RemoteSettings,
    files: BTreeMap<String, String,>,
) -> Result<(), Error,>
where
    S: ObjectStore + ?Sized,
{
    if files.is_empty() {
        info!("No routed documents; nothing to publish");
        return Ok((),);
    }

    let request = CommitRequest::from_settings(settings, files,);
    let receipt = CommitComposer::new(store,).publish(&request,).await?;
    info!("Branch {} now points at {}", settings.branch, receipt.commit);
    Ok((),)
}

fn write_local(root: &Path, files: &BTreeMap<String, String,>,)
{
    let report = write_documents(root, files,);
    if !report.is_complete() {
        warn!("{} of {} document(s) could not be written", report.failures.len(), files.len());
    }
}

#[cfg(test)]
mod tests
{
    use std::{collections::BTreeMap, fs, path::Path};

    use clap::Parser;
    use repo_digest::{DEFAULT_COMMIT_AUTHOR, DEFAULT_COMMIT_EMAIL, TargetKind};
    use tempfile::tempdir;

    use super::{Cli, Destination, destination, require_username, resolve_targets, write_local};

    #[test]
    fn cli_accepts_publish_flags()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--username",
            "octocat",
            "--repository",
            "awesome-stars",
            "--branch",
            "main",
            "--file",
            "README.md",
            "--commitAuthor",
            "bot",
            "--commit-email",
            "bot@example.com",
            "--limit",
            "50",
        ],)
        .expect("failed to parse CLI",);

        assert_eq!(cli.username.as_deref(), Some("octocat"));
        assert_eq!(cli.file.as_deref(), Some("README.md"));
        assert_eq!(cli.commit_author, "bot");
        assert_eq!(cli.commit_email, "bot@example.com");
        assert_eq!(cli.limit, Some(50));

        match destination(&cli, "octocat",) {
            Destination::Remote(settings,) => {
                assert_eq!(settings.owner, "octocat");
                assert_eq!(settings.repository, "awesome-stars");
                assert_eq!(settings.branch, "main");
                assert_eq!(settings.author_name, "bot");
            }
            other => panic!("expected remote destination, got {other:?}"),
        }
    }

    #[test]
    fn commit_identity_defaults_to_actions_bot()
    {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "--username", "octocat",],)
            .expect("failed to parse CLI",);

        assert_eq!(cli.commit_author, DEFAULT_COMMIT_AUTHOR);
        assert_eq!(cli.commit_email, DEFAULT_COMMIT_EMAIL);
        assert_eq!(cli.limit, None);
    }

    #[test]
    fn missing_branch_writes_locally()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--username",
            "octocat",
            "--repository",
            "awesome-stars",
        ],)
        .expect("failed to parse CLI",);

        assert_eq!(destination(&cli, "octocat",), Destination::Local(".".into()));
    }

    #[test]
    fn username_is_required()
    {
        for candidate in [None, Some(""), Some("   ")] {
            let error = require_username(candidate,).expect_err("expected validation error",);
            match error {
                repo_digest::Error::Validation {
                    message,
                } => assert!(message.contains("--username")),
                other => panic!("unexpected error variant: {other:?}"),
            }
        }
        assert_eq!(require_username(Some(" octocat ",),).expect("username",), "octocat");
    }

    #[test]
    fn default_target_is_users_stars()
    {
        let targets = resolve_targets(None, "octocat", Some("stars.md",),).expect("targets",);

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "octocat");
        assert_eq!(targets[0].kind, TargetKind::User);
        assert_eq!(targets[0].output, "stars.md");
    }

    #[test]
    fn configured_targets_replace_default()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("targets.yaml",);
        fs::write(&path, "- name: rust-lang\n  userType: org\n  file: orgs/rust-lang.md\n",)
            .expect("failed to write config",);

        let targets = resolve_targets(Some(&path,), "octocat", Some("ignored.md",),)
            .expect("targets",);

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].kind, TargetKind::Organization);
        assert_eq!(targets[0].output, "orgs/rust-lang.md");
    }

    #[test]
    fn unreadable_config_is_fatal()
    {
        let error = resolve_targets(Some(Path::new("/definitely/missing.yaml",),), "octocat", None,)
            .expect_err("expected io error",);
        assert!(matches!(error, repo_digest::Error::Io { .. }));
    }

    #[test]
    fn local_write_creates_documents()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let mut files = BTreeMap::new();
        files.insert("stars/octocat.md".to_owned(), "# Starred Repositories\n".to_owned(),);

        write_local(temp.path(), &files,);

        let written = fs::read_to_string(temp.path().join("stars/octocat.md",),)
            .expect("document written",);
        assert_eq!(written, "# Starred Repositories\n");
    }
}
