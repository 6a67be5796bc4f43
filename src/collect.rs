// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-target collection: fetch, group, render, and route.
//!
//! Targets are processed one at a time. A failing record source drops that
//! target's document but never stops the remaining targets.

use std::collections::BTreeMap;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::{
    config::Target,
    document::compose_document,
    paginate::fetch_all,
    source::{RecordSource, RepositoryCatalog},
};

/// Documents produced by one collection run.
#[derive(Debug, Default, Clone, PartialEq, Eq,)]
pub struct Collection
{
    /// Documents keyed by output designator, destined for publish or local
    /// write.
    pub publish:  BTreeMap<String, String,>,
    /// Documents without a destination, in target order. Targets whose source
    /// failed contribute an empty entry.
    pub unrouted: Vec<String,>,
}

/// Drives the fetch → group → render pipeline for configured targets.
#[derive(Debug,)]
pub struct Collector<'a, C: ?Sized,>
{
    catalog:  &'a C,
    licensee: &'a str,
    limit:    Option<usize,>,
}

impl<'a, C: RepositoryCatalog + ?Sized,> Collector<'a, C,>
{
    /// Creates a collector reading from `catalog`; documents are attributed
    /// to `licensee`.
    pub fn new(catalog: &'a C, licensee: &'a str,) -> Self
    {
        Self {
            catalog,
            licensee,
            limit: None,
        }
    }

    /// Caps the number of records collected per target.
    pub fn with_limit(mut self, limit: Option<usize,>,) -> Self
    {
        self.limit = limit;
        self
    }

    /// Collects every target in order and routes the resulting documents.
    pub async fn collect(&self, targets: &[Target],) -> Collection
    {
        let progress = ProgressBar::new(targets.len() as u64,);
        if let Ok(style,) =
            ProgressStyle::default_bar().template("{spinner:.green} [{pos}/{len}] {msg}",)
        {
            progress.set_style(style,);
        }

        let mut collection = Collection::default();
        for target in targets {
            progress.set_message(format!("Collecting {}...", target.name),);
            let content = self.collect_target(target,).await;

            if target.has_output() && !content.is_empty() {
                debug!("Routing document for {} to {}", target.name, target.output);
                collection.publish.insert(target.output.clone(), content,);
            } else {
                collection.unrouted.push(content,);
            }
            progress.inc(1,);
        }
        progress.finish_and_clear();

        info!(
            "Collected {} routed and {} unrouted documents",
            collection.publish.len(),
            collection.unrouted.len()
        );
        collection
    }

    /// Renders the document for one target, or returns an empty string when
    /// its record source failed. Partially fetched records are discarded.
    async fn collect_target(&self, target: &Target,) -> String
    {
        let source = RecordSource::for_target(self.catalog, target,);
        match fetch_all(&source, self.limit,).await.into_result() {
            Ok(records,) => {
                info!("Collected {} repositories for {}", records.len(), target.name);
                compose_document(target, records, self.licensee,)
            }
            Err(error,) => {
                warn!("Skipping {}: {}", target.name, error);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::Collector;
    use crate::{
        config::{Target, TargetKind},
        error::Error,
        paginate::{PageChunk, PageToken},
        record::Record,
        source::RepositoryCatalog,
    };

    /// Serves single-page listings; accounts without an entry fail.
    #[derive(Default,)]
    struct StaticCatalog
    {
        starred: HashMap<String, Vec<Record,>,>,
        orgs:    HashMap<String, Vec<Record,>,>,
    }

    fn page(records: Option<&Vec<Record,>,>, account: &str,) -> Result<PageChunk<Record,>, Error,>
    {
        records
            .map(|items| PageChunk {
                items: items.clone(), next: None,
            },)
            .ok_or_else(|| Error::service(format!("unknown account {account}"),),)
    }

    #[async_trait]
    impl RepositoryCatalog for StaticCatalog
    {
        async fn starred_by(
            &self,
            user: &str,
            _page: PageToken,
        ) -> Result<PageChunk<Record,>, Error,>
        {
            page(self.starred.get(user,), user,)
        }

        async fn owned_by_org(
            &self,
            org: &str,
            _page: PageToken,
        ) -> Result<PageChunk<Record,>, Error,>
        {
            page(self.orgs.get(org,), org,)
        }
    }

    fn record(name: &str, language: &str,) -> Record
    {
        Record {
            full_name: format!("octo/{name}"),
            name: name.to_owned(),
            language: language.to_owned(),
            url: format!("https://github.com/octo/{name}"),
            ..Record::default()
        }
    }

    fn catalog() -> StaticCatalog
    {
        let mut catalog = StaticCatalog::default();
        catalog
            .starred
            .insert("octocat".to_owned(), vec![record("b-repo", "Go",), record("A-repo", "Go",)],);
        catalog.orgs.insert("acme".to_owned(), vec![record("widget", "",)],);
        catalog
    }

    #[tokio::test]
    async fn routes_documents_with_designators()
    {
        let catalog = catalog();
        let targets = vec![
            Target::new("octocat", TargetKind::User, "stars.md",),
            Target::new("acme", TargetKind::Organization, "acme.md",),
        ];

        let collection = Collector::new(&catalog, "publisher",).collect(&targets,).await;

        assert!(collection.unrouted.is_empty());
        let stars = collection.publish.get("stars.md",).expect("stars document",);
        assert!(stars.contains("- [Go](#go) (2)"));
        assert!(stars.find("octo/A-repo",) < stars.find("octo/b-repo",));
        let acme = collection.publish.get("acme.md",).expect("acme document",);
        assert!(acme.starts_with("# acme Repositories"));
        assert!(acme.contains("- [Others](#others) (1)"));
    }

    #[tokio::test]
    async fn documents_without_designator_are_unrouted()
    {
        let catalog = catalog();
        let targets = vec![Target::new("octocat", TargetKind::User, "",)];

        let collection = Collector::new(&catalog, "publisher",).collect(&targets,).await;

        assert!(collection.publish.is_empty());
        assert_eq!(collection.unrouted.len(), 1);
        assert!(collection.unrouted[0].contains("2 starred repositories"));
    }

    #[tokio::test]
    async fn failing_source_yields_empty_unrouted_entry_and_continues()
    {
        let catalog = catalog();
        let targets = vec![
            Target::new("nobody", TargetKind::User, "nobody.md",),
            Target::new("acme", TargetKind::Organization, "acme.md",),
        ];

        let collection = Collector::new(&catalog, "publisher",).collect(&targets,).await;

        assert_eq!(collection.unrouted, vec![String::new()]);
        assert_eq!(collection.publish.keys().collect::<Vec<_,>>(), vec!["acme.md"]);
    }

    #[tokio::test]
    async fn limit_caps_records_per_target()
    {
        let catalog = catalog();
        let targets = vec![Target::new("octocat", TargetKind::User, "stars.md",)];

        let collection = Collector::new(&catalog, "publisher",)
            .with_limit(Some(1,),)
            .collect(&targets,)
            .await;

        let stars = collection.publish.get("stars.md",).expect("stars document",);
        assert!(stars.contains("- [Go](#go) (1)"));
        assert!(stars.contains("octo/b-repo"));
        assert!(!stars.contains("octo/A-repo"));
    }

    #[tokio::test]
    async fn later_designator_overwrites_earlier_one()
    {
        let catalog = catalog();
        let targets = vec![
            Target::new("octocat", TargetKind::User, "same.md",),
            Target::new("acme", TargetKind::Organization, "same.md",),
        ];

        let collection = Collector::new(&catalog, "publisher",).collect(&targets,).await;

        assert_eq!(collection.publish.len(), 1);
        assert!(collection.publish["same.md"].starts_with("# acme Repositories"));
    }
}
