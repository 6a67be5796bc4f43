// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Local write-out of rendered documents.
///
/// Used when no remote publish parameters are supplied. Each document is
/// written independently so one failing path does not prevent the others.
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::error::{self, Error};

/// Outcome of writing a publish set to disk.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Paths written successfully, in designator order.
    pub written:  Vec<PathBuf>,
    /// Errors for paths that could not be written.
    pub failures: Vec<Error>
}

impl WriteReport {
    /// Returns `true` when every document was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Writes every `designator → content` pair below `root`.
///
/// Designators are interpreted as paths relative to `root` unless absolute.
/// Missing parent directories are created.
///
/// # Example
///
/// ```no_run
/// use std::{collections::BTreeMap, path::Path};
///
/// use repo_digest::write_documents;
///
/// let mut documents = BTreeMap::new();
/// documents.insert("stars/octocat.md".to_owned(), "# Stars\n".to_owned());
/// let report = write_documents(Path::new("."), &documents);
/// assert!(report.is_complete());
/// ```
pub fn write_documents(root: &Path, documents: &BTreeMap<String, String>) -> WriteReport {
    let mut report = WriteReport::default();

    for (designator, content) in documents {
        let path = root.join(designator);
        match write_document(&path, content) {
            Ok(()) => {
                info!("Wrote {}", path.display());
                report.written.push(path);
            }
            Err(error) => {
                warn!("{error}");
                report.failures.push(error);
            }
        }
    }

    report
}

fn write_document(path: &Path, content: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|source| error::write_error(path, source))?;
    }

    fs::write(path, content).map_err(|source| error::write_error(path, source))
}
