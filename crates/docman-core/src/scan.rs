//! Filesystem scanner building directory trees of documents

use crate::directory::Directory;
use crate::document::Document;
use crate::error::Result;
use chrono::{DateTime, Local, NaiveDate};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

/// Walks a directory on disk and records every file as a document.
///
/// Document paths are relative to the root and always use `/` separators.
pub struct DirectoryScanner {
    root: PathBuf,
}

impl DirectoryScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the tree below the root.
    ///
    /// Fails only if the root itself cannot be read; unreadable entries below
    /// it are skipped.
    pub fn scan(&self) -> Result<Directory> {
        let root_name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Surface a missing or unreadable root as an error
        fs::read_dir(&self.root)?;

        let mut root = Directory::new("", root_name);
        self.scan_into(&mut root)?;

        tracing::debug!(
            "Scanned {:?}: {} documents",
            self.root,
            root.all_documents().len()
        );
        Ok(root)
    }

    fn scan_into(&self, root: &mut Directory) -> Result<()> {
        // (directory on disk, index path from root to its Directory node)
        let mut to_scan: Vec<(PathBuf, Vec<usize>)> = vec![(self.root.clone(), Vec::new())];

        while let Some((dir_path, indices)) = to_scan.pop() {
            let entries = match fs::read_dir(&dir_path) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Skipping unreadable directory {:?}: {}", dir_path, e);
                    continue;
                }
            };

            let node = node_at(root, &indices);
            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!("Skipping entry in {:?}: {}", dir_path, e);
                        continue;
                    }
                };
                let path = entry.path();
                let Some(relative) = self.relative_path(&path) else {
                    tracing::warn!("Skipping non UTF-8 path {:?}", path);
                    continue;
                };
                let name = entry.file_name().to_string_lossy().into_owned();

                let metadata = match entry.metadata() {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        tracing::warn!("Skipping {:?}: {}", path, e);
                        continue;
                    }
                };

                if metadata.is_dir() {
                    node.directories.push(Directory::new(relative, name));
                    let mut child = indices.clone();
                    child.push(node.directories.len() - 1);
                    to_scan.push((path, child));
                } else {
                    match Document::new(name, relative) {
                        Ok(doc) => {
                            let doc = match creation_date(&metadata) {
                                Some(date) => doc.with_date(date),
                                None => doc,
                            };
                            node.documents.push(doc);
                        }
                        Err(e) => tracing::warn!("Skipping {:?}: {}", path, e),
                    }
                }
            }
        }

        Ok(())
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
        Some(parts?.join("/"))
    }
}

fn node_at<'a>(root: &'a mut Directory, indices: &[usize]) -> &'a mut Directory {
    indices
        .iter()
        .fold(root, |dir, &i| &mut dir.directories[i])
}

/// Creation date of a file, falling back to its modification date
fn creation_date(metadata: &Metadata) -> Option<NaiveDate> {
    let time = metadata.created().or_else(|_| metadata.modified()).ok()?;
    Some(DateTime::<Local>::from(time).date_naive())
}
