use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ROOT_NAME: &str = "/";

/// Directory node in the structural view of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub name: String,
    pub files: Vec<String>,
    pub folders: Vec<FolderNode>,
}

#[derive(Default)]
struct PendingFolder {
    files: Vec<String>,
    folders: BTreeMap<String, PendingFolder>,
}

impl PendingFolder {
    fn finish(mut self, name: String) -> FolderNode {
        self.files.sort();
        FolderNode {
            name,
            files: self.files,
            folders: self
                .folders
                .into_iter()
                .map(|(child_name, child)| child.finish(child_name))
                .collect(),
        }
    }
}

impl FolderNode {
    /// Build the tree from forward-slash relative paths.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = PendingFolder::default();

        for path in paths {
            let segments: Vec<&str> = path
                .as_ref()
                .split('/')
                .filter(|segment| !segment.is_empty())
                .collect();
            let Some((file_name, folders)) = segments.split_last() else {
                continue;
            };

            let mut current = &mut root;
            for folder in folders {
                current = current.folders.entry((*folder).to_string()).or_default();
            }
            current.files.push((*file_name).to_string());
        }

        root.finish(ROOT_NAME.to_string())
    }

    /// Every file path under this node, relative to it, in tree order.
    pub fn flatten(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_paths("", &mut out);
        out
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for file in &self.files {
            out.push(format!("{prefix}{file}"));
        }
        for folder in &self.folders {
            folder.collect_paths(&format!("{prefix}{}/", folder.name), out);
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len() + self.folders.iter().map(FolderNode::file_count).sum::<usize>()
    }
}
