//! # File System Operations Module / 文件系统操作模块
//!
//! This module discovers spec files from the paths given on the command line.
//! Directories are walked recursively; files are kept when they follow the
//! `*_spec*.rb` naming convention.
//!
//! 此模块从命令行给出的路径中发现规格文件。
//! 目录会被递归遍历；符合 `*_spec*.rb` 命名约定的文件会被保留。

use fs_extra::dir::get_dir_content;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::SplitError;

/// Checks whether a file name follows the spec naming convention.
///
/// # Arguments
/// * `path` - Path to check; only its file name is inspected
///
/// # Returns
/// `true` for `.rb` files whose name contains `_spec`
pub fn is_spec_file(path: &Path) -> bool {
    let is_ruby = path.extension().and_then(|e| e.to_str()) == Some("rb");
    let named_spec = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.contains("_spec"));
    is_ruby && named_spec
}

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or a discovery error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf, SplitError> {
    fs::canonicalize(path).map_err(|e| SplitError::Discovery {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Lists every spec file below `dir`, in walk order (path components compared lexically).
/// 列出 `dir` 下的所有规格文件，按遍历顺序（逐个路径组件按字典序比较）。
pub fn spec_files_in_dir(dir: &Path) -> Result<Vec<PathBuf>, SplitError> {
    let content = get_dir_content(dir).map_err(|e| SplitError::Discovery {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut files: Vec<PathBuf> = content
        .files
        .into_iter()
        .map(PathBuf::from)
        .filter(|p| is_spec_file(p))
        .collect();
    files.sort();
    Ok(files)
}

/// Resolves command-line paths into an ordered list of absolute spec file paths.
///
/// Arguments are processed in the order given. A file argument that does not follow
/// the naming convention is skipped.
///
/// 将命令行路径解析为有序的绝对规格文件路径列表。
pub fn discover_spec_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>, SplitError> {
    let mut files = Vec::new();
    for path in paths {
        let path = absolute_path(path.as_ref())?;
        if path.is_dir() {
            files.extend(spec_files_in_dir(&path)?);
        } else if is_spec_file(&path) {
            files.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping non-spec file");
        }
    }
    tracing::debug!(count = files.len(), "discovered spec files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_naming_convention() {
        assert!(is_spec_file(Path::new("spec/models/user_spec.rb")));
        assert!(is_spec_file(Path::new("user_spec_extra.rb")));
        assert!(!is_spec_file(Path::new("spec/spec_helper.rb")));
        assert!(!is_spec_file(Path::new("spec/user_spec.py")));
        assert!(!is_spec_file(Path::new("spec/user_spec")));
    }
}
