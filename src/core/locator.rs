//! # Anchor Locator / 锚点定位器
//!
//! Finds the lines of a spec file on which runnable examples are declared:
//! `it`, `xit`, `it_behaves_like` and `xit_behaves_like`, each followed by whitespace.
//!
//! 查找规格文件中声明可运行示例的行：
//! `it`、`xit`、`it_behaves_like` 和 `xit_behaves_like`，且其后紧跟空白字符。

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::core::error::SplitError;
use crate::core::models::SpecFile;

static ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*x?(it|it_behaves_like)\s").expect("anchor pattern is valid"));

/// Returns the 1-indexed anchor lines of `text`, in file order.
///
/// Lines are split on `\n` only, so a `\r` left at the end of a line counts as the
/// whitespace that terminates the keyword.
pub fn anchors_in(text: &str) -> Vec<u32> {
    text.split('\n')
        .enumerate()
        .filter(|(_, line)| ANCHOR_RE.is_match(line))
        .map(|(i, _)| i as u32 + 1)
        .collect()
}

/// Reads a spec file and locates its anchors.
/// An unreadable file is fatal for the whole run.
///
/// 读取规格文件并定位其锚点。
/// 无法读取的文件对整个运行是致命的。
pub fn locate_anchors(path: &Path) -> Result<Vec<u32>, SplitError> {
    let bytes = fs::read(path).map_err(|source| SplitError::SpecRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(anchors_in(&String::from_utf8_lossy(&bytes)))
}

/// Locates anchors for every file, keeping the discovery order.
/// 为每个文件定位锚点，并保持发现顺序。
pub fn load_spec_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SpecFile>, SplitError> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let anchors = locate_anchors(path)?;
            tracing::debug!(path = %path.display(), anchors = anchors.len(), "located anchors");
            Ok(SpecFile::new(path, anchors))
        })
        .collect()
}
