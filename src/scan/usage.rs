//! Consumers of the common directory across the rest of the project.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::imports::analyze_file;
use super::{is_source_file, relative_key, UsageEntry};
use crate::context::ServiceContext;
use crate::gather::Gathered;

/// Renders a directory path as the dotted module prefix imports use.
///
/// `sth/robert_common`, `sth\robert_common`, and `./sth/robert_common/` all
/// become `sth.robert_common`.
#[must_use]
pub fn dotted_module_path(target_dir: &str) -> String {
    let trimmed = target_dir.strip_prefix("./").or_else(|| target_dir.strip_prefix(".\\"));
    trimmed
        .unwrap_or(target_dir)
        .trim_end_matches(['/', '\\'])
        .replace(['/', '\\'], ".")
}

/// Returns `true` if an import's module path textually contains `dotted`.
#[must_use]
pub fn references_target(module: &str, dotted: &str) -> bool {
    !dotted.is_empty() && module.contains(dotted)
}

/// Finds every source file outside `target_dir` that imports from it, keyed
/// by path relative to `root`.
///
/// The target directory and `.git` are pruned from the walk, so files inside
/// the common directory can never show up as consumers. Files with no
/// matching import are left out entirely.
pub fn find_usages(
    ctx: &ServiceContext,
    root: &Path,
    target_dir: &Path,
    extensions: &[String],
) -> Gathered<BTreeMap<String, UsageEntry>> {
    let dotted = dotted_module_path(&target_dir.to_string_lossy());
    let skip: Vec<PathBuf> = vec![root.join(target_dir), root.join(".git")];

    let files = match ctx.fs.walk_files(root, &skip) {
        Ok(files) => files,
        Err(e) => {
            return Gathered::degraded(
                BTreeMap::new(),
                format!("Could not scan codebase for usage patterns: {e}"),
            )
        }
    };

    let mut result = Gathered::ok(BTreeMap::new());
    for path in files.iter().filter(|p| is_source_file(p, extensions)) {
        let matched: Vec<_> = analyze_file(ctx.fs.as_ref(), path)
            .drain_into(&mut result.diagnostics)
            .into_iter()
            .filter(|record| references_target(&record.module, &dotted))
            .collect();
        if matched.is_empty() {
            continue;
        }
        debug!(path = %path.display(), matches = matched.len(), "found consumer");
        result.value.insert(relative_key(path, root), UsageEntry::new(matched));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{disk_context, write_file, FakeGit};

    fn py() -> Vec<String> {
        vec!["py".to_string()]
    }

    #[test]
    fn dotted_path_accepts_either_separator() {
        assert_eq!(dotted_module_path("sth/robert_common"), "sth.robert_common");
        assert_eq!(dotted_module_path("sth\\robert_common"), "sth.robert_common");
        assert_eq!(dotted_module_path("./sth/robert_common/"), "sth.robert_common");
        assert_eq!(dotted_module_path("common"), "common");
    }

    #[test]
    fn root_level_consumer_is_found() {
        let root = tempfile::tempdir().unwrap();
        write_file(root.path(), "targetdir/sub.py", "def thing(): pass\n");
        write_file(root.path(), "app.py", "from targetdir.sub import thing\nimport os\n");
        let ctx = disk_context(FakeGit::at("abc"));

        let usages = find_usages(&ctx, root.path(), Path::new("targetdir"), &py());

        assert!(usages.is_clean());
        assert_eq!(usages.value.len(), 1);
        let entry = &usages.value["app.py"];
        assert_eq!(entry.match_count, 1);
        assert_eq!(entry.matched_imports[0].module, "targetdir.sub");
    }

    #[test]
    fn files_inside_target_are_never_consumers() {
        let root = tempfile::tempdir().unwrap();
        write_file(
            root.path(),
            "sth/robert_common/utils.py",
            "from sth.robert_common.base import X\n",
        );
        write_file(
            root.path(),
            "src/common/example_app.py",
            "from sth.robert_common.utils import shared_logger, CommonBase\n",
        );
        let ctx = disk_context(FakeGit::at("abc"));

        let usages = find_usages(&ctx, root.path(), Path::new("sth/robert_common"), &py());

        let keys: Vec<&str> = usages.value.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["src/common/example_app.py"]);
        assert_eq!(
            usages.value["src/common/example_app.py"].matched_imports[0].items,
            Some(vec!["shared_logger".to_string(), "CommonBase".to_string()])
        );
    }

    #[test]
    fn files_without_matches_are_omitted() {
        let root = tempfile::tempdir().unwrap();
        write_file(root.path(), "common/a.py", "");
        write_file(root.path(), "other.py", "import os\nfrom collections import deque\n");
        write_file(root.path(), "readme.md", "from common import a\n");
        let ctx = disk_context(FakeGit::at("abc"));

        let usages = find_usages(&ctx, root.path(), Path::new("common"), &py());

        assert!(usages.value.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_consumers_are_found() {
        let root = tempfile::tempdir().unwrap();
        write_file(root.path(), "common/util.py", "");
        write_file(root.path(), "vendor/real.py", "from common.util import tidy\n");
        std::os::unix::fs::symlink(
            root.path().join("vendor/real.py"),
            root.path().join("app_link.py"),
        )
        .unwrap();
        let ctx = disk_context(FakeGit::at("abc"));

        let usages = find_usages(&ctx, root.path(), Path::new("common"), &py());

        let keys: Vec<&str> = usages.value.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["app_link.py", "vendor/real.py"]);
    }

    #[test]
    fn git_directory_is_not_walked() {
        let root = tempfile::tempdir().unwrap();
        write_file(root.path(), ".git/hooks/hook.py", "import common.a\n");
        let ctx = disk_context(FakeGit::at("abc"));

        let usages = find_usages(&ctx, root.path(), Path::new("common"), &py());

        assert!(usages.value.is_empty());
    }

    #[test]
    fn unwalkable_root_degrades_to_empty() {
        let root = tempfile::tempdir().unwrap();
        let ctx = disk_context(FakeGit::at("abc"));

        let usages = find_usages(&ctx, &root.path().join("missing"), Path::new("common"), &py());

        assert!(usages.value.is_empty());
        assert!(usages.diagnostics[0].contains("Could not scan codebase"));
    }
}
