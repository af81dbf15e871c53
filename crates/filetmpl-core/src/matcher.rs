//! Template discovery: which files are templates and where their output goes.
//!
//! A file is a template when its bare name (file name minus the last extension)
//! starts with the configured prefix and ends with the configured suffix. The
//! output keeps the directory and extension and drops both markers:
//!
//! ```text
//! prefix ""      suffix "-tmpl"   conf/app-tmpl.yaml   -> conf/app.yaml
//! prefix "pre_"  suffix "_suf"    pre_foo_suf.txt      -> foo.txt
//! ```

use std::path::PathBuf;

use crate::charset::Charset;
use crate::error::Result;
use crate::fileset::{is_hidden, relative_path, FileSet};
use crate::reporter::{Reporter, SkipReason};

/// Default suffix marking a template.
pub const DEFAULT_SUFFIX: &str = "-tmpl";

/// The naming convention plus the file set it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRule {
    pub file_prefix: String,
    pub file_suffix: String,
    pub files: FileSet,
    /// Scan sub-module directories too instead of excluding them.
    pub aggregate: bool,
    /// Sub-module directories declared by the enclosing project.
    pub modules: Vec<String>,
}

impl MatchRule {
    pub fn new(files: FileSet) -> Self {
        Self {
            file_prefix: String::new(),
            file_suffix: DEFAULT_SUFFIX.to_string(),
            files,
            aggregate: false,
            modules: Vec::new(),
        }
    }

    /// Output file name for `file_name`, or `None` if it is not a template.
    pub fn output_name(&self, file_name: &str) -> Option<String> {
        let (bare, extension) = match file_name.rsplit_once('.') {
            Some((bare, ext)) => (bare, Some(ext)),
            None => (file_name, None),
        };

        if !bare.starts_with(&self.file_prefix) || !bare.ends_with(&self.file_suffix) {
            return None;
        }
        if bare.len() < self.file_prefix.len() + self.file_suffix.len() {
            return None;
        }

        let logical = &bare[self.file_prefix.len()..bare.len() - self.file_suffix.len()];
        Some(match extension {
            Some(ext) => format!("{logical}.{ext}"),
            None => logical.to_string(),
        })
    }

    /// The file set with sub-module subtrees appended to the excludes,
    /// unless running in aggregate mode.
    pub fn effective_file_set(&self) -> FileSet {
        let mut files = self.files.clone();
        if !self.aggregate {
            for module in &self.modules {
                let module = module.trim_end_matches('/');
                if !module.is_empty() {
                    files.excludes.push(format!("{module}/**"));
                }
            }
        }
        files
    }

    fn overlaps(&self, file_name: &str) -> bool {
        let bare = file_name.rsplit_once('.').map_or(file_name, |(b, _)| b);
        bare.starts_with(&self.file_prefix)
            && bare.ends_with(&self.file_suffix)
            && bare.len() < self.file_prefix.len() + self.file_suffix.len()
    }
}

/// One file to render: source, destination, and the charset for both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTask {
    pub source: PathBuf,
    pub target: PathBuf,
    pub charset: Charset,
}

/// Turns a [`MatchRule`] into an ordered list of [`TemplateTask`]s.
pub struct FileMatcher<'a> {
    rule: &'a MatchRule,
    charset: Charset,
    reporter: &'a dyn Reporter,
}

impl<'a> FileMatcher<'a> {
    pub fn new(rule: &'a MatchRule, charset: Charset, reporter: &'a dyn Reporter) -> Self {
        Self {
            rule,
            charset,
            reporter,
        }
    }

    /// Scan the file set and return one task per template, sorted by source path.
    ///
    /// Fails only when the scan itself fails (missing root, bad pattern, walk error).
    pub fn discover(&self) -> Result<Vec<TemplateTask>> {
        let files = self.rule.effective_file_set();
        let mut tasks = Vec::new();

        for path in files.scan()? {
            let relative = relative_path(&files.directory, &path).unwrap_or_default();
            if is_hidden(&relative) {
                self.reporter.file_skipped(&path, SkipReason::Hidden);
                continue;
            }
            tracing::trace!(path = %path.display(), "scan");

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                self.reporter.file_skipped(&path, SkipReason::NonUtf8Name);
                continue;
            };

            match self.rule.output_name(file_name) {
                Some(output) => {
                    let target = path.with_file_name(output);
                    tasks.push(TemplateTask {
                        source: path,
                        target,
                        charset: self.charset,
                    });
                }
                None if self.rule.overlaps(file_name) => {
                    self.reporter.file_skipped(&path, SkipReason::Overlap);
                }
                None => {}
            }
        }

        tasks.sort_by(|a, b| a.source.cmp(&b.source));
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::reporter::testing::RecordingReporter;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "x").unwrap();
    }

    fn rule(prefix: &str, suffix: &str) -> MatchRule {
        let mut rule = MatchRule::new(FileSet::new("."));
        rule.file_prefix = prefix.to_string();
        rule.file_suffix = suffix.to_string();
        rule
    }

    fn discovered(rule: &MatchRule) -> Vec<(String, String)> {
        let reporter = RecordingReporter::default();
        let matcher = FileMatcher::new(rule, Charset::Utf8, &reporter);
        matcher
            .discover()
            .unwrap()
            .into_iter()
            .map(|t| {
                (
                    relative_path(&rule.files.directory, &t.source).unwrap(),
                    relative_path(&rule.files.directory, &t.target).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_default_suffix() {
        let r = rule("", "-tmpl");
        assert_eq!(r.output_name("foo-tmpl.yaml").as_deref(), Some("foo.yaml"));
    }

    #[test]
    fn test_prefix_and_suffix() {
        let r = rule("pre_", "_suf");
        assert_eq!(r.output_name("pre_foo_suf.txt").as_deref(), Some("foo.txt"));
    }

    #[test]
    fn test_non_matching_names() {
        let r = rule("pre_", "_suf");
        assert!(r.output_name("foo_suf.txt").is_none());
        assert!(r.output_name("pre_foo.txt").is_none());
        assert!(r.output_name("PRE_foo_suf.txt").is_none());
        // The suffix must sit before the extension, not inside it.
        assert!(rule("", "-tmpl").output_name("foo.yaml-tmpl").is_none());
    }

    #[test]
    fn test_only_last_extension_is_split() {
        let r = rule("", "-tmpl");
        assert_eq!(r.output_name("app.conf-tmpl.yaml").as_deref(), Some("app.conf.yaml"));
    }

    #[test]
    fn test_no_extension() {
        let r = rule("", "-tmpl");
        assert_eq!(r.output_name("Makefile-tmpl").as_deref(), Some("Makefile"));
    }

    #[test]
    fn test_empty_prefix_and_suffix_match_everything() {
        let r = rule("", "");
        assert_eq!(r.output_name("any.txt").as_deref(), Some("any.txt"));
    }

    #[test]
    fn test_overlapping_markers_are_not_candidates() {
        let r = rule("ab", "bc");
        assert!(r.output_name("abc.txt").is_none());
        assert!(r.overlaps("abc.txt"));
        assert_eq!(r.output_name("abbc.txt").as_deref(), Some(".txt"));
    }

    #[test]
    fn test_discover_pairs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "z-tmpl.txt");
        touch(dir.path(), "conf/app-tmpl.yaml");
        touch(dir.path(), "plain.txt");

        let mut r = rule("", "-tmpl");
        r.files = FileSet::new(dir.path());
        assert_eq!(
            discovered(&r),
            vec![
                ("conf/app-tmpl.yaml".to_string(), "conf/app.yaml".to_string()),
                ("z-tmpl.txt".to_string(), "z.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_discover_skips_hidden() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".git/config-tmpl");
        touch(dir.path(), ".env-tmpl.txt");
        touch(dir.path(), "ok-tmpl.txt");

        let mut r = rule("", "-tmpl");
        r.files = FileSet::new(dir.path());

        let reporter = RecordingReporter::default();
        let tasks = FileMatcher::new(&r, Charset::Utf8, &reporter).discover().unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].source.ends_with("ok-tmpl.txt"));

        // Hidden directories are pruned by the walk; hidden files are reported.
        let skipped = reporter.skipped.borrow();
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].0.ends_with(".env-tmpl.txt"));
        assert_eq!(skipped[0].1, SkipReason::Hidden);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_symlinked_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("real.txt"), "Hello ±name±").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link-tmpl.txt"))
            .unwrap();

        let mut r = rule("", "-tmpl");
        r.files = FileSet::new(dir.path());
        assert_eq!(
            discovered(&r),
            vec![("link-tmpl.txt".to_string(), "link.txt".to_string())]
        );
    }

    #[test]
    fn test_modules_excluded_unless_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "root-tmpl.txt");
        touch(dir.path(), "moduleA/inner-tmpl.txt");

        let mut r = rule("", "-tmpl");
        r.files = FileSet::new(dir.path());
        r.modules = vec!["moduleA".into()];

        let names: Vec<_> = discovered(&r).into_iter().map(|(s, _)| s).collect();
        assert_eq!(names, vec!["root-tmpl.txt"]);

        r.aggregate = true;
        let names: Vec<_> = discovered(&r).into_iter().map(|(s, _)| s).collect();
        assert_eq!(names, vec!["moduleA/inner-tmpl.txt", "root-tmpl.txt"]);
    }

    #[test]
    fn test_effective_file_set_keeps_configured_excludes() {
        let mut r = rule("", "-tmpl");
        r.files.excludes = vec!["target/**".into()];
        r.modules = vec!["api/".into(), "web".into()];
        assert_eq!(
            r.effective_file_set().excludes,
            vec!["target/**", "api/**", "web/**"]
        );
    }

    #[test]
    fn test_task_carries_charset() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a-tmpl.txt");

        let mut r = rule("", "-tmpl");
        r.files = FileSet::new(dir.path());
        let reporter = RecordingReporter::default();
        let tasks = FileMatcher::new(&r, Charset::Latin1, &reporter)
            .discover()
            .unwrap();
        assert_eq!(tasks[0].charset, Charset::Latin1);
    }
}
