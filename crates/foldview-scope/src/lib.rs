//! Per-rule containment predicates for project-tree folding.
//!
//! A [`RuleScope`] is built from one rule's glob pattern and answers
//! "does this file belong to the rule" once per visible tree node.
//! Matching is by file name only, with space-separated pattern tokens
//! OR'd together. Construction is cheap and never fails: invalid glob
//! tokens are dropped, and a rule with no usable tokens matches nothing.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use foldview_conf::{Rule, Settings};
use foldview_workspace::WorkspaceIndex;
use globset::{GlobBuilder, GlobMatcher};

/// Host-side lookup for fallback base directories.
///
/// When a file is not under any workspace module, the rule falls back to
/// the root of the project-structure unit owning the file, then to the
/// project root.
pub trait ProjectLayout: Send + Sync {
    /// Root of the project-structure unit owning `file`, if any.
    fn module_root_for(&self, file: &Utf8Path) -> Option<Utf8PathBuf>;

    /// The project root directory, if known.
    fn project_root(&self) -> Option<Utf8PathBuf>;
}

/// Containment predicate for one folding rule.
pub struct RuleScope {
    rule: String,
    patterns: Vec<GlobMatcher>,
    workspace: Arc<WorkspaceIndex>,
    layout: Arc<dyn ProjectLayout>,
}

impl RuleScope {
    #[must_use]
    pub fn new(
        pattern: &str,
        case_sensitive: bool,
        workspace: Arc<WorkspaceIndex>,
        layout: Arc<dyn ProjectLayout>,
    ) -> Self {
        Self {
            rule: pattern.to_string(),
            patterns: compile_patterns(pattern, case_sensitive),
            workspace,
            layout,
        }
    }

    /// Build the scope for a configured rule, taking case sensitivity
    /// from the settings (or the host default when unset).
    #[must_use]
    pub fn from_rule(
        rule: &Rule,
        settings: &Settings,
        workspace: Arc<WorkspaceIndex>,
        layout: Arc<dyn ProjectLayout>,
    ) -> Self {
        Self::new(
            &rule.pattern,
            settings.effective_case_sensitivity(),
            workspace,
            layout,
        )
    }

    /// Whether `file` belongs to this rule.
    ///
    /// The file's base directory must resolve (workspace module root,
    /// owning module root, or project root); without one the answer is
    /// `false`. Matching itself tests the file's name against each
    /// pattern token.
    #[must_use]
    pub fn contains(&self, file: &Utf8Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        if self.base_dir_for(file).is_none() {
            return false;
        }
        let Some(name) = file.file_name() else {
            return false;
        };

        self.patterns.iter().any(|matcher| matcher.is_match(name))
    }

    /// The directory this rule is scoped to for `file`: the most
    /// specific workspace module root containing it, else the owning
    /// module root, else the project root.
    #[must_use]
    pub fn base_dir_for(&self, file: &Utf8Path) -> Option<Utf8PathBuf> {
        self.workspace
            .find_workspace_root_for(file)
            .or_else(|| self.layout.module_root_for(file))
            .or_else(|| self.layout.project_root())
    }

    /// The rule's raw pattern string, used for UI labeling.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.rule
    }
}

impl std::fmt::Debug for RuleScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleScope").field("rule", &self.rule).finish()
    }
}

fn compile_patterns(rule: &str, case_sensitive: bool) -> Vec<GlobMatcher> {
    rule.split_whitespace()
        .filter_map(|token| {
            match GlobBuilder::new(token)
                .case_insensitive(!case_sensitive)
                .build()
            {
                Ok(glob) => Some(glob.compile_matcher()),
                Err(err) => {
                    tracing::debug!("skipping invalid glob token {token:?}: {err}");
                    None
                }
            }
        })
        .collect()
}
