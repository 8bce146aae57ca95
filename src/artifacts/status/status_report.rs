//! Status buckets and rendering
//!
//! `status` classifies every path into one of five presentation buckets and
//! prints them in a fixed order. The report here is plain data plus the
//! renderer; the command fills it from the index, the head commit, and the
//! working tree.

use std::collections::BTreeSet;

/// How a path with unstaged changes differs from its recorded version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnstagedChange {
    Modified,
    Deleted,
}

impl UnstagedChange {
    pub fn annotate(&self, name: &str) -> String {
        match self {
            UnstagedChange::Modified => format!("{name} (modified)"),
            UnstagedChange::Deleted => format!("{name} (deleted)"),
        }
    }
}

/// The five status sections. Sets keep every section sorted and free of
/// duplicates.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub current_branch: String,
    pub branches: BTreeSet<String>,
    pub staged: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub unstaged: BTreeSet<String>,
    pub untracked: BTreeSet<String>,
}

impl StatusReport {
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("=== Branches ===\n");
        for branch in &self.branches {
            if *branch == self.current_branch {
                out.push('*');
            }
            out.push_str(branch);
            out.push('\n');
        }

        let sections = [
            ("=== Staged Files ===", &self.staged),
            ("=== Removed Files ===", &self.removed),
            (
                "=== Modifications Not Staged For Commit ===",
                &self.unstaged,
            ),
            ("=== Untracked Files ===", &self.untracked),
        ];
        for (header, entries) in sections {
            out.push('\n');
            out.push_str(header);
            out.push('\n');
            for entry in entries {
                out.push_str(entry);
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_all_sections_in_fixed_order() {
        let report = StatusReport {
            current_branch: "main".to_string(),
            branches: BTreeSet::from(["main".to_string(), "other".to_string()]),
            staged: BTreeSet::from(["wug.txt".to_string()]),
            removed: BTreeSet::from(["gone.txt".to_string()]),
            unstaged: BTreeSet::from([UnstagedChange::Deleted.annotate("lost.txt")]),
            untracked: BTreeSet::from(["stray.txt".to_string()]),
        };

        assert_eq!(
            report.render(),
            "=== Branches ===\n\
             *main\n\
             other\n\
             \n\
             === Staged Files ===\n\
             wug.txt\n\
             \n\
             === Removed Files ===\n\
             gone.txt\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             lost.txt (deleted)\n\
             \n\
             === Untracked Files ===\n\
             stray.txt\n"
        );
    }

    #[test]
    fn empty_sections_still_print_their_headers() {
        let report = StatusReport {
            current_branch: "main".to_string(),
            branches: BTreeSet::from(["main".to_string()]),
            ..StatusReport::default()
        };

        let rendered = report.render();
        assert!(rendered.contains("=== Staged Files ===\n\n"));
        assert!(rendered.contains("=== Untracked Files ===\n"));
    }

    #[test]
    fn branches_sort_with_star_on_current() {
        let report = StatusReport {
            current_branch: "mid".to_string(),
            branches: BTreeSet::from([
                "zeta".to_string(),
                "mid".to_string(),
                "alpha".to_string(),
            ]),
            ..StatusReport::default()
        };

        let rendered = report.render();
        let branches_section: Vec<&str> = rendered.lines().take(4).collect();
        assert_eq!(
            branches_section,
            vec!["=== Branches ===", "alpha", "*mid", "zeta"]
        );
    }
}
