use crate::error::RenamerError;
use crate::module_path::module_pairs;
use crate::rename_list::RenameList;
use crate::vcs::VersionControl;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// What changed between two branch states
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Branch holding the modifications
    pub branch: String,
    /// Branch the modifications are compared against
    pub compare_with: String,
    /// Every file move git reported, modules or not
    pub file_moves: Vec<(PathBuf, PathBuf)>,
    pub list: RenameList,
}

/// Compare `branch` (default: the checked-out one) against `compare_with`
/// and derive the module moves between them.
pub fn analyze_modifications<V: VersionControl + ?Sized>(
    vcs: &V,
    compare_with: &str,
    branch: Option<&str>,
) -> Result<Analysis> {
    let branch = match branch {
        Some(name) => name.to_string(),
        None => vcs
            .current_branch()
            .context("Failed to determine the current branch")?,
    };

    for name in [branch.as_str(), compare_with] {
        if !vcs.branch_exists(name)? {
            return Err(RenamerError::BranchNotFound(name.to_string()).into());
        }
    }

    let file_moves = vcs
        .renamed_files(compare_with, &branch)
        .with_context(|| format!("Failed to diff {} against {}", branch, compare_with))?;
    let list = RenameList::new(module_pairs(&file_moves));

    Ok(Analysis {
        branch,
        compare_with: compare_with.to_string(),
        file_moves,
        list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename_list::RenamePair;
    use std::cell::RefCell;

    struct FakeVcs {
        current: &'static str,
        branches: Vec<&'static str>,
        moves: Vec<(&'static str, &'static str)>,
        diffed: RefCell<Vec<(String, String)>>,
    }

    impl FakeVcs {
        fn new(moves: Vec<(&'static str, &'static str)>) -> Self {
            Self {
                current: "feature",
                branches: vec!["master", "feature", "other"],
                moves,
                diffed: RefCell::new(Vec::new()),
            }
        }
    }

    impl VersionControl for FakeVcs {
        fn current_branch(&self) -> Result<String> {
            Ok(self.current.to_string())
        }

        fn branch_exists(&self, name: &str) -> Result<bool> {
            Ok(self.branches.contains(&name))
        }

        fn renamed_files(&self, base: &str, target: &str) -> Result<Vec<(PathBuf, PathBuf)>> {
            self.diffed
                .borrow_mut()
                .push((base.to_string(), target.to_string()));
            Ok(self
                .moves
                .iter()
                .map(|(a, b)| (PathBuf::from(a), PathBuf::from(b)))
                .collect())
        }
    }

    #[test]
    fn test_defaults_to_current_branch() {
        let vcs = FakeVcs::new(vec![("home/room.py", "home/basic_material.py")]);
        let analysis = analyze_modifications(&vcs, "master", None).unwrap();

        assert_eq!(analysis.branch, "feature");
        assert_eq!(
            vcs.diffed.borrow().as_slice(),
            &[("master".to_string(), "feature".to_string())]
        );
        assert_eq!(
            analysis.list.pairs(),
            &[RenamePair::new("home.room", "home.basic_material")]
        );
    }

    #[test]
    fn test_explicit_branch() {
        let vcs = FakeVcs::new(vec![]);
        let analysis = analyze_modifications(&vcs, "master", Some("other")).unwrap();
        assert_eq!(analysis.branch, "other");
        assert_eq!(vcs.diffed.borrow()[0].1, "other");
    }

    #[test]
    fn test_no_renames_is_empty_list() {
        let vcs = FakeVcs::new(vec![]);
        let analysis = analyze_modifications(&vcs, "master", None).unwrap();
        assert!(analysis.list.is_empty());
    }

    #[test]
    fn test_non_module_moves_are_kept_out_of_list() {
        let vcs = FakeVcs::new(vec![
            ("README.md", "docs/README.md"),
            ("home/room.py", "home/basic_material.py"),
        ]);
        let analysis = analyze_modifications(&vcs, "master", None).unwrap();
        assert_eq!(analysis.file_moves.len(), 2);
        assert_eq!(analysis.list.len(), 1);
    }

    #[test]
    fn test_missing_target_branch() {
        let vcs = FakeVcs::new(vec![]);
        let err = analyze_modifications(&vcs, "master", Some("nope")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RenamerError>(),
            Some(RenamerError::BranchNotFound(name)) if name == "nope"
        ));
        assert!(vcs.diffed.borrow().is_empty());
    }

    #[test]
    fn test_missing_compare_branch() {
        let vcs = FakeVcs::new(vec![]);
        let err = analyze_modifications(&vcs, "main", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RenamerError>(),
            Some(RenamerError::BranchNotFound(name)) if name == "main"
        ));
    }
}
