use crate::rename_list::{RenameList, RenamePair};
use std::collections::HashMap;

/// Lookup table built from a [`RenameList`].
///
/// When an old path appears more than once the first pair wins; later ones
/// are kept in `shadowed` so they can be reported.
#[derive(Debug, Clone, Default)]
pub struct RenameRules {
    by_old: HashMap<String, String>,
    longest: usize,
    shadowed: Vec<RenamePair>,
}

/// A rule applied to the first `len` components of a dotted name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'r> {
    pub len: usize,
    pub new: &'r str,
}

impl RenameRules {
    pub fn new(list: &RenameList) -> Self {
        let mut rules = Self::default();
        for pair in list.pairs() {
            if rules.by_old.contains_key(&pair.old) {
                rules.shadowed.push(pair.clone());
                continue;
            }
            rules.longest = rules.longest.max(pair.old.split('.').count());
            rules.by_old.insert(pair.old.clone(), pair.new.clone());
        }
        rules
    }

    pub fn is_empty(&self) -> bool {
        self.by_old.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_old.len()
    }

    pub fn shadowed(&self) -> &[RenamePair] {
        &self.shadowed
    }

    /// Longest rule whose old path equals a leading run of whole components
    pub fn lookup<S: AsRef<str>>(&self, components: &[S]) -> Option<RuleMatch<'_>> {
        let max = components.len().min(self.longest);
        (1..=max).rev().find_map(|len| {
            let prefix = components[..len]
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(".");
            self.by_old
                .get(&prefix)
                .map(|new| RuleMatch { len, new: new.as_str() })
        })
    }

    /// Rule whose old path is exactly `path`
    pub fn exact(&self, path: &str) -> Option<&str> {
        self.by_old.get(path).map(String::as_str)
    }
}
