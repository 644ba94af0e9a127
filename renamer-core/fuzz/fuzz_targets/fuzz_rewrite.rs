#![no_main]

use libfuzzer_sys::fuzz_target;
use renamer_core::rename_list::literal;
use renamer_core::{rewrite_source, RenameList, RenamePair, RenameRules};

fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };

    let _ = literal::parse(src);

    let rules = RenameRules::new(&RenameList::new(vec![
        RenamePair::new("home.room", "home.basic_material"),
        RenamePair::new("home", "house"),
        RenamePair::new("a.b", "c"),
    ]));
    let rewrite = rewrite_source(src, &rules);

    // Edits are sorted, in bounds and never overlap
    let mut last_end = 0;
    for edit in &rewrite.edits {
        assert!(edit.start >= last_end);
        assert!(edit.end <= src.len());
        assert_eq!(&src[edit.start..edit.end], edit.before);
        last_end = edit.end;
    }
    if rewrite.edits.is_empty() {
        assert!(rewrite.content.is_none());
    }
});
