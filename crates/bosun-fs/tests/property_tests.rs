use bosun_fs::workspace::absolute;
use proptest::prelude::*;
use std::path::{Component, PathBuf};

proptest! {
    #[test]
    fn absolute_paths_are_lexically_clean(segments in prop::collection::vec("[a-z]{1,6}|\\.|\\.\\.", 0..12)) {
        let mut raw = PathBuf::from("/");
        for segment in &segments {
            raw.push(segment);
        }

        let cleaned = absolute(&raw);

        prop_assert!(cleaned.is_absolute());
        prop_assert!(cleaned
            .components()
            .all(|c| !matches!(c, Component::CurDir | Component::ParentDir)));
        // Cleaning is idempotent
        prop_assert_eq!(absolute(&cleaned), cleaned.clone());
        // Depth never exceeds the number of named segments
        let named = segments.iter().filter(|s| s.as_str() != "." && s.as_str() != "..").count();
        prop_assert!(cleaned.components().count() <= named + 1);
    }
}
