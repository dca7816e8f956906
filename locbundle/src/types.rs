//! Core data types shared by parsers and the loader.

use std::collections::HashMap;

pub use serde_json::Value;

/// Localized key/value data. Parsers produce one per entry, and the loader
/// merges them into a single map per culture.
pub type LocalizedData = HashMap<String, Value>;

/// Copies every key of `fragment` into `target`, overwriting existing keys.
pub fn merge_into(target: &mut LocalizedData, fragment: LocalizedData) {
    target.extend(fragment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overwrites_existing_keys() {
        let mut target = LocalizedData::from([
            ("a".to_string(), json!(1)),
            ("b".to_string(), json!(1)),
        ]);
        let fragment = LocalizedData::from([
            ("b".to_string(), json!(2)),
            ("c".to_string(), json!(2)),
        ]);

        merge_into(&mut target, fragment);

        assert_eq!(target.len(), 3);
        assert_eq!(target["a"], json!(1));
        assert_eq!(target["b"], json!(2));
        assert_eq!(target["c"], json!(2));
    }

    #[test]
    fn test_merge_empty_fragment_keeps_target() {
        let mut target = LocalizedData::from([("a".to_string(), json!("x"))]);
        merge_into(&mut target, LocalizedData::new());
        assert_eq!(target.len(), 1);
    }
}
