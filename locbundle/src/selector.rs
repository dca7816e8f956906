//! Locale entry selection.
//!
//! A bundle stores one directory per locale layer:
//!
//! ```text
//! root/default/
//! root/zh/
//! root/zh-CN/
//! root/zh-TW/
//! root/en/
//! root/en-US/
//! ```
//!
//! Given the entry names of a bundle and a [`Culture`], [`select`] returns the
//! entries of each layer. Matching is a substring test on the delimited
//! segment (`/default/`, `/zh/`, `/zh-CN/`), not a path parse, so membership
//! in one group says nothing about membership in another.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::culture::Culture;

/// Segment name of the culture-independent layer.
pub const DEFAULT_SEGMENT: &str = "default";

/// One fallback tier of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Entries under `/default/`.
    Default,
    /// Entries under the language code, e.g. `/zh/`.
    Family,
    /// Entries under the full culture name, e.g. `/zh-CN/`.
    Full,
}

impl Layer {
    /// Merge order; later layers overwrite earlier ones.
    pub const ORDER: [Layer; 3] = [Layer::Default, Layer::Family, Layer::Full];

    /// The delimited path segment this layer matches for `culture`.
    pub fn segment(self, culture: &Culture, default_segment: &str) -> String {
        match self {
            Layer::Default => format!("/{}/", default_segment),
            Layer::Family => format!("/{}/", culture.language_code()),
            Layer::Full => format!("/{}/", culture.full_name()),
        }
    }
}

impl Display for Layer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Default => write!(f, "default"),
            Layer::Family => write!(f, "family"),
            Layer::Full => write!(f, "full"),
        }
    }
}

/// Entry names selected for each layer of one culture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryGroups {
    pub default: BTreeSet<String>,
    pub family: BTreeSet<String>,
    pub full: BTreeSet<String>,
}

impl EntryGroups {
    pub fn get(&self, layer: Layer) -> &BTreeSet<String> {
        match layer {
            Layer::Default => &self.default,
            Layer::Family => &self.family,
            Layer::Full => &self.full,
        }
    }

    /// Iterates the groups in merge order.
    pub fn layers(&self) -> impl Iterator<Item = (Layer, &BTreeSet<String>)> {
        Layer::ORDER.into_iter().map(move |layer| (layer, self.get(layer)))
    }

    /// Total number of selections, counting a name once per group it is in.
    pub fn len(&self) -> usize {
        self.default.len() + self.family.len() + self.full.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Selects the entries of each layer using the `/default/` segment.
pub fn select<I, S>(names: I, culture: &Culture) -> EntryGroups
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    select_with_segment(names, culture, DEFAULT_SEGMENT)
}

/// Selects the entries of each layer with a custom name for the default segment.
pub fn select_with_segment<I, S>(names: I, culture: &Culture, default_segment: &str) -> EntryGroups
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let segments = Layer::ORDER.map(|layer| layer.segment(culture, default_segment));
    let mut groups = EntryGroups::default();

    for name in names {
        let name = name.as_ref();
        if name.contains(&segments[0]) {
            groups.default.insert(name.to_string());
        }
        if name.contains(&segments[1]) {
            groups.family.insert(name.to_string());
        }
        if name.contains(&segments[2]) {
            groups.full.insert(name.to_string());
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn culture(tag: &str) -> Culture {
        tag.parse().unwrap()
    }

    #[test]
    fn test_select_three_layers() {
        let names = [
            "root/default/a.json",
            "root/zh/b.json",
            "root/zh-CN/c.json",
            "root/zh-TW/d.json",
            "root/en/e.json",
        ];
        let groups = select(names, &culture("zh-CN"));

        assert_eq!(
            groups.default.iter().collect::<Vec<_>>(),
            ["root/default/a.json"]
        );
        assert_eq!(groups.family.iter().collect::<Vec<_>>(), ["root/zh/b.json"]);
        assert_eq!(groups.full.iter().collect::<Vec<_>>(), ["root/zh-CN/c.json"]);
    }

    #[test]
    fn test_segment_must_be_delimited() {
        // "zh-CN" and "english" must not satisfy "/zh/" or "/en/".
        let names = ["root/zh-CN/a.json", "root/english/b.json", "zh/c.json"];
        let groups = select(names, &culture("en-US"));
        assert!(groups.is_empty());

        let groups = select(names, &culture("zh"));
        assert!(groups.family.is_empty());
    }

    #[test]
    fn test_layers_iterate_in_merge_order() {
        let groups = select(["x/default/a", "x/en/b", "x/en-US/c"], &culture("en-US"));
        let order = groups.layers().map(|(layer, _)| layer).collect::<Vec<_>>();
        assert_eq!(order, Layer::ORDER);
    }

    #[test]
    fn test_name_can_match_several_groups() {
        let groups = select(["root/default/en/a.json"], &culture("en-US"));
        assert!(groups.default.contains("root/default/en/a.json"));
        assert!(groups.family.contains("root/default/en/a.json"));
        assert!(groups.full.is_empty());
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_language_only_culture_selects_same_family_and_full() {
        let groups = select(["root/fr/a.json"], &culture("fr"));
        assert_eq!(groups.family, groups.full);
    }

    #[test]
    fn test_custom_default_segment() {
        let names = ["root/default/a.json", "root/base/b.json"];
        let groups = select_with_segment(names, &culture("en"), "base");
        assert_eq!(groups.default.iter().collect::<Vec<_>>(), ["root/base/b.json"]);
    }

    #[test]
    fn test_empty_names() {
        let groups = select(Vec::<String>::new(), &culture("en-US"));
        assert!(groups.is_empty());
        assert_eq!(groups, EntryGroups::default());
    }
}
