//! Minimal-abbreviation computation and name comparison.
//!
//! An abbreviation is the shortest prefix of a name that no sibling name
//! also starts with. Abbreviations are what allow `L Ima T=1` to resolve to
//! a `List Image` command: the catalog stores the minimal abbreviation of
//! every verb, noun and parameter so that help output can show the user how
//! short they can go.

use itertools::Itertools;

/// How names are compared during matching and abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Casing {
    Sensitive,
    #[default]
    Insensitive,
}

impl Casing {
    pub fn equals(self, left: &str, right: &str) -> bool {
        match self {
            Casing::Sensitive => left == right,
            Casing::Insensitive => left.to_lowercase() == right.to_lowercase(),
        }
    }

    pub fn starts_with(self, name: &str, prefix: &str) -> bool {
        match self {
            Casing::Sensitive => name.starts_with(prefix),
            Casing::Insensitive => name.to_lowercase().starts_with(&prefix.to_lowercase()),
        }
    }
}

/// Computes the minimal abbreviation of `name` amongst its `siblings`.
///
/// Siblings equal to `name` under the given casing are ignored, so a name
/// may appear in its own sibling list. When no prefix of `name` is unique
/// the full name is returned.
///
/// The scan is linear in the name length and quadratic in the sibling
/// count; sibling sets are expected to stay in the tens of entries.
///
/// # Examples
///
/// ```
/// use command_interpreter::{minimal_abbreviation, Casing};
///
/// let siblings = vec!["Image".to_string(), "Import".to_string()];
/// assert_eq!(minimal_abbreviation("Image", &siblings, Casing::Insensitive), "Ima");
/// assert_eq!(minimal_abbreviation("Import", &siblings, Casing::Insensitive), "Imp");
/// ```
pub fn minimal_abbreviation(name: &str, siblings: &[String], casing: Casing) -> String {
    let others: Vec<&String> = siblings
        .iter()
        .filter(|sibling| !casing.equals(sibling, name))
        .unique()
        .collect();

    let mut prefix = String::new();
    for character in name.chars() {
        prefix.push(character);
        if !others.iter().any(|other| casing.starts_with(other, &prefix)) {
            return prefix;
        }
    }

    name.to_string()
}

/// Splits a type name at its internal upper-case boundaries.
///
/// `"ListImageByType"` becomes `["List", "Image", "By", "Type"]`. The first
/// segment is used as the conventional verb, the second as the noun.
pub fn split_camel_case(name: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for (index, character) in name.chars().enumerate() {
        if index > 0 && character.is_uppercase() && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
        current.push(character);
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn single_letter_suffices_for_distinct_names() {
        let siblings = names(&["List", "Cleanup"]);
        assert_eq!(
            minimal_abbreviation("List", &siblings, Casing::Insensitive),
            "L"
        );
        assert_eq!(
            minimal_abbreviation("Cleanup", &siblings, Casing::Insensitive),
            "C"
        );
    }

    #[test]
    fn shared_prefix_extends_the_abbreviation() {
        let siblings = names(&["Image", "Import"]);
        assert_eq!(
            minimal_abbreviation("Image", &siblings, Casing::Insensitive),
            "Ima"
        );
        assert_eq!(
            minimal_abbreviation("Import", &siblings, Casing::Insensitive),
            "Imp"
        );
    }

    #[test]
    fn equal_siblings_are_excluded() {
        let siblings = names(&["Image", "Image", "image"]);
        assert_eq!(
            minimal_abbreviation("Image", &siblings, Casing::Insensitive),
            "I"
        );
    }

    #[test]
    fn name_that_prefixes_a_sibling_falls_back_to_full_name() {
        let siblings = names(&["Name", "Namespace"]);
        assert_eq!(
            minimal_abbreviation("Name", &siblings, Casing::Insensitive),
            "Name"
        );
        assert_eq!(
            minimal_abbreviation("Namespace", &siblings, Casing::Insensitive),
            "Names"
        );
    }

    #[test]
    fn empty_name_yields_empty_abbreviation() {
        let siblings = names(&["Image", ""]);
        assert_eq!(
            minimal_abbreviation("", &siblings, Casing::Insensitive),
            ""
        );
    }

    #[test]
    fn case_sensitive_comparison_distinguishes_casing() {
        let siblings = names(&["image"]);
        assert_eq!(
            minimal_abbreviation("Image", &siblings, Casing::Sensitive),
            "I"
        );
        assert_eq!(
            minimal_abbreviation("Image", &siblings, Casing::Insensitive),
            "Image"
        );
    }

    #[test]
    fn splits_at_upper_case_boundaries() {
        assert_eq!(
            split_camel_case("ListImageByType"),
            names(&["List", "Image", "By", "Type"])
        );
        assert_eq!(split_camel_case("Cleanup"), names(&["Cleanup"]));
        assert!(split_camel_case("").is_empty());
    }
}
