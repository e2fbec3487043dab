// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Context filters for the export/UI layer.
//!
//! Matching is substring-based and case-insensitive. Values within one
//! field are OR-ed, fields are AND-ed: a context passes when, for every
//! non-empty field, at least one of its values matches.

/// Filter over resolved contexts
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextFilter {
    /// Substrings matched against the door/space type name
    pub type_names: Vec<String>,
    /// Substrings matched against the resolved storey name
    pub storeys: Vec<String>,
    /// Substrings matched against the decimal element id or global id
    pub ids: Vec<String>,
}

impl ContextFilter {
    /// A filter that passes everything
    pub fn any() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.type_names.is_empty() && self.storeys.is_empty() && self.ids.is_empty()
    }

    /// Test a context described by its type name, storey, and ids.
    /// `None` values only match when the corresponding field is empty.
    pub fn matches(
        &self,
        type_name: Option<&str>,
        storey: Option<&str>,
        id: u64,
        global_id: Option<&str>,
    ) -> bool {
        field_matches(&self.type_names, type_name)
            && field_matches(&self.storeys, storey)
            && id_field_matches(&self.ids, id, global_id)
    }
}

fn field_matches(patterns: &[String], value: Option<&str>) -> bool {
    if patterns.is_empty() {
        return true;
    }
    let Some(value) = value else { return false };
    let value = value.to_ascii_lowercase();
    patterns
        .iter()
        .any(|p| value.contains(&p.to_ascii_lowercase()))
}

fn id_field_matches(patterns: &[String], id: u64, global_id: Option<&str>) -> bool {
    if patterns.is_empty() {
        return true;
    }
    let id_str = id.to_string();
    let global = global_id.map(|g| g.to_ascii_lowercase());
    patterns.iter().any(|p| {
        let p = p.to_ascii_lowercase();
        id_str.contains(&p) || global.as_deref().is_some_and(|g| g.contains(&p))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_passes_everything() {
        let f = ContextFilter::any();
        assert!(f.matches(None, None, 1, None));
        assert!(f.matches(Some("Door 90"), Some("Level 2"), 42, None));
    }

    #[test]
    fn or_within_field_and_across_fields() {
        let f = ContextFilter {
            type_names: vec!["fire".into(), "entry".into()],
            storeys: vec!["level 2".into()],
            ids: vec![],
        };
        // type matches (OR), storey matches -> pass
        assert!(f.matches(Some("Entry Door"), Some("LEVEL 2"), 1, None));
        // type matches but storey does not -> fail (AND)
        assert!(!f.matches(Some("Fire Door"), Some("Level 3"), 1, None));
        // storey matches but type does not -> fail
        assert!(!f.matches(Some("Closet Door"), Some("Level 2"), 1, None));
    }

    #[test]
    fn id_matches_decimal_or_global_id() {
        let f = ContextFilter {
            ids: vec!["3fa".into()],
            ..Default::default()
        };
        assert!(f.matches(None, None, 7, Some("1Xw3FAbc")));
        assert!(!f.matches(None, None, 7, Some("deadbeef")));

        let f = ContextFilter {
            ids: vec!["42".into()],
            ..Default::default()
        };
        assert!(f.matches(None, None, 1042, None));
    }

    #[test]
    fn missing_value_fails_non_empty_field() {
        let f = ContextFilter {
            storeys: vec!["level".into()],
            ..Default::default()
        };
        assert!(!f.matches(Some("Door"), None, 1, None));
    }
}
