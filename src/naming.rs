//! Name conversions shared by tree building, path resolution and the view model

/// Suffix appended to every leaf component name
pub const VIEW_HELPER_SUFFIX: &str = "ViewHelper";

/// Uppercase the first character, leaving the rest untouched
pub fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character, leaving the rest untouched
pub fn lower_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Leaf label for the last segment of a dotted component name
pub fn leaf_name(segment: &str) -> String {
    format!("{}{}", upper_first(segment), VIEW_HELPER_SUFFIX)
}

/// `fluid_backend` -> `FluidBackend`
pub fn underscored_to_upper_camel(value: &str) -> String {
    value
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| upper_first(&part.to_lowercase()))
        .collect()
}
