/// Canonical field name for an imported column header: invisible characters stripped,
/// whitespace and hyphens folded into single underscores, lowercased.
pub(crate) fn normalize_field_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "").replace('-', " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    collapsed.to_ascii_lowercase()
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_field_name(value)
}
