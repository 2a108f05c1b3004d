//! Display-query normalization for record paths.
//!
//! Raw record paths have the form `category/dir/file.key1.key2`. The JSON
//! trees usually re-state the file path in their top-level key nesting, which
//! doubles segments ("elements/view.elements.view.name"). Normalization is a
//! best-effort, idempotent cleanup pass, not a formally specified grammar.

/// Produces the public display query for a raw record path.
///
/// The exact-prefix case (accessor chain re-states the dotted file path) is
/// stripped wholesale; irregular overlaps fall back to collapsing only
/// immediately-consecutive duplicate accessor segments.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    let Some(dot) = raw.find('.') else {
        // No embedded accessor: the file path is the query.
        return raw.to_string();
    };

    let file_path = &raw[..dot];
    let accessor = &raw[dot + 1..];
    let dotted_file_path = file_path.replace('/', ".");

    let clean = if let Some(rest) = accessor.strip_prefix(dotted_file_path.as_str()) {
        rest.strip_prefix('.').unwrap_or(rest).to_string()
    } else {
        collapse_consecutive(accessor)
    };

    if clean.is_empty() {
        file_path.to_string()
    } else {
        format!("{file_path}.{clean}")
    }
}

/// Removes immediately-consecutive duplicate segments ("common.common" ->
/// "common"), leaving everything else intact.
fn collapse_consecutive(accessor: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for part in accessor.split('.') {
        if kept.last() != Some(&part) {
            kept.push(part);
        }
    }
    kept.join(".")
}

/// Extends a traversal path with a child key, unless the key already appears
/// as a segment of the path (a directory named "common" holding a file whose
/// top key is also "common" would otherwise double up at the source).
#[must_use]
pub fn child_path(path: &str, key: &str) -> String {
    let dotted = path.replace('/', ".");
    if dotted.split('.').any(|segment| segment == key) {
        path.to_string()
    } else {
        format!("{path}.{key}")
    }
}
