//! Naming conventions and helpers for tablesnap.
//!
//! This crate derives every name tablesnap writes to disk: the singular form
//! of a table name, synthetic fixture keys and default file names.

// ============================================================================
// Inflection
// ============================================================================

/// Singularize a table name.
///
/// Only the last `_`-separated segment is inflected, so compound table names
/// keep their prefix. The leading letter's case is kept.
///
/// # Examples
/// ```
/// use tablesnap_naming::singularize;
///
/// assert_eq!(singularize("widgets"), "widget");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("statuses"), "status");
/// assert_eq!(singularize("user_roles"), "user_role");
/// assert_eq!(singularize("people"), "person");
/// assert_eq!(singularize("status"), "status");
/// ```
pub fn singularize(name: &str) -> String {
    match name.rsplit_once('_') {
        Some((_, "")) => name.to_string(),
        Some((prefix, last)) => format!("{}_{}", prefix, singularize_word(last)),
        None => singularize_word(name),
    }
}

fn singularize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    pluralizer::pluralize(word, 1, false)
}

/// Convert snake_case to PascalCase.
///
/// Used to derive a default type name from a singular table name.
///
/// # Examples
/// ```
/// use tablesnap_naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("widget"), "Widget");
/// assert_eq!(to_pascal_case("special_widget"), "SpecialWidget");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize = true;
    for c in s.chars() {
        let is_separator = c == '_' || c == '-';
        if is_separator {
            capitalize = true;
            continue;
        }
        let ch = if capitalize {
            c.to_ascii_uppercase()
        } else {
            c
        };
        capitalize = false;
        result.push(ch);
    }
    result
}

// ============================================================================
// Fixture Keys
// ============================================================================

/// Width that fixture key numbers are zero-padded to.
pub const FIXTURE_KEY_WIDTH: usize = 5;

/// Generate the fixture key for a record.
/// Format: {singular}_{id:05}
///
/// # Examples
/// ```
/// use tablesnap_naming::build_fixture_key;
///
/// assert_eq!(build_fixture_key("widget", 7), "widget_00007");
/// ```
pub fn build_fixture_key(singular: &str, id: i64) -> String {
    format!("{}_{:0width$}", singular, id, width = FIXTURE_KEY_WIDTH)
}

/// Generate the fixture key for the row at `index` of a join table.
/// Format: join_{index:05}
pub fn build_join_fixture_key(index: usize) -> String {
    format!("join_{:0width$}", index, width = FIXTURE_KEY_WIDTH)
}

/// Generate the key of the `n`th (1-based) skeleton record.
/// Format: record_{n}
pub fn build_skeleton_key(n: usize) -> String {
    format!("record_{}", n)
}

// ============================================================================
// File Naming
// ============================================================================

/// File name for a table's data in the given extension.
/// Format: {table}.{ext}
pub fn build_table_file_name(table: &str, ext: &str) -> String {
    format!("{}.{}", table, ext)
}
