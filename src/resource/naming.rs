//! Naming conventions for wire and type names.
//!
//! The API organizes resources by convention: collections use the plural
//! wire name (`maintenance_windows`), single resources the singular one
//! (`maintenance_window`), and declared kinds the title-cased form
//! (`MaintenanceWindow`). These transforms are the glue between the three.
//!
//! The singular/plural rules are heuristic. They are only trusted for the
//! resource vocabulary the API actually exposes, which the tests pin down
//! as a fixed table.

/// Convert a declaration-style type name to its wire form.
///
/// Examples: `MaintenanceWindow` -> `maintenance_window`
pub fn wire_name(name: &str) -> String {
    let mut wire = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                wire.push('_');
            }
            wire.extend(ch.to_lowercase());
        } else {
            wire.push(ch);
        }
    }
    wire
}

/// Convert a wire name back to its declaration-style form.
///
/// Examples: `maintenance_window` -> `MaintenanceWindow`
pub fn type_name(name: &str) -> String {
    name.split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Singular form of a plural wire name.
///
/// `ies` becomes `y`, otherwise a trailing `s` is dropped. Names without a
/// trailing `s` pass through unchanged.
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        return format!("{stem}y");
    }
    match name.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => name.to_string(),
    }
}

/// Plural form of a singular wire name.
///
/// `y` becomes `ies`, otherwise an `s` is appended. Names already ending in
/// `s` (e.g. `status`) pluralize to themselves, so singular and plural
/// collapse for them.
pub fn pluralize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix('y') {
        return format!("{stem}ies");
    }
    if name.ends_with('s') {
        return name.to_string();
    }
    format!("{name}s")
}
