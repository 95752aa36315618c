//! Asset key derivation
//!
//! Bundlers emit names shaped like `<name><delimiter><hash>.<ext>`. Cutting
//! the name at the first delimiter drops the hash, so the derived key stays
//! the same from one build to the next.

/// Portion of `file_name` before the first `delimiter`, or the whole name
/// when the delimiter does not occur.
///
/// - widget.abc123.js, "abc123" -> widget.
/// - vendor.js, "abc123" -> vendor.js
pub fn asset_stem<'a>(file_name: &'a str, delimiter: &str) -> &'a str {
    if delimiter.is_empty() {
        return file_name;
    }
    file_name
        .find(delimiter)
        .map_or(file_name, |idx| &file_name[..idx])
}

/// Manifest key for one artifact: `<prefix>/<stem>`
pub fn derive_asset_key(file_name: &str, delimiter: &str, prefix: &str) -> String {
    let stem = asset_stem(file_name, delimiter);
    if prefix.is_empty() {
        stem.to_string()
    } else if prefix.ends_with('/') {
        format!("{}{}", prefix, stem)
    } else {
        format!("{}/{}", prefix, stem)
    }
}

/// Derive keys for every artifact, dropping duplicates but keeping first-seen order
pub fn derive_asset_keys(file_names: &[String], delimiter: &str, prefix: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(file_names.len());
    for name in file_names {
        let key = derive_asset_key(name, delimiter, prefix);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}
