//! Variable substitution and the small file loaders used by events.
//!
//! Event titles and messages may reference `$NAME` or `${NAME}`. Values come
//! from the user's YAML variable file first, then from the process
//! environment. Unknown references are left exactly as written.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ResourceError;

/// Flat variable mapping loaded from a YAML file.
pub type Variables = BTreeMap<String, String>;

/// Replaces `$NAME` and `${NAME}` references using `vars`, then the process
/// environment.
///
/// # Example
///
/// ```
/// use cycloid_resource::vars::{Variables, substitute};
///
/// let vars = Variables::from([(String::from("APP"), String::from("shop"))]);
/// assert_eq!(substitute("deployed ${APP}", &vars), "deployed shop");
/// ```
#[must_use]
pub fn substitute(text: &str, vars: &Variables) -> String {
    substitute_with(text, vars, |name| std::env::var(name).ok())
}

/// Replaces references using `vars`, then `fallback`.
///
/// A reference whose name is in neither source is copied to the output
/// unchanged, braces included.
#[must_use]
pub fn substitute_with<F>(text: &str, vars: &Variables, fallback: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(position) = rest.find('$') {
        let (head, tail) = rest.split_at(position);
        result.push_str(head);
        let Some(reference) = parse_reference(tail) else {
            result.push('$');
            rest = tail.get(1..).unwrap_or_default();
            continue;
        };
        match vars
            .get(reference.name)
            .cloned()
            .or_else(|| fallback(reference.name))
        {
            Some(value) => result.push_str(&value),
            None => result.push_str(reference.token),
        }
        rest = tail.get(reference.token.len()..).unwrap_or_default();
    }
    result.push_str(rest);
    result
}

/// A `$NAME` or `${NAME}` reference at the start of a string.
struct Reference<'a> {
    name: &'a str,
    token: &'a str,
}

/// Parses the reference starting at the `$` that begins `tail`.
fn parse_reference(tail: &str) -> Option<Reference<'_>> {
    let after = tail.strip_prefix('$')?;
    if let Some(braced) = after.strip_prefix('{') {
        let end = braced.find('}')?;
        let name = braced.get(..end)?;
        if name.is_empty() || name_length(name) != name.len() {
            return None;
        }
        return Some(Reference {
            name,
            token: tail.get(..end + 3)?,
        });
    }
    let length = name_length(after);
    if length == 0 {
        return None;
    }
    Some(Reference {
        name: after.get(..length)?,
        token: tail.get(..=length)?,
    })
}

/// Length of the `[A-Za-z_][A-Za-z0-9_]*` prefix of `text`.
fn name_length(text: &str) -> usize {
    let mut bytes = text.bytes();
    match bytes.next() {
        Some(first) if first == b'_' || first.is_ascii_alphabetic() => {
            1 + bytes
                .take_while(|byte| *byte == b'_' || byte.is_ascii_alphanumeric())
                .count()
        }
        _ => 0,
    }
}

/// Loads a YAML file holding a flat string-to-string mapping.
///
/// # Errors
///
/// Returns [`ResourceError::ReadFile`] when the file cannot be read and
/// [`ResourceError::VarsFile`] when it is not a flat mapping.
pub fn load_vars_file(path: &Path) -> Result<Variables, ResourceError> {
    let text = read_file(path, "variable file")?;
    serde_saphyr::from_str::<Variables>(&text).map_err(|err| ResourceError::VarsFile {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Reads a text file verbatim.
///
/// # Errors
///
/// Returns [`ResourceError::ReadFile`] when the file cannot be read.
pub fn read_text_file(path: &Path) -> Result<String, ResourceError> {
    read_file(path, "message file")
}

fn read_file(path: &Path, what: &'static str) -> Result<String, ResourceError> {
    fs::read_to_string(path).map_err(|source| ResourceError::ReadFile {
        what,
        path: path.to_path_buf(),
        source: Arc::new(source),
    })
}

/// Resolves a user-supplied path against the step directory.
#[must_use]
pub fn resolve_path(directory: &Path, raw: &str) -> PathBuf {
    let candidate = Path::new(raw);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        directory.join(candidate)
    }
}
