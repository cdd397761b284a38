//! Handling of escaped characters in instance names.

use std::borrow::Cow;

/// Unescape the bracket escapes (`\[`, `\]`) of a component instance name.
///
/// Other backslashes are left alone.
pub fn unescape_brackets(name: &str) -> Cow<'_, str> {
    if !name.contains('\\') {
        return Cow::Borrowed(name);
    }
    Cow::Owned(name.replace("\\[", "[").replace("\\]", "]"))
}
