pub mod branch_name;

/// Names may not start with a dot, contain `..`, path separators, `@{`,
/// whitespace, control characters or any of `* : ? [ ~ ^`, and may not end
/// in `.lock`.
pub const INVALID_NAME_REGEX: &str =
    r"^\.|\.\.|/|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Check a candidate name against [`INVALID_NAME_REGEX`].
///
/// Unicode whitespace and control characters are rejected as well: names end
/// up in commit ids and in the whitespace-delimited tag index, both of which
/// must parse back.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| c.is_whitespace() || c.is_control())
        && regex::Regex::new(INVALID_NAME_REGEX).is_ok_and(|re| !re.is_match(name))
}
