use crate::errors::{Error, Kind, Result};
use std::path::{Component, Path, PathBuf};

/// Relative path of a file whose history is tracked
///
/// Only plain relative components are accepted: the history record is named
/// after the path and must stay inside `wizardry/history`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackedPath(PathBuf);

impl TrackedPath {
    pub fn try_parse(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let components = path.components().collect::<Vec<_>>();
        let is_plain = components
            .iter()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
            && components
                .iter()
                .any(|component| matches!(component, Component::Normal(_)));

        if is_plain {
            Ok(Self(
                components
                    .iter()
                    .filter(|component| matches!(component, Component::Normal(_)))
                    .collect(),
            ))
        } else {
            Err(Error::InvalidName {
                kind: Kind::File,
                name: path.display().to_string(),
            })
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Flat file name under which the history of this path is recorded
    ///
    /// Components are joined with `%2F` after escaping `%`, so `notes` and
    /// `notes/x` get sibling records and distinct paths never share one.
    pub fn to_record_name(&self) -> String {
        self.0
            .components()
            .map(|component| component.as_os_str().to_string_lossy().replace('%', "%25"))
            .collect::<Vec<_>>()
            .join("%2F")
    }
}

impl std::fmt::Display for TrackedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::TrackedPath;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case("spell.txt", "spell.txt")]
    #[case("./spell.txt", "spell.txt")]
    #[case("book/chapter/spell.txt", "book/chapter/spell.txt")]
    fn accepts_relative_paths(#[case] input: &str, #[case] expected: &str) {
        let path = TrackedPath::try_parse(input).unwrap();

        assert_eq!(path.as_path(), Path::new(expected));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("../outside.txt")]
    #[case("/etc/passwd")]
    #[case("book/../../escape")]
    fn rejects_paths_outside_the_history_root(#[case] input: &str) {
        assert!(TrackedPath::try_parse(input).is_err());
    }

    #[rstest]
    #[case("spell.txt", "spell.txt")]
    #[case("./book/spell.txt", "book%2Fspell.txt")]
    #[case("100%/spell.txt", "100%25%2Fspell.txt")]
    #[case("book%2Fspell.txt", "book%252Fspell.txt")]
    fn record_names_are_flat_and_distinct(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(TrackedPath::try_parse(input).unwrap().to_record_name(), expected);
    }
}
