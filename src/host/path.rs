//! Path string decomposition.
//!
//! Pure string handling, no filesystem access. Follows the usual
//! `dir / base`, `base = name + ext` split:
//!
//! | input             | dirname  | basename    | filename | extname |
//! |-------------------|----------|-------------|----------|---------|
//! | `/home/u/a.txt`   | `/home/u`| `a.txt`     | `a`      | `.txt`  |
//! | `a.tar.gz`        | ``       | `a.tar.gz`  | `a.tar`  | `.gz`   |
//! | `/x/.bashrc`      | `/x`     | `.bashrc`   | `.bashrc`| ``      |
//! | `/`               | `/`      | ``          | ``       | ``      |

use std::path::is_separator;
use std::str::FromStr;

/// Which part of a path to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPart {
    Dirname,
    Basename,
    Filename,
    Extname,
}

impl PathPart {
    pub const ALL: [Self; 4] = [Self::Dirname, Self::Basename, Self::Filename, Self::Extname];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dirname => "dirname",
            Self::Basename => "basename",
            Self::Filename => "filename",
            Self::Extname => "extname",
        }
    }
}

impl FromStr for PathPart {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dirname" => Ok(Self::Dirname),
            "basename" => Ok(Self::Basename),
            "filename" => Ok(Self::Filename),
            "extname" => Ok(Self::Extname),
            _ => Err(()),
        }
    }
}

/// A path split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathParts {
    pub dirname: String,
    pub basename: String,
    pub filename: String,
    pub extname: String,
}

impl PathParts {
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::default();
        }

        let has_root = path.starts_with(is_separator);
        let trimmed = path.trim_end_matches(is_separator);
        if trimmed.is_empty() {
            // Only separators: the root itself
            let root = &path[..path.chars().next().map_or(0, char::len_utf8)];
            return Self {
                dirname: root.to_string(),
                ..Self::default()
            };
        }

        let (dirname, basename) = match trimmed.rfind(is_separator) {
            Some(idx) => {
                let dir = trimmed[..idx].trim_end_matches(is_separator);
                let dir = if dir.is_empty() && has_root {
                    &trimmed[..1]
                } else {
                    dir
                };
                (dir, &trimmed[idx + 1..])
            }
            None => ("", trimmed),
        };

        let (filename, extname) = split_extension(basename);
        Self {
            dirname: dirname.to_string(),
            basename: basename.to_string(),
            filename: filename.to_string(),
            extname: extname.to_string(),
        }
    }

    pub fn get(&self, part: PathPart) -> &str {
        match part {
            PathPart::Dirname => &self.dirname,
            PathPart::Basename => &self.basename,
            PathPart::Filename => &self.filename,
            PathPart::Extname => &self.extname,
        }
    }
}

/// Split a base name at its last dot. Leading dots never start an extension.
fn split_extension(base: &str) -> (&str, &str) {
    if base == "." || base == ".." {
        return (base, "");
    }
    match base.rfind('.') {
        Some(0) | None => (base, ""),
        Some(idx) => (&base[..idx], &base[idx..]),
    }
}

/// Extract one part of `path`. An unknown `kind` yields an empty string.
pub fn get_path_part(path: &str, kind: &str) -> String {
    match kind.parse::<PathPart>() {
        Ok(part) => PathParts::parse(path).get(part).to_string(),
        Err(()) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::MAIN_SEPARATOR;

    fn parts(path: &str) -> (String, String, String, String) {
        let p = PathParts::parse(path);
        (p.dirname, p.basename, p.filename, p.extname)
    }

    #[test]
    fn test_parse_absolute() {
        assert_eq!(
            parts("/home/user/report.txt"),
            ("/home/user".into(), "report.txt".into(), "report".into(), ".txt".into())
        );
    }

    #[test]
    fn test_parse_relative_and_bare() {
        assert_eq!(parts("a/b"), ("a".into(), "b".into(), "b".into(), "".into()));
        assert_eq!(parts("file.json"), ("".into(), "file.json".into(), "file".into(), ".json".into()));
        assert_eq!(parts(""), Default::default());
    }

    #[test]
    fn test_parse_root_children() {
        assert_eq!(parts("/a.txt"), ("/".into(), "a.txt".into(), "a".into(), ".txt".into()));
        assert_eq!(parts("/"), ("/".into(), "".into(), "".into(), "".into()));
    }

    #[test]
    fn test_parse_trailing_separator() {
        assert_eq!(parts("/srv/www/"), ("/srv".into(), "www".into(), "www".into(), "".into()));
    }

    #[test]
    fn test_extension_edge_cases() {
        assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("name."), ("name", "."));
        assert_eq!(split_extension(".."), ("..", ""));
        assert_eq!(split_extension("..."), ("..", "."));
    }

    #[test]
    fn test_get_path_part_kinds() {
        let path = "/docs/guide.md";
        assert_eq!(get_path_part(path, "dirname"), "/docs");
        assert_eq!(get_path_part(path, "basename"), "guide.md");
        assert_eq!(get_path_part(path, "filename"), "guide");
        assert_eq!(get_path_part(path, "extname"), ".md");
        assert_eq!(get_path_part(path, "rel"), "");
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z0-9_]{1,8}(\\.[a-z]{1,4})?"
    }

    proptest! {
        #[test]
        fn prop_dirname_joins_back(
            segments in prop::collection::vec(segment(), 2..6),
            absolute in any::<bool>(),
        ) {
            let sep = MAIN_SEPARATOR.to_string();
            let mut path = segments.join(&sep);
            if absolute {
                path.insert(0, MAIN_SEPARATOR);
            }

            let p = PathParts::parse(&path);
            prop_assert_eq!(format!("{}{}{}", p.dirname, sep, p.basename), path);
            prop_assert_eq!(format!("{}{}", p.filename, p.extname), p.basename);
        }

        #[test]
        fn prop_unknown_kind_is_empty(path in ".*", kind in "[a-z]{1,10}") {
            prop_assume!(kind.parse::<PathPart>().is_err());
            prop_assert_eq!(get_path_part(&path, &kind), "");
        }
    }
}
