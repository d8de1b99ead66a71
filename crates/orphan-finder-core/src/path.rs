//! Path string normalization shared by filesystem paths and database values.
//!
//! Stored locations come from several systems that disagree on separator
//! style and casing, so every comparison goes through [`normalize`] and, for
//! prefix tests, [`fold`].

/// Marker that starts a templated suffix in stored root locations, e.g.
/// `/data/shared${env}`.
pub const TEMPLATE_MARKER: &str = "${";

/// Default minimum prefix length. Prefixes this short or shorter would match
/// almost any path.
pub const DEFAULT_MIN_PREFIX_LEN: usize = 5;

/// Unify separators to `/` and collapse doubled separators.
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut out = String::with_capacity(unified.len());
    let mut prev_slash = false;
    for ch in unified.chars() {
        if ch == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(ch);
    }
    out
}

/// Case-folded comparison key for an already normalized path.
pub fn fold(normalized: &str) -> String {
    normalized.to_lowercase()
}

/// Extract the literal prefix of a stored root location.
///
/// Keeps everything before the first `${`, normalizes it, and rejects the
/// result when it is `min_len` characters or shorter.
pub fn parse_root_location(raw: &str, min_len: usize) -> Option<String> {
    let literal = match raw.split_once(TEMPLATE_MARKER) {
        Some((head, _)) => head,
        None => raw,
    };
    let prefix = normalize(literal);
    if prefix.chars().count() > min_len {
        Some(prefix)
    } else {
        None
    }
}

/// A validated, normalized path prefix with its folded comparison key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefix {
    normalized: String,
    folded: String,
}

impl PathPrefix {
    pub fn parse(raw: &str, min_len: usize) -> Option<Self> {
        parse_root_location(raw, min_len).map(|normalized| {
            let folded = fold(&normalized);
            PathPrefix { normalized, folded }
        })
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Case-insensitive starts-with against a folded file path.
    pub fn matches(&self, folded_path: &str) -> bool {
        folded_path.starts_with(&self.folded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unifies_separators() {
        assert_eq!(normalize(r"C:\Data\\Reports\f.txt"), "C:/Data/Reports/f.txt");
        assert_eq!(normalize("/data//shared///x"), "/data/shared/x");
        assert_eq!(normalize(r"/data\/shared"), "/data/shared");
    }

    #[test]
    fn test_normalize_separator_style_is_irrelevant() {
        let a = normalize(r"\\srv\share\dir\file.bin");
        let b = normalize("//srv/share/dir//file.bin");
        let c = normalize("/srv/share/dir/file.bin");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_normalize_keeps_case_and_empty() {
        assert_eq!(normalize("Mixed/Case"), "Mixed/Case");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_parse_strips_template_suffix() {
        assert_eq!(
            parse_root_location("/data/shared${env}", DEFAULT_MIN_PREFIX_LEN),
            Some("/data/shared".to_string())
        );
        assert_eq!(
            parse_root_location(r"D:\files\${a}\${b}", DEFAULT_MIN_PREFIX_LEN),
            Some("D:/files/".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_short_prefixes() {
        assert_eq!(parse_root_location("/abc", DEFAULT_MIN_PREFIX_LEN), None);
        assert_eq!(parse_root_location("${root}/files", DEFAULT_MIN_PREFIX_LEN), None);
        assert_eq!(parse_root_location("", DEFAULT_MIN_PREFIX_LEN), None);
        // exactly the minimum is still invalid
        assert_eq!(parse_root_location("/abcd", DEFAULT_MIN_PREFIX_LEN), None);
        assert_eq!(
            parse_root_location("/abcde", DEFAULT_MIN_PREFIX_LEN),
            Some("/abcde".to_string())
        );
    }

    #[test]
    fn test_parse_measures_length_after_normalizing() {
        // six raw characters, three after collapsing
        assert_eq!(parse_root_location(r"\\\\ab", DEFAULT_MIN_PREFIX_LEN), None);
    }

    #[test]
    fn test_prefix_matches_case_insensitively() {
        let prefix = PathPrefix::parse("c:/data/reports", DEFAULT_MIN_PREFIX_LEN).unwrap();
        let file = fold(&normalize(r"C:\Data\\Reports\f.txt"));
        assert!(prefix.matches(&file));
        assert!(!prefix.matches(&fold("c:/data/other/f.txt")));
        assert_eq!(prefix.as_str(), "c:/data/reports");
    }
}
