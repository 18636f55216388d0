//! Line-level text utilities
//!
//! The analyses work on raw source lines. These helpers blank out the
//! regions that must not be scanned for identifiers (string literals,
//! comments) while preserving byte offsets, so columns stay accurate.

/// Replaces `(* ... *)` comment regions with spaces. An unterminated
/// comment blanks the rest of the line.
pub fn strip_comments(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut out: Vec<u8> = bytes.to_vec();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'(' && bytes[i + 1] == b'*' {
            let mut j = i + 2;
            let mut closed = false;
            while j + 1 < bytes.len() {
                if bytes[j] == b'*' && bytes[j + 1] == b')' {
                    closed = true;
                    break;
                }
                j += 1;
            }
            let end = if closed { j + 2 } else { bytes.len() };
            for b in &mut out[i..end] {
                if *b != b'\n' {
                    *b = b' ';
                }
            }
            i = end;
        } else {
            i += 1;
        }
    }
    // bytes were only ever replaced with ASCII spaces
    String::from_utf8(out).unwrap_or_else(|_| line.to_string())
}

/// Replaces double-quoted string contents (including the quotes) with
/// spaces. Backslash escapes inside strings are honored.
pub fn strip_strings(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut out: Vec<u8> = bytes.to_vec();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'"' {
            let start = i;
            i += 1;
            while i < bytes.len() {
                if bytes[i] == b'\\' {
                    i += 2;
                    continue;
                }
                if bytes[i] == b'"' {
                    i += 1;
                    break;
                }
                i += 1;
            }
            let end = i.min(bytes.len());
            for b in &mut out[start..end] {
                *b = b' ';
            }
        } else {
            i += 1;
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| line.to_string())
}

/// Comments first so quotes inside comments do not open a string.
pub fn clean_line(line: &str) -> String {
    strip_strings(&strip_comments(line))
}

/// Whole-word containment check without compiling a per-word regex.
pub fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let mut search_from = 0;
    while let Some(pos) = haystack[search_from..].find(word) {
        let start = search_from + pos;
        let end = start + word.len();
        let is_word_byte = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
        let before_ok = start == 0 || !is_word_byte(haystack.as_bytes()[start - 1]);
        let after_ok = end == haystack.len() || !is_word_byte(haystack.as_bytes()[end]);
        if before_ok && after_ok {
            return true;
        }
        search_from = start + 1;
    }
    false
}

/// Collapses runs of whitespace to a single space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the two strings share any common substring of at least
/// `min_len` bytes. Any such substring contains a window of exactly
/// `min_len`, so only fixed-size windows need checking.
pub fn shares_substring(a: &str, b: &str, min_len: usize) -> bool {
    if a.len() < min_len || b.len() < min_len {
        return false;
    }
    let mut windows = std::collections::HashSet::new();
    for i in 0..=a.len() - min_len {
        if let Some(w) = a.get(i..i + min_len) {
            windows.insert(w);
        }
    }
    for i in 0..=b.len() - min_len {
        if let Some(w) = b.get(i..i + min_len) {
            if windows.contains(w) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comments_blanks_comment_region() {
        let cleaned = strip_comments("x = 1 (* counter *) + y");

        assert_eq!(cleaned.len(), "x = 1 (* counter *) + y".len());
        assert!(!cleaned.contains("counter"));
        assert!(cleaned.contains("x = 1"));
        assert!(cleaned.contains("+ y"));
    }

    #[test]
    fn strip_comments_unterminated_blanks_to_end() {
        let cleaned = strip_comments("x = 1 (* open");

        assert!(cleaned.starts_with("x = 1 "));
        assert!(!cleaned.contains("open"));
    }

    #[test]
    fn strip_strings_blanks_string_contents() {
        let cleaned = strip_strings("msg = \"hello x\" <> name");

        assert!(!cleaned.contains("hello"));
        assert!(!cleaned.contains('"'));
        assert!(cleaned.contains("msg ="));
        assert!(cleaned.contains("name"));
    }

    #[test]
    fn strip_strings_honors_escapes() {
        let cleaned = strip_strings("a = \"he said \\\"hi\\\"\" ; b");

        assert!(cleaned.contains("b"));
        assert!(!cleaned.contains("hi"));
    }

    #[test]
    fn clean_line_preserves_length() {
        let line = "f[x_] := x + \"lit\" (* note *)";

        assert_eq!(clean_line(line).len(), line.len());
    }

    #[test]
    fn contains_word_matches_whole_words_only() {
        assert!(contains_word("x = counter + 1", "counter"));
        assert!(!contains_word("x = counters + 1", "counter"));
        assert!(!contains_word("x = myCounter + 1", "Counter"));
        assert!(contains_word("counter", "counter"));
    }

    #[test]
    fn shares_substring_finds_common_window() {
        assert!(shares_substring("computeTotalPrice", "totalPriceOf", 5));
        assert!(!shares_substring("alpha", "omega", 5));
        assert!(!shares_substring("abcd", "abcd", 5));
    }

    #[test]
    fn normalize_whitespace_collapses_runs() {
        assert_eq!(normalize_whitespace("  a   =\t b  "), "a = b");
    }
}
