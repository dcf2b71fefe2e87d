// src/core/sanitize.rs

/// Unicode-aware lowercasing. Names and keywords carry accented French
/// characters, so ASCII folding is not enough ("César" vs "césar").
pub fn to_lower(s: &str) -> String {
    s.chars().flat_map(|c| c.to_lowercase()).collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Case-insensitive word-boundary containment: the needle must appear with
/// non-alphanumeric neighbors (or the string edge) on both sides. Keeps a
/// short keyword from firing inside an unrelated longer word.
pub fn contains_word_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let hay = to_lower(haystack);
    let ndl = to_lower(needle);
    let mut from = 0;
    while let Some(rel) = hay[from..].find(&ndl) {
        let at = from + rel;
        let before_ok = hay[..at].chars().next_back().is_none_or(|c| !is_word_char(c));
        let after_ok = hay[at + ndl.len()..].chars().next().is_none_or(|c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }
        from = at + hay[at..].chars().next().map_or(1, |c| c.len_utf8());
    }
    false
}

/// Escape text for embedding in a double-quoted literal.
pub fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decode the content between the quotes of a literal.
pub fn unescape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(c) => out.push(c),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_handles_accents() {
        assert_eq!(to_lower("Salade CÉSAR"), "salade césar");
    }

    #[test]
    fn word_match_is_accent_and_case_insensitive() {
        assert!(contains_word_ci("Salade César", "césar"));
        assert!(contains_word_ci("salade grecque", "GRECQUE"));
    }

    #[test]
    fn word_match_respects_boundaries() {
        assert!(contains_word_ci("Wrap au poulet", "wrap"));
        assert!(!contains_word_ci("Emballage wrapping", "wrap"));
        assert!(!contains_word_ci("scrapbook", "wrap"));
    }

    #[test]
    fn word_match_at_string_edges() {
        assert!(contains_word_ci("quinoa", "quinoa"));
        assert!(contains_word_ci("bol de quinoa", "quinoa"));
    }

    #[test]
    fn escape_round_trip() {
        let raw = "dit \"bonjour\" \\ fin";
        assert_eq!(unescape_literal(&escape_literal(raw)), raw);
    }

    #[test]
    fn apostrophes_pass_through() {
        assert_eq!(escape_literal("Jus d'Orange"), "Jus d'Orange");
    }
}
