// Player name canonicalization for cross-source joins.
//
// The key is a heuristic: two spellings of the same player should collapse to
// one key, and distinct players with the same canonical name will collide.

/// Generational suffixes dropped from the end of a name, compared as whole
/// tokens after punctuation has been removed (so "Jr." arrives as "jr").
const SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "v"];

/// Characters replaced with a space before whitespace is collapsed.
fn is_separator_punct(c: char) -> bool {
    matches!(c, '.' | '\'' | '\u{2019}' | '`' | '-')
}

/// Canonical join key for a raw display name.
///
/// - `"Last, First"` is reordered to `"First Last"` (segments after the
///   second comma are dropped).
/// - Lowercased; periods, apostrophes and hyphens become spaces; whitespace is
///   collapsed and trimmed.
/// - Trailing suffix tokens (`jr`, `sr`, `ii`, `iii`, `iv`, `v`) are removed,
///   but a name is never reduced to nothing.
///
/// Empty input yields an empty key. The function is idempotent.
pub fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let reordered = if trimmed.contains(',') {
        let mut parts = trimmed.split(',').map(str::trim);
        match (parts.next(), parts.next()) {
            (Some(last), Some(first)) => format!("{first} {last}"),
            _ => trimmed.to_string(),
        }
    } else {
        trimmed.to_string()
    };

    let cleaned: String = reordered
        .to_lowercase()
        .chars()
        .map(|c| if is_separator_punct(c) { ' ' } else { c })
        .collect();

    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    while tokens.len() > 1 && tokens.last().is_some_and(|t| SUFFIXES.contains(t)) {
        tokens.pop();
    }
    tokens.join(" ")
}

/// [`normalize_name`] for a possibly missing cell.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize_name).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize_name("  LeBron   James "), "lebron james");
    }

    #[test]
    fn comma_form_is_reordered() {
        assert_eq!(normalize_name("James, LeBron"), "lebron james");
        assert_eq!(normalize_name("James, LeBron"), normalize_name("LeBron James"));
    }

    #[test]
    fn comma_form_drops_extra_segments() {
        assert_eq!(normalize_name("Porter, Otto, Jr."), "otto porter");
    }

    #[test]
    fn trailing_comma_keeps_last_name() {
        assert_eq!(normalize_name("Nene,"), "nene");
    }

    #[test]
    fn suffixes_are_stripped() {
        assert_eq!(normalize_name("Griffin III"), "griffin");
        assert_eq!(normalize_name("Griffin"), "griffin");
        assert_eq!(normalize_name("Jaren Jackson Jr."), "jaren jackson");
        assert_eq!(normalize_name("Gary Payton II"), "gary payton");
        assert_eq!(normalize_name("Larry Nance Sr"), "larry nance");
        assert_eq!(normalize_name("Someone IV"), "someone");
        assert_eq!(normalize_name("Someone V"), "someone");
    }

    #[test]
    fn suffix_needs_whole_token() {
        // Surnames ending in suffix letters are left alone.
        assert_eq!(normalize_name("Jimmy Butler"), "jimmy butler");
        assert_eq!(normalize_name("Boban Marjanovic"), "boban marjanovic");
        assert_eq!(normalize_name("Kai Sotto"), "kai sotto");
        assert_eq!(normalize_name("Ajay Mitchell"), "ajay mitchell");
        assert_eq!(normalize_name("Devin Vassell"), "devin vassell");
    }

    #[test]
    fn lone_suffix_token_is_kept() {
        assert_eq!(normalize_name("V"), "v");
        assert_eq!(normalize_name("Jr."), "jr");
    }

    #[test]
    fn stacked_suffixes_are_all_stripped() {
        assert_eq!(normalize_name("Name Jr. II"), "name");
    }

    #[test]
    fn punctuation_variants_collapse() {
        assert_eq!(normalize_name("O'Neal"), "o neal");
        assert_eq!(normalize_name("O\u{2019}Neal"), "o neal");
        assert_eq!(normalize_name("O-Neal"), "o neal");
        assert_eq!(normalize_name("O`Neal"), "o neal");
        assert_eq!(normalize_name("P.J. Tucker"), "p j tucker");
        assert_eq!(normalize_name("Shai Gilgeous-Alexander"), "shai gilgeous alexander");
    }

    #[test]
    fn missing_name_is_empty() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   "), "");
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("Luka Doncic")), "luka doncic");
    }

    #[test]
    fn idempotent() {
        let names = [
            "James, LeBron",
            "Griffin III",
            "O\u{2019}Neal",
            "Name Jr. II",
            "  Nikola   Jokić ",
            "Porter, Otto, Jr.",
            "V",
        ];
        for name in names {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn deterministic() {
        let a = normalize_name("De'Aaron Fox");
        let b = normalize_name("De'Aaron Fox");
        assert_eq!(a, b);
        assert_eq!(a, "de aaron fox");
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(normalize_name("NIKOLA JOKIC"), normalize_name("nikola jokic"));
    }
}
