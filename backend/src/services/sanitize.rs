//! Free-text normalization applied before devices are persisted.
//!
//! [`sanitize_text`] trims the input, title-cases every word under a
//! locale-neutral rule and strips diacritics, so that `"  crème brûlée "`
//! becomes `"Creme Brulee"`.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NONSPACING_MARK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Mn}").expect("valid nonspacing mark regex"));

/// Normalize a free-text field.
///
/// Steps, in order:
/// 1. trim leading and trailing whitespace
/// 2. title-case each word (first character upper-case, rest lower-case)
/// 3. decompose (NFD), drop nonspacing marks (`Mn`), recompose (NFC)
/// 4. trim again, since dropping marks at the edges can expose whitespace
///
/// A word is a maximal run of alphanumeric characters and apostrophes.
/// Nonspacing marks neither start nor end a word. Spacing (`Mc`) and
/// enclosing (`Me`) marks are kept. The function is idempotent.
///
/// ```
/// use device_api::services::sanitize::sanitize_text;
///
/// assert_eq!(sanitize_text("  hello WORLD "), "Hello World");
/// assert_eq!(sanitize_text("Café"), "Cafe");
/// assert_eq!(sanitize_text("abc123"), "Abc123");
/// ```
pub fn sanitize_text(input: &str) -> String {
    let titled = title_case(input.trim());
    let stripped = strip_diacritics(&titled);
    stripped.trim().to_string()
}

fn is_nonspacing_mark(c: char) -> bool {
    let mut buf = [0u8; 4];
    NONSPACING_MARK_RE.is_match(c.encode_utf8(&mut buf))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}

fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for c in input.chars() {
        // Marks are dropped later; they must not move word boundaries.
        if is_nonspacing_mark(c) {
            out.push(c);
            continue;
        }

        if !is_word_char(c) {
            in_word = false;
            out.push(c);
            continue;
        }

        if in_word {
            out.extend(c.to_lowercase());
        } else {
            in_word = true;
            // Multi-char upper mappings ("ß" -> "SS") keep only the first
            // character upper-case, matching the title-case form ("Ss").
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
        }
    }

    out
}

fn strip_diacritics(input: &str) -> String {
    let decomposed: String = input.nfd().collect();
    NONSPACING_MARK_RE.replace_all(&decomposed, "").nfc().collect()
}
