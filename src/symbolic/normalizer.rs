// canonicalisation of raw equation text: ASCII digits, no whitespace, lower-case letters.
// Never fails, text the classifier cannot use is rejected there.

/// first code point of each recognised localized digit block (0..9 are contiguous in every block)
const DIGIT_BLOCKS: [u32; 4] = [
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic (Persian, Urdu)
    0x0966, // Devanagari
    0xFF10, // full-width
];

/// maps a localized digit glyph to its ASCII equivalent
pub fn ascii_digit(c: char) -> Option<char> {
    let code = c as u32;
    DIGIT_BLOCKS
        .iter()
        .find(|&&zero| code >= zero && code <= zero + 9)
        .and_then(|&zero| char::from_digit(code - zero, 10))
}

/// returns replacement text for characters that are not digits but have an ASCII spelling
fn ascii_symbol(c: char) -> Option<&'static str> {
    match c {
        '٫' => Some("."), // Arabic decimal separator
        '−' | '–' => Some("-"),
        '×' | '·' => Some("*"),
        '²' => Some("^2"),
        _ => None,
    }
}

/// Replaces localized digit glyphs with ASCII digits, removes all whitespace and lower-cases
/// alphabetic symbols.
/// # Example
/// ```
/// use RustedEquationSolver::symbolic::normalizer::normalize;
/// assert_eq!(normalize("X² − 4X + 3 = 0"), "x^2-4x+3=0");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_whitespace() {
            continue;
        }
        if let Some(d) = ascii_digit(c) {
            out.push(d);
        } else if let Some(s) = ascii_symbol(c) {
            out.push_str(s);
        } else if c.is_alphabetic() {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_input_is_only_compacted() {
        assert_eq!(normalize("2x + 5 = 11"), "2x+5=11");
        assert_eq!(normalize("\t-x+10 =5\n"), "-x+10=5");
    }

    #[test]
    fn test_localized_digits() {
        // Persian
        assert_eq!(normalize("۲x+۵=۱۱"), "2x+5=11");
        // Arabic-Indic
        assert_eq!(normalize("٢x+٣y=٧"), "2x+3y=7");
        // Devanagari
        assert_eq!(normalize("x-y=१"), "x-y=1");
        // full-width
        assert_eq!(normalize("x^２+１=０"), "x^2+1=0");
        assert_eq!(ascii_digit('۹'), Some('9'));
        assert_eq!(ascii_digit('a'), None);
    }

    #[test]
    fn test_variables_lowercased() {
        assert_eq!(normalize("2X+3Y=7"), "2x+3y=7");
    }

    #[test]
    fn test_symbol_spellings() {
        assert_eq!(normalize("x²−۱٫۵x=0"), "x^2-1.5x=0");
        assert_eq!(normalize("2×x+1=3"), "2*x+1=3");
    }

    #[test]
    fn test_empty_and_symbol_free_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t "), "");
        assert_eq!(normalize("+=?"), "+=?");
    }
}
