use std::sync::LazyLock;

use regex::Regex;

static RE_INLINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("Invalid sanitize regex"));
static RE_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)[ \t]*[,.][ \t]*(\d)").expect("Invalid sanitize regex"));
static RE_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)[ \t]*/[ \t]*(\d)").expect("Invalid sanitize regex"));
static RE_SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+([,.;:])").expect("Invalid sanitize regex"));
static RE_MISSING_SPACE_AFTER_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([,.;:])([a-zA-Z])").expect("Invalid sanitize regex"));

/// Sanitize OCR output before vital extraction.
/// Replaces stray OCR symbols with spaces, collapses whitespace, drops empty lines,
/// and repairs the numeric artefacts OCR leaves in vital readings
/// (`36 , 7` → `36.7`, `120 / 80` → `120/80`).
pub fn sanitize_extracted_text(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect();

    let text = filtered
        .lines()
        .map(|l| RE_INLINE_SPACE.replace_all(l.trim(), " ").into_owned())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let text = RE_DECIMAL.replace_all(&text, "$1.$2");
    let text = RE_FRACTION.replace_all(&text, "$1/$2");
    let text = RE_SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    let text = RE_MISSING_SPACE_AFTER_PUNCT.replace_all(&text, "$1 $2");

    text.trim().to_string()
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric()
        || c == '\n'
        || c == ' '
        || c == '\t'
        || matches!(
            c,
            '.' | ','
                | ';'
                | ':'
                | '('
                | ')'
                | '-'
                | '+'
                | '/'
                | '='
                | '%'
                | '°'
                | '<'
                | '>'
                | '_'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_control_characters() {
        let raw = "FC: 76 bpm\x01\x02\x03\nPeso: 74 kg";
        let clean = sanitize_extracted_text(raw);
        assert!(!clean.contains('\x01'));
        assert!(clean.contains("76 bpm"));
        assert!(clean.contains("74 kg"));
    }

    #[test]
    fn replaces_ocr_noise_with_space() {
        let clean = sanitize_extracted_text("Peso|74 kg ~ altezza*179 cm");
        assert_eq!(clean, "Peso 74 kg altezza 179 cm");
    }

    #[test]
    fn preserves_medical_punctuation() {
        let raw = "Temp: 37.5°C, PA: 120/80 mmHg (normale)";
        let clean = sanitize_extracted_text(raw);
        assert!(clean.contains("37.5°C"));
        assert!(clean.contains("120/80"));
        assert!(clean.contains("(normale)"));
    }

    #[test]
    fn repairs_split_decimals_and_fractions() {
        assert_eq!(sanitize_extracted_text("Temperatura 36 , 7°C"), "Temperatura 36.7°C");
        assert_eq!(sanitize_extracted_text("Peso 74,5 kg"), "Peso 74.5 kg");
        assert_eq!(sanitize_extracted_text("PA 120 / 80 mmHg"), "PA 120/80 mmHg");
    }

    #[test]
    fn tidies_punctuation_spacing() {
        assert_eq!(sanitize_extracted_text("FC : 76 bpm"), "FC: 76 bpm");
        assert_eq!(sanitize_extracted_text("bpm.Peso 74 kg"), "bpm. Peso 74 kg");
    }

    #[test]
    fn collapses_blank_lines() {
        let raw = "Riga uno\n\n\n\nRiga due\n   \nRiga tre";
        assert_eq!(sanitize_extracted_text(raw), "Riga uno\nRiga due\nRiga tre");
    }

    #[test]
    fn preserves_italian_accented_chars() {
        let clean = sanitize_extracted_text("Il paziente è alto 180 cm, età 45");
        assert!(clean.contains('è'));
        assert!(clean.contains("età"));
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(sanitize_extracted_text(""), "");
        assert_eq!(sanitize_extracted_text("\x00\x01\x02"), "");
    }
}
