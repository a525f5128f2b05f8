/// Prepare a phrase for synthesis.
///
/// Mimic 3 spells out upper-case runs ("NASA" becomes "EN AY ES AY") and
/// stops reading a word at its first digit, so every maximal run of
/// numeric characters (in any script, see `char::is_numeric`) is separated
/// from adjacent text by a space and the result is lowercased and trimmed.
pub fn normalize(phrase: &str) -> String {
    split_digit_runs(phrase).to_lowercase().trim().to_string()
}

fn split_digit_runs(phrase: &str) -> String {
    let mut output = String::with_capacity(phrase.len() + 8);
    let mut prev: Option<char> = None;

    for ch in phrase.chars() {
        if let Some(p) = prev {
            let boundary = p.is_numeric() != ch.is_numeric();
            if boundary && !p.is_whitespace() && !ch.is_whitespace() {
                output.push(' ');
            }
        }
        output.push(ch);
        prev = Some(ch);
    }

    output
}
