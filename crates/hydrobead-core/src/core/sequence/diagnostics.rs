/// A character the parser will silently drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoredCharacter {
    /// Zero-based character (not byte) offset in the input.
    pub position: usize,
    pub character: char,
}

/// Lists characters that are neither residue letters, region brackets nor
/// whitespace. Useful for warning about typos such as lowercase codes or digits
/// before they vanish from the model.
pub fn scan_ignored_characters(text: &str) -> Vec<IgnoredCharacter> {
    text.chars()
        .enumerate()
        .filter(|&(_, c)| {
            !(c.is_ascii_uppercase() || c == '[' || c == ']' || c.is_whitespace())
        })
        .map(|(position, character)| IgnoredCharacter {
            position,
            character,
        })
        .collect()
}
