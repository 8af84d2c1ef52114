// WebDriver key code points (W3C "Keyboard actions" table).

pub const NULL: char = '\u{E000}';
pub const ESCAPE: char = '\u{E00C}';
pub const ENTER: char = '\u{E007}';
pub const META: char = '\u{E03D}';

/// Alias kept for readers coming from Selenium, where the Windows key is `COMMAND`.
pub const COMMAND: char = META;

/// Build a chord: modifiers held while `key` is typed, then released with NULL.
pub fn chord(modifiers: &[char], key: &str) -> String {
    let mut out: String = modifiers.iter().collect();
    out.push_str(key);
    out.push(NULL);
    out
}
