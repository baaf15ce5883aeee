//! Sticker identifier extraction.
//!
//! An order id like `"1234567-0012-3"` carries its sticker key up front: the
//! digit run before the first hyphen. Label pages carry the same key in their
//! rendered text, after a depot-specific prefix such as `FBS: 204514`.

use std::sync::OnceLock;

use regex::Regex;

fn order_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)-").unwrap())
}

/// Leading digit run of `order_id`, up to (not including) its first hyphen.
///
/// Returns `None` when the id does not start with digits followed by a
/// hyphen; such rows cannot be matched to any label page.
pub fn extract_order_prefix(order_id: &str) -> Option<String> {
    order_prefix_re()
        .captures(order_id)
        .map(|caps| caps[1].to_string())
}

/// Extract the sticker identifier from one page of rendered label text.
///
/// The depot prefix is matched literally, except that whitespace inside it
/// matches an arbitrary whitespace run. pdftotext kerns unpredictably, so
/// `FBS: 204514` must also match `FBS:  204514`. The digit run after the
/// prefix is the identifier.
pub fn extract_page_identifier(page_text: &str, label_prefix: &str) -> Option<String> {
    if page_text.is_empty() {
        return None;
    }
    let re = Regex::new(&page_identifier_pattern(label_prefix)).unwrap();
    re.captures(page_text).map(|caps| caps[1].to_string())
}

fn page_identifier_pattern(label_prefix: &str) -> String {
    let parts: Vec<String> = label_prefix
        .split_whitespace()
        .map(|p| regex::escape(p))
        .collect();
    format!(r"{}\s*(\d+)", parts.join(r"\s*"))
}

/// Trailing `n`-digit run of the stringified value, falling back to the last
/// `n` digits found anywhere, or empty when fewer than `n` digits exist.
/// Presentation-only: picklist exports show shortened stickers.
pub fn last_n_digits(value: &str, n: usize) -> String {
    let digits: Vec<char> = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < n {
        return String::new();
    }
    digits[digits.len() - n..].iter().collect()
}
