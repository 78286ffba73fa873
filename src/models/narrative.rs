use regex::Regex;

use super::Direction;

/// Build the standard cash-book narrative.
/// e.g. `Penerimaan Hibah Dari Pemkab` / `Belanja ATK Kepada Toko Sari`
pub fn describe(direction: Direction, purpose: &str, counterparty: &str) -> String {
    format!(
        "{} {} {} {}",
        direction.prefix(),
        purpose.trim(),
        direction.connector(),
        counterparty.trim()
    )
}

/// Recover `(purpose, counterparty)` from a narrative built by [`describe`].
///
/// The connector is matched case-insensitively and the leading direction
/// word is dropped. Text without a connector comes back whole, with `"-"`
/// as the counterparty.
pub fn parse_description(direction: Direction, text: &str) -> (String, String) {
    let pattern = format!(r"(?i)^(.*?)\s+{}\s+(.*)$", direction.connector());
    let captures = Regex::new(&pattern).ok().and_then(|re| {
        re.captures(text.trim())
            .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
    });

    match captures {
        Some((head, counterparty)) => {
            let purpose = strip_prefix_ignore_case(&head, direction.prefix())
                .unwrap_or(&head)
                .trim()
                .to_string();
            (purpose, counterparty)
        }
        None => (text.trim().to_string(), "-".to_string()),
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) && s[prefix.len()..].starts_with(char::is_whitespace) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}
