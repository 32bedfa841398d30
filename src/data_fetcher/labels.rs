//! Display label derivation for league participants.
//!
//! Draft leagues carry a short code per entry; classic head-to-head listings
//! only carry the manager's full name, which is shortened to initials.

/// Extracts initials from a full name.
///
/// Takes the first character of every whitespace-separated part and
/// upper-cases it.
///
/// # Examples
/// ```
/// use fpl_munger::data_fetcher::labels::initials;
///
/// assert_eq!(initials("Ana Bell"), "AB");
/// assert_eq!(initials("  jean   luc picard "), "JLP");
/// assert_eq!(initials("Åsa Öberg"), "ÅÖ");
/// assert_eq!(initials(""), "");
/// ```
pub fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Label for a classic entry: initials of the manager name, or the numeric id
/// when the name yields nothing usable.
pub fn classic_label(full_name: Option<&str>, entry_id: u64) -> String {
    let label = full_name.map(initials).unwrap_or_default();
    if label.is_empty() {
        entry_id.to_string()
    } else {
        label
    }
}
