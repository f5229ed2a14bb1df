#![forbid(unsafe_code)]

/// Marker label for a 1-based ordinal: "1".."9", then "A" (10) through
/// "Z" (35). Later ordinals saturate at "Z"; a static map with that many
/// markers is unreadable long before the labels run out.
pub fn marker_label(ordinal: usize) -> String {
    match ordinal {
        0..=9 => ordinal.to_string(),
        10..=35 => char::from(b'A' + (ordinal as u8 - 10)).to_string(),
        _ => "Z".to_string(),
    }
}

/// Encodes a location for the static-map query string: trim, spaces to '+',
/// commas to "%2C". Intentionally narrow; the exact URL bytes are part of
/// the tool's observable output.
pub fn encode_location(location: &str) -> String {
    location.trim().replace(' ', "+").replace(',', "%2C")
}
