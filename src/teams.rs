/// Map a full team name (e.g. "Toronto Maple Leafs") to the 3-letter code
/// the scoreboard prints. Unknown names fall back to the first three
/// letters of the last word, uppercased, so display code never deals with
/// a missing code.
pub fn short_code(full_name: &str) -> String {
    if let Some(code) = known_code(full_name) {
        return code.to_string();
    }
    full_name
        .split_whitespace()
        .last()
        .unwrap_or(full_name)
        .chars()
        .filter(|c| c.is_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

fn known_code(full_name: &str) -> Option<&'static str> {
    match full_name {
        "Toronto Maple Leafs" => Some("TOR"),
        "Montreal Canadiens" => Some("MTL"),
        "Boston Bruins" => Some("BOS"),
        "Ottawa Senators" => Some("OTT"),
        "New York Rangers" => Some("NYR"),
        "Detroit Red Wings" => Some("DET"),
        "Chicago Blackhawks" => Some("CHI"),
        "Edmonton Oilers" => Some("EDM"),
        "Vancouver Canucks" => Some("VAN"),
        "Calgary Flames" => Some("CGY"),
        _ => None,
    }
}
