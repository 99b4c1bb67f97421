pub mod prefs;
pub mod snapshot;
pub mod watch;

/// Ordinal label for a period number, e.g. 2 -> "2nd"
///
/// Periods past regulation are all labeled "OT", matching broadcast
/// convention.
pub fn period_label(period: u32) -> &'static str {
    match period {
        1 => "1st",
        2 => "2nd",
        3 => "3rd",
        _ => "OT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_label() {
        assert_eq!(period_label(1), "1st");
        assert_eq!(period_label(2), "2nd");
        assert_eq!(period_label(3), "3rd");
        assert_eq!(period_label(4), "OT");
        assert_eq!(period_label(7), "OT");
    }
}
