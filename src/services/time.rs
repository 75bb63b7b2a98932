use chrono::NaiveDate;

/// Canonical 'YYYY-MM-DD' key for a calendar date. Lexicographic order on
/// keys matches calendar order.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Inverse of [`date_key`]. `date_key(parse_date_key(k)?) == k` for every
/// valid key.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Format minutes-from-midnight as a 12-hour clock label, e.g. 1020 -> "5:00PM".
pub fn minutes_to_label(minutes: i32) -> String {
    let hour = minutes / 60;
    let mins = minutes % 60;
    let period = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02}{}", display_hour, mins, period)
}

/// Half-open interval overlap: touching endpoints do not overlap.
pub fn ranges_overlap(start1: i32, end1: i32, start2: i32, end2: i32) -> bool {
    start1 < end2 && start2 < end1
}

/// The last `n` calendar dates walking backward from `from`, inclusive.
pub fn last_n_days(n: u32, from: NaiveDate) -> Vec<NaiveDate> {
    (0..n as i64)
        .map(|i| from - chrono::Duration::days(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_key_round_trips() {
        for key in ["2024-01-01", "2024-02-29", "1999-12-31", "2025-07-04"] {
            let date = parse_date_key(key).unwrap();
            assert_eq!(date_key(date), key);
        }
        assert!(parse_date_key("2024-13-01").is_none());
        assert!(parse_date_key("not-a-date").is_none());
    }

    #[test]
    fn date_keys_sort_by_calendar_order() {
        let a = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        assert!(date_key(a) < date_key(b));
    }

    #[test]
    fn minutes_format_as_12_hour_clock() {
        assert_eq!(minutes_to_label(0), "12:00AM");
        assert_eq!(minutes_to_label(59), "12:59AM");
        assert_eq!(minutes_to_label(60), "1:00AM");
        assert_eq!(minutes_to_label(720), "12:00PM");
        assert_eq!(minutes_to_label(1020), "5:00PM");
        assert_eq!(minutes_to_label(1439), "11:59PM");
    }

    #[test]
    fn overlap_is_half_open() {
        assert!(ranges_overlap(0, 10, 0, 10));
        assert!(ranges_overlap(0, 10, 5, 15));
        assert!(ranges_overlap(5, 15, 0, 10));
        assert!(!ranges_overlap(0, 10, 10, 20));
        assert!(!ranges_overlap(10, 20, 0, 10));
        assert!(!ranges_overlap(0, 10, 20, 30));
    }

    #[test]
    fn last_n_days_walks_backward_inclusive() {
        let anchor = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let days = last_n_days(3, anchor);
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            ]
        );
    }
}
