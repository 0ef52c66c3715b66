use chrono::{DateTime, NaiveDate};

/// Formats an ISO date (or RFC3339 timestamp) as `DD/MM/YYYY`. Anything
/// unparseable, including `None`, becomes an empty string.
pub fn format_date_fr(input: Option<&str>) -> String {
    let Some(input) = input else {
        return String::new();
    };

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return dt.format("%d/%m/%Y").to_string();
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_iso_date() {
        assert_eq!(format_date_fr(Some("2025-03-07")), "07/03/2025");
    }

    #[test]
    fn formats_rfc3339_timestamp() {
        assert_eq!(
            format_date_fr(Some("2025-03-07T10:30:00+01:00")),
            "07/03/2025"
        );
    }

    #[test]
    fn garbage_and_none_yield_empty() {
        assert_eq!(format_date_fr(Some("not a date")), "");
        assert_eq!(format_date_fr(None), "");
    }
}
