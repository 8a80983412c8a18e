//! # Header Derivation

use chrono::{DateTime, Timelike, Utc};

use crate::store::Resource;

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Most recent modification among `resources`, truncated to seconds
pub fn last_modified(resources: &[Resource]) -> Option<DateTime<Utc>> {
    resources
        .iter()
        .map(|r| r.modified_on)
        .max()
        .map(|at| at.with_nanosecond(0).unwrap_or(at))
}

/// RFC 1123 date, as used by `Last-Modified`
pub fn http_date(at: &DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_http_date() {
        let at = Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap();
        assert_eq!(http_date(&at), "Wed, 21 Oct 2015 07:28:00 GMT");
    }

    #[test]
    fn test_last_modified_takes_max() {
        let mut a = Resource::new("/pets", "a", json!(1));
        let mut b = Resource::new("/pets", "b", json!(2));
        a.modified_on = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        b.modified_on = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);

        let latest = last_modified(&[a, b]).unwrap();
        assert_eq!(latest, Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(last_modified(&[]), None);
    }
}
