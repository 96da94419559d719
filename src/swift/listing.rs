use serde::Deserialize;
use std::io::Read;

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct ListingEntry {
    pub(crate) name: Box<str>,
    pub(crate) bytes: u64,
}

pub(crate) fn parse_listing(body: impl Read) -> serde_json::Result<Vec<ListingEntry>> {
    serde_json::from_reader(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_listing_body() {
        let body = r#"[
            {"name": "00003brre8lgz", "bytes": 10240, "hash": "d41d8cd98f00b204e9800998ecf8427e",
             "content_type": "application/octet-stream", "last_modified": "2019-02-28T10:17:09.206740"},
            {"name": "00004qvt1t24q", "bytes": 4096, "hash": "9e107d9d372bb6826bd81d3542a419d6",
             "content_type": "application/octet-stream", "last_modified": "2019-02-28T10:17:10.102401"}
        ]"#;
        let entries = parse_listing(Cursor::new(body)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name.as_ref(), "00003brre8lgz");
        assert_eq!(entries[0].bytes, 10240);
        assert_eq!(entries[1].name.as_ref(), "00004qvt1t24q");
        assert_eq!(entries[1].bytes, 4096);
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse_listing(Cursor::new("[]")).unwrap().is_empty());
    }
}
