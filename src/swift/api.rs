use chrono::Utc;
use std::fmt::Write;

pub const KEY_X_AUTH_USER: &str = "X-Auth-User";
pub const KEY_X_AUTH_KEY: &str = "X-Auth-Key";
pub const KEY_X_AUTH_TOKEN: &str = "X-Auth-Token";
pub const KEY_X_STORAGE_URL: &str = "X-Storage-Url";
pub const KEY_X_COPY_FROM: &str = "X-Copy-From";
pub const KEY_X_OBJECT_MANIFEST: &str = "X-Object-Manifest";
pub const KEY_X_VERSIONS_LOCATION: &str = "X-Versions-Location";

pub const MULTIPART_BYTERANGES: &str = "multipart/byteranges";

pub(crate) const FMT_DATE_RFC1123: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub fn http_date() -> String {
    Utc::now().format(FMT_DATE_RFC1123).to_string()
}

pub fn container_uri(uri_base: &str, namespace: &str, container: &str) -> String {
    let mut uri = String::with_capacity(uri_base.len() + namespace.len() + container.len() + 1);
    uri.push_str(uri_base);
    uri.push('/');
    uri.push_str(namespace);
    uri.push_str(container);
    uri
}

pub fn object_uri(uri_base: &str, namespace: &str, container: &str, object_id: &str) -> String {
    let mut uri = container_uri(uri_base, namespace, container);
    uri.push('/');
    uri.push_str(object_id);
    uri
}

pub fn part_uri(
    uri_base: &str,
    namespace: &str,
    container: &str,
    object_id: &str,
    part_number: usize,
    part_number_width: usize,
) -> String {
    let mut uri = object_uri(uri_base, namespace, container, object_id);
    uri.push('/');
    write!(uri, "{:0width$}", part_number, width = part_number_width)
        .expect("writing to a string never fails");
    uri
}

pub fn listing_uri(
    uri_base: &str,
    namespace: &str,
    container: &str,
    prefix: Option<&str>,
    marker: Option<&str>,
    limit: Option<u32>,
) -> String {
    let mut uri = container_uri(uri_base, namespace, container);
    uri.push_str("?format=json");
    if let Some(prefix) = prefix {
        uri.push_str("&prefix=");
        uri.push_str(prefix);
    }
    if let Some(marker) = marker {
        uri.push_str("&marker=");
        uri.push_str(marker);
    }
    if let Some(limit) = limit {
        uri.push_str("&limit=");
        uri.push_str(&limit.to_string());
    }
    uri
}

/// The manifest value registers the part prefix, so the trailing slash is
/// significant.
pub fn manifest_value(dst_path: &str, object_id: &str) -> String {
    let mut value = String::with_capacity(dst_path.len() + object_id.len() + 2);
    value.push_str(dst_path.trim_start_matches('/'));
    value.push('/');
    value.push_str(object_id);
    value.push('/');
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_container_and_object_uris() {
        assert_eq!(container_uri("/v1", "ns1", "/container0"), "/v1/ns1/container0");
        assert_eq!(
            object_uri("/v1", "ns1", "/containerDst", "00003brre8lgz"),
            "/v1/ns1/containerDst/00003brre8lgz"
        );
    }

    #[test]
    fn test_part_uri_is_one_based_and_zero_padded() {
        assert_eq!(
            part_uri("/v1", "ns1", "/container2", "00003brre8lgz", 1, 7),
            "/v1/ns1/container2/00003brre8lgz/0000001"
        );
        assert_eq!(
            part_uri("/v1", "ns1", "/container2", "00003brre8lgz", 123, 7),
            "/v1/ns1/container2/00003brre8lgz/0000123"
        );
    }

    #[test]
    fn test_listing_uri_parameter_order() {
        assert_eq!(
            listing_uri(
                "/v1",
                "ns1",
                "/container1",
                Some("0000"),
                Some("00003brre8lgz"),
                Some(1000)
            ),
            "/v1/ns1/container1?format=json&prefix=0000&marker=00003brre8lgz&limit=1000"
        );
        assert_eq!(
            listing_uri("/v1", "ns1", "/container1", None, None, None),
            "/v1/ns1/container1?format=json"
        );
    }

    #[test]
    fn test_manifest_value_keeps_trailing_slash() {
        assert_eq!(
            manifest_value("/container2", "00003brre8lgz"),
            "container2/00003brre8lgz/"
        );
    }

    #[test]
    fn test_http_date_round_trips() {
        let value = http_date();
        let parsed = DateTime::parse_from_rfc2822(&value).unwrap();
        assert!((Utc::now().timestamp() - parsed.timestamp()).abs() <= 10);
    }
}
