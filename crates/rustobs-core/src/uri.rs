//! URI templates for addressing buckets and objects.
//!
//! Virtual-hosted style is the default:
//!
//! ```text
//! https://{bucket.}obs.{region.}myhuaweicloud.com/{object}{?query}
//! ```
//!
//! When an endpoint override is configured (a proxy or a local mock), path
//! style is used instead: `{endpoint}/{bucket}/{object}{?query}`.

/// Provider domain appended after the service and region labels.
pub const DEFAULT_PROVIDER_DOMAIN: &str = "myhuaweicloud.com";

/// Service label that precedes the region in host names.
pub const DEFAULT_SERVICE: &str = "obs";

/// Build a virtual-hosted-style URI.
///
/// Empty `bucket` or `region` segments are omitted along with their dot.
/// Leading slashes on `object` are stripped.
///
/// # Examples
///
/// ```
/// use rustobs_core::create_uri;
///
/// assert_eq!(
///     create_uri("photos", "eu-west-1", "/a/b.png", "acl", "myhuaweicloud.com"),
///     "https://photos.obs.eu-west-1.myhuaweicloud.com/a/b.png?acl"
/// );
/// assert_eq!(
///     create_uri("", "", "", "", "myhuaweicloud.com"),
///     "https://obs.myhuaweicloud.com/"
/// );
/// ```
#[must_use]
pub fn create_uri(
    bucket: &str,
    region: &str,
    object: &str,
    query: &str,
    provider_domain: &str,
) -> String {
    let mut uri = String::from("https://");
    if !bucket.is_empty() {
        uri.push_str(bucket);
        uri.push('.');
    }
    uri.push_str(DEFAULT_SERVICE);
    uri.push('.');
    if !region.is_empty() {
        uri.push_str(region);
        uri.push('.');
    }
    uri.push_str(provider_domain);
    uri.push('/');
    uri.push_str(object.trim_start_matches('/'));
    push_query(&mut uri, query);
    uri
}

/// Build a path-style URI against an explicit endpoint.
///
/// # Examples
///
/// ```
/// use rustobs_core::uri::create_path_style_uri;
///
/// assert_eq!(
///     create_path_style_uri("http://127.0.0.1:9000/", "photos", "a.png", ""),
///     "http://127.0.0.1:9000/photos/a.png"
/// );
/// ```
#[must_use]
pub fn create_path_style_uri(endpoint: &str, bucket: &str, object: &str, query: &str) -> String {
    let mut uri = endpoint.trim_end_matches('/').to_owned();
    uri.push('/');
    if !bucket.is_empty() {
        uri.push_str(bucket);
        uri.push('/');
    }
    uri.push_str(object.trim_start_matches('/'));
    push_query(&mut uri, query);
    uri
}

fn push_query(uri: &mut String, query: &str) {
    if !query.is_empty() {
        uri.push('?');
        uri.push_str(query);
    }
}
