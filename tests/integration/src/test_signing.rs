//! Signing round-trip tests: every request is verified by the mock.

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
    use http::{HeaderMap, Method, StatusCode};
    use rustobs_core::SecretKey;
    use rustobs_http::{DecodeStrategy, HeaderTable, ObsClient, RequestBody, tables};
    use serde_json::json;

    use crate::{ACCESS_KEY, MockObs, respond};

    const LIST_PARTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListPartsResult>
  <Bucket>mybucket</Bucket>
  <Key>big.bin</Key>
  <UploadId>u-1</UploadId>
  <Part><PartNumber>1</PartNumber><ETag>"a"</ETag></Part>
</ListPartsResult>"#;

    #[tokio::test]
    async fn test_should_accept_signed_get_and_decode_xml() {
        let mock = MockObs::start(|_| {
            respond(
                StatusCode::OK,
                &[("content-type", "application/xml"), ("x-obs-request-id", "r-1")],
                LIST_PARTS,
            )
        })
        .await;

        let response = mock
            .client()
            .request(
                Method::GET,
                "big.bin",
                "uploadId=u-1",
                HeaderMap::new(),
                RequestBody::Empty,
                Some(DecodeStrategy::with_force_list(&["Part"])),
            )
            .await
            .unwrap();

        assert_eq!(response.get_str("UploadId"), Some("u-1"));
        assert_eq!(response.get("Part"), Some(&json!([{ "PartNumber": "1", "ETag": "\"a\"" }])));
        assert_eq!(response.request_id(), Some("r-1"));

        let seen = mock.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].access_key, ACCESS_KEY);
        assert_eq!(seen[0].uri.path(), "/mybucket/big.bin");
        assert_eq!(seen[0].uri.query(), Some("uploadId=u-1"));
    }

    #[tokio::test]
    async fn test_should_sign_body_content_type_and_vendor_headers() {
        let mock = MockObs::start(|_| {
            respond(
                StatusCode::OK,
                &[("x-obs-version-id", "v-7"), ("x-obs-request-id", "r-2")],
                "",
            )
        })
        .await;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.insert(
            HeaderName::from_static("x-obs-acl"),
            HeaderValue::from_static("public-read"),
        );
        headers.append(
            HeaderName::from_static("x-obs-meta-tag"),
            HeaderValue::from_static("a"),
        );
        headers.append(
            HeaderName::from_static("x-obs-meta-tag"),
            HeaderValue::from_static("b"),
        );

        let response = mock
            .client()
            .request(
                Method::PUT,
                "dir/hello world.txt",
                "",
                headers,
                "hello world",
                Some(DecodeStrategy::header_only(tables::PUT_OBJECT)),
            )
            .await
            .unwrap();

        assert_eq!(response.get_str("VersionId"), Some("v-7"));
        assert_eq!(response.request_id(), Some("r-2"));

        let seen = mock.seen();
        assert_eq!(seen[0].uri.path(), "/mybucket/dir/hello%20world.txt");
        assert_eq!(seen[0].body.as_ref(), b"hello world");
        assert_eq!(
            seen[0].headers.get("content-md5").unwrap(),
            "XrY7u+Ae7tCTyyK7j1rNww=="
        );
    }

    #[tokio::test]
    async fn test_should_send_full_stream_body_after_hashing() {
        let mock = MockObs::start(|_| respond(StatusCode::OK, &[], "")).await;
        let payload = b"0123456789".repeat(1000);
        let body = RequestBody::from_reader(Cursor::new(payload.clone()));

        mock.client()
            .request(
                Method::PUT,
                "stream.bin",
                "",
                HeaderMap::new(),
                body,
                Some(DecodeStrategy::header_only(tables::PUT_OBJECT)),
            )
            .await
            .unwrap();

        assert_eq!(mock.seen()[0].body.as_ref(), payload.as_slice());
    }

    #[tokio::test]
    async fn test_should_sign_allow_listed_subresource() {
        let mock = MockObs::start(|_| {
            respond(
                StatusCode::OK,
                &[("content-type", "application/xml")],
                r#"<?xml version="1.0" encoding="UTF-8"?><CreateBucketConfiguration><Location>cn-north-4</Location></CreateBucketConfiguration>"#,
            )
        })
        .await;

        let response = mock
            .client()
            .request(
                Method::GET,
                "",
                "location&unrelated=1",
                HeaderMap::new(),
                RequestBody::Empty,
                Some(DecodeStrategy::location()),
            )
            .await
            .unwrap();

        assert_eq!(response.get_str("Location"), Some("cn-north-4"));
    }

    #[tokio::test]
    async fn test_should_sign_xml_request_document() {
        let mock = MockObs::start(|_| respond(StatusCode::OK, &[("x-obs-request-id", "r-tag")], "")).await;
        let tagging = json!({ "TagSet": { "Tag": [{ "Key": "team", "Value": "storage" }] } });

        let response = mock
            .client()
            .request(
                Method::PUT,
                "report.csv",
                "tagging",
                HeaderMap::new(),
                RequestBody::xml("Tagging", &tagging).unwrap(),
                Some(DecodeStrategy::header_only(HeaderTable::new())),
            )
            .await
            .unwrap();
        assert_eq!(response.request_id(), Some("r-tag"));

        let seen = mock.seen();
        assert_eq!(seen[0].uri.query(), Some("tagging"));
        let doc = rustobs_xml::parse_document(&seen[0].body, &["Tag"]).unwrap();
        assert_eq!(serde_json::Value::Object(doc), tagging);
    }

    #[tokio::test]
    async fn test_should_reject_wrong_secret() {
        let mock = MockObs::start(|_| respond(StatusCode::OK, &[], "")).await;
        let mut config = mock.config();
        config.secret_key = SecretKey::new("not-the-secret");
        let client = ObsClient::new(config).unwrap();

        let err = client
            .request(Method::GET, "k", "", HeaderMap::new(), RequestBody::Empty, None)
            .await
            .unwrap_err();

        let api = err.as_api().unwrap();
        assert_eq!(api.status, StatusCode::FORBIDDEN);
        assert_eq!(api.code(), Some("SignatureDoesNotMatch"));
        assert!(mock.seen().is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_unknown_access_key() {
        let mock = MockObs::start(|_| respond(StatusCode::OK, &[], "")).await;
        let mut config = mock.config();
        config.access_key = "SOMEONE-ELSE".to_owned();
        let client = ObsClient::new(config).unwrap();

        let err = client
            .request(Method::GET, "k", "", HeaderMap::new(), RequestBody::Empty, None)
            .await
            .unwrap_err();

        assert_eq!(err.as_api().and_then(|a| a.code()), Some("InvalidAccessKeyId"));
    }
}
