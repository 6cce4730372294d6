//! Live round trip against a real OBS bucket.

#[cfg(test)]
mod tests {
    use http::header::{CONTENT_TYPE, HeaderValue};
    use http::{HeaderMap, Method, StatusCode};
    use rustobs_core::ObsConfig;
    use rustobs_http::{DecodeStrategy, ObsClient, RequestBody, tables};

    use crate::init_tracing;

    #[tokio::test]
    #[ignore = "requires OBS credentials"]
    async fn test_should_put_get_and_delete_object() {
        init_tracing();
        let client = ObsClient::new(ObsConfig::from_env().unwrap()).unwrap();
        let key = format!("rustobs-integration/{}.txt", chrono::Utc::now().timestamp_millis());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let put = client
            .request(
                Method::PUT,
                &key,
                "",
                headers,
                "hello from rustobs",
                Some(DecodeStrategy::header_only(tables::PUT_OBJECT)),
            )
            .await
            .unwrap();
        assert!(put.request_id().is_some());

        let get = client
            .request(
                Method::GET,
                &key,
                "",
                HeaderMap::new(),
                RequestBody::Empty,
                Some(DecodeStrategy::header_only(tables::GET_OBJECT)),
            )
            .await
            .unwrap();
        assert_eq!(get.body.as_ref(), b"hello from rustobs");

        let delete = client
            .request(
                Method::DELETE,
                &key,
                "",
                HeaderMap::new(),
                RequestBody::Empty,
                Some(DecodeStrategy::header_only(tables::DELETE_OBJECT)),
            )
            .await
            .unwrap();
        assert_eq!(delete.status, StatusCode::NO_CONTENT);

        let err = client
            .request(
                Method::HEAD,
                &key,
                "",
                HeaderMap::new(),
                RequestBody::Empty,
                Some(DecodeStrategy::header_only(tables::HEAD_OBJECT)),
            )
            .await
            .unwrap_err();
        assert_eq!(err.as_api().map(|a| a.status), Some(StatusCode::NOT_FOUND));
    }
}
