//! Error translation over real HTTP.

#[cfg(test)]
mod tests {
    use http::{HeaderMap, Method, StatusCode};
    use rustobs_http::{DecodeStrategy, ObsError, RequestBody, tables};
    use serde_json::{Value, json};

    use crate::{MockObs, respond, xml_error};

    #[tokio::test]
    async fn test_should_translate_xml_error_body() {
        let mock = MockObs::start(|_| {
            respond(
                StatusCode::NOT_FOUND,
                &[("content-type", "application/xml"), ("x-obs-request-id", "hdr-id")],
                xml_error("NoSuchKey", "The specified key does not exist.", "body-id"),
            )
        })
        .await;

        let err = mock
            .client()
            .request(Method::GET, "missing.txt", "", HeaderMap::new(), RequestBody::Empty, None)
            .await
            .unwrap_err();

        let ObsError::Api(api) = &err else {
            panic!("expected an API error, got {err:?}");
        };
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.code(), Some("NoSuchKey"));
        assert_eq!(api.message(), Some("The specified key does not exist."));
        assert_eq!(api.request_id(), Some("body-id"));
        assert!(api.summary.starts_with("Client error: `GET "));
        assert!(api.summary.ends_with("resulted in a `404 Not Found` response"));
        assert_eq!(api.request.uri.path(), "/mybucket/missing.txt");
    }

    #[tokio::test]
    async fn test_should_translate_empty_body_from_headers() {
        let mock = MockObs::start(|_| {
            respond(
                StatusCode::NOT_FOUND,
                &[("x-obs-request-id", "r-404"), ("x-obs-error-code", "NoSuchKey")],
                "",
            )
        })
        .await;

        let err = mock
            .client()
            .request(
                Method::HEAD,
                "missing.txt",
                "",
                HeaderMap::new(),
                RequestBody::Empty,
                Some(DecodeStrategy::header_only(tables::HEAD_OBJECT)),
            )
            .await
            .unwrap_err();

        let api = err.as_api().unwrap();
        assert_eq!(
            Value::Object(api.error.clone()),
            json!({ "RequestId": "r-404", "Code": "NoSuchKey" })
        );
    }

    #[tokio::test]
    async fn test_should_translate_json_error_body() {
        let mock = MockObs::start(|_| {
            respond(
                StatusCode::SERVICE_UNAVAILABLE,
                &[("content-type", "application/json")],
                r#"{"request_id":"r-503","code":"ServiceUnavailable","message":"busy"}"#,
            )
        })
        .await;

        let err = mock
            .client()
            .request(Method::GET, "k", "", HeaderMap::new(), RequestBody::Empty, None)
            .await
            .unwrap_err();

        let api = err.as_api().unwrap();
        assert_eq!(api.code(), Some("ServiceUnavailable"));
        assert_eq!(api.message(), Some("busy"));
        assert_eq!(api.request_id(), Some("r-503"));
        assert!(api.summary.starts_with("Server error:"));
    }

    #[tokio::test]
    async fn test_should_surface_redirect_without_following_it() {
        let mock = MockObs::start(|recorded| {
            if recorded.uri.path() == "/mybucket/moved" {
                respond(
                    StatusCode::TEMPORARY_REDIRECT,
                    &[("location", "/mybucket/target"), ("x-obs-request-id", "r-307")],
                    "",
                )
            } else {
                respond(StatusCode::OK, &[], "")
            }
        })
        .await;

        let err = mock
            .client()
            .request(Method::GET, "moved", "", HeaderMap::new(), RequestBody::Empty, None)
            .await
            .unwrap_err();

        let api = err.as_api().unwrap();
        assert_eq!(api.status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(api.request_id(), Some("r-307"));
        assert_eq!(api.response.header_line("location").as_deref(), Some("/mybucket/target"));
        assert!(api.summary.starts_with("Redirect error:"));
        assert_eq!(mock.seen().len(), 1);
    }

    #[tokio::test]
    async fn test_should_report_transport_failure() {
        let mock = MockObs::start(|_| respond(StatusCode::OK, &[], "")).await;
        let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = closed.local_addr().unwrap().port();
        drop(closed);
        let mut config = mock.config();
        config.endpoint = Some(format!("http://127.0.0.1:{port}"));

        let client = rustobs_http::ObsClient::new(config).unwrap();
        let err = client
            .request(Method::GET, "k", "", HeaderMap::new(), RequestBody::Empty, None)
            .await
            .unwrap_err();

        assert!(matches!(err, ObsError::Transport(_)), "got {err:?}");
    }
}
