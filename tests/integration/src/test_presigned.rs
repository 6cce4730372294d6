//! Pre-signed URL tests: the URL is fetched with a plain HTTP client.

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use http::StatusCode;

    use crate::{ACCESS_KEY, MockObs, respond};

    fn now() -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap()
    }

    async fn fetch(url: &str) -> (StatusCode, String) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }

    #[tokio::test]
    async fn test_should_serve_valid_presigned_url() {
        let mock = MockObs::start(|_| respond(StatusCode::OK, &[], "photo-bytes")).await;
        let url = mock
            .client()
            .create_temporary_url("dir/photo.png", now() + 300, None);

        assert!(url.starts_with(&format!("{}/mybucket/dir/photo.png?AccessKeyId=", mock.endpoint())));

        let (status, body) = fetch(&url).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "photo-bytes");
        assert_eq!(mock.seen()[0].access_key, ACCESS_KEY);
    }

    #[tokio::test]
    async fn test_should_reject_expired_presigned_url() {
        let mock = MockObs::start(|_| respond(StatusCode::OK, &[], "")).await;
        let url = mock
            .client()
            .create_temporary_url("dir/photo.png", now() - 10, None);

        let (status, body) = fetch(&url).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("<Code>RequestExpired</Code>"));
    }

    #[tokio::test]
    async fn test_should_reject_presigned_url_for_other_object() {
        let mock = MockObs::start(|_| respond(StatusCode::OK, &[], "")).await;
        let url = mock
            .client()
            .create_temporary_url("dir/photo.png", now() + 300, None)
            .replace("photo.png", "other.png");

        let (status, body) = fetch(&url).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("<Code>SignatureDoesNotMatch</Code>"));
        assert!(mock.seen().is_empty());
    }
}
