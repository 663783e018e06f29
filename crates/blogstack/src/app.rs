use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    routing::get,
    Router,
};
use blogstack_auth::{auth_routes, TOKEN_HEADER};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::{Config, UploadBackend},
    handlers::{
        blogs::{create_blog, delete_blog, get_blog, list_blogs, update_blog},
        health::{healthz, livez, readyz},
    },
    state::AppState,
    uploads::UPLOADS_MOUNT,
};

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match config
        .cors_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
    {
        Ok(Some(origin)) => AllowOrigin::exact(origin),
        Ok(None) => AllowOrigin::from(Any),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid CORS_ORIGIN, allowing any origin");
            AllowOrigin::from(Any)
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(TOKEN_HEADER),
        ])
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    let max_body = state.upload_policy.max_body_size();

    let blog_routes = Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/{id}", get(get_blog).put(update_blog).delete(delete_blog))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body));

    let api_routes = Router::new()
        .nest("/auth", auth_routes().with_state(state.auth.clone()))
        .nest("/blogs", blog_routes)
        .layer(cors_layer(config));

    let mut app = Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes);

    if config.upload_backend == UploadBackend::Local {
        app = app.nest_service(UPLOADS_MOUNT, ServeDir::new(&config.uploads_dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;
    use uuid::Uuid;

    use blogstack_core::blog::Blog;
    use blogstack_core::storage::{BlogRepository, RepositoryError, Result as RepoResult};
    use blogstack_core::upload::{ImageStore, ImageUpload, UploadError, UploadPolicy};

    use crate::uploads::LocalImageStore;

    const BOUNDARY: &str = "XBLOGSTACKBOUNDARY";

    struct TestApp {
        app: Router,
        state: AppState,
        uploads: TempDir,
    }

    impl TestApp {
        async fn new() -> Self {
            Self::with_policy(UploadPolicy::default()).await
        }

        async fn with_policy(policy: UploadPolicy) -> Self {
            let uploads = tempfile::tempdir().unwrap();
            let state = AppState::for_tests(uploads.path())
                .await
                .with_upload_policy(policy);
            let app = create_app(state.clone(), &Config::for_tests(uploads.path()));
            Self {
                app,
                state,
                uploads,
            }
        }

        /// Rebuilds the router around a modified copy of the state.
        fn reconfigure(&mut self, f: impl FnOnce(AppState) -> AppState) {
            self.state = f(self.state.clone());
            self.app = create_app(self.state.clone(), &Config::for_tests(self.uploads.path()));
        }

        async fn flaky_images(
            &self,
            stores_before_failure: Option<usize>,
            fail_deletes: bool,
        ) -> Arc<dyn ImageStore> {
            Arc::new(FlakyImages {
                inner: LocalImageStore::new(self.uploads.path()).await.unwrap(),
                stores_before_failure,
                fail_deletes,
                stored: AtomicUsize::new(0),
            })
        }

        async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
            let response = self.app.clone().oneshot(req).await.unwrap();
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, json)
        }

        async fn signup(&self, name: &str, email: &str) -> String {
            let req = json_request(
                "POST",
                "/api/auth/signup",
                None,
                json!({"name": name, "email": email, "password": "secret1"}),
            );
            let (status, body) = self.send(req).await;
            assert_eq!(status, StatusCode::OK, "signup failed: {body}");
            body["token"].as_str().unwrap().to_string()
        }

        async fn create_text_blog(&self, token: &str, title: &str) -> Value {
            let req = json_request(
                "POST",
                "/api/blogs",
                Some(token),
                json!({"title": title, "content": "Body"}),
            );
            let (status, body) = self.send(req).await;
            assert_eq!(status, StatusCode::OK, "create failed: {body}");
            body
        }

        fn stored_files(&self) -> usize {
            std::fs::read_dir(self.uploads.path()).unwrap().count()
        }
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File {
            field: &'a str,
            name: &'a str,
            content_type: &'a str,
            data: Vec<u8>,
        },
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File {
                    field,
                    name,
                    content_type,
                    data,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(method: &str, uri: &str, token: &str, parts: &[Part]) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(TOKEN_HEADER, token)
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    fn png(field: &str) -> Part<'_> {
        Part::File {
            field,
            name: "image.png",
            content_type: "image/png",
            data: vec![0x89, b'P', b'N', b'G'],
        }
    }

    /// Writes to disk like the local store, but can refuse stores after a
    /// number of successes and refuse every delete.
    struct FlakyImages {
        inner: LocalImageStore,
        stores_before_failure: Option<usize>,
        fail_deletes: bool,
        stored: AtomicUsize,
    }

    #[async_trait]
    impl ImageStore for FlakyImages {
        async fn store(&self, upload: &ImageUpload) -> Result<String, UploadError> {
            let count = self.stored.fetch_add(1, Ordering::SeqCst);
            if self.stores_before_failure.is_some_and(|limit| count >= limit) {
                return Err(UploadError::Backend("bucket unavailable".into()));
            }
            self.inner.store(upload).await
        }

        async fn delete(&self, url: &str) -> Result<(), UploadError> {
            if self.fail_deletes {
                return Err(UploadError::Backend("delete refused".into()));
            }
            self.inner.delete(url).await
        }

        async fn check(&self) -> Result<(), UploadError> {
            self.inner.check().await
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    /// Reads through to the wrapped repository; every write fails.
    struct ReadOnlyBlogs(Arc<dyn BlogRepository>);

    #[async_trait]
    impl BlogRepository for ReadOnlyBlogs {
        async fn get_blog(&self, id: Uuid) -> RepoResult<Option<Blog>> {
            self.0.get_blog(id).await
        }

        async fn list_blogs(&self, skip: u64, limit: u64) -> RepoResult<Vec<Blog>> {
            self.0.list_blogs(skip, limit).await
        }

        async fn count_blogs(&self) -> RepoResult<u64> {
            self.0.count_blogs().await
        }

        async fn create_blog(&self, _blog: &Blog) -> RepoResult<()> {
            Err(RepositoryError::QueryFailed("disk I/O error".into()))
        }

        async fn update_blog(&self, _blog: &Blog) -> RepoResult<()> {
            Err(RepositoryError::QueryFailed("disk I/O error".into()))
        }

        async fn delete_blog(&self, id: Uuid) -> RepoResult<()> {
            self.0.delete_blog(id).await
        }

        async fn ping(&self) -> RepoResult<()> {
            self.0.ping().await
        }
    }

    fn read_only_blogs(state: AppState) -> AppState {
        let inner = state.blogs.clone();
        state.with_blogs(Arc::new(ReadOnlyBlogs(inner)))
    }

    fn with_cover(title: &str) -> [Part<'_>; 3] {
        [
            Part::Text("title", title),
            Part::Text("content", "Body"),
            png("coverImage"),
        ]
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(TOKEN_HEADER, token)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_livez_and_readyz() {
        let t = TestApp::new().await;

        let response = t.app.clone().oneshot(get("/livez")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, body) = t.send(get("/readyz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["healthy"], true);

        let (status, body) = t.send(get("/healthz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["uploads"], "local");
    }

    #[tokio::test]
    async fn test_list_blogs_empty() {
        let t = TestApp::new().await;

        let (status, body) = t.send(get("/api/blogs")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"blogs": [], "currentPage": 1, "totalPages": 0, "totalBlogs": 0})
        );
    }

    #[tokio::test]
    async fn test_create_requires_token() {
        let t = TestApp::new().await;

        let req = json_request("POST", "/api/blogs", None, json!({"title": "t", "content": "c"}));
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "No token, authorization denied");
    }

    #[tokio::test]
    async fn test_create_validation_errors() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;

        let req = json_request("POST", "/api/blogs", Some(&token), json!({"title": "  "}));
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let messages: Vec<_> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["msg"].as_str().unwrap())
            .collect();
        assert_eq!(messages, vec!["Title is required", "Content is required"]);
    }

    #[tokio::test]
    async fn test_create_and_get_with_author() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;

        let created = t.create_text_blog(&token, " Hello ").await;
        assert_eq!(created["title"], "Hello");
        assert_eq!(created["coverImage"], "");
        assert_eq!(created["author"]["name"], "Ada");
        assert_eq!(created["author"]["email"], "ada@example.com");

        let id = created["_id"].as_str().unwrap();
        let (status, body) = t.send(get(&format!("/api/blogs/{id}"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["_id"], id);
        assert_eq!(body["author"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_get_unknown_or_malformed_id() {
        let t = TestApp::new().await;

        for uri in [
            "/api/blogs/00000000-0000-0000-0000-000000000000",
            "/api/blogs/not-an-id",
        ] {
            let (status, body) = t.send(get(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["message"], "Blog not found");
        }
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;
        for i in 0..3 {
            t.create_text_blog(&token, &format!("Post {i}")).await;
        }

        let (status, body) = t.send(get("/api/blogs?page=2&limit=2")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currentPage"], 2);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["totalBlogs"], 3);
        assert_eq!(body["blogs"].as_array().unwrap().len(), 1);
        assert_eq!(body["blogs"][0]["title"], "Post 0");

        let (status, body) = t.send(get("/api/blogs?page=abc&limit=0")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currentPage"], 1);
        assert_eq!(body["blogs"][0]["title"], "Post 2");
    }

    #[tokio::test]
    async fn test_create_multipart_with_images() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;

        let req = multipart_request(
            "POST",
            "/api/blogs",
            &token,
            &[
                Part::Text("title", "With images"),
                Part::Text("content", "Body"),
                png("coverImage"),
                png("contentImages"),
                png("contentImages"),
            ],
        );
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert!(body["coverImage"].as_str().unwrap().starts_with("/uploads/"));
        assert_eq!(body["contentImages"].as_array().unwrap().len(), 2);
        assert_eq!(t.stored_files(), 3);

        let cover = body["coverImage"].as_str().unwrap();
        let response = t.app.clone().oneshot(get(cover)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_multipart_rejects_bad_files() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;

        let cases = [
            (
                Part::File {
                    field: "coverImage",
                    name: "doc.pdf",
                    content_type: "application/pdf",
                    data: vec![1, 2, 3],
                },
                "File upload only supports the following filetypes: jpeg, jpg, png, gif",
            ),
            (png("avatar"), "Unexpected field"),
        ];

        for (file, expected) in cases {
            let req = multipart_request(
                "POST",
                "/api/blogs",
                &token,
                &[Part::Text("title", "t"), Part::Text("content", "c"), file],
            );
            let (status, body) = t.send(req).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], expected);
        }
        assert_eq!(t.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_multipart_rejects_second_cover() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;

        let req = multipart_request(
            "POST",
            "/api/blogs",
            &token,
            &[
                Part::Text("title", "t"),
                Part::Text("content", "c"),
                png("coverImage"),
                png("coverImage"),
            ],
        );
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Too many files uploaded.");
        assert_eq!(t.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_multipart_rejects_large_file() {
        let policy = UploadPolicy {
            max_file_size: 8,
            ..UploadPolicy::default()
        };
        let t = TestApp::with_policy(policy).await;
        let token = t.signup("Ada", "ada@example.com").await;

        let req = multipart_request(
            "POST",
            "/api/blogs",
            &token,
            &[
                Part::Text("title", "t"),
                Part::Text("content", "c"),
                Part::File {
                    field: "coverImage",
                    name: "big.jpg",
                    content_type: "image/jpeg",
                    data: vec![0u8; 64],
                },
            ],
        );
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "File size is too large. Maximum size is 5MB.");
    }

    #[tokio::test]
    async fn test_update_replaces_images() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;

        let req = multipart_request(
            "POST",
            "/api/blogs",
            &token,
            &[
                Part::Text("title", "t"),
                Part::Text("content", "c"),
                png("coverImage"),
                png("contentImages"),
            ],
        );
        let (_, created) = t.send(req).await;
        let id = created["_id"].as_str().unwrap();
        let old_cover = created["coverImage"].as_str().unwrap().to_string();

        let req = multipart_request(
            "PUT",
            &format!("/api/blogs/{id}"),
            &token,
            &[
                Part::Text("title", "New title"),
                Part::Text("content", "New body"),
                png("coverImage"),
            ],
        );
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["title"], "New title");
        assert_ne!(body["coverImage"], old_cover.as_str());
        assert_eq!(body["contentImages"], created["contentImages"]);
        // old cover deleted, new cover added, content image kept
        assert_eq!(t.stored_files(), 2);
        let old_name = old_cover.trim_start_matches("/uploads/");
        assert!(!t.uploads.path().join(old_name).exists());
    }

    #[tokio::test]
    async fn test_update_json_keeps_images() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;
        let created = t.create_text_blog(&token, "Title").await;
        let id = created["_id"].as_str().unwrap();

        let req = json_request(
            "PUT",
            &format!("/api/blogs/{id}"),
            Some(&token),
            json!({"title": "Edited", "content": "Edited body"}),
        );
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Edited");
        assert_eq!(body["createdAt"], created["createdAt"]);
    }

    #[tokio::test]
    async fn test_only_author_can_modify() {
        let t = TestApp::new().await;
        let ada = t.signup("Ada", "ada@example.com").await;
        let bob = t.signup("Bob", "bob@example.com").await;
        let created = t.create_text_blog(&ada, "Ada's post").await;
        let uri = format!("/api/blogs/{}", created["_id"].as_str().unwrap());

        let req = json_request("PUT", &uri, Some(&bob), json!({"title": "x", "content": "y"}));
        let (status, body) = t.send(req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "User not authorized");

        let (status, body) = t.send(delete(&uri, &bob)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "User not authorized");
    }

    #[tokio::test]
    async fn test_update_missing_blog() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;

        let req = json_request(
            "PUT",
            "/api/blogs/00000000-0000-0000-0000-000000000000",
            Some(&token),
            json!({"title": "x", "content": "y"}),
        );
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Blog not found");
    }

    #[tokio::test]
    async fn test_delete_removes_blog_and_images() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;

        let req = multipart_request(
            "POST",
            "/api/blogs",
            &token,
            &[
                Part::Text("title", "t"),
                Part::Text("content", "c"),
                png("coverImage"),
                png("contentImages"),
            ],
        );
        let (_, created) = t.send(req).await;
        assert_eq!(t.stored_files(), 2);
        let uri = format!("/api/blogs/{}", created["_id"].as_str().unwrap());

        let (status, body) = t.send(delete(&uri, &token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Blog removed");
        assert_eq!(t.stored_files(), 0);

        let (status, _) = t.send(get(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_urlencoded() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;

        let req = Request::builder()
            .method("POST")
            .uri("/api/blogs")
            .header("content-type", "application/x-www-form-urlencoded")
            .header(TOKEN_HEADER, &token)
            .body(Body::from("title=Hello+form&content=Line%20one"))
            .unwrap();
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["title"], "Hello form");
        assert_eq!(body["content"], "Line one");
        assert_eq!(body["author"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_create_without_fields_is_validation_error() {
        let t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;

        let cases = [
            (None, ""),
            (Some("application/json"), ""),
            (Some("text/plain"), "title=ignored"),
        ];

        for (content_type, body) in cases {
            let mut builder = Request::builder()
                .method("POST")
                .uri("/api/blogs")
                .header(TOKEN_HEADER, &token);
            if let Some(content_type) = content_type {
                builder = builder.header("content-type", content_type);
            }
            let (status, body) = t.send(builder.body(Body::from(body)).unwrap()).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "content type {content_type:?}");
            let messages: Vec<_> = body["errors"]
                .as_array()
                .unwrap()
                .iter()
                .map(|e| e["msg"].as_str().unwrap())
                .collect();
            assert_eq!(messages, vec!["Title is required", "Content is required"]);
        }
    }

    #[tokio::test]
    async fn test_store_failure_removes_images_already_stored() {
        let mut t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;
        let images = t.flaky_images(Some(1), false).await;
        t.reconfigure(|s| s.with_images(images));

        let req = multipart_request(
            "POST",
            "/api/blogs",
            &token,
            &[
                Part::Text("title", "t"),
                Part::Text("content", "c"),
                png("coverImage"),
                png("contentImages"),
            ],
        );
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Server Error");
        assert_eq!(t.stored_files(), 0);
        let (_, page) = t.send(get("/api/blogs")).await;
        assert_eq!(page["totalBlogs"], 0);
    }

    #[tokio::test]
    async fn test_create_write_failure_removes_images() {
        let mut t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;
        t.reconfigure(read_only_blogs);

        let req = multipart_request("POST", "/api/blogs", &token, &with_cover("t"));
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Server Error");
        assert_eq!(t.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_update_write_failure_keeps_old_images() {
        let mut t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;
        let (_, created) = t
            .send(multipart_request("POST", "/api/blogs", &token, &with_cover("t")))
            .await;
        let uri = format!("/api/blogs/{}", created["_id"].as_str().unwrap());
        let old_cover = created["coverImage"].as_str().unwrap().to_string();
        t.reconfigure(read_only_blogs);

        let req = multipart_request("PUT", &uri, &token, &with_cover("new"));
        let (status, _) = t.send(req).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        // the new cover is removed again, the old one is untouched
        assert_eq!(t.stored_files(), 1);
        let old_name = old_cover.trim_start_matches("/uploads/");
        assert!(t.uploads.path().join(old_name).exists());

        let (_, blog) = t.send(get(&uri)).await;
        assert_eq!(blog["title"], "t");
        assert_eq!(blog["coverImage"], old_cover.as_str());
    }

    #[tokio::test]
    async fn test_image_delete_failures_do_not_fail_requests() {
        let mut t = TestApp::new().await;
        let token = t.signup("Ada", "ada@example.com").await;
        let (_, created) = t
            .send(multipart_request("POST", "/api/blogs", &token, &with_cover("t")))
            .await;
        let uri = format!("/api/blogs/{}", created["_id"].as_str().unwrap());
        let images = t.flaky_images(None, true).await;
        t.reconfigure(|s| s.with_images(images));

        let req = multipart_request("PUT", &uri, &token, &with_cover("new"));
        let (status, body) = t.send(req).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["title"], "new");
        assert_ne!(body["coverImage"], created["coverImage"]);
        // the replaced cover could not be deleted and stays on disk
        assert_eq!(t.stored_files(), 2);

        let (status, body) = t.send(delete(&uri, &token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Blog removed");
        assert_eq!(t.stored_files(), 2);
        let (status, _) = t.send(get(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
