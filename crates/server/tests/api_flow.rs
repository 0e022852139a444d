use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;
use uuid::Uuid;

use server::routes::{self, auth};
use service::auth::service::{verify_token, AuthConfig};
use service::auth::AuthService;
use service::directory::DirectoryService;
use service::dogs::DogService;
use service::profile::repository::ProfileRepository;
use service::profile::ProfileService;
use service::testing::{MemoryPhotoStore, MemoryRepository};

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

fn build_app_with(repo: Arc<MemoryRepository>) -> Router {
    let photos = Arc::new(MemoryPhotoStore::default());
    let profile_repo: Arc<dyn ProfileRepository> = repo.clone();
    let state = auth::ServerState {
        auth_service: Arc::new(AuthService::new(
            repo,
            AuthConfig {
                jwt_secret: "test-secret".into(),
                token_ttl_days: 7,
                password_algorithm: "argon2".into(),
            },
        )),
        profile_service: Arc::new(ProfileService::new(
            Arc::clone(&profile_repo),
            photos.clone(),
            Duration::from_secs(3600),
        )),
        dog_service: Arc::new(DogService::new(Arc::clone(&profile_repo))),
        directory_service: Arc::new(DirectoryService::new(profile_repo)),
        photos,
        auth: auth::ServerAuthConfig { jwt_secret: "test-secret".into() },
        max_upload_bytes: 5 * 1024 * 1024,
    };
    routes::build_router(cors(), state)
}

fn build_app() -> Router {
    build_app_with(Arc::new(MemoryRepository::default()))
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    Ok((status, value))
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn multipart_request(uri: &str, token: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let boundary = "test-boundary-7MA4YWxkTrZu0gW";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"profilePhoto\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={}", boundary))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap()
}

fn signup_payload(email: &str, role: &str) -> Value {
    json!({
        "email": email,
        "password": "S3curePass!",
        "role": role,
        "firstName": "Dana",
        "lastName": "Woof",
        "phone": "5551234567",
        "zipCode": "94107",
    })
}

async fn signup(app: &Router, email: &str, role: &str) -> anyhow::Result<String> {
    let (status, body) = send(app, json_request("POST", "/auth/signup", None, signup_payload(email, role))).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body["token"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn test_health_is_public() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, get_request("/health", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_signup_issues_token_with_matching_role() -> anyhow::Result<()> {
    let app = build_app();
    let token = signup(&app, "owner@example.com", "owner").await?;
    let identity = verify_token("test-secret", &token)?;
    assert_eq!(identity.role, "owner");
    assert_eq!(identity.email, "owner@example.com");
    Ok(())
}

#[tokio::test]
async fn test_signup_duplicate_email_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let _ = signup(&app, "dup@example.com", "owner").await?;
    let (status, body) = send(&app, json_request("POST", "/auth/signup", None, signup_payload("dup@example.com", "trainer"))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
    Ok(())
}

#[tokio::test]
async fn test_signup_missing_fields_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _) = send(&app, json_request("POST", "/auth/signup", None, json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_login_flow() -> anyhow::Result<()> {
    let app = build_app();
    let _ = signup(&app, "dana@example.com", "owner").await?;

    let (status, body) = send(
        &app,
        json_request("POST", "/auth/login", None, json!({"email": "dana@example.com", "password": "S3curePass!"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "owner");
    assert_eq!(body["user"]["email"], "dana@example.com");
    assert!(body["user"].get("password").is_none());
    assert!(body["token"].as_str().is_some());

    let (status, _) = send(
        &app,
        json_request("POST", "/auth/login", None, json!({"email": "dana@example.com", "password": "wrong"})),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request("POST", "/auth/login", None, json!({"email": "dana@example.com"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_logout_is_stateless_and_public() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, json_request("POST", "/auth/logout", None, json!({}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
    Ok(())
}

#[tokio::test]
async fn test_bearer_gate_distinguishes_missing_from_invalid() -> anyhow::Result<()> {
    let app = build_app();

    let (status, _) = send(&app, get_request("/owner/profile", None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .method("GET")
        .uri("/owner/profile")
        .header("authorization", "Token abc")
        .body(Body::empty())?;
    let (status, _) = send(&app, req).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_request("/owner/profile", Some("garbage-token"))).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_owner_profile_and_dog_lifecycle() -> anyhow::Result<()> {
    let app = build_app();
    let token = signup(&app, "owner@example.com", "owner").await?;

    // fresh profile: defaults, never null
    let (status, body) = send(&app, get_request("/owner/profile", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["dogs"], json!([]));
    assert_eq!(body["profile"]["location"]["city"], "");
    assert_eq!(body["profile"]["profilePhoto"], "");

    // location update replaces the sub-document with empty defaults
    let (status, body) = send(
        &app,
        json_request("PUT", "/owner/profile", Some(&token), json!({"location": {"city": "Oakland"}, "firstName": "Maya"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["location"]["city"], "Oakland");
    assert_eq!(body["profile"]["location"]["address"], "");
    assert_eq!(body["profile"]["firstName"], "Maya");

    // add a dog
    let (status, body) = send(
        &app,
        json_request("POST", "/owner/dogs", Some(&token), json!({"name": "Rex", "age": 3})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let dog_id = body["dog"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["dog"]["name"], "Rex");
    assert_eq!(body["dog"]["size"], "small");

    let (_, body) = send(&app, get_request("/owner/profile", Some(&token))).await?;
    assert_eq!(body["profile"]["dogs"].as_array().unwrap().len(), 1);

    // patch only the age; other fields survive
    let (status, body) = send(
        &app,
        json_request("PUT", &format!("/owner/dogs/{}", dog_id), Some(&token), json!({"age": 4})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dog"]["age"], 4);
    assert_eq!(body["dog"]["name"], "Rex");

    // malformed id is a 400
    let (status, _) = send(
        &app,
        json_request("PUT", "/owner/dogs/not-a-uuid", Some(&token), json!({"age": 1})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // deletion is idempotent
    let req = json_request("DELETE", &format!("/owner/dogs/{}", dog_id), Some(&token), json!({}));
    let (status, _) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    let req = json_request("DELETE", &format!("/owner/dogs/{}", dog_id), Some(&token), json!({}));
    let (status, _) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get_request("/owner/profile", Some(&token))).await?;
    assert_eq!(body["profile"]["dogs"].as_array().unwrap().len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_trainer_profile_specialization_policy() -> anyhow::Result<()> {
    let app = build_app();
    let token = signup(&app, "tess@example.com", "trainer").await?;

    let patch = json!({
        "yearsOfExperience": 6,
        "services": [
            {"type": "Obedience", "price": 80},
            {"type": "Agility"},
            {"type": "Grooming"},
            {"type": "Boarding"},
        ],
        "specializations": ["Obedience", "Herding", "Agility", "Grooming", "Boarding"],
        "bio": "Working dogs a specialty",
    });
    let (status, body) = send(&app, json_request("PUT", "/trainer/profile", Some(&token), patch)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["portfolio"]["specializations"], json!(["Obedience", "Agility", "Grooming"]));
    assert_eq!(body["businessInfo"]["yearsOfExperience"], 6);
    assert_eq!(body["services"][1]["price"], 0.0);
    assert_eq!(body["location"]["city"], "");

    let (status, body) = send(&app, get_request("/trainer/profile", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["portfolio"]["bio"], "Working dogs a specialty");
    assert_eq!(body["businessInfo"]["certifications"], json!([]));
    Ok(())
}

#[tokio::test]
async fn test_trainer_directory_listing_and_lookup() -> anyhow::Result<()> {
    let repo = Arc::new(MemoryRepository::default());
    let incomplete = repo.seed_user("trainer"); // trainer user with no profile row
    let app = build_app_with(repo);

    let owner_token = signup(&app, "owner@example.com", "owner").await?;
    let trainer_token = signup(&app, "tess@example.com", "trainer").await?;
    let trainer_id = verify_token("test-secret", &trainer_token)?.user_id;

    let (status, body) = send(&app, get_request("/owner/trainers", Some(&owner_token))).await?;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    for summary in list {
        assert_eq!(summary["averageRating"], 0.0);
        assert_eq!(summary["totalReviews"], 0);
        assert!(summary["specializations"].is_array());
    }

    // malformed id
    let (status, _) = send(&app, get_request("/owner/trainers/not-a-uuid", Some(&owner_token))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // unknown id
    let (status, _) = send(
        &app,
        get_request(&format!("/owner/trainers/{}", Uuid::new_v4()), Some(&owner_token)),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // owner-role id
    let owner_id = verify_token("test-secret", &owner_token)?.user_id;
    let (status, _) = send(
        &app,
        get_request(&format!("/owner/trainers/{}", owner_id), Some(&owner_token)),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // trainer user without a completed profile
    let (status, _) = send(
        &app,
        get_request(&format!("/owner/trainers/{}", incomplete.id), Some(&owner_token)),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // trainer with a profile resolves to the flattened detail
    let (status, body) = send(
        &app,
        get_request(&format!("/owner/trainers/{}", trainer_id), Some(&owner_token)),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "tess@example.com");
    assert_eq!(body["yearsOfExperience"], 0);
    assert_eq!(body["services"], json!([]));
    Ok(())
}

#[tokio::test]
async fn test_upload_photo_flow() -> anyhow::Result<()> {
    let app = build_app();
    let token = signup(&app, "owner@example.com", "owner").await?;

    // unauthenticated upload is rejected at the gate
    let resp = send(
        &app,
        multipart_request("/auth/upload-photo", "nope", "me.png", "image/png", b"png-bytes"),
    )
    .await?;
    assert_eq!(resp.0, StatusCode::FORBIDDEN);

    // non-image MIME is rejected
    let (status, _) = send(
        &app,
        multipart_request("/auth/upload-photo", &token, "notes.txt", "text/plain", b"hello"),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // oversized payload is rejected
    let big = vec![0u8; 5 * 1024 * 1024 + 1];
    let (status, _) = send(
        &app,
        multipart_request("/auth/upload-photo", &token, "big.png", "image/png", &big),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // happy path stores the object and records the URL on the user
    let (status, body) = send(
        &app,
        multipart_request("/auth/upload-photo", &token, "me.png", "image/png", b"png-bytes"),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let photo_url = body["photoUrl"].as_str().unwrap();
    assert!(photo_url.contains("profile-photos/"));
    assert_eq!(body["user"]["profilePhoto"], photo_url);

    // subsequent profile reads resolve a signed variant of the stored URL
    let (_, body) = send(&app, get_request("/owner/profile", Some(&token))).await?;
    let resolved = body["profile"]["profilePhoto"].as_str().unwrap();
    assert!(resolved.contains("signed=3600"));
    Ok(())
}
