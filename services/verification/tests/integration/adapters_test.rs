use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chow_verification::domain::repository::{EmailSender, IdentityProvider, PlaceSearch};
use chow_verification::domain::types::{EmailMessage, IdentityMetadata, NewIdentity};
use chow_verification::error::VerificationServiceError;
use chow_verification::infra::email::ResendEmailSender;
use chow_verification::infra::identity::SupabaseIdentityProvider;
use chow_verification::infra::places::GooglePlaceSearch;

use crate::helpers::TEST_EMAIL;

fn message() -> EmailMessage {
    EmailMessage {
        to: TEST_EMAIL.to_owned(),
        subject: "Verify your email address".to_owned(),
        html: "<p>000427</p>".to_owned(),
    }
}

fn identity() -> NewIdentity {
    NewIdentity {
        email: TEST_EMAIL.to_owned(),
        password: "s3cret-pass".to_owned(),
        email_confirmed: true,
        metadata: IdentityMetadata {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            city: "London".to_owned(),
            phone_number: "555-0100".to_owned(),
        },
    }
}

// ── Resend ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn resend_should_post_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer re_test"))
        .and(body_json(json!({
            "from": "ChowLocal <noreply@resend.dev>",
            "to": [TEST_EMAIL],
            "subject": "Verify your email address",
            "html": "<p>000427</p>",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email_123" })))
        .expect(1)
        .mount(&server)
        .await;

    let sender = ResendEmailSender::new(
        reqwest::Client::new(),
        format!("{}/", server.uri()),
        "re_test",
        "ChowLocal <noreply@resend.dev>",
    );
    sender.send(&message()).await.unwrap();
}

#[tokio::test]
async fn resend_should_surface_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "name": "validation_error",
            "message": "Invalid `to` field.",
        })))
        .mount(&server)
        .await;

    let sender = ResendEmailSender::new(reqwest::Client::new(), server.uri(), "re_test", "x@y.z");
    let err = sender.send(&message()).await.unwrap_err();

    let VerificationServiceError::Delivery(source) = err else {
        panic!("expected Delivery, got {err:?}");
    };
    let detail = format!("{source:#}");
    assert!(detail.contains("422"), "{detail}");
    assert!(detail.contains("validation_error: Invalid `to` field."), "{detail}");
}

// ── Supabase ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn supabase_should_create_confirmed_user() {
    let user_id = Uuid::now_v7();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .and(header("apikey", "service-role"))
        .and(header("authorization", "Bearer service-role"))
        .and(body_json(json!({
            "email": TEST_EMAIL,
            "password": "s3cret-pass",
            "email_confirm": true,
            "user_metadata": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "city": "London",
                "phone_number": "555-0100",
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": user_id,
            "email": TEST_EMAIL,
            "aud": "authenticated",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        SupabaseIdentityProvider::new(reqwest::Client::new(), server.uri(), "service-role");
    assert_eq!(provider.create_user(&identity()).await.unwrap(), user_id);
}

#[tokio::test]
async fn supabase_should_surface_duplicate_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": 422,
            "msg": "A user with this email address has already been registered",
        })))
        .mount(&server)
        .await;

    let provider =
        SupabaseIdentityProvider::new(reqwest::Client::new(), server.uri(), "service-role");
    let err = provider.create_user(&identity()).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "email verified but account creation failed: \
         A user with this email address has already been registered"
    );
    assert!(matches!(
        err,
        VerificationServiceError::IdentityProvisioning(_)
    ));
}

// ── Google Places ────────────────────────────────────────────────────────────

#[tokio::test]
async fn google_should_return_city_predictions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .and(query_param("input", "Aus"))
        .and(query_param("types", "(cities)"))
        .and(query_param("key", "places-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "predictions": [
                { "description": "Austin, TX, USA", "place_id": "p1", "types": ["locality"] },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let places = GooglePlaceSearch::new(reqwest::Client::new(), server.uri(), "places-key");
    let predictions = places.autocomplete("Aus").await.unwrap();

    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].description, "Austin, TX, USA");
    assert_eq!(predictions[0].extra["types"], json!(["locality"]));
}

#[tokio::test]
async fn google_should_treat_zero_results_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS", "predictions": [] })),
        )
        .mount(&server)
        .await;

    let places = GooglePlaceSearch::new(reqwest::Client::new(), server.uri(), "places-key");
    assert!(places.autocomplete("Zzqx").await.unwrap().is_empty());
}

#[tokio::test]
async fn google_should_fail_on_denied_request_without_leaking_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "predictions": [],
        })))
        .mount(&server)
        .await;

    let places = GooglePlaceSearch::new(reqwest::Client::new(), server.uri(), "places-key");
    let err = places.autocomplete("Aus").await.unwrap_err();

    let VerificationServiceError::Upstream(source) = err else {
        panic!("expected Upstream, got {err:?}");
    };
    let detail = format!("{source:#}");
    assert!(detail.contains("REQUEST_DENIED"), "{detail}");
    assert!(!detail.contains("places-key"), "{detail}");
}

#[tokio::test]
async fn google_should_fail_on_http_error_without_leaking_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let places = GooglePlaceSearch::new(reqwest::Client::new(), server.uri(), "places-key");
    let err = places.autocomplete("Aus").await.unwrap_err();

    let VerificationServiceError::Upstream(source) = err else {
        panic!("expected Upstream, got {err:?}");
    };
    assert!(!format!("{source:#}").contains("places-key"));
}
