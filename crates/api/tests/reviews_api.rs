//! HTTP-level integration tests for the `/api/reviews` resource.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    body_json, delete_auth, get, header_i64, patch_json_auth, post_json_auth, user_with_token,
};
use eventhub_core::types::DbId;
use eventhub_db::models::event::CreateEvent;
use eventhub_db::repositories::EventRepo;
use serde_json::json;
use sqlx::PgPool;

async fn create_event(pool: &PgPool, owner: DbId, name: &str) -> DbId {
    let input = CreateEvent {
        category_id: None,
        name: name.to_string(),
        description: None,
        location: "Main Hall".to_string(),
        event_date: Utc::now() + Duration::days(10),
        attendees: None,
        image_url: None,
    };
    EventRepo::create(pool, owner, &input)
        .await
        .expect("event creation should succeed")
        .event_id
}

fn review_ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["review_id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Creation rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_review_returns_409_with_message(pool: PgPool) {
    let (owner, _) = user_with_token(&pool, "owner", "admin").await;
    let (_alice, token) = user_with_token(&pool, "alice", "user").await;
    let event_id = create_event(&pool, owner, "Concert").await;
    let app = common::build_test_app(pool);

    let body = json!({ "event_id": event_id, "rating": 4, "body": "Great show" });
    let first = post_json_auth(app.clone(), "/api/reviews", body.clone(), &token).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let created = body_json(first).await;
    assert_eq!(created["data"]["moderation_status"], "pending");

    let second = post_json_auth(app, "/api/reviews", body, &token).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(second).await["error"],
        "You have already reviewed this event."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_rating_returns_400_with_message(pool: PgPool) {
    let (owner, _) = user_with_token(&pool, "owner", "admin").await;
    let (_alice, token) = user_with_token(&pool, "alice", "user").await;
    let event_id = create_event(&pool, owner, "Concert").await;
    let app = common::build_test_app(pool);

    for rating in [0, 6] {
        let body = json!({ "event_id": event_id, "rating": rating, "body": "Hmm" });
        let response = post_json_auth(app.clone(), "/api/reviews", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "rating={rating}");
        assert_eq!(
            body_json(response).await["error"],
            "Rating must be between 1 and 5."
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_for_unknown_event_is_404(pool: PgPool) {
    let (_alice, token) = user_with_token(&pool, "alice", "user").await;
    let app = common::build_test_app(pool);

    let body = json!({ "event_id": 999_999, "rating": 3, "body": "Where?" });
    let response = post_json_auth(app, "/api/reviews", body, &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "event_id": 1, "rating": 3, "body": "Anon" });
    let response = common::post_json(app, "/api/reviews", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_review_body_is_400_with_code(pool: PgPool) {
    let (owner, _) = user_with_token(&pool, "owner", "admin").await;
    let (_alice, token) = user_with_token(&pool, "alice", "user").await;
    let event_id = create_event(&pool, owner, "Concert").await;
    let app = common::build_test_app(pool);

    let cases = [
        json!({ "event_id": event_id, "rating": "five", "body": "Loved it" }),
        json!({ "event_id": event_id, "body": "No rating" }),
    ];
    for body in cases {
        let response = post_json_auth(app.clone(), "/api/reviews", body.clone(), &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body={body}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json["error"].is_string());
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_filter_round_trip(pool: PgPool) {
    let (owner, _) = user_with_token(&pool, "owner", "admin").await;
    let (_alice, alice_token) = user_with_token(&pool, "alice", "user").await;
    let (_bob, bob_token) = user_with_token(&pool, "bob", "user").await;
    let first = create_event(&pool, owner, "First").await;
    let second = create_event(&pool, owner, "Second").await;
    let app = common::build_test_app(pool);

    let mut expected = Vec::new();
    for token in [&alice_token, &bob_token] {
        let body = json!({ "event_id": first, "rating": 5, "body": "Nice" });
        let response = post_json_auth(app.clone(), "/api/reviews", body, token).await;
        expected.push(body_json(response).await["data"]["review_id"].as_i64().unwrap());
    }
    let body = json!({ "event_id": second, "rating": 2, "body": "Meh" });
    post_json_auth(app.clone(), "/api/reviews", body, &alice_token).await;

    let response = get(app, &format!("/api/reviews?event_id={first}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_i64(&response, "x-total-count"), 2);

    let json = body_json(response).await;
    let mut got = review_ids(&json);
    got.sort_unstable();
    expected.sort_unstable();
    assert_eq!(got, expected);
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["event_id"] == first));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_range_and_status_filters(pool: PgPool) {
    let (owner, admin_token) = user_with_token(&pool, "owner", "admin").await;
    let event_id = create_event(&pool, owner, "Festival").await;
    let app = common::build_test_app(pool.clone());

    let mut ids = Vec::new();
    for rating in 1..=5 {
        let (_user, token) = user_with_token(&pool, &format!("rater{rating}"), "user").await;
        let body = json!({ "event_id": event_id, "rating": rating, "body": "ok" });
        let response = post_json_auth(app.clone(), "/api/reviews", body, &token).await;
        ids.push(body_json(response).await["data"]["review_id"].as_i64().unwrap());
    }

    let response = get(
        app.clone(),
        "/api/reviews?min_rating=2&max_rating=4&sort_by=rating&sort_order=asc",
    )
    .await;
    assert_eq!(review_ids(&body_json(response).await), ids[1..4].to_vec());

    let moderate = post_json_auth(
        app.clone(),
        &format!("/api/reviews/{}/moderate", ids[0]),
        json!({ "status": "flagged", "notes": "spam" }),
        &admin_token,
    )
    .await;
    assert_eq!(moderate.status(), StatusCode::OK);
    let moderated = body_json(moderate).await;
    assert_eq!(moderated["data"]["moderation_status"], "flagged");
    assert_eq!(moderated["data"]["moderated_by"], owner);

    for param in ["status", "moderation_status"] {
        let response = get(app.clone(), &format!("/api/reviews?{param}=flagged")).await;
        assert_eq!(review_ids(&body_json(response).await), vec![ids[0]]);
    }

    let response = get(app.clone(), "/api/reviews?status=bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app.clone(), "/api/reviews?min_rating=5&max_rating=1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/api/reviews?event_id=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_sort_by_is_ignored(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/reviews?sort_by=1;DROP%20TABLE%20reviews").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_i64(&response, "x-total-count"), 0);
    assert_eq!(header_i64(&response, "x-total-pages"), 0);
}

// ---------------------------------------------------------------------------
// Edit, delete, moderation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_author_edits_and_others_cannot(pool: PgPool) {
    let (owner, _) = user_with_token(&pool, "owner", "admin").await;
    let (_alice, alice_token) = user_with_token(&pool, "alice", "user").await;
    let (_bob, bob_token) = user_with_token(&pool, "bob", "user").await;
    let event_id = create_event(&pool, owner, "Talk").await;
    let app = common::build_test_app(pool);

    let body = json!({ "event_id": event_id, "rating": 3, "body": "Fine" });
    let created = body_json(post_json_auth(app.clone(), "/api/reviews", body, &alice_token).await).await;
    let uri = format!("/api/reviews/{}", created["data"]["review_id"]);

    let response = patch_json_auth(app.clone(), &uri, json!({ "rating": 5 }), &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = patch_json_auth(app.clone(), &uri, json!({ "rating": 9 }), &alice_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json_auth(app.clone(), &uri, json!({ "rating": 5 }), &alice_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["rating"], 5);
    assert_eq!(json["data"]["body"], "Fine");

    let response = delete_auth(app.clone(), &uri, &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &alice_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_moderation_requires_admin_and_valid_status(pool: PgPool) {
    let (owner, admin_token) = user_with_token(&pool, "owner", "admin").await;
    let (_alice, alice_token) = user_with_token(&pool, "alice", "user").await;
    let event_id = create_event(&pool, owner, "Expo").await;
    let app = common::build_test_app(pool);

    let body = json!({ "event_id": event_id, "rating": 4, "body": "Good" });
    let created = body_json(post_json_auth(app.clone(), "/api/reviews", body, &alice_token).await).await;
    let uri = format!("/api/reviews/{}/moderate", created["data"]["review_id"]);

    let response =
        post_json_auth(app.clone(), &uri, json!({ "status": "approved" }), &alice_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response =
        post_json_auth(app.clone(), &uri, json!({ "status": "hidden" }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(app, &uri, json!({ "status": "approved" }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["moderation_status"], "approved");
    assert!(json["data"]["moderated_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_conflicting_status_params_are_400_with_code(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/reviews?status=approved&moderation_status=approved").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
