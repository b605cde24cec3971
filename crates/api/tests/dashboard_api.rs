//! Integration tests for the administrator metrics and the school owner
//! dashboard.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_authed, token_for};
use eduseek_core::testing::{listing, now, promotion, InMemoryStore};
use eduseek_core::tags::TagCategory;
use uuid::Uuid;

struct Fixture {
    store: Arc<InMemoryStore>,
    admin: Uuid,
    super_admin: Uuid,
    parent: Uuid,
    school: Uuid,
    unlisted_school: Uuid,
    featured: Uuid,
    boost: Uuid,
}

/// Seven accounts, three listings (one pending and owned by `school`),
/// and four promotion rows of which three are running.
fn fixture() -> Fixture {
    let admin = Uuid::new_v4();
    let super_admin = Uuid::new_v4();
    let parent = Uuid::new_v4();
    let school = Uuid::new_v4();
    let unlisted_school = Uuid::new_v4();

    let mut owned = listing("owned-pending");
    owned.id = school;
    owned.is_approved = false;
    owned.approved_at = None;

    let other = listing("other-published");

    let featured = promotion(school, "featured", 10, 20);
    let boost = promotion(school, "boost", 2, 5);
    let ended = promotion(school, "ad_placement", 30, -1);
    let elsewhere = promotion(other.id, "boost", 1, 3);
    let (featured_id, boost_id) = (featured.id, boost.id);

    let store = InMemoryStore::new()
        .with_account(admin, "admin", false)
        .with_account(super_admin, "super_admin", false)
        .with_account(parent, "parent", false)
        .with_account(Uuid::new_v4(), "parent", true)
        .with_account(school, "school", false)
        .with_account(unlisted_school, "school", false)
        .with_account(Uuid::new_v4(), "admin", false)
        .with_listing(owned)
        .with_listing(other)
        .with_listing(listing("second-published"))
        .with_promotion(featured)
        .with_promotion(boost)
        .with_promotion(ended)
        .with_promotion(elsewhere)
        .with_tags(school, TagCategory::Sport, &["Rugby".to_string(), "Chess".to_string()]);

    Fixture {
        store: Arc::new(store),
        admin,
        super_admin,
        parent,
        school,
        unlisted_school,
        featured: featured_id,
        boost: boost_id,
    }
}

// ---------------------------------------------------------------------------
// Test: GET /admin/metrics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn metrics_report_platform_totals() {
    let f = fixture();
    let response = get_authed(
        build_test_app(f.store.clone()),
        "/api/v1/admin/metrics",
        &token_for(f.admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["total_users"], 7);
    assert_eq!(data["total_schools"], 3);
    assert_eq!(data["approved_schools"], 2);
    assert_eq!(data["pending_schools"], 1);
    assert_eq!(data["active_promotions"], 3);
}

#[tokio::test]
async fn metrics_are_open_to_super_admin() {
    let f = fixture();
    let response = get_authed(
        build_test_app(f.store),
        "/api/v1/admin/metrics",
        &token_for(f.super_admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn metrics_are_forbidden_below_admin() {
    let f = fixture();
    for user in [f.parent, f.school] {
        let response = get_authed(
            build_test_app(f.store.clone()),
            "/api/v1/admin/metrics",
            &token_for(user),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn metrics_require_a_token() {
    let f = fixture();
    let response = get(build_test_app(f.store), "/api/v1/admin/metrics").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: GET /admin/metrics/users-by-role
// ---------------------------------------------------------------------------

#[tokio::test]
async fn role_breakdown_counts_every_account() {
    let f = fixture();
    let response = get_authed(
        build_test_app(f.store),
        "/api/v1/admin/metrics/users-by-role",
        &token_for(f.super_admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["parent"], 2);
    assert_eq!(data["school"], 2);
    assert_eq!(data["admin"], 2);
    assert_eq!(data["super_admin"], 1);
}

#[tokio::test]
async fn role_breakdown_is_forbidden_to_admin() {
    let f = fixture();
    let response = get_authed(
        build_test_app(f.store),
        "/api/v1/admin/metrics/users-by-role",
        &token_for(f.admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Test: GET /me/school
// ---------------------------------------------------------------------------

#[tokio::test]
async fn school_sees_its_pending_listing_with_running_promotions() {
    let f = fixture();
    let response = get_authed(
        build_test_app(f.store),
        "/api/v1/me/school",
        &token_for(f.school),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["id"], f.school.to_string());
    assert_eq!(data["slug"], "owned-pending");
    assert_eq!(data["is_approved"], false);

    // Most recent start wins; the ended row is not listed.
    assert_eq!(data["promotion"]["id"], f.boost.to_string());
    assert_eq!(data["promotion_label"], "PROMOTED");
    let running: Vec<&str> = data["active_promotions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(running, vec![f.boost.to_string(), f.featured.to_string()]);

    assert_eq!(data["sports"]["displayed"], serde_json::json!(["Rugby", "Chess"]));
}

#[tokio::test]
async fn school_without_listing_is_not_found() {
    let f = fixture();
    let response = get_authed(
        build_test_app(f.store),
        "/api/v1/me/school",
        &token_for(f.unlisted_school),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn parent_cannot_open_school_dashboard() {
    let f = fixture();
    let response = get_authed(
        build_test_app(f.store),
        "/api/v1/me/school",
        &token_for(f.parent),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_passes_the_gate_but_owns_no_listing() {
    let f = fixture();
    let response = get_authed(
        build_test_app(f.store),
        "/api/v1/me/school",
        &token_for(f.admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn school_dashboard_requires_a_token() {
    let f = fixture();
    let response = get(build_test_app(f.store), "/api/v1/me/school").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
