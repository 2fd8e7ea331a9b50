//! Promotion API integration tests.

mod common;

use common::{delete_authed, get_authed, image_form, post_form, TestHarness, PROMOTIONS_TABLE};

fn promo_form(filename: &str, title: &str) -> reqwest::multipart::Form {
    image_form(filename)
        .text("titulo", title.to_string())
        .text("texto", "Two sessions for the price of one".to_string())
        .text("tag", "promo_winter".to_string())
}

async fn listed_promotions(addr: std::net::SocketAddr) -> Vec<serde_json::Value> {
    get_authed(addr, "/api/promotions")
        .await
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn create_then_list_returns_full_rows() {
    let (h, addr) = TestHarness::metadata_backed().with_server().await;

    let resp = post_form(addr, "/api/promotions", promo_form("banner.jpg", "Winter")).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let promos = listed_promotions(addr).await;
    assert_eq!(promos.len(), 1);

    let key = promos[0]["key"].as_str().unwrap();
    assert!(key.starts_with("promo_"), "unexpected key: {key}");
    assert!(key.ends_with("_banner.jpg"), "unexpected key: {key}");
    assert_eq!(promos[0]["title"], "Winter");
    assert_eq!(promos[0]["body"], "Two sessions for the price of one");
    assert_eq!(promos[0]["tag"], "promo_winter");
    assert!(promos[0]["created_at"].is_string());

    assert!(h.blobs.contains(key));
    assert_eq!(h.rows.as_ref().unwrap().row_count(PROMOTIONS_TABLE), 1);
}

#[tokio::test]
async fn create_without_image_is_rejected() {
    let (h, addr) = TestHarness::metadata_backed().with_server().await;

    let form = reqwest::multipart::Form::new()
        .text("titulo", "No image")
        .text("texto", "x")
        .text("tag", "t");
    let resp = post_form(addr, "/api/promotions", form).await;
    assert_eq!(resp.status(), 400);

    assert_eq!(h.blobs.object_count(), 0);
    assert_eq!(h.rows.as_ref().unwrap().row_count(PROMOTIONS_TABLE), 0);
}

#[tokio::test]
async fn update_fields_without_image_keeps_key() {
    let (_h, addr) = TestHarness::metadata_backed().with_server().await;

    post_form(addr, "/api/promotions", promo_form("banner.jpg", "Old")).await;
    let key = listed_promotions(addr).await[0]["key"]
        .as_str()
        .unwrap()
        .to_string();

    let form = reqwest::multipart::Form::new()
        .text("old_name", key.clone())
        .text("titulo", "New title")
        .text("texto", "New copy")
        .text("tag", "promo_new");
    let resp = post_form(addr, "/api/promotions/update", form).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "updated");

    let promos = listed_promotions(addr).await;
    assert_eq!(promos[0]["key"], key.as_str());
    assert_eq!(promos[0]["title"], "New title");
    assert_eq!(promos[0]["tag"], "promo_new");
}

#[tokio::test]
async fn update_with_image_swaps_key() {
    let (h, addr) = TestHarness::metadata_backed().with_server().await;

    post_form(addr, "/api/promotions", promo_form("banner.jpg", "Promo")).await;
    let old_key = listed_promotions(addr).await[0]["key"]
        .as_str()
        .unwrap()
        .to_string();

    let form = promo_form("fresh.jpg", "Promo").text("old_name", old_key.clone());
    let resp = post_form(addr, "/api/promotions/update", form).await;
    assert_eq!(resp.status(), 200);

    let promos = listed_promotions(addr).await;
    assert_eq!(promos.len(), 1);
    let new_key = promos[0]["key"].as_str().unwrap();
    assert_ne!(new_key, old_key);
    assert!(!h.blobs.contains(&old_key));
    assert!(h.blobs.contains(new_key));
}

#[tokio::test]
async fn delete_removes_row_and_blob() {
    let (h, addr) = TestHarness::metadata_backed().with_server().await;

    post_form(addr, "/api/promotions", promo_form("banner.jpg", "Gone")).await;
    let key = listed_promotions(addr).await[0]["key"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = delete_authed(addr, &format!("/api/promotions/{key}")).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "deleted");

    assert!(listed_promotions(addr).await.is_empty());
    assert!(!h.blobs.contains(&key));
}

#[tokio::test]
async fn promotions_routes_absent_in_storage_only() {
    let (_h, addr) = TestHarness::storage_only().with_server().await;

    let resp = get_authed(addr, "/api/promotions").await;
    assert_eq!(resp.status(), 404);
}
