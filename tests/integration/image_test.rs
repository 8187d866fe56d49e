//! Integration tests for image upload, listing, retrieval, update, and deletion.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::{MultipartForm, TestApp, jpeg, png};

fn id_of(image: &serde_json::Value) -> String {
    image["id"].as_str().expect("image id").to_string()
}

#[tokio::test]
async fn test_upload_png() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signup("upload@example.com").await;

    let image = app.upload_png(&token, "cat.png", None).await;

    let image_id = id_of(&image);
    assert_eq!(image["owner_id"], user_id.as_str());
    assert_eq!(image["title"], "cat.png");
    assert_eq!(image["original_filename"], "cat.png");
    assert_eq!(image["mime_type"], "image/png");
    assert_eq!(image["width"], 4);
    assert_eq!(image["height"], 3);
    assert_eq!(image["size_bytes"], png(4, 3).len() as u64);
    assert!(image["description"].is_null());
    assert_eq!(image["file_url"], format!("/api/images/{image_id}/file"));
    assert!(app.stored_file(&user_id, &image_id, "png").is_file());
}

#[tokio::test]
async fn test_upload_with_title_and_description() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("titled@example.com").await;

    let form = MultipartForm::new()
        .text("title", "  Sunset  ")
        .text("description", "Taken from the pier")
        .file("file", "IMG_0001.PNG", "image/png", &png(2, 2));
    let response = app.multipart("POST", "/api/images", form, Some(&token)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["title"], "Sunset");
    assert_eq!(response.body["data"]["description"], "Taken from the pier");
}

#[tokio::test]
async fn test_upload_detects_type_from_content() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signup("sniff@example.com").await;

    let form = MultipartForm::new().file("file", "photo.png", "image/png", &jpeg(5, 5));
    let response = app.multipart("POST", "/api/images", form, Some(&token)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["mime_type"], "image/jpeg");
    let image_id = id_of(&response.body["data"]);
    assert!(app.stored_file(&user_id, &image_id, "jpg").is_file());
}

#[tokio::test]
async fn test_upload_requires_auth() {
    let app = TestApp::new().await;

    let form = MultipartForm::new().file("file", "cat.png", "image/png", &png(1, 1));
    let response = app.multipart("POST", "/api/images", form, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.images.len(), 0);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("nofile@example.com").await;

    let form = MultipartForm::new().text("title", "Nothing attached");
    let response = app.multipart("POST", "/api/images", form, Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "A file field is required");
}

#[tokio::test]
async fn test_upload_empty_file() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("empty@example.com").await;

    let form = MultipartForm::new().file("file", "empty.png", "image/png", &[]);
    let response = app.multipart("POST", "/api/images", form, Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Uploaded file is empty");
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signup("text@example.com").await;

    let form = MultipartForm::new().file(
        "file",
        "notes.png",
        "image/png",
        b"just some text pretending to be a picture",
    );
    let response = app.multipart("POST", "/api/images", form, Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Unsupported image format");
    assert!(app.stored_files(&user_id).is_empty());
}

#[tokio::test]
async fn test_upload_over_size_limit() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("big@example.com").await;

    let data = vec![0u8; app.config.storage.max_upload_size_bytes as usize + 1];
    let form = MultipartForm::new().file("file", "big.png", "image/png", &data);
    let response = app.multipart("POST", "/api/images", form, Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .starts_with("File exceeds maximum upload size")
    );
}

#[tokio::test]
async fn test_upload_body_far_over_limit_returns_413() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("huge@example.com").await;

    let data = vec![0u8; 2 * 1024 * 1024];
    let form = MultipartForm::new().file("file", "huge.png", "image/png", &data);
    let response = app.multipart("POST", "/api/images", form, Some(&token)).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.images.len(), 0);
}

#[tokio::test]
async fn test_list_newest_first_with_pagination() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("lister@example.com").await;
    let first = app.upload_png(&token, "one.png", None).await;
    let _second = app.upload_png(&token, "two.png", None).await;
    let third = app.upload_png(&token, "three.png", None).await;

    let page1 = app
        .request("GET", "/api/images?page=1&per_page=2", None, Some(&token))
        .await;
    assert_eq!(page1.status, StatusCode::OK);
    let data = &page1.body["data"];
    assert_eq!(data["total"], 3);
    assert_eq!(data["page"], 1);
    assert_eq!(data["per_page"], 2);
    assert_eq!(data["total_pages"], 2);
    let items = data["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], third["id"]);

    let page2 = app
        .request("GET", "/api/images?page=2&per_page=2", None, Some(&token))
        .await;
    let items = page2.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], first["id"]);
}

#[tokio::test]
async fn test_list_defaults_and_clamps_page_size() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("defaults@example.com").await;

    let response = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["page"], 1);
    assert_eq!(response.body["data"]["per_page"], 20);
    assert_eq!(response.body["data"]["total"], 0);

    let clamped = app
        .request("GET", "/api/images?per_page=1000", None, Some(&token))
        .await;
    assert_eq!(clamped.body["data"]["per_page"], 100);
}

#[tokio::test]
async fn test_list_huge_page_is_empty() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("farpage@example.com").await;
    app.upload_png(&token, "one.png", None).await;

    let response = app
        .request(
            "GET",
            &format!("/api/images?page={}", u64::MAX),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total"], 1);
    assert!(response.body["data"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_rejects_malformed_query() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("badquery@example.com").await;

    let response = app
        .request("GET", "/api/images?page=abc", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query string")
    );
}

#[tokio::test]
async fn test_list_only_shows_own_images() {
    let app = TestApp::new().await;
    let (_, alice) = app.signup("alice@example.com").await;
    let (_, bob) = app.signup("bob@example.com").await;
    app.upload_png(&alice, "alice.png", None).await;

    let response = app.request("GET", "/api/images", None, Some(&bob)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total"], 0);
    assert!(response.body["data"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_requires_auth() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/images", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_image() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("getter@example.com").await;
    let image = app.upload_png(&token, "cat.png", Some("Cat")).await;

    let response = app
        .request("GET", &format!("/api/images/{}", id_of(&image)), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "Cat");
}

#[tokio::test]
async fn test_get_other_users_image_is_forbidden() {
    let app = TestApp::new().await;
    let (_, alice) = app.signup("alice2@example.com").await;
    let (_, bob) = app.signup("bob2@example.com").await;
    let image = app.upload_png(&alice, "private.png", None).await;

    let meta = app
        .request("GET", &format!("/api/images/{}", id_of(&image)), None, Some(&bob))
        .await;
    assert_eq!(meta.status, StatusCode::FORBIDDEN);
    assert_eq!(meta.body["error"], "FORBIDDEN");

    let file = app
        .request("GET", &format!("/api/images/{}/file", id_of(&image)), None, Some(&bob))
        .await;
    assert_eq!(file.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_missing_image() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("missing@example.com").await;

    let response = app
        .request("GET", &format!("/api/images/{}", Uuid::new_v4()), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_with_malformed_id() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("badid@example.com").await;

    let response = app
        .request("GET", "/api/images/not-a-uuid", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_file() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("download@example.com").await;
    let image = app.upload_png(&token, "cat.png", None).await;

    let response = app
        .request("GET", &format!("/api/images/{}/file", id_of(&image)), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.header("content-disposition"), "inline; filename=\"cat.png\"");
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.bytes, png(4, 3));
}

#[tokio::test]
async fn test_update_title_only() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signup("retitle@example.com").await;
    let form = MultipartForm::new()
        .text("description", "Keep me")
        .file("file", "cat.png", "image/png", &png(4, 3));
    let created = app.multipart("POST", "/api/images", form, Some(&token)).await;
    let image_id = id_of(&created.body["data"]);

    let form = MultipartForm::new().text("title", "Renamed");
    let response = app
        .multipart("PUT", &format!("/api/images/{image_id}"), form, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "Renamed");
    assert_eq!(response.body["data"]["description"], "Keep me");
    assert_eq!(response.body["data"]["mime_type"], "image/png");
    assert!(app.stored_file(&user_id, &image_id, "png").is_file());
}

#[tokio::test]
async fn test_update_empty_description_clears_it() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("clear@example.com").await;
    let form = MultipartForm::new()
        .text("description", "Temporary")
        .file("file", "cat.png", "image/png", &png(4, 3));
    let created = app.multipart("POST", "/api/images", form, Some(&token)).await;
    let image_id = id_of(&created.body["data"]);

    let form = MultipartForm::new().text("description", "");
    let response = app
        .multipart("PUT", &format!("/api/images/{image_id}"), form, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["description"].is_null());
}

#[tokio::test]
async fn test_update_without_fields() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("noop@example.com").await;
    let image = app.upload_png(&token, "cat.png", None).await;

    let response = app
        .multipart(
            "PUT",
            &format!("/api/images/{}", id_of(&image)),
            MultipartForm::new(),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_replaces_file() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signup("replace@example.com").await;
    let image = app.upload_png(&token, "cat.png", None).await;
    let image_id = id_of(&image);
    let old_path = app.stored_file(&user_id, &image_id, "png");
    assert!(old_path.is_file());

    let replacement = jpeg(8, 6);
    let form = MultipartForm::new().file("file", "dog.jpg", "image/jpeg", &replacement);
    let response = app
        .multipart("PUT", &format!("/api/images/{image_id}"), form, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["id"], image_id.as_str());
    assert_eq!(data["mime_type"], "image/jpeg");
    assert_eq!(data["original_filename"], "dog.jpg");
    assert_eq!(data["width"], 8);
    assert_eq!(data["height"], 6);
    assert_eq!(data["title"], "cat.png");

    assert!(!old_path.exists());
    assert_eq!(app.stored_files(&user_id).len(), 1);

    let file = app
        .request("GET", &format!("/api/images/{image_id}/file"), None, Some(&token))
        .await;
    assert_eq!(file.header("content-type"), "image/jpeg");
    assert_eq!(file.bytes, replacement);
}

#[tokio::test]
async fn test_update_with_invalid_file_keeps_original() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signup("keep@example.com").await;
    let image = app.upload_png(&token, "cat.png", None).await;
    let image_id = id_of(&image);

    let form = MultipartForm::new().file("file", "bad.gif", "image/gif", b"GIF? no");
    let response = app
        .multipart("PUT", &format!("/api/images/{image_id}"), form, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.stored_file(&user_id, &image_id, "png").is_file());
    assert_eq!(app.stored_files(&user_id).len(), 1);
}

#[tokio::test]
async fn test_update_other_users_image_is_forbidden() {
    let app = TestApp::new().await;
    let (_, alice) = app.signup("alice3@example.com").await;
    let (_, bob) = app.signup("bob3@example.com").await;
    let image = app.upload_png(&alice, "mine.png", Some("Mine")).await;

    let form = MultipartForm::new().text("title", "Stolen");
    let response = app
        .multipart("PUT", &format!("/api/images/{}", id_of(&image)), form, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let check = app
        .request("GET", &format!("/api/images/{}", id_of(&image)), None, Some(&alice))
        .await;
    assert_eq!(check.body["data"]["title"], "Mine");
}

#[tokio::test]
async fn test_delete_image() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signup("deleter@example.com").await;
    let image = app.upload_png(&token, "cat.png", None).await;
    let image_id = id_of(&image);

    let response = app
        .request("DELETE", &format!("/api/images/{image_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "Image deleted");

    assert!(!app.stored_file(&user_id, &image_id, "png").exists());
    assert_eq!(app.images.len(), 0);

    let again = app
        .request("DELETE", &format!("/api/images/{image_id}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_when_file_already_gone() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signup("orphan@example.com").await;
    let image = app.upload_png(&token, "cat.png", None).await;
    let image_id = id_of(&image);
    std::fs::remove_file(app.stored_file(&user_id, &image_id, "png")).unwrap();

    let response = app
        .request("DELETE", &format!("/api/images/{image_id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.images.len(), 0);
}

#[tokio::test]
async fn test_delete_other_users_image_is_forbidden() {
    let app = TestApp::new().await;
    let (alice_id, alice) = app.signup("alice4@example.com").await;
    let (_, bob) = app.signup("bob4@example.com").await;
    let image = app.upload_png(&alice, "keep.png", None).await;
    let image_id = id_of(&image);

    let response = app
        .request("DELETE", &format!("/api/images/{image_id}"), None, Some(&bob))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.images.len(), 1);
    assert!(app.stored_file(&alice_id, &image_id, "png").is_file());
}
