//! Gallery upload flow: file checks, category routing, slot merging, and the URLs handed back.

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::fixtures::{self, create_minimal_png};
use helpers::{api_path, setup_test_app, setup_test_app_with, BASE_URL};
use serde_json::Value;

async fn create_gallery(app: &helpers::TestApp, form: MultipartForm) -> Value {
    let response = app
        .client()
        .post(&api_path("/dashboard/gallery/create"))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    response.json::<Value>()["event"].clone()
}

fn str_field<'a>(value: &'a Value, name: &str) -> &'a str {
    value[name]
        .as_str()
        .unwrap_or_else(|| panic!("expected string field {name} in {value}"))
}

#[tokio::test]
async fn test_disallowed_type_is_rejected_and_nothing_is_written() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Menu night")
        .add_part("images", fixtures::png_part("cover.png"))
        .add_part("images", fixtures::pdf_part("menu.pdf"));

    let response = app
        .client()
        .post(&api_path("/dashboard/gallery/create"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(
        body["message"],
        "Only images (JPG, PNG) and videos (MP4) are allowed!"
    );
    assert_eq!(body["error"], body["message"]);
    assert_eq!(app.stored_file_count(), 0);
    assert!(app.repos.galleries.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_files_are_routed_by_category() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Harbour Festival")
        .add_part("images", fixtures::jpeg_part("stage.jpg"))
        .add_part("video", fixtures::mp4_part("aftermovie.mp4"));
    let gallery = create_gallery(&app, form).await;

    let image = str_field(&gallery, "image1");
    let video = str_field(&gallery, "video");
    assert!(image.starts_with(&format!("{BASE_URL}/uploads/images/")));
    assert!(image.ends_with("-stage.jpg"));
    assert!(video.starts_with(&format!("{BASE_URL}/uploads/videos/")));
    assert!(video.ends_with("-aftermovie.mp4"));

    assert_eq!(app.stored_files("images").len(), 1);
    assert_eq!(app.stored_files("videos").len(), 1);
    assert!(app.path_for_url(image).is_file());
    assert!(app.path_for_url(video).is_file());
}

#[tokio::test]
async fn test_octet_stream_falls_back_to_extension() {
    let app = setup_test_app().await;

    let part = axum_test::multipart::Part::bytes(bytes::Bytes::from(create_minimal_png()))
        .file_name("phone-upload.png")
        .mime_type("application/octet-stream");
    let form = MultipartForm::new()
        .add_text("title", "Phone upload")
        .add_part("image1", part);
    let gallery = create_gallery(&app, form).await;

    assert!(str_field(&gallery, "image1").contains("/uploads/images/"));
}

#[tokio::test]
async fn test_double_dots_inside_a_filename_are_accepted() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Summer party")
        .add_part("images", fixtures::png_part("ok.png"))
        .add_part("images", fixtures::png_part("a..b.png"));
    let gallery = create_gallery(&app, form).await;

    let url = str_field(&gallery, "image2");
    assert!(url.ends_with("-a..b.png"));
    assert!(app.path_for_url(url).is_file());
    assert_eq!(app.stored_files("images").len(), 2);

    let served_path = url.strip_prefix(BASE_URL).expect("URL under BASE_URL");
    let response = app.client().get(served_path).await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_traversal_in_filename_is_flattened() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Sneaky")
        .add_part("images", fixtures::png_part("../../escape.png"));
    let gallery = create_gallery(&app, form).await;

    assert!(str_field(&gallery, "image1").ends_with("-escape.png"));
    assert_eq!(app.stored_files("images").len(), 1);
    assert!(!app.uploads_dir().join("escape.png").exists());
}

#[tokio::test]
async fn test_five_images_exceed_gallery_ceiling() {
    let app = setup_test_app().await;

    let mut form = MultipartForm::new().add_text("title", "Too many");
    for i in 0..5 {
        form = form.add_part("images", fixtures::png_part(&format!("photo{i}.png")));
    }

    let response = app
        .client()
        .post(&api_path("/dashboard/gallery/create"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Cannot upload more than 4 images!");
    assert_eq!(body["message"], "Cannot upload more than 4 images!");
    assert_eq!(app.stored_file_count(), 0);
    assert!(app.repos.galleries.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_positional_images_fill_slots_in_order() {
    let app = setup_test_app().await;

    let mut form = MultipartForm::new().add_text("title", "Four up");
    for name in ["a.png", "b.png", "c.png", "d.png"] {
        form = form.add_part("images", fixtures::png_part(name));
    }
    let gallery = create_gallery(&app, form).await;

    assert!(str_field(&gallery, "image1").ends_with("-a.png"));
    assert!(str_field(&gallery, "image2").ends_with("-b.png"));
    assert!(str_field(&gallery, "image3").ends_with("-c.png"));
    assert!(str_field(&gallery, "image4").ends_with("-d.png"));
    assert!(gallery["video"].is_null());
    assert_eq!(app.stored_files("images").len(), 4);
}

#[tokio::test]
async fn test_slot_update_keeps_other_slots() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Spring Fair")
        .add_part("image1", fixtures::png_part("one.png"))
        .add_part("image3", fixtures::png_part("three.png"))
        .add_part("image4", fixtures::png_part("four.png"));
    let created = create_gallery(&app, form).await;
    let id = created["id"].as_i64().expect("id");

    let form = MultipartForm::new().add_part("image2", fixtures::png_part("two.png"));
    let response = app
        .client()
        .put(&api_path(&format!("/dashboard/gallery/update/{id}")))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["message"], "Event updated successfully");
    let updated = &body["event"];
    assert_eq!(updated["title"], "Spring Fair");
    assert_eq!(updated["image1"], created["image1"]);
    assert_eq!(updated["image3"], created["image3"]);
    assert_eq!(updated["image4"], created["image4"]);
    assert!(str_field(updated, "image2").ends_with("-two.png"));
    assert_eq!(app.stored_files("images").len(), 4);
}

#[tokio::test]
async fn test_resubmitting_scalars_is_idempotent() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Winter Ball")
        .add_part("image1", fixtures::png_part("ball.png"));
    let created = create_gallery(&app, form).await;
    let id = created["id"].as_i64().expect("id");
    let path = api_path(&format!("/dashboard/gallery/update/{id}"));

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = app
            .client()
            .put(&path)
            .multipart(MultipartForm::new().add_text("title", "Winter Ball 2026"))
            .await;
        assert_eq!(response.status_code(), 200);
        bodies.push(response.json::<Value>()["event"].clone());
    }

    for field in ["id", "title", "image1", "image2", "image3", "image4", "video"] {
        assert_eq!(bodies[0][field], bodies[1][field], "field {field} changed");
    }
    assert_eq!(bodies[1]["title"], "Winter Ball 2026");
    assert_eq!(bodies[1]["image1"], created["image1"]);
    assert_eq!(app.stored_files("images").len(), 1);
}

#[tokio::test]
async fn test_returned_url_serves_the_stored_bytes() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Open Day")
        .add_part("images", fixtures::png_part("open day.png"));
    let gallery = create_gallery(&app, form).await;

    let url = str_field(&gallery, "image1");
    assert!(url.ends_with("-open_day.png"));
    let served_path = url.strip_prefix(BASE_URL).expect("URL under BASE_URL");

    let response = app.client().get(served_path).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), create_minimal_png().as_slice());
}

#[tokio::test]
async fn test_update_of_missing_gallery_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .put(&api_path("/dashboard/gallery/update/404"))
        .multipart(MultipartForm::new().add_part("image1", fixtures::png_part("x.png")))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Event not found!");
    assert_eq!(body["message"], "Event not found!");
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_unexpected_file_field_is_rejected() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Oops")
        .add_part("poster", fixtures::png_part("poster.png"));
    let response = app
        .client()
        .post(&api_path("/dashboard/gallery/create"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "Unexpected field: poster");
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_missing_title_is_rejected_before_storing() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part("images", fixtures::png_part("untitled.png"));
    let response = app
        .client()
        .post(&api_path("/dashboard/gallery/create"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Title is required!");
    assert_eq!(body["message"], "Title is required!");
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
    let app = setup_test_app_with(&[("MAX_UPLOAD_SIZE_MB", "1")]).await;

    let form = MultipartForm::new()
        .add_text("title", "Huge")
        .add_part("images", fixtures::sized_png_part("huge.png", 1024 * 1024 + 1));
    let response = app
        .client()
        .post(&api_path("/dashboard/gallery/create"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_failed_persist_removes_stored_files() {
    let app = setup_test_app().await;
    app.galleries.set_fail_writes(true);

    let form = MultipartForm::new()
        .add_text("title", "Doomed")
        .add_part("images", fixtures::png_part("a.png"))
        .add_part("video", fixtures::mp4_part("b.mp4"));
    let response = app
        .client()
        .post(&api_path("/dashboard/gallery/create"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 500);
    app.wait_for_file_count(0).await;
}

#[tokio::test]
async fn test_list_and_delete_gallery() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Keepsake")
        .add_part("images", fixtures::png_part("keep.png"));
    let gallery = create_gallery(&app, form).await;
    let id = gallery["id"].as_i64().expect("id");

    let list: Value = app
        .client()
        .get(&api_path("/dashboard/gallery/get"))
        .await
        .json();
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    assert_eq!(list[0]["title"], "Keepsake");

    let response = app
        .client()
        .delete(&api_path(&format!("/dashboard/gallery/delete/{id}")))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["message"], "Event deleted successfully");

    // Deleting a record leaves its files in place.
    assert_eq!(app.stored_files("images").len(), 1);

    let response = app
        .client()
        .delete(&api_path(&format!("/dashboard/gallery/delete/{id}")))
        .await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"], "Event not found!");
}
