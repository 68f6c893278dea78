//! Unit tests for response handlers

use std::sync::Arc;

use media_relay::provider::traits::{MediaKind, ProviderItem};
use media_relay::response::file::{asset_ref, is_media_file, AssetStore};
use media_relay::response::{base64, ResponseHandler};
use tokio_test::{assert_err, assert_ok};

#[test]
fn test_base64_decode() {
    let decoded = assert_ok!(base64::decode("SGVsbG8sIFdvcmxkIQ=="));
    assert_eq!(b"Hello, World!", decoded.as_slice());
}

#[test]
fn test_base64_decode_data_url() {
    let data_url = "data:image/png;base64,SGVsbG8sIFdvcmxkIQ==";
    let decoded = assert_ok!(base64::decode(data_url));

    assert_eq!(b"Hello, World!", decoded.as_slice());
}

#[test]
fn test_base64_rejects_invalid() {
    assert_err!(base64::decode("not valid base64!!!"));
}

#[test]
fn test_library_extensions() {
    for name in ["a.png", "b.jpg", "c.jpeg", "d.mp4", "e.gif", "F.PNG"] {
        assert!(is_media_file(name), "{} should be listed", name);
    }
    for name in ["a.webp", "b.txt", ".DS_Store", "mp4"] {
        assert!(!is_media_file(name), "{} should not be listed", name);
    }
}

#[tokio::test]
async fn test_inline_payload_round_trips_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(AssetStore::new(dir.path()));
    let handler = ResponseHandler::new(store.clone());

    let output = assert_ok!(
        handler
            .process(ProviderItem::Inline("iVBORw0KGgo=".to_string()), MediaKind::Image)
            .await
    )
    .expect("inline payload produces an output");

    let filename = output.strip_prefix("/output/").unwrap();
    assert_eq!(asset_ref(filename), output);
    assert!(filename.ends_with(".png"));

    let bytes = std::fs::read(store.get_path(filename)).unwrap();
    assert_eq!(bytes, [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);

    let listed = assert_ok!(store.list().await);
    assert_eq!(listed, vec![filename.to_string()]);
}

#[tokio::test]
async fn test_url_item_is_untouched_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(AssetStore::new(dir.path()));
    let handler = ResponseHandler::new(store.clone());

    let output = assert_ok!(
        handler
            .process(ProviderItem::Url("https://cdn.example/v.mp4".to_string()), MediaKind::Video)
            .await
    );

    assert_eq!(output.as_deref(), Some("https://cdn.example/v.mp4"));
    assert!(assert_ok!(store.list().await).is_empty());
}
