//! BucketStore persistence behavior over the in-memory backend

use bucket_cms::error::StoreError;
use bucket_cms::item::CollectionItem;
use bucket_cms::schema::Collection;
use bucket_cms::store::{BucketStore, MemoryStorage, ObjectStorage};
use bucket_cms::validation::CollectionName;
use bytes::Bytes;
use std::sync::Arc;

fn store_with_backend() -> (BucketStore, Arc<MemoryStorage>) {
    let backend = Arc::new(MemoryStorage::new());
    let store = BucketStore::new(backend.clone(), "https://cdn.example.com");
    (store, backend)
}

fn posts_schema() -> Collection {
    Collection::new("Posts", "Title")
        .unwrap()
        .add_field("Tags", "Labels")
        .unwrap()
        .add_field("Category", "SelectField")
        .unwrap()
        .add_option(2, "News")
        .unwrap()
}

#[tokio::test]
async fn collection_round_trip_preserves_field_order() {
    let (store, _) = store_with_backend();
    let schema = posts_schema();

    store.save_collection(&schema).await.unwrap();
    let loaded = store.read_collection("Posts").await.unwrap();
    assert_eq!(loaded, schema);

    let all = store.list_collections().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], schema);
}

#[tokio::test]
async fn save_rejects_invalid_schema_without_writing() {
    let (store, backend) = store_with_backend();

    // First field retyped away from Text must never reach storage
    let bad: Collection = serde_json::from_str(
        r#"{"collectionName":"Posts","fields":[{"name":"Title","typeName":"URL"}]}"#,
    )
    .unwrap();
    assert!(matches!(
        store.save_collection(&bad).await,
        Err(StoreError::Schema(_))
    ));
    assert!(backend.is_empty());
}

#[tokio::test]
async fn read_missing_collection_is_not_found() {
    let (store, _) = store_with_backend();
    assert!(matches!(
        store.read_collection("Nope").await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn item_round_trip_and_overwrite() {
    let (store, _) = store_with_backend();
    let schema = posts_schema();
    store.save_collection(&schema).await.unwrap();

    let item = CollectionItem::new(CollectionName::new("Posts").unwrap())
        .set_value(&schema, "Title", "Hello")
        .unwrap();
    store.save_item(&item).await.unwrap();

    let loaded = store.read_item("Posts", &item.item_id).await.unwrap();
    assert_eq!(loaded, item);

    // Each save overwrites the whole object
    let updated = item.set_value(&schema, "Title", "Hello again").unwrap();
    store.save_item(&updated).await.unwrap();
    let loaded = store.read_item("Posts", &item.item_id).await.unwrap();
    assert_eq!(
        loaded.get_value("Title"),
        Some(&bucket_cms::Value::Text("Hello again".to_string()))
    );
}

#[tokio::test]
async fn item_pages_are_disjoint_ordered_and_exhaustive() {
    let (store, _) = store_with_backend();
    let schema = posts_schema();
    store.save_collection(&schema).await.unwrap();

    let name = CollectionName::new("Posts").unwrap();
    for i in 0..25 {
        let mut item = CollectionItem::new(name.clone());
        // Fixed-width ids give a known listing order
        item.item_id = format!("{:04}", i);
        store.save_item(&item).await.unwrap();
    }

    let mut seen = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0;
    loop {
        let page = store
            .list_items("Posts", token.as_deref(), Some(10))
            .await
            .unwrap();
        pages += 1;
        seen.extend(page.items.iter().map(|i| i.item_id.clone()));
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    assert_eq!(pages, 3);
    assert_eq!(seen.len(), 25);
    let expected: Vec<String> = (0..25).map(|i| format!("{:04}", i)).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn deleting_a_field_leaves_stored_items_untouched() {
    let (store, _) = store_with_backend();
    let schema = posts_schema();
    store.save_collection(&schema).await.unwrap();

    let item = CollectionItem::new(CollectionName::new("Posts").unwrap())
        .set_value(&schema, "Tags", vec!["a".to_string()])
        .unwrap();
    store.save_item(&item).await.unwrap();

    // Drop the Tags field from the schema; the stored item keeps its value
    let trimmed = schema.delete_field(1).unwrap();
    store.save_collection(&trimmed).await.unwrap();

    let loaded = store.read_item("Posts", &item.item_id).await.unwrap();
    assert!(loaded.get_value("Tags").is_some());
}

#[tokio::test]
async fn oversized_upload_rejected_before_any_write() {
    let (store, backend) = store_with_backend();

    let too_big = Bytes::from(vec![0u8; 21 * 1024 * 1024]);
    let err = store
        .upload_file("big.png", "image/png", too_big)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UploadRejected(_)));

    let keys = backend.list_keys("files/").await.unwrap();
    assert!(keys.is_empty());
    assert!(backend.is_empty());
}

#[tokio::test]
async fn disallowed_mime_type_rejected_before_any_write() {
    let (store, backend) = store_with_backend();

    let err = store
        .upload_file("app.exe", "application/x-msdownload", Bytes::from_static(b"MZ"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UploadRejected(_)));
    assert!(backend.is_empty());
}

#[tokio::test]
async fn successful_upload_returns_public_url() {
    let (store, backend) = store_with_backend();

    let url = store
        .upload_file("photo 1.png", "image/png", Bytes::from_static(b"png-bytes"))
        .await
        .unwrap();
    assert!(url.starts_with("https://cdn.example.com/files/"));
    assert!(url.ends_with("-photo_1.png"));

    let keys = backend.list_keys("files/").await.unwrap();
    assert_eq!(keys.len(), 1);
}
