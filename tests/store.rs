use contacts_api::config::parse_config;
use contacts_api::{connect, ensure_resource_tables, resolve, CrudService, FullConfig};
use serde_json::{json, Value};
use std::collections::HashMap;

fn body(v: Value) -> HashMap<String, Value> {
    v.as_object().unwrap().clone().into_iter().collect()
}

#[tokio::test]
async fn file_database_persists_across_pools() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("contacts.db").display());
    let model = resolve(&FullConfig::contacts()).unwrap();
    let contacts = model.resource("contacts").unwrap();

    let pool = connect(&url).await.unwrap();
    ensure_resource_tables(&pool, &model).await.unwrap();
    let row = CrudService::create(&pool, contacts, &body(json!({"name": "Alice", "phone": "1"})))
        .await
        .unwrap();
    pool.close().await;

    let pool = connect(&url).await.unwrap();
    ensure_resource_tables(&pool, &model).await.unwrap();
    let id = row["id"].as_i64().unwrap();
    let read = CrudService::read(&pool, contacts, id).await.unwrap();
    assert_eq!(read, Some(json!({"id": id, "name": "Alice", "phone": "1"})));
}

#[tokio::test]
async fn declared_kinds_round_trip_through_the_store() {
    let cfg = parse_config(
        r#"{"resources": [{"name": "books", "fields": [
            {"name": "title", "required": true},
            {"name": "pages", "kind": "integer"},
            {"name": "rating", "kind": "real"}]}]}"#,
    )
    .unwrap();
    let model = resolve(&cfg).unwrap();
    let books = model.resource("books").unwrap();
    let pool = contacts_api::connect_memory().await.unwrap();
    ensure_resource_tables(&pool, &model).await.unwrap();

    let row = CrudService::create(&pool, books, &body(json!({"title": "Dune", "pages": 412, "rating": 4.5})))
        .await
        .unwrap();
    assert_eq!(row["pages"], 412);
    assert_eq!(row["rating"], 4.5);

    let updated = CrudService::update(&pool, books, row["id"].as_i64().unwrap(), &HashMap::new())
        .await
        .unwrap();
    assert_eq!(updated, Some(row));

    assert!(!CrudService::delete(&pool, books, 999).await.unwrap());
}
