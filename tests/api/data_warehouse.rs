use catalog_scraper::models::DataWarehouseRecord;
use serde_json::json;

use crate::helpers::TestApp;

#[actix_web::test]
async fn post_document_returns_stored_record(){
    let app = TestApp::spawn_app().await;
    let document = json!({
        "source": "interdimensional cable",
        "episodes": [1, 2, 3],
        "nested": { "ratings": null }
    });

    let response = app.api_client.post(format!("{}/data_warehouse/", app.get_app_url()))
                    .json(&json!({ "data": document }))
                    .send()
                    .await
                    .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let record: DataWarehouseRecord = response.json().await.unwrap();
    assert_eq!(record.data, document);

    let fetched: DataWarehouseRecord = app.get(&format!("/data_warehouse/{}", record.id))
                                        .await
                                        .json()
                                        .await
                                        .unwrap();
    assert_eq!(fetched, record);
}

#[actix_web::test]
async fn non_object_documents_are_accepted(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/data_warehouse/", app.get_app_url()))
                    .json(&json!({ "data": ["a", 1, true] }))
                    .send()
                    .await
                    .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[actix_web::test]
async fn post_without_data_is_unprocessable(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/data_warehouse/", app.get_app_url()))
                    .json(&json!({ "payload": 1 }))
                    .send()
                    .await
                    .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"][0]["loc"], json!(["body", "data"]));
}

#[actix_web::test]
async fn missing_document_returns_not_found(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/data_warehouse/5").await;
    assert_eq!(response.status().as_u16(), 404);
}
