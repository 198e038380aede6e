use crate::helpers::TestApp;

#[actix_web::test]
async fn check_health_route(){
    let app = TestApp::spawn_app().await;
    let url = app.get_app_url();

    let response = reqwest::get(format!("{}/health", url))
                    .await
                    .expect("Failed to get response");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "Working");
}

#[actix_web::test]
async fn unknown_route_returns_json_not_found(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/does_not_exist").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Not Found");
}

#[actix_web::test]
async fn test_database_is_removed_with_the_app(){
    let app = TestApp::spawn_app().await;
    let db_dir = app.db_dir.path().to_path_buf();

    let response = app.post_user(&crate::helpers::user_body("Jerry", "jerry@example.com", "pw")).await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(db_dir.join("catalog.db").exists());

    drop(app);

    assert!(!db_dir.exists());
}
