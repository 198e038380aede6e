use catalog_scraper::{models::{User, UserProfile}, password::verify_password, routes::MessageResponse, schema::users};
use diesel::{QueryDsl, RunQueryDsl, SelectableHelper};
use fake::{faker::{internet::en::SafeEmail, name::en::Name}, Fake};
use secrecy::SecretString;

use crate::helpers::{user_body, TestApp};

fn stored_user(app: &TestApp, id: i32) -> User{
    let mut conn = app.pool.get().unwrap();

    users::table
        .find(id)
        .select(User::as_select())
        .first::<User>(&mut conn)
        .unwrap()
}

#[actix_web::test]
async fn create_user_then_get_by_id_returns_same_user(){
    let app = TestApp::spawn_app().await;
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();

    let response = app.post_user(&user_body(&name, &email, "hunter22")).await;
    assert_eq!(response.status().as_u16(), 200);
    let created: UserProfile = response.json().await.unwrap();

    let response = app.get_user(created.id).await;
    assert_eq!(response.status().as_u16(), 200);

    let fetched: UserProfile = response.json().await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, name);
    assert_eq!(fetched.email, email);
}

#[actix_web::test]
async fn created_user_password_is_hashed_and_verifies(){
    let app = TestApp::spawn_app().await;

    let response = app.post_user(&user_body("Beth Smith", "beth@example.com", "horse-surgeon")).await;
    let created: UserProfile = response.json().await.unwrap();

    let stored = stored_user(&app, created.id);
    assert_ne!(stored.password, "horse-surgeon");

    let verified = verify_password(SecretString::from("horse-surgeon".to_string()), stored.password)
                    .await
                    .unwrap();
    assert!(verified);
}

#[actix_web::test]
async fn user_response_does_not_expose_password(){
    let app = TestApp::spawn_app().await;

    let response = app.post_user(&user_body("Jerry Smith", "jerry@example.com", "pluto-is-a-planet")).await;
    let body: serde_json::Value = response.json().await.unwrap();

    assert!(body.get("password").is_none());
    assert_eq!(body["name"], "Jerry Smith");
}

#[actix_web::test]
async fn list_users_returns_every_user(){
    let app = TestApp::spawn_app().await;

    app.post_user(&user_body("Rick", "rick@example.com", "pw")).await;
    app.post_user(&user_body("Morty", "morty@example.com", "pw")).await;

    let response = app.get("/users/").await;
    assert_eq!(response.status().as_u16(), 200);

    let users: Vec<UserProfile> = response.json().await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Rick", "Morty"]);
}

#[actix_web::test]
async fn list_users_with_name_returns_single_match(){
    let app = TestApp::spawn_app().await;

    app.post_user(&user_body("Rick", "rick@example.com", "pw")).await;
    app.post_user(&user_body("Morty", "morty@example.com", "pw")).await;

    let response = app.get("/users/?name=Morty").await;
    assert_eq!(response.status().as_u16(), 200);

    let user: UserProfile = response.json().await.unwrap();
    assert_eq!(user.email, "morty@example.com");

    let response = app.get("/users/?name=Summer").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn list_users_rejects_name_longer_than_fifty_chars(){
    let app = TestApp::spawn_app().await;

    let response = app.get(&format!("/users/?name={}", "a".repeat(51))).await;
    assert_eq!(response.status().as_u16(), 422);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"][0]["loc"], serde_json::json!(["query", "name"]));
}

#[actix_web::test]
async fn get_missing_user_returns_not_found(){
    let app = TestApp::spawn_app().await;

    let response = app.get_user(4242).await;
    assert_eq!(response.status().as_u16(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "User not found");
}

#[actix_web::test]
async fn get_user_with_non_integer_id_is_unprocessable(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/users/abc").await;
    assert_eq!(response.status().as_u16(), 422);
}

#[actix_web::test]
async fn post_user_missing_email_is_unprocessable(){
    let app = TestApp::spawn_app().await;
    let body = serde_json::json!({
        "name": "Summer Smith",
        "password": "testpassword"
    });

    let response = app.post_user(&body).await;
    assert_eq!(response.status().as_u16(), 422);

    let error: serde_json::Value = response.json().await.unwrap();
    let detail = error["detail"].as_array().unwrap();
    assert_eq!(detail.len(), 1);
    assert_eq!(detail[0]["loc"], serde_json::json!(["body", "email"]));
    assert_eq!(error["body"], body);
}

#[actix_web::test]
async fn post_user_reports_every_missing_field(){
    let app = TestApp::spawn_app().await;

    let response = app.post_user(&serde_json::json!({})).await;
    assert_eq!(response.status().as_u16(), 422);

    let error: serde_json::Value = response.json().await.unwrap();
    let locs: Vec<&serde_json::Value> = error["detail"].as_array()
                    .unwrap()
                    .iter()
                    .map(|item| &item["loc"][1])
                    .collect();
    assert_eq!(locs, vec!["email", "name", "password"]);
}

#[actix_web::test]
async fn post_user_with_wrong_typed_name_reports_it_alongside_missing_fields(){
    let app = TestApp::spawn_app().await;
    let body = serde_json::json!({ "name": 5 });

    let response = app.post_user(&body).await;
    assert_eq!(response.status().as_u16(), 422);

    let error: serde_json::Value = response.json().await.unwrap();
    let detail = error["detail"].as_array().unwrap();
    assert_eq!(detail.len(), 3);
    assert_eq!(detail[0]["loc"], serde_json::json!(["body", "email"]));
    assert_eq!(detail[0]["type"], "required");
    assert_eq!(detail[1]["loc"], serde_json::json!(["body", "name"]));
    assert_eq!(detail[1]["type"], "type_error");
    assert_eq!(detail[2]["loc"], serde_json::json!(["body", "password"]));
    assert_eq!(error["body"], body);
}

#[actix_web::test]
async fn post_user_without_body_reports_every_missing_field(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/users/", app.get_app_url()))
                    .send()
                    .await
                    .unwrap();
    assert_eq!(response.status().as_u16(), 422);

    let error: serde_json::Value = response.json().await.unwrap();
    assert_eq!(error["detail"].as_array().unwrap().len(), 3);
    assert_eq!(error["body"], serde_json::Value::Null);
}

#[actix_web::test]
async fn post_user_with_invalid_json_is_unprocessable(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/users/", app.get_app_url()))
                    .header("Content-Type", "application/json")
                    .body("{not json")
                    .send()
                    .await
                    .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    let error: serde_json::Value = response.json().await.unwrap();
    assert_eq!(error["detail"][0]["type"], "json_invalid");
    assert_eq!(error["body"], "{not json");
}

#[actix_web::test]
async fn update_user_changes_name_and_email_only(){
    let app = TestApp::spawn_app().await;

    let created: UserProfile = app.post_user(&user_body("Rick", "rick@example.com", "wubba-lubba"))
                                .await
                                .json()
                                .await
                                .unwrap();
    let password_before = stored_user(&app, created.id).password;

    let response = app.put_user(created.id, &serde_json::json!({
        "name": "Pickle Rick",
        "email": "pickle@example.com"
    })).await;
    assert_eq!(response.status().as_u16(), 200);

    let message: MessageResponse = response.json().await.unwrap();
    assert_eq!(message, MessageResponse::new("User updated successfully"));

    let stored = stored_user(&app, created.id);
    assert_eq!(stored.name, "Pickle Rick");
    assert_eq!(stored.email, "pickle@example.com");
    assert_eq!(stored.password, password_before);
}

#[actix_web::test]
async fn update_missing_user_returns_not_found(){
    let app = TestApp::spawn_app().await;

    let response = app.put_user(99, &serde_json::json!({
        "name": "Nobody",
        "email": "nobody@example.com"
    })).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn update_user_to_taken_email_conflicts(){
    let app = TestApp::spawn_app().await;

    app.post_user(&user_body("Rick", "rick@example.com", "pw")).await;
    let morty: UserProfile = app.post_user(&user_body("Morty", "morty@example.com", "pw"))
                                .await
                                .json()
                                .await
                                .unwrap();

    let response = app.put_user(morty.id, &serde_json::json!({
        "name": "Morty",
        "email": "rick@example.com"
    })).await;

    assert_eq!(response.status().as_u16(), 409);
}

#[actix_web::test]
async fn delete_user_removes_it(){
    let app = TestApp::spawn_app().await;

    let created: UserProfile = app.post_user(&user_body("Mr. Poopybutthole", "ooowee@example.com", "pw"))
                                .await
                                .json()
                                .await
                                .unwrap();

    let response = app.delete_user(created.id).await;
    assert_eq!(response.status().as_u16(), 200);
    let message: MessageResponse = response.json().await.unwrap();
    assert_eq!(message.message, "User deleted successfully");

    let response = app.get_user(created.id).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.delete_user(created.id).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn concurrent_creates_with_distinct_emails_get_distinct_ids(){
    let app = TestApp::spawn_app().await;

    let first = user_body("Rick", "rick@example.com", "pw");
    let second = user_body("Morty", "morty@example.com", "pw");
    let (a, b) = tokio::join!(
        app.post_user(&first),
        app.post_user(&second)
    );

    assert_eq!(a.status().as_u16(), 200);
    assert_eq!(b.status().as_u16(), 200);

    let a: UserProfile = a.json().await.unwrap();
    let b: UserProfile = b.json().await.unwrap();
    assert_ne!(a.id, b.id);
}

#[actix_web::test]
async fn concurrent_creates_with_same_email_conflict(){
    let app = TestApp::spawn_app().await;

    let first = user_body("Rick", "rick@example.com", "pw");
    let second = user_body("Evil Rick", "rick@example.com", "pw");
    let (a, b) = tokio::join!(
        app.post_user(&first),
        app.post_user(&second)
    );

    let mut statuses = vec![a.status().as_u16(), b.status().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![200, 409]);

    let body: serde_json::Value = if a.status().as_u16() == 409 { a.json().await.unwrap() } else { b.json().await.unwrap() };
    assert_eq!(body["detail"], "Email already registered");
}
