use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{db_interaction, routes::ApiError, utils::{get_pooled_connection, DbPool}, validation::ValidJson};

#[derive(Deserialize, Validate, Debug)]
pub struct UserUpdateForm{
    #[validate(required(message = "Field required"))]
    pub name: Option<String>,
    #[validate(required(message = "Field required"))]
    pub email: Option<String>
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct MessageResponse{
    pub message: String
}

impl MessageResponse {
    pub fn new(message: &str) -> Self{
        MessageResponse{ message: message.to_string() }
    }
}

// Replaces name and email, the password is never touched here
#[tracing::instrument(
    "Updating user",
    skip(pool)
)]
pub async fn update_user(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: ValidJson<UserUpdateForm>
) -> Result<HttpResponse, ApiError>{
    let UserUpdateForm{ name: Some(name), email: Some(email) } = form.0 else {
        return Err(anyhow::anyhow!("Validated user update form is missing a field").into())
    };

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let affected_rows = db_interaction::update_user(conn, path.into_inner(), name, email).await?;

    if affected_rows == 0 {
        return Err(ApiError::NotFound("User"));
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("User updated successfully")))
}
