use actix_web::{web, HttpResponse};
use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;
use validator::Validate;

use crate::{db_interaction::{insert_user, UserWriteError}, models::UserProfile, routes::ApiError, utils::{get_pooled_connection, DbPool}, validation::ValidJson};

// Fields are optional only so that every missing one gets reported
#[derive(Deserialize, Validate, Debug)]
pub struct UserForm{
    #[validate(required(message = "Field required"))]
    pub name: Option<String>,
    #[validate(required(message = "Field required"))]
    pub email: Option<String>,
    #[validate(required(message = "Field required"))]
    pub password: Option<String>
}

impl From<UserWriteError> for ApiError {
    fn from(e: UserWriteError) -> Self {
        match e {
            UserWriteError::EmailNotUnique(_) => ApiError::EmailNotUnique(e.into()),
            UserWriteError::UnexpectedError(e) => ApiError::UnexpectedError(e)
        }
    }
}

#[tracing::instrument(
    "Creating user",
    skip(pool, form),
    fields(email = ?form.0.email)
)]
pub async fn create_user(
    pool: web::Data<DbPool>,
    form: ValidJson<UserForm>
) -> Result<HttpResponse, ApiError>{
    let UserForm{ name: Some(name), email: Some(email), password: Some(password) } = form.0 else {
        return Err(anyhow::anyhow!("Validated user form is missing a field").into())
    };

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let user = insert_user(conn, name, email, SecretString::from(password)).await?;

    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}
