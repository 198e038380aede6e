use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use validator::Validate;

use crate::{db_interaction::{get_user_by_id, get_user_by_name, get_users}, models::UserProfile, routes::ApiError, utils::{get_pooled_connection, DbPool}, validation::ValidQuery};

#[derive(Deserialize, Validate, Debug)]
pub struct UserQuery{
    #[validate(length(max = 50))]
    pub name: Option<String>
}

// Without `name` every user is listed, with it only the first exact match
#[tracing::instrument(
    "Listing users",
    skip(pool)
)]
pub async fn list_users(
    pool: web::Data<DbPool>,
    query: ValidQuery<UserQuery>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    match query.0.name {
        Some(name) => {
            let user = get_user_by_name(conn, name)
                .await?
                .ok_or(ApiError::NotFound("User"))?;

            Ok(HttpResponse::Ok().json(UserProfile::from(user)))
        },
        None => {
            let users: Vec<UserProfile> = get_users(conn)
                .await?
                .into_iter()
                .map(UserProfile::from)
                .collect();

            Ok(HttpResponse::Ok().json(users))
        }
    }
}

#[tracing::instrument(
    "Getting user by id",
    skip(pool)
)]
pub async fn get_user(
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let user = get_user_by_id(conn, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}
