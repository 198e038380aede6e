use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::{models::{NewUser, User}, password::compute_password_hash, schema::users, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

fn is_unique_violation(error: &diesel::result::Error) -> bool{
    matches!(
        error,
        diesel::result::Error::DatabaseError(diesel::result::DatabaseErrorKind::UniqueViolation, _)
    )
}

#[tracing::instrument(
    "Getting users from db",
    skip(conn)
)]
pub async fn get_users(
    mut conn: DbConnection
) -> Result<Vec<User>, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        users::table
            .select(User::as_select())
            .order(users::id)
            .load::<User>(&mut conn)
            .context("Failed to get users")
    })
    .await
    .context("Failed due to threadpool error")?
}

// First user with exactly this name, if any
#[tracing::instrument(
    "Getting user by name from db",
    skip(conn)
)]
pub async fn get_user_by_name(
    mut conn: DbConnection,
    name: String
) -> Result<Option<User>, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        users::table
            .select(User::as_select())
            .filter(users::name.eq(name))
            .order(users::id)
            .first::<User>(&mut conn)
            .optional()
            .context("Failed to get user by name")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting user by id from db",
    skip(conn)
)]
pub async fn get_user_by_id(
    mut conn: DbConnection,
    user_id: i32
) -> Result<Option<User>, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
            .context("Failed to get user by id")
    })
    .await
    .context("Failed due to threadpool error")?
}

// Error associated with inserting / updating a user row
#[derive(Error)]
pub enum UserWriteError{
    #[error("email field is not unique")]
    EmailNotUnique(#[source] diesel::result::Error),
    #[error("unexpected database / hashing error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for UserWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl From<diesel::result::Error> for UserWriteError {
    fn from(e: diesel::result::Error) -> Self {
        if is_unique_violation(&e) {
            UserWriteError::EmailNotUnique(e)
        } else {
            UserWriteError::UnexpectedError(anyhow::Error::new(e).context("Unexpected diesel / database error"))
        }
    }
}

#[tracing::instrument(
    "Inserting user into the database",
    skip(conn, password)
)]
pub async fn insert_user(
    mut conn: DbConnection,
    name: String,
    email: String,
    password: SecretString
) -> Result<User, UserWriteError> {

    let password_hash = spawn_blocking_with_tracing(move || {
        compute_password_hash(password)
    })
    .await
    .context("Failed due to threadpool error")??;

    let user = NewUser{
        name,
        email,
        password: password_hash.expose_secret().to_string()
    };

    let inserted = spawn_blocking_with_tracing(move || {
        diesel::insert_into(users::table)
            .values(user)
            .returning(User::as_returning())
            .get_result::<User>(&mut conn)
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(inserted)
}

// Replaces name and email, returns the number of rows touched
#[tracing::instrument(
    "Updating user in the database",
    skip(conn)
)]
pub async fn update_user(
    mut conn: DbConnection,
    user_id: i32,
    name: String,
    email: String
) -> Result<usize, UserWriteError>{
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::update(users::table.find(user_id))
            .set((
                users::name.eq(name),
                users::email.eq(email)
            ))
            .execute(&mut conn)
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(affected_rows)
}

#[tracing::instrument(
    "Deleting user from the database",
    skip(conn)
)]
pub async fn delete_user(
    mut conn: DbConnection,
    user_id: i32
) -> Result<usize, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        diesel::delete(users::table.find(user_id))
            .execute(&mut conn)
            .context("Failed to delete user")
    })
    .await
    .context("Failed due to threadpool error")?
}
