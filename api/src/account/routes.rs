use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;

use crate::{
    App,
    error::AppError,
    schema::{sessions, users},
};

use super::{
    COOKIE_NAME, MaybeAuthUser,
    models::{
        session::Session,
        user::{ADMIN_REPUTATION, DEFAULT_REPUTATION, NewUser, User, UserProfile},
    },
};

pub fn route() -> Router<App> {
    Router::<App>::new()
        .route("/users", get(get_users).post(register))
        .route("/users/{id}", get(get_user))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(whoami))
}

async fn get_users(State(ctx): State<App>) -> Result<Json<Vec<UserProfile>>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let all = users::table
        .select(User::as_select())
        .load::<User>(&mut conn)
        .await?;

    Ok(Json(all.into_iter().map(UserProfile::from).collect()))
}

async fn get_user(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<UserProfile>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let user = users::table
        .find(id)
        .select(User::as_select())
        .first::<User>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("user"))?;

    Ok(Json(UserProfile::from(user)))
}

async fn whoami(MaybeAuthUser(user): MaybeAuthUser) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(UserProfile::from(user?)))
}

#[derive(Deserialize)]
pub struct RegisterSubmission {
    first_name: String,
    last_name: String,
    email: String,
    display_name: String,
    password: String,
    is_admin: Option<bool>,
}

impl RegisterSubmission {
    fn validate(&mut self) -> Result<(), &'static str> {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.display_name = self.display_name.trim().to_string();

        if self.first_name.is_empty() || self.last_name.is_empty() {
            return Err("First and last name are required");
        }

        if self.display_name.is_empty() {
            return Err("Display name is required");
        }

        if self.email.is_empty() || !self.email.contains('@') || !self.email.contains('.') {
            return Err("Invalid email");
        }

        if self.password.is_empty() {
            return Err("No password provided");
        }

        if self.password.contains(&self.first_name)
            || self.password.contains(&self.last_name)
            || self.password.contains(&self.email)
        {
            return Err("Password cannot contain first or last name or email.");
        }

        Ok(())
    }
}

#[axum::debug_handler]
async fn register(
    State(ctx): State<App>,
    crate::json::Json(mut submission): crate::json::Json<RegisterSubmission>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    submission
        .validate()
        .map_err(|e| AppError::Validation(e.into()))?;

    let mut conn = ctx.diesel.get().await?;

    let email_taken = users::table
        .filter(users::email.eq(&submission.email))
        .select(users::id)
        .first::<i32>(&mut conn)
        .await
        .optional()?;

    if email_taken.is_some() {
        return Err(AppError::Validation("Email already taken.".into()));
    }

    let name_taken = users::table
        .filter(users::display_name.eq(&submission.display_name))
        .select(users::id)
        .first::<i32>(&mut conn)
        .await
        .optional()?;

    if name_taken.is_some() {
        return Err(AppError::Validation("Display Name already taken.".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(submission.password.as_bytes(), &salt)
        .map_err(|e| AppError::Unhandled(format!("couldn't hash the password: {e}")))?
        .to_string();

    let is_admin = submission.is_admin.unwrap_or(false);

    let new_user = NewUser {
        first_name: submission.first_name,
        last_name: submission.last_name,
        email: submission.email,
        display_name: submission.display_name,
        password_hash,
        is_admin,
        reputation: if is_admin {
            ADMIN_REPUTATION
        } else {
            DEFAULT_REPUTATION
        },
        joined_date: chrono::Utc::now().naive_utc(),
    };

    let user = diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result::<User>(&mut conn)
        .await?;

    Ok((StatusCode::CREATED, Json(UserProfile::from(user))))
}

#[derive(Deserialize)]
pub struct LoginSubmission {
    email: String,
    password: String,
}

#[axum::debug_handler]
async fn login(
    State(ctx): State<App>,
    jar: CookieJar,
    crate::json::Json(submission): crate::json::Json<LoginSubmission>,
) -> Result<(CookieJar, Json<UserProfile>), AppError> {
    let mut conn = ctx.diesel.get().await?;

    let user = users::table
        .filter(users::email.eq(submission.email.trim().to_lowercase()))
        .select(User::as_select())
        .first::<User>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::Validation("Invalid email or password.".into()))?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Unhandled(format!("stored password hash is invalid: {e}")))?;

    if Argon2::default()
        .verify_password(submission.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Validation("Invalid email or password.".into()));
    }

    let new_session = Session::new_with_user_id(user.id);

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(&mut conn)
        .await?;

    let cookie = Cookie::build((COOKIE_NAME, new_session.token))
        .path("/")
        .http_only(true);

    Ok((jar.add(cookie), Json(UserProfile::from(user))))
}

async fn logout(State(ctx): State<App>, jar: CookieJar) -> Result<CookieJar, AppError> {
    let Some(token) = jar.get(COOKIE_NAME).map(|t| t.value().to_owned()) else {
        return Ok(jar);
    };

    let mut conn = ctx.diesel.get().await?;

    diesel::update(sessions::table.filter(sessions::token.eq(token)))
        .set(sessions::active.eq(false))
        .execute(&mut conn)
        .await?;

    Ok(jar.remove(Cookie::from(COOKIE_NAME)))
}
