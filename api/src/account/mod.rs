use axum::http::{StatusCode, request::Parts};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{App, error::AppError, error::ApiRequestError, schema::{sessions, users}};

use self::models::user::User;

pub mod models;
pub mod routes;

pub const COOKIE_NAME: &str = "auth_token";

#[derive(thiserror::Error, Debug)]
pub enum AuthenticationError {
    #[error("Authentication required, but no cookie `{COOKIE_NAME}` found in headers.")]
    NoCookie,

    #[error(
        "Unauthorized, please check if you're logged in by refreshing the \
         page. This could be due to an expired session or token has became invalid."
    )]
    Unauthorized,
}

impl ApiRequestError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthenticationError::NoCookie => StatusCode::BAD_REQUEST,
            AuthenticationError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

pub struct MaybeAuthUser(pub Result<User, AuthenticationError>);

impl axum::extract::FromRequestParts<App> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &App) -> Result<Self, Self::Rejection> {
        let jar = axum_extra::extract::cookie::CookieJar::from_headers(&parts.headers);

        let session_token = if let Some(t) = jar.get(COOKIE_NAME) {
            t.value().to_owned()
        } else {
            return Ok(MaybeAuthUser(Err(AuthenticationError::NoCookie)));
        };

        let mut conn = state.diesel.get().await?;

        let now = chrono::Utc::now().naive_utc();
        let user = sessions::table
            .inner_join(users::table)
            .filter(sessions::token.eq(session_token))
            .filter(sessions::active.eq(true))
            .filter(sessions::expires_at.gt(now))
            .filter(sessions::issued_at.le(now))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .await
            .optional()?;

        Ok(MaybeAuthUser(
            user.ok_or(AuthenticationError::Unauthorized),
        ))
    }
}

pub struct AuthUser(pub User);

impl axum::extract::FromRequestParts<App> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &App) -> Result<Self, Self::Rejection> {
        let MaybeAuthUser(auth_user) =
            <MaybeAuthUser as axum::extract::FromRequestParts<App>>::from_request_parts(
                parts, state,
            )
            .await?;

        Ok(AuthUser(auth_user?))
    }
}
