//! src/session_state.rs

use crate::backend_client::BearerToken;
use crate::error::{error_chain_fmt, DashResult, Error};
use actix_session::{Session, SessionExt};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use secrecy::Secret;
use std::future::{ready, Ready};

#[derive(thiserror::Error)]
pub enum SessionError {
    #[error("The user has not logged in.")]
    UserNotLoggedIn,
    #[error(transparent)]
    SessionInsertError(#[from] actix_session::SessionInsertError),
    #[error(transparent)]
    SessionGetError(#[from] actix_session::SessionGetError),
}

impl std::fmt::Debug for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub struct TypedSession(Session);

impl TypedSession {
    const BEARER_TOKEN_KEY: &'static str = "bearer_token";
    const EMAIL_KEY: &'static str = "email";
    const COLLECTIONS_KEY: &'static str = "created_collections";

    pub fn renew(&self) {
        self.0.renew();
    }

    pub fn insert_bearer_token(&self, token: &BearerToken) -> DashResult<()> {
        self.0
            .insert(Self::BEARER_TOKEN_KEY, token.expose_secret())
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    pub fn get_bearer_token(&self) -> DashResult<Option<BearerToken>> {
        let token: Option<String> = self
            .0
            .get(Self::BEARER_TOKEN_KEY)
            .map_err(SessionError::from)?;
        Ok(token.map(|t| BearerToken::new(Secret::new(t))))
    }

    pub fn insert_email(&self, email: &str) -> DashResult<()> {
        self.0
            .insert(Self::EMAIL_KEY, email)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    pub fn get_email(&self) -> DashResult<Option<String>> {
        self.0
            .get(Self::EMAIL_KEY)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    /// Collections created through the document browser during this session.
    pub fn get_created_collections(&self) -> DashResult<Vec<String>> {
        let collections: Option<Vec<String>> = self
            .0
            .get(Self::COLLECTIONS_KEY)
            .map_err(SessionError::from)?;
        Ok(collections.unwrap_or_default())
    }

    pub fn add_created_collection(&self, name: &str) -> DashResult<()> {
        let mut collections = self.get_created_collections()?;
        if !collections.iter().any(|c| c == name) {
            collections.push(name.to_owned());
        }
        self.0
            .insert(Self::COLLECTIONS_KEY, collections)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    pub fn log_out(self) {
        self.0.purge();
    }
}

impl FromRequest for TypedSession {
    // We return the same error returned by the
    // implementation of 'FromRequest' for 'Session'.
    type Error = <Session as FromRequest>::Error;
    // We do not perform any I/O, so we wrap `TypedSession` into `Ready`
    // to convert it into a `Future` that resolves to the wrapped value
    // the first time it's polled by the executor.
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}
