//! Request extractors

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Header carrying the optional caller identifier
pub const USER_ID_HEADER: &str = "x-user-id";

/// Opaque caller identifier from `X-User-ID`. Only ever logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerId(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(CallerId(id))
    }
}
