use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Actor label extractor for inventory-service.
///
/// The identity layer in front of this service forwards who is acting via
/// the `X-Actor` header. The label is stamped into receipt and invoice
/// audit fields and nothing is enforced on it, so the extractor never
/// rejects. A body-level field (`changedBy`, `receivedBy`, `createdBy`)
/// takes precedence when the caller supplies one.
#[derive(Debug, Clone)]
pub struct Actor(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get("X-Actor")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        if let Some(label) = &actor {
            tracing::Span::current().record("actor", label.as_str());
        }

        Ok(Actor(actor))
    }
}
