use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::auth::{authenticate, Credentials};
use crate::database::repository::{finish, Store};
use crate::error::ApiError;

/// Resolves the caller from the `Authorization: <id>:<secret>` header and
/// injects [`crate::auth::AuthUser`] into the request extensions. Requests
/// that fail the check never reach the handler.
pub async fn require_user<S: Store>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let credentials = Credentials::parse(header)?;

    let mut cx = state.store.read().await?;
    let result = authenticate(&state.users, &mut cx, &credentials).await;
    let user = finish(cx, result).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
