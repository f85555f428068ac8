use crate::{
    auth::jwt::generate_access_token,
    config::Config,
    error::ApiError,
    models::{TokenReq, TokenResponse},
};
use actix_web::{HttpResponse, web};
use tracing::{info, instrument};

/// Issue an access token for a signed-in user
#[utoipa::path(
    post,
    path = "/jwt",
    request_body = TokenReq,
    responses(
        (status = 200, description = "Signed access token", body = TokenResponse),
        (status = 400, description = "uid missing")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_issue_token", skip(config, body), fields(uid = %body.uid))]
pub async fn issue_token(
    body: web::Json<TokenReq>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let TokenReq { uid, email } = body.into_inner();
    let uid = uid.trim().to_string();
    if uid.is_empty() {
        return Err(ApiError::bad_request("uid must not be empty"));
    }

    let token = generate_access_token(uid, email, &config.jwt_secret, config.access_token_ttl)
        .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))?;

    info!("Access token issued");
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
