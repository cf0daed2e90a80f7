use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use tasyir_core::Tasyir;
use tasyir_types::primitives::{Role, SessionId, UserId};

use super::error::ApiError;

/// Identity resolved from the bearer token, available to every handler
/// behind the auth layer.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
    pub session_id: SessionId,
    pub token: String,
}

pub async fn authenticate(
    State(app): State<Tasyir>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer
        .ok_or(ApiError::NotAuthenticated)?
        .token()
        .to_string();
    let (session, user) = app.authenticate(&token).await?;
    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id(),
        role: user.role(),
        session_id: session.id,
        token,
    });
    Ok(next.run(req).await)
}

fn require_role(user: &AuthenticatedUser, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

pub async fn require_accounting(
    Extension(user): Extension<AuthenticatedUser>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(&user, &[Role::Admin, Role::Accountant])?;
    Ok(next.run(req).await)
}

pub async fn require_hr(
    Extension(user): Extension<AuthenticatedUser>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(&user, &[Role::Admin, Role::Hr])?;
    Ok(next.run(req).await)
}

pub async fn require_stock(
    Extension(user): Extension<AuthenticatedUser>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(&user, &[Role::Admin, Role::StockManager])?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new(),
            role,
            session_id: SessionId::new(),
            token: "token".to_string(),
        }
    }

    #[test]
    fn admin_passes_every_gate() {
        let admin = user(Role::Admin);
        assert!(require_role(&admin, &[Role::Admin, Role::Accountant]).is_ok());
        assert!(require_role(&admin, &[Role::Admin, Role::Hr]).is_ok());
        assert!(require_role(&admin, &[Role::Admin, Role::StockManager]).is_ok());
    }

    #[test]
    fn accountant_is_kept_out_of_hr() {
        let accountant = user(Role::Accountant);
        assert!(require_role(&accountant, &[Role::Admin, Role::Accountant]).is_ok());
        assert!(matches!(
            require_role(&accountant, &[Role::Admin, Role::Hr]),
            Err(ApiError::Forbidden)
        ));
    }
}
