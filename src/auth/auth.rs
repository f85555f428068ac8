use std::marker::PhantomData;

use crate::{
    error::ApiError,
    model::{role::Role, staff::Staff},
    store::Store,
};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web::Data};
use futures::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

/// Identity decoded from the bearer token by `auth_middleware`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
}

impl AuthUser {
    /// Callers may only act on their own uid.
    pub fn require_self(&self, uid: &str) -> Result<(), ApiError> {
        if self.uid == uid {
            Ok(())
        } else {
            debug!(caller = %self.uid, target = %uid, "Ownership check failed");
            Err(ApiError::Forbidden)
        }
    }
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or(ApiError::Unauthorized),
        )
    }
}

/// Role a `RoleGuard` demands.
pub trait RequiredRole {
    const ROLE: Role;
}

pub struct AdminRole;
pub struct HrRole;

impl RequiredRole for AdminRole {
    const ROLE: Role = Role::Admin;
}

impl RequiredRole for HrRole {
    const ROLE: Role = Role::Hr;
}

/// Extractor that loads the caller's staff record and checks its stored role.
/// A missing record is treated like a mismatch.
pub struct RoleGuard<R: RequiredRole> {
    pub user: AuthUser,
    pub staff: Staff,
    _role: PhantomData<R>,
}

pub type AdminOnly = RoleGuard<AdminRole>;
pub type HrOnly = RoleGuard<HrRole>;

pub async fn check_role(store: &dyn Store, uid: &str, required: Role) -> Result<Staff, ApiError> {
    match store.find_staff(uid).await? {
        Some(staff) if staff.role == required => Ok(staff),
        Some(staff) => {
            debug!(uid, role = %staff.role, required = %required, "Role gate denied");
            Err(ApiError::Forbidden)
        }
        None => {
            debug!(uid, required = %required, "Role gate denied: no staff record");
            Err(ApiError::Forbidden)
        }
    }
}

impl<R: RequiredRole + 'static> FromRequest for RoleGuard<R> {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthUser>().cloned();
        let store = req.app_data::<Data<dyn Store>>().cloned();

        Box::pin(async move {
            let user = user.ok_or(ApiError::Unauthorized)?;
            let store =
                store.ok_or_else(|| ApiError::Internal("store is not configured".into()))?;

            let staff = check_role(store.get_ref(), &user.uid, R::ROLE).await?;

            Ok(RoleGuard {
                user,
                staff,
                _role: PhantomData,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::staff::StaffProfile;
    use crate::store::memory::MemoryStore;

    async fn seed(store: &MemoryStore, uid: &str, role: Role) {
        let staff = Staff::from_profile(1, uid.into(), role, StaffProfile::default());
        store.insert_staff(&staff).await.unwrap();
    }

    #[actix_web::test]
    async fn matching_role_passes() {
        let store = MemoryStore::default();
        seed(&store, "hr-1", Role::Hr).await;

        let staff = check_role(&store, "hr-1", Role::Hr).await.unwrap();
        assert_eq!(staff.uid, "hr-1");
    }

    #[actix_web::test]
    async fn mismatched_role_is_forbidden() {
        let store = MemoryStore::default();
        seed(&store, "emp-1", Role::Employee).await;

        let err = check_role(&store, "emp-1", Role::Admin).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[actix_web::test]
    async fn missing_record_is_forbidden() {
        let store = MemoryStore::default();
        let err = check_role(&store, "ghost", Role::Hr).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[test]
    fn ownership_check() {
        let user = AuthUser {
            uid: "u1".into(),
            email: None,
        };
        assert!(user.require_self("u1").is_ok());
        assert!(matches!(user.require_self("u2"), Err(ApiError::Forbidden)));
    }
}
