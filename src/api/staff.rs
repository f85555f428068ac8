use crate::{
    auth::auth::{AdminOnly, AuthUser, HrOnly},
    error::ApiError,
    model::{
        role::Role,
        staff::{EmployeeSummary, Staff, StaffProfile},
    },
    models::MessageResponse,
    store::{STAFFS, Store},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertStaff {
    #[schema(example = "kX9f2LmQ7aRt")]
    pub uid: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Falls back to the email carried by the token.
    #[serde(default)]
    #[schema(example = "jane@worksync.io")]
    pub email: String,
    /// Only honoured when the record is created. Defaults to Employee.
    pub role: Option<Role>,
    #[serde(default)]
    #[schema(example = "0012-4455-9981")]
    pub account_number: String,
    #[serde(default)]
    #[schema(example = 4200.0)]
    pub salary: f64,
    pub designation: Option<String>,
    pub photo: Option<String>,
}

impl UpsertStaff {
    fn into_parts(self) -> (String, Option<Role>, StaffProfile) {
        let profile = StaffProfile {
            name: self.name,
            email: self.email,
            account_number: self.account_number,
            salary: self.salary,
            designation: self.designation,
            photo: self.photo,
        };
        (self.uid, self.role, profile)
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpsertQuery {
    /// Overwrite the profile of an existing record
    pub update: Option<bool>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UidQuery {
    pub uid: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ChangeRole {
    pub uid: String,
    pub role: Role,
}

#[derive(Serialize, ToSchema)]
pub struct UpsertResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<u64>,
}

/// Save a staff profile on first login, or update it with `?update=true`
#[utoipa::path(
    put,
    path = "/staff",
    params(UpsertQuery),
    request_body = UpsertStaff,
    responses(
        (status = 200, description = "Created, updated, or already present", body = UpsertResponse),
        (status = 400, description = "uid missing"),
        (status = 401),
        (status = 403, description = "uid does not belong to the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(name = "staff_upsert", skip_all, fields(uid = %auth.uid))]
pub async fn upsert_staff(
    auth: AuthUser,
    store: web::Data<dyn Store>,
    query: web::Query<UpsertQuery>,
    body: web::Json<UpsertStaff>,
) -> Result<HttpResponse, ApiError> {
    let (uid, role, mut profile) = body.into_inner().into_parts();
    if profile.email.is_empty() {
        profile.email = auth.email.clone().unwrap_or_default();
    }

    if uid.trim().is_empty() {
        return Err(ApiError::bad_request("uid must not be empty"));
    }
    auth.require_self(&uid)?;

    if let Some(existing) = store.find_staff(&uid).await? {
        if !query.update.unwrap_or(false) {
            debug!(id = existing.id, "Staff already registered");
            return Ok(already_exists());
        }

        let modified = store.update_staff_profile(&uid, &profile).await?;
        info!(modified, "Staff profile updated");
        return Ok(HttpResponse::Ok().json(UpsertResponse {
            message: "user data updated".into(),
            id: None,
            modified: Some(modified),
        }));
    }

    let role = match role.unwrap_or_default() {
        r if r.is_assignable() => r,
        _ => {
            debug!("Self-assigned Admin role downgraded to Employee");
            Role::Employee
        }
    };

    let id = store.next_id(STAFFS).await?;
    let staff = Staff::from_profile(id, uid, role, profile);
    if !store.insert_staff(&staff).await? {
        debug!(id, "Staff registered concurrently");
        return Ok(already_exists());
    }

    info!(id, role = %role, "New staff saved");
    Ok(HttpResponse::Ok().json(UpsertResponse {
        message: "saved new user data".into(),
        id: Some(id),
        modified: None,
    }))
}

fn already_exists() -> HttpResponse {
    HttpResponse::Ok().json(UpsertResponse {
        message: "user already exist".into(),
        id: None,
        modified: None,
    })
}

/// Fetch the caller's own staff record
#[utoipa::path(
    get,
    path = "/staff",
    params(UidQuery),
    responses(
        (status = 200, body = Staff),
        (status = 401),
        (status = 403),
        (status = 404)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn get_staff(
    auth: AuthUser,
    store: web::Data<dyn Store>,
    query: web::Query<UidQuery>,
) -> Result<HttpResponse, ApiError> {
    auth.require_self(&query.uid)?;

    match store.find_staff(&query.uid).await? {
        Some(staff) => Ok(HttpResponse::Ok().json(staff)),
        None => Err(ApiError::not_found("staff not found")),
    }
}

/// List every Employee (HR only)
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, body = [EmployeeSummary]),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn list_employees(
    _hr: HrOnly,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, ApiError> {
    let employees = store.list_employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Toggle an Employee's verified flag (HR only)
#[utoipa::path(
    patch,
    path = "/staff/verify",
    params(UidQuery),
    responses(
        (status = 200, description = "New verification state", body = Object, example = json!({
            "uid": "kX9f2LmQ7aRt",
            "isVerified": true
        })),
        (status = 400, description = "Target is not an Employee"),
        (status = 403),
        (status = 404)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(name = "staff_verify", skip_all, fields(hr = %hr.user.uid, uid = %query.uid))]
pub async fn verify_employee(
    hr: HrOnly,
    store: web::Data<dyn Store>,
    query: web::Query<UidQuery>,
) -> Result<HttpResponse, ApiError> {
    let staff = store
        .find_staff(&query.uid)
        .await?
        .ok_or_else(|| ApiError::not_found("staff not found"))?;

    if staff.role != Role::Employee {
        return Err(ApiError::bad_request("only employees can be verified"));
    }

    let verified = !staff.is_verified;
    store.set_staff_verified(&staff.uid, verified).await?;

    info!(verified, "Verification changed");
    Ok(HttpResponse::Ok().json(json!({ "uid": staff.uid, "isVerified": verified })))
}

/// List verified staff and HR members (Admin only)
#[utoipa::path(
    get,
    path = "/allStaffs",
    responses(
        (status = 200, body = [Staff]),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn list_staffs(
    _admin: AdminOnly,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, ApiError> {
    let staffs = store.list_staff_directory().await?;
    Ok(HttpResponse::Ok().json(staffs))
}

/// Move a staff member between Employee and HR (Admin only)
#[utoipa::path(
    patch,
    path = "/staff/role",
    request_body = ChangeRole,
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Admin cannot be granted or changed"),
        (status = 403),
        (status = 404)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(name = "staff_change_role", skip_all, fields(admin = %admin.user.uid, uid = %body.uid))]
pub async fn change_role(
    admin: AdminOnly,
    store: web::Data<dyn Store>,
    body: web::Json<ChangeRole>,
) -> Result<HttpResponse, ApiError> {
    if !body.role.is_assignable() {
        return Err(ApiError::bad_request("Admin role cannot be assigned"));
    }
    if body.uid == admin.staff.uid {
        return Err(ApiError::bad_request("cannot change your own role"));
    }

    let target = store
        .find_staff(&body.uid)
        .await?
        .ok_or_else(|| ApiError::not_found("staff not found"))?;
    if target.role == Role::Admin {
        return Err(ApiError::bad_request("Admin role cannot be changed"));
    }

    if !store.set_staff_role(&target.uid, body.role).await? {
        return Err(ApiError::not_found("staff not found"));
    }

    info!(role = %body.role, "Role changed");
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!("role set to {}", body.role))))
}
