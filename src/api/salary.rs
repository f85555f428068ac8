use crate::{
    auth::auth::{AuthUser, HrOnly},
    error::ApiError,
    model::salary::Salary,
    store::{SALARIES, Store},
};
use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalary {
    #[schema(example = "kX9f2LmQ7aRt")]
    pub uid: String,
    #[schema(example = 4200.0)]
    pub amount: f64,
    #[schema(example = 1)]
    pub month: u32,
    #[schema(example = 2026)]
    pub year: i32,
    /// Payment date; defaults to today (UTC).
    #[schema(example = "2026-02-01")]
    pub input_date: Option<NaiveDate>,
    #[schema(example = "pi_3Nk2sQ2eZvKYlo2C1")]
    pub transaction_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct PaymentCheck {
    pub uid: String,
    pub month: u32,
    pub year: i32,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatus {
    pub is_paid: bool,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    pub uid: String,
}

fn validate_period(month: u32) -> Result<(), ApiError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ApiError::bad_request("month must be between 1 and 12"))
    }
}

/// Record a salary payment (HR only)
#[utoipa::path(
    post,
    path = "/salaries",
    request_body = CreateSalary,
    responses(
        (status = 201, description = "Payment recorded", body = Salary),
        (status = 400, description = "Invalid amount or month"),
        (status = 403),
        (status = 409, description = "Already paid for this period")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
#[instrument(name = "salary_create", skip_all, fields(hr = %hr.user.uid, uid = %body.uid))]
pub async fn create_salary(
    hr: HrOnly,
    store: web::Data<dyn Store>,
    body: web::Json<CreateSalary>,
) -> Result<HttpResponse, ApiError> {
    let payload = body.into_inner();

    if !payload.amount.is_finite() || payload.amount <= 0.0 {
        return Err(ApiError::bad_request("amount must be a positive number"));
    }
    validate_period(payload.month)?;

    if store
        .salary_exists(&payload.uid, payload.month, payload.year)
        .await?
    {
        return Err(already_paid(payload.month, payload.year));
    }

    let salary = Salary {
        id: store.next_id(SALARIES).await?,
        uid: payload.uid,
        amount: payload.amount,
        month: payload.month,
        year: payload.year,
        input_date: payload
            .input_date
            .unwrap_or_else(|| Utc::now().date_naive()),
        transaction_id: payload.transaction_id,
    };
    // the unique period index catches a payment recorded after the check above
    if !store.insert_salary(&salary).await? {
        return Err(already_paid(salary.month, salary.year));
    }

    info!(id = salary.id, amount = salary.amount, "Salary recorded");
    Ok(HttpResponse::Created().json(salary))
}

fn already_paid(month: u32, year: i32) -> ApiError {
    ApiError::Conflict(format!("salary for {month:02}/{year} is already paid"))
}

/// Whether a salary was already paid for a period (HR only)
#[utoipa::path(
    post,
    path = "/salaries/isPayment",
    request_body = PaymentCheck,
    responses(
        (status = 200, body = PaymentStatus),
        (status = 400),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn payment_status(
    _hr: HrOnly,
    store: web::Data<dyn Store>,
    body: web::Json<PaymentCheck>,
) -> Result<HttpResponse, ApiError> {
    validate_period(body.month)?;

    let is_paid = store
        .salary_exists(&body.uid, body.month, body.year)
        .await?;
    Ok(HttpResponse::Ok().json(PaymentStatus { is_paid }))
}

/// The caller's own payments, oldest first
#[utoipa::path(
    get,
    path = "/paymentHistory",
    params(HistoryQuery),
    responses(
        (status = 200, body = [Salary]),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn payment_history(
    auth: AuthUser,
    store: web::Data<dyn Store>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, ApiError> {
    auth.require_self(&query.uid)?;

    let history = store.salaries_by_owner(&query.uid).await?;
    Ok(HttpResponse::Ok().json(history))
}
