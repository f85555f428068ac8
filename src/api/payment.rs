use crate::{
    auth::auth::HrOnly,
    config::Config,
    error::ApiError,
    payment::{PaymentGateway, to_minor_units},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct PaymentIntentReq {
    /// Decimal amount in major currency units
    #[schema(example = 4200.5)]
    pub salary: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Start a card payment for a salary (HR only)
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    request_body = PaymentIntentReq,
    responses(
        (status = 200, body = PaymentIntentResponse),
        (status = 400, description = "Amount is not positive"),
        (status = 403),
        (status = 502, description = "Payment processor failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Payment"
)]
#[instrument(name = "payment_intent", skip_all, fields(hr = %hr.user.uid))]
pub async fn create_payment_intent(
    hr: HrOnly,
    gateway: web::Data<dyn PaymentGateway>,
    config: web::Data<Config>,
    body: web::Json<PaymentIntentReq>,
) -> Result<HttpResponse, ApiError> {
    let amount = to_minor_units(body.salary)
        .ok_or_else(|| ApiError::bad_request("salary must be a positive amount"))?;

    let intent = gateway
        .create_payment_intent(amount, &config.payment_currency)
        .await?;

    info!(intent = %intent.id, amount, "Payment intent created");
    Ok(HttpResponse::Ok().json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

#[cfg(test)]
mod tests {
    use crate::model::role::Role;
    use crate::store::memory::MemoryStore;
    use crate::test_util::{StubGateway, bearer, init_app, request, seed_staff};
    use actix_web::{http::Method, http::StatusCode, test};
    use serde_json::json;
    use std::sync::Arc;

    #[actix_web::test]
    async fn forwards_cents_and_returns_client_secret() {
        let store = Arc::new(MemoryStore::default());
        seed_staff(&store, "hr", Role::Hr).await;
        let gateway = Arc::new(StubGateway::default());
        let app = init_app!(store, gateway);

        let req = request(Method::POST, "/create-payment-intent")
            .insert_header(bearer("hr"))
            .set_json(json!({ "salary": 4200.5 }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["clientSecret"], "pi_test_secret_420050");

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(*requests, vec![(420_050_i64, "usd".to_string())]);
    }

    #[actix_web::test]
    async fn non_positive_salary_gets_a_response() {
        let store = Arc::new(MemoryStore::default());
        seed_staff(&store, "hr", Role::Hr).await;
        let gateway = Arc::new(StubGateway::default());
        let app = init_app!(store, gateway);

        for salary in [0.0, -10.0] {
            let req = request(Method::POST, "/create-payment-intent")
                .insert_header(bearer("hr"))
                .set_json(json!({ "salary": salary }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn processor_failure_is_bad_gateway() {
        let store = Arc::new(MemoryStore::default());
        seed_staff(&store, "hr", Role::Hr).await;
        let gateway = Arc::new(StubGateway {
            fail: true,
            ..Default::default()
        });
        let app = init_app!(store, gateway);

        let req = request(Method::POST, "/create-payment-intent")
            .insert_header(bearer("hr"))
            .set_json(json!({ "salary": 100.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn employees_cannot_create_intents() {
        let store = Arc::new(MemoryStore::default());
        seed_staff(&store, "u1", Role::Employee).await;
        let app = init_app!(store);

        let req = request(Method::POST, "/create-payment-intent")
            .insert_header(bearer("u1"))
            .set_json(json!({ "salary": 100.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
