use crate::{
    api::{payment, salary, staff, task},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
    error::{json_config, query_config},
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use anyhow::{Result, anyhow};

type Limiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter state, built once so every worker shares the same buckets.
#[derive(Clone)]
pub struct Limiters {
    token: Limiter,
    protected: Limiter,
}

impl Limiters {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            token: build_limiter(config.rate_token_per_min)?,
            protected: build_limiter(config.rate_protected_per_min)?,
        })
    }
}

fn build_limiter(requests_per_min: u32) -> Result<Limiter> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit: {requests_per_min}/min"))?;
    Ok(cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, limiters: &Limiters) {
    cfg.app_data(json_config()).app_data(query_config());

    // Public
    cfg.service(
        web::resource("/jwt")
            .wrap(Governor::new(&limiters.token))
            .route(web::post().to(handlers::issue_token)),
    );

    // Protected: bearer token required, roles checked per handler
    cfg.service(
        web::scope("")
            .wrap(from_fn(auth_middleware))
            .wrap(Governor::new(&limiters.protected))
            // /staff
            .service(
                web::resource("/staff")
                    .route(web::put().to(staff::upsert_staff))
                    .route(web::get().to(staff::get_staff)),
            )
            .service(web::resource("/staff/verify").route(web::patch().to(staff::verify_employee)))
            .service(web::resource("/staff/role").route(web::patch().to(staff::change_role)))
            .service(web::resource("/employees").route(web::get().to(staff::list_employees)))
            .service(web::resource("/allStaffs").route(web::get().to(staff::list_staffs)))
            // tasks
            .service(web::resource("/task").route(web::post().to(task::create_task)))
            .service(web::resource("/tasks").route(web::get().to(task::list_tasks)))
            .service(web::resource("/allTasks").route(web::get().to(task::list_all_tasks)))
            // salaries
            .service(web::resource("/salaries").route(web::post().to(salary::create_salary)))
            .service(
                web::resource("/salaries/isPayment")
                    .route(web::post().to(salary::payment_status)),
            )
            .service(
                web::resource("/paymentHistory").route(web::get().to(salary::payment_history)),
            )
            .service(
                web::resource("/create-payment-intent")
                    .route(web::post().to(payment::create_payment_intent)),
            ),
    );
}
