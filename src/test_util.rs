use async_trait::async_trait;
use std::sync::Mutex;

use crate::{
    auth::jwt::generate_access_token,
    config::Config,
    error::{ApiError, Result},
    model::{
        role::Role,
        staff::{Staff, StaffProfile},
    },
    payment::{PaymentGateway, PaymentIntent},
    store::{STAFFS, Store, memory::MemoryStore},
};

pub const SECRET: &str = "worksync-test-secret";

pub fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:8080".into(),
        database_url: "mongodb://localhost:27017".into(),
        database_name: "WorkSyncTest".into(),
        jwt_secret: SECRET.into(),
        access_token_ttl: 3600,
        payment_secret_key: "sk_test".into(),
        payment_api_base: "http://localhost".into(),
        payment_currency: "usd".into(),
        rate_token_per_min: 10_000,
        rate_protected_per_min: 10_000,
    }
}

pub fn bearer(uid: &str) -> (&'static str, String) {
    let token = generate_access_token(uid.into(), None, SECRET, 3600).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

pub async fn seed_staff(store: &MemoryStore, uid: &str, role: Role) -> Staff {
    let id = store.next_id(STAFFS).await.unwrap();
    let profile = StaffProfile {
        name: format!("{uid} name"),
        email: format!("{uid}@worksync.io"),
        account_number: format!("ACC-{id:04}"),
        salary: 3000.0,
        designation: None,
        photo: None,
    };
    let staff = Staff::from_profile(id, uid.into(), role, profile);
    store.insert_staff(&staff).await.unwrap();
    staff
}

/// Records requested amounts; `fail` makes every call return a processor error.
#[derive(Default)]
pub struct StubGateway {
    pub fail: bool,
    pub requests: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent> {
        if self.fail {
            return Err(ApiError::Payment("card_declined".into()));
        }
        self.requests
            .lock()
            .unwrap()
            .push((amount, currency.to_string()));
        Ok(PaymentIntent {
            id: "pi_test".into(),
            client_secret: format!("pi_test_secret_{amount}"),
        })
    }
}

/// Full route table over the given in-memory store and payment stub.
macro_rules! init_app {
    ($store:expr, $gateway:expr) => {{
        let config = $crate::test_util::test_config();
        let limiters = $crate::routes::Limiters::from_config(&config).unwrap();
        let store: std::sync::Arc<dyn $crate::store::Store> = $store.clone();
        let gateway: std::sync::Arc<dyn $crate::payment::PaymentGateway> = $gateway.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(config.clone()))
                .app_data(actix_web::web::Data::from(store))
                .app_data(actix_web::web::Data::from(gateway))
                .configure(|cfg| $crate::routes::configure(cfg, &limiters)),
        )
        .await
    }};
    ($store:expr) => {{
        let gateway = std::sync::Arc::new($crate::test_util::StubGateway::default());
        $crate::test_util::init_app!($store, gateway)
    }};
}

pub(crate) use init_app;

/// Test request with a peer address, which the rate limiter keys on.
pub fn request(method: actix_web::http::Method, uri: &str) -> actix_web::test::TestRequest {
    actix_web::test::TestRequest::default()
        .method(method)
        .uri(uri)
        .peer_addr("127.0.0.1:40000".parse().unwrap())
}
