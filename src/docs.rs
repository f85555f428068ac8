use crate::api::payment::{PaymentIntentReq, PaymentIntentResponse};
use crate::api::salary::{CreateSalary, PaymentCheck, PaymentStatus};
use crate::api::staff::{ChangeRole, UpsertResponse, UpsertStaff};
use crate::api::task::{AllTasksResponse, CreateTask};
use crate::model::role::Role;
use crate::model::salary::Salary;
use crate::model::staff::{EmployeeSummary, Staff};
use crate::model::task::{Task, TaskTotals};
use crate::models::{MessageResponse, TokenReq, TokenResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WorkSync API",
        version = "1.0.0",
        description = r#"
## WorkSync workforce management

Staff registration, work-hour logging, and salary payments.

### Roles
- **Employee**: logs tasks, reads own profile and payment history
- **HR**: reviews employees and tasks, records and pays salaries
- **Admin**: manages the staff directory and HR promotions

### Security
Call `POST /jwt` after signing in and send the returned token as
`Authorization: Bearer <token>` on every other endpoint.
"#,
    ),
    paths(
        crate::auth::handlers::issue_token,

        crate::api::staff::upsert_staff,
        crate::api::staff::get_staff,
        crate::api::staff::list_employees,
        crate::api::staff::verify_employee,
        crate::api::staff::list_staffs,
        crate::api::staff::change_role,

        crate::api::task::create_task,
        crate::api::task::list_tasks,
        crate::api::task::list_all_tasks,

        crate::api::salary::create_salary,
        crate::api::salary::payment_status,
        crate::api::salary::payment_history,

        crate::api::payment::create_payment_intent
    ),
    components(
        schemas(
            TokenReq,
            TokenResponse,
            MessageResponse,
            Role,
            Staff,
            EmployeeSummary,
            UpsertStaff,
            UpsertResponse,
            ChangeRole,
            Task,
            TaskTotals,
            CreateTask,
            AllTasksResponse,
            Salary,
            CreateSalary,
            PaymentCheck,
            PaymentStatus,
            PaymentIntentReq,
            PaymentIntentResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Token issuing"),
        (name = "Staff", description = "Staff profiles and roles"),
        (name = "Task", description = "Work-hour logging"),
        (name = "Salary", description = "Salary records and history"),
        (name = "Payment", description = "Payment processor bridge"),
    )
)]
pub struct ApiDoc;
