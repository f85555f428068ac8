use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "uid": "kX9f2LmQ7aRt",
    "name": "Jane Doe",
    "email": "jane@worksync.io",
    "role": "Employee",
    "accountNumber": "0012-4455-9981",
    "salary": 4200.0,
    "designation": "Sales Assistant",
    "isVerified": false
}))]
pub struct Staff {
    pub id: i64,
    pub uid: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Fields a staff member may change on their own record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    pub name: String,
    pub email: String,
    pub account_number: String,
    pub salary: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Staff {
    pub fn from_profile(id: i64, uid: String, role: Role, profile: StaffProfile) -> Self {
        Self {
            id,
            uid,
            name: profile.name,
            email: profile.email,
            role,
            account_number: profile.account_number,
            salary: profile.salary,
            designation: profile.designation,
            photo: profile.photo,
            is_verified: false,
        }
    }
}

/// Employee row as shown to HR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: i64,
    pub uid: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl From<Staff> for EmployeeSummary {
    fn from(staff: Staff) -> Self {
        Self {
            id: staff.id,
            uid: staff.uid,
            name: staff.name,
            email: staff.email,
            account_number: staff.account_number,
            salary: staff.salary,
            designation: staff.designation,
            is_verified: staff.is_verified,
        }
    }
}
