use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Role {
    Admin,
    #[serde(rename = "HR")]
    #[strum(serialize = "HR")]
    Hr,
    #[default]
    Employee,
}

impl Role {
    /// Roles a user may pick for themselves or be moved between through the API.
    pub fn is_assignable(self) -> bool {
        !matches!(self, Role::Admin)
    }
}
