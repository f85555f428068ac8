use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One salary payment. `(uid, month, year)` identifies the pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: i64,
    pub uid: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
    /// Date the payment was made.
    pub input_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}
