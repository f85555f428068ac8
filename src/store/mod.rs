//! Persistence seam between handlers and the document database.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    role::Role,
    salary::Salary,
    staff::{EmployeeSummary, Staff, StaffProfile},
    task::Task,
};

pub mod mongo;

#[cfg(test)]
pub mod memory;

pub const STAFFS: &str = "staffs";
pub const TASKS: &str = "tasks";
pub const SALARIES: &str = "salaries";
pub const COUNTERS: &str = "counters";

#[async_trait]
pub trait Store: Send + Sync {
    /// Next value of the per-collection sequence. Values start at 1 and are never reused.
    async fn next_id(&self, collection: &str) -> Result<i64>;

    async fn find_staff(&self, uid: &str) -> Result<Option<Staff>>;
    /// Returns false when a record with the same uid already exists.
    async fn insert_staff(&self, staff: &Staff) -> Result<bool>;
    /// Returns the number of modified documents (0 when nothing changed).
    async fn update_staff_profile(&self, uid: &str, profile: &StaffProfile) -> Result<u64>;
    /// Returns false when no record matched.
    async fn set_staff_verified(&self, uid: &str, verified: bool) -> Result<bool>;
    async fn set_staff_role(&self, uid: &str, role: Role) -> Result<bool>;
    /// Employees only, ordered by id.
    async fn list_employees(&self) -> Result<Vec<EmployeeSummary>>;
    /// Verified staff plus every HR record, ordered by id.
    async fn list_staff_directory(&self) -> Result<Vec<Staff>>;

    async fn insert_task(&self, task: &Task) -> Result<()>;
    /// Newest first.
    async fn tasks_by_owner(&self, uid: &str) -> Result<Vec<Task>>;
    /// Newest first.
    async fn all_tasks(&self) -> Result<Vec<Task>>;

    /// Returns false when the period `(uid, month, year)` is already recorded.
    async fn insert_salary(&self, salary: &Salary) -> Result<bool>;
    async fn salary_exists(&self, uid: &str, month: u32, year: i32) -> Result<bool>;
    /// Ordered by payment date, oldest first.
    async fn salaries_by_owner(&self, uid: &str) -> Result<Vec<Salary>>;
}
