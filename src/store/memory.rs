use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::Store;
use crate::error::Result;
use crate::model::{
    role::Role,
    salary::Salary,
    staff::{EmployeeSummary, Staff, StaffProfile},
    task::Task,
};

/// In-process store used by handler tests. Inserts enforce the same unique
/// keys as the Mongo indexes.
#[derive(Default)]
pub struct MemoryStore {
    counters: Mutex<HashMap<String, i64>>,
    staffs: Mutex<Vec<Staff>>,
    tasks: Mutex<Vec<Task>>,
    salaries: Mutex<Vec<Salary>>,
    stale_staff_lookups: AtomicBool,
    stale_salary_lookups: AtomicBool,
}

impl MemoryStore {
    /// `find_staff` reports nothing found, as if another request registered
    /// the uid between the handler's lookup and its insert.
    pub fn serve_stale_staff_lookups(&self) {
        self.stale_staff_lookups.store(true, Ordering::SeqCst);
    }

    /// `salary_exists` reports false, as if another payment for the period
    /// landed between the handler's check and its insert.
    pub fn serve_stale_salary_lookups(&self) {
        self.stale_salary_lookups.store(true, Ordering::SeqCst);
    }

    pub fn staff_count(&self) -> usize {
        self.staffs.lock().unwrap().len()
    }

    pub fn salaries(&self) -> Vec<Salary> {
        self.salaries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn next_id(&self, collection: &str) -> Result<i64> {
        let mut counters = self.counters.lock().unwrap();
        let seq = counters.entry(collection.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }

    async fn find_staff(&self, uid: &str) -> Result<Option<Staff>> {
        if self.stale_staff_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let staffs = self.staffs.lock().unwrap();
        Ok(staffs.iter().find(|s| s.uid == uid).cloned())
    }

    async fn insert_staff(&self, staff: &Staff) -> Result<bool> {
        let mut staffs = self.staffs.lock().unwrap();
        if staffs.iter().any(|s| s.uid == staff.uid) {
            return Ok(false);
        }
        staffs.push(staff.clone());
        Ok(true)
    }

    async fn update_staff_profile(&self, uid: &str, profile: &StaffProfile) -> Result<u64> {
        let mut staffs = self.staffs.lock().unwrap();
        match staffs.iter_mut().find(|s| s.uid == uid) {
            Some(staff) => {
                let before = staff.clone();
                let profile = profile.clone();
                staff.name = profile.name;
                staff.email = profile.email;
                staff.account_number = profile.account_number;
                staff.salary = profile.salary;
                staff.designation = profile.designation;
                staff.photo = profile.photo;
                Ok(u64::from(*staff != before))
            }
            None => Ok(0),
        }
    }

    async fn set_staff_verified(&self, uid: &str, verified: bool) -> Result<bool> {
        let mut staffs = self.staffs.lock().unwrap();
        Ok(staffs
            .iter_mut()
            .find(|s| s.uid == uid)
            .map(|s| s.is_verified = verified)
            .is_some())
    }

    async fn set_staff_role(&self, uid: &str, role: Role) -> Result<bool> {
        let mut staffs = self.staffs.lock().unwrap();
        Ok(staffs
            .iter_mut()
            .find(|s| s.uid == uid)
            .map(|s| s.role = role)
            .is_some())
    }

    async fn list_employees(&self) -> Result<Vec<EmployeeSummary>> {
        let mut employees: Vec<EmployeeSummary> = self
            .staffs
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.role == Role::Employee)
            .cloned()
            .map(EmployeeSummary::from)
            .collect();
        employees.sort_by_key(|e| e.id);
        Ok(employees)
    }

    async fn list_staff_directory(&self) -> Result<Vec<Staff>> {
        let mut staffs: Vec<Staff> = self
            .staffs
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_verified || s.role == Role::Hr)
            .cloned()
            .collect();
        staffs.sort_by_key(|s| s.id);
        Ok(staffs)
    }

    async fn insert_task(&self, task: &Task) -> Result<()> {
        self.tasks.lock().unwrap().push(task.clone());
        Ok(())
    }

    async fn tasks_by_owner(&self, uid: &str) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.uid == uid)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| std::cmp::Reverse(t.id));
        Ok(tasks)
    }

    async fn all_tasks(&self) -> Result<Vec<Task>> {
        let mut tasks = self.tasks.lock().unwrap().clone();
        tasks.sort_by_key(|t| std::cmp::Reverse(t.id));
        Ok(tasks)
    }

    async fn insert_salary(&self, salary: &Salary) -> Result<bool> {
        let mut salaries = self.salaries.lock().unwrap();
        let period_taken = salaries
            .iter()
            .any(|s| s.uid == salary.uid && s.month == salary.month && s.year == salary.year);
        if period_taken {
            return Ok(false);
        }
        salaries.push(salary.clone());
        Ok(true)
    }

    async fn salary_exists(&self, uid: &str, month: u32, year: i32) -> Result<bool> {
        if self.stale_salary_lookups.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let salaries = self.salaries.lock().unwrap();
        Ok(salaries
            .iter()
            .any(|s| s.uid == uid && s.month == month && s.year == year))
    }

    async fn salaries_by_owner(&self, uid: &str) -> Result<Vec<Salary>> {
        let mut salaries: Vec<Salary> = self
            .salaries
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.uid == uid)
            .cloned()
            .collect();
        salaries.sort_by_key(|s| (s.input_date, s.id));
        Ok(salaries)
    }
}
