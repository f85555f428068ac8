use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{COUNTERS, SALARIES, STAFFS, Store, TASKS};
use crate::error::{ApiError, Result, is_duplicate_key_error};
use crate::model::{
    role::Role,
    salary::Salary,
    staff::{EmployeeSummary, Staff, StaffProfile},
    task::Task,
};

#[derive(Debug, Serialize, Deserialize)]
struct Counter {
    #[serde(rename = "_id")]
    id: String,
    seq: i64,
}

pub struct MongoStore {
    staffs: Collection<Staff>,
    tasks: Collection<Task>,
    salaries: Collection<Salary>,
    counters: Collection<Counter>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            staffs: db.collection(STAFFS),
            tasks: db.collection(TASKS),
            salaries: db.collection(SALARIES),
            counters: db.collection(COUNTERS),
        }
    }

    /// Creates the indexes the queries rely on. Safe to run on every start.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let unique_uid = IndexModel::builder()
            .keys(doc! { "uid": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.staffs.create_index(unique_uid).await?;

        self.tasks
            .create_index(IndexModel::builder().keys(doc! { "uid": 1, "id": -1 }).build())
            .await?;

        let unique_period = IndexModel::builder()
            .keys(doc! { "uid": 1, "year": 1, "month": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.salaries.create_index(unique_period).await?;

        info!("Indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn next_id(&self, collection: &str) -> Result<i64> {
        let counter = self
            .counters
            .find_one_and_update(doc! { "_id": collection }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| ApiError::Internal(format!("counter {collection} not returned")))?;

        debug!(collection, seq = counter.seq, "Allocated sequence id");
        Ok(counter.seq)
    }

    async fn find_staff(&self, uid: &str) -> Result<Option<Staff>> {
        Ok(self.staffs.find_one(doc! { "uid": uid }).await?)
    }

    async fn insert_staff(&self, staff: &Staff) -> Result<bool> {
        match self.staffs.insert_one(staff).await {
            Ok(_) => Ok(true),
            Err(e) if is_duplicate_key_error(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_staff_profile(&self, uid: &str, profile: &StaffProfile) -> Result<u64> {
        let fields = bson::to_document(profile)?;
        let mut unset = Document::new();
        for optional in ["designation", "photo"] {
            if !fields.contains_key(optional) {
                unset.insert(optional, "");
            }
        }

        let mut update = doc! { "$set": fields };
        if !unset.is_empty() {
            update.insert("$unset", unset);
        }

        let result = self.staffs.update_one(doc! { "uid": uid }, update).await?;
        Ok(result.modified_count)
    }

    async fn set_staff_verified(&self, uid: &str, verified: bool) -> Result<bool> {
        let result = self
            .staffs
            .update_one(doc! { "uid": uid }, doc! { "$set": { "isVerified": verified } })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn set_staff_role(&self, uid: &str, role: Role) -> Result<bool> {
        let result = self
            .staffs
            .update_one(
                doc! { "uid": uid },
                doc! { "$set": { "role": role.to_string() } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn list_employees(&self) -> Result<Vec<EmployeeSummary>> {
        let cursor = self
            .staffs
            .clone_with_type::<EmployeeSummary>()
            .find(doc! { "role": Role::Employee.to_string() })
            .projection(doc! {
                "_id": 0,
                "id": 1,
                "uid": 1,
                "name": 1,
                "email": 1,
                "accountNumber": 1,
                "salary": 1,
                "designation": 1,
                "isVerified": 1,
            })
            .sort(doc! { "id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_staff_directory(&self) -> Result<Vec<Staff>> {
        let cursor = self
            .staffs
            .find(doc! {
                "$or": [
                    { "isVerified": true },
                    { "role": Role::Hr.to_string() },
                ]
            })
            .sort(doc! { "id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_task(&self, task: &Task) -> Result<()> {
        self.tasks.insert_one(task).await?;
        Ok(())
    }

    async fn tasks_by_owner(&self, uid: &str) -> Result<Vec<Task>> {
        let cursor = self
            .tasks
            .find(doc! { "uid": uid })
            .sort(doc! { "id": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn all_tasks(&self) -> Result<Vec<Task>> {
        let cursor = self.tasks.find(doc! {}).sort(doc! { "id": -1 }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_salary(&self, salary: &Salary) -> Result<bool> {
        match self.salaries.insert_one(salary).await {
            Ok(_) => Ok(true),
            Err(e) if is_duplicate_key_error(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn salary_exists(&self, uid: &str, month: u32, year: i32) -> Result<bool> {
        let found = self
            .salaries
            .find_one(doc! { "uid": uid, "month": month as i64, "year": year })
            .await?;
        Ok(found.is_some())
    }

    async fn salaries_by_owner(&self, uid: &str) -> Result<Vec<Salary>> {
        // inputDate is stored as YYYY-MM-DD, so lexical order is date order
        let cursor = self
            .salaries
            .find(doc! { "uid": uid })
            .sort(doc! { "inputDate": 1, "id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
