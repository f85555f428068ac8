use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub uid: String,
    pub task: String,
    pub hours: f64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskTotals {
    pub total: u64,
    pub total_hours: f64,
}

impl TaskTotals {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len() as u64,
            total_hours: tasks.iter().map(|t| t.hours).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_follow_the_given_tasks() {
        assert_eq!(TaskTotals::from_tasks(&[]), TaskTotals::default());

        let task = |id, hours| Task {
            id,
            uid: "u1".into(),
            task: "Support".into(),
            hours,
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            created_at: Utc::now(),
        };
        let totals = TaskTotals::from_tasks(&[task(1, 2.5), task(2, 4.0)]);
        assert_eq!(totals.total, 2);
        assert_eq!(totals.total_hours, 6.5);
    }
}
