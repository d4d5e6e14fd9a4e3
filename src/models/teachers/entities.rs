use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    pub enum TeacherStatus("teacher.ts") {
        Active => "active",
        Inactive => "inactive",
        OnLeave => "on_leave",
    }
}

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub user_id: Option<i64>,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    // 任教科目
    pub subject_ids: Vec<i64>,
    pub qualification: Option<String>,
    pub status: TeacherStatus,
    pub hired_on: Option<NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
