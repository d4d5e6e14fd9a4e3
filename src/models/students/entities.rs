use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    pub enum Gender("student.ts") {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

string_enum! {
    // 学籍状态
    pub enum StudentStatus("student.ts") {
        Active => "active",
        Inactive => "inactive",
        Graduated => "graduated",
        Transferred => "transferred",
    }
}

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    // 学生本人登录账号
    pub user_id: Option<i64>,
    // 家长登录账号
    pub parent_user_id: Option<i64>,
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub class_id: Option<i64>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub address: Option<String>,
    pub status: StudentStatus,
    // 当前积分余额
    pub points: i64,
    pub enrolled_on: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// 用户是否为该学生本人或其家长
    pub fn is_linked_to(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id) || self.parent_user_id == Some(user_id)
    }
}
