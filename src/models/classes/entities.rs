use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct SchoolClass {
    // 班级ID
    pub id: i64,
    // 班级名称，例如 "Grade 10 A"
    pub name: String,
    pub grade_level: String,
    pub section: Option<String>,
    // 学年，格式 YYYY/YYYY
    pub academic_year: String,
    // 任课教师（Teacher.id）
    pub teacher_ids: Vec<i64>,
    // 开设科目（Subject.id）
    pub subject_ids: Vec<i64>,
    pub room: Option<String>,
    pub capacity: Option<i32>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SchoolClass {
    pub fn has_teacher(&self, teacher_id: i64) -> bool {
        self.teacher_ids.contains(&teacher_id)
    }
}
