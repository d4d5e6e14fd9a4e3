use serde::Serialize;
use ts_rs::TS;

use crate::models::attendance::responses::AttendanceSummary;
use crate::models::classes::entities::SchoolClass;
use crate::models::events::entities::SchoolEvent;
use crate::models::grades::responses::GradeView;
use crate::models::students::entities::Student;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct AdminDashboard {
    pub users: u64,
    pub students: u64,
    pub teachers: u64,
    pub classes: u64,
    pub subjects: u64,
    pub pending_suggestions: u64,
    pub upcoming_events: Vec<SchoolEvent>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct ClassOverview {
    pub class: SchoolClass,
    pub student_count: u64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct TeacherDashboard {
    pub teacher_id: Option<i64>,
    pub classes: Vec<ClassOverview>,
    pub pending_suggestions: u64,
    pub upcoming_events: Vec<SchoolEvent>,
    pub unread_messages: u64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct StudentDashboard {
    pub student: Option<Student>,
    pub points: i64,
    pub attendance: Option<AttendanceSummary>,
    pub recent_grades: Vec<GradeView>,
    pub upcoming_events: Vec<SchoolEvent>,
    pub unread_messages: u64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct ChildOverview {
    pub student: Student,
    pub points: i64,
    pub attendance_rate: Option<f64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct ParentDashboard {
    pub children: Vec<ChildOverview>,
    pub upcoming_events: Vec<SchoolEvent>,
    pub unread_messages: u64,
}

/// 按角色区分的首页数据
#[derive(Debug, Serialize, TS)]
#[serde(tag = "role", rename_all = "snake_case")]
#[ts(export, export_to = "dashboard.ts")]
pub enum DashboardResponse {
    Admin(AdminDashboard),
    Teacher(TeacherDashboard),
    Student(StudentDashboard),
    Parent(ParentDashboard),
}
