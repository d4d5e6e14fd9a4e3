use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    pub enum PointCategory("points.ts") {
        Academic => "academic",
        Attendance => "attendance",
        Behavior => "behavior",
        Participation => "participation",
        Leadership => "leadership",
        Other => "other",
    }
}

string_enum! {
    // 积分规则的判定条件
    pub enum RuleCondition("points.ts") {
        AttendanceRate => "attendance_rate",
        PerfectAttendance => "perfect_attendance",
        AttendanceStreak => "attendance_streak",
        GradeAverage => "grade_average",
        HighScore => "high_score",
        GradeImprovement => "grade_improvement",
    }
}

string_enum! {
    pub enum SuggestionStatus("points.ts") {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

// 积分流水
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct PointTransaction {
    pub id: i64,
    pub student_id: i64,
    // 正数为奖励，负数为扣减
    pub points: i32,
    pub reason: String,
    pub category: PointCategory,
    pub awarded_by: Option<i64>,
    pub rule_id: Option<i64>,
    pub suggestion_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 积分规则
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct PointRule {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub condition: RuleCondition,
    pub threshold: f64,
    // 统计窗口（天），包含当天
    pub window_days: i32,
    pub points: i32,
    pub category: PointCategory,
    pub active: bool,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl PointRule {
    /// 是否参与匹配
    pub fn is_evaluable(&self) -> bool {
        self.active
            && self.points != 0
            && self.window_days > 0
            && self.threshold.is_finite()
            && self.threshold >= 0.0
    }
}

// 积分建议，审核通过后生成流水
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct PointSuggestion {
    pub id: i64,
    pub rule_id: i64,
    pub student_id: i64,
    pub points: i32,
    pub reason: String,
    pub status: SuggestionStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 排行榜条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub student_id: i64,
    pub student_name: String,
    pub class_id: Option<i64>,
    pub points: i64,
}
