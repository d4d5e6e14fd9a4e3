use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

string_enum! {
    pub enum ResourceCategory("resource.ts") {
        LessonPlan => "lesson_plan",
        Worksheet => "worksheet",
        Syllabus => "syllabus",
        Policy => "policy",
        Form => "form",
        Other => "other",
    }
}

string_enum! {
    pub enum ResourceVisibility("resource.ts") {
        All => "all",
        Staff => "staff",
        Students => "students",
        Parents => "parents",
    }
}

impl ResourceVisibility {
    /// 某角色可见的可见性集合
    pub fn visible_for(role: &UserRole) -> &'static [ResourceVisibility] {
        match role {
            UserRole::Admin | UserRole::Teacher => ResourceVisibility::ALL,
            UserRole::Student => &[ResourceVisibility::All, ResourceVisibility::Students],
            UserRole::Parent => &[ResourceVisibility::All, ResourceVisibility::Parents],
        }
    }
}

// 教学资料（仅保存链接）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "resource.ts")]
pub struct DocumentResource {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: ResourceCategory,
    pub url: String,
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub visibility: ResourceVisibility,
    pub uploaded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl DocumentResource {
    pub fn is_visible_to(&self, role: &UserRole) -> bool {
        ResourceVisibility::visible_for(role).contains(&self.visibility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_rules() {
        assert_eq!(ResourceVisibility::visible_for(&UserRole::Admin).len(), 4);
        assert_eq!(ResourceVisibility::visible_for(&UserRole::Teacher).len(), 4);

        let student = ResourceVisibility::visible_for(&UserRole::Student);
        assert!(student.contains(&ResourceVisibility::All));
        assert!(student.contains(&ResourceVisibility::Students));
        assert!(!student.contains(&ResourceVisibility::Staff));
        assert!(!student.contains(&ResourceVisibility::Parents));

        let parent = ResourceVisibility::visible_for(&UserRole::Parent);
        assert!(parent.contains(&ResourceVisibility::Parents));
        assert!(!parent.contains(&ResourceVisibility::Students));
    }
}
