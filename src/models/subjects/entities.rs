use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct Subject {
    pub id: i64,
    // 科目代码，统一大写
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Subject {
    pub fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(Subject::normalize_code(" math101 "), "MATH101");
        assert_eq!(Subject::normalize_code("Eng"), "ENG");
    }
}
