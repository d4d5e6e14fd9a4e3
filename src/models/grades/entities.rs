use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 及格线（百分制）
pub const PASS_MARK: f64 = 70.0;

string_enum! {
    pub enum AssessmentType("grade.ts") {
        Quiz => "quiz",
        Test => "test",
        Exam => "exam",
        Assignment => "assignment",
        Project => "project",
        Participation => "participation",
    }
}

string_enum! {
    pub enum LetterGrade("grade.ts") {
        A => "A",
        B => "B",
        C => "C",
        D => "D",
        F => "F",
    }
}

impl LetterGrade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            LetterGrade::A
        } else if percentage >= 80.0 {
            LetterGrade::B
        } else if percentage >= 70.0 {
            LetterGrade::C
        } else if percentage >= 60.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_id: Option<i64>,
    // 录入成绩的教师（Teacher.id）
    pub teacher_id: Option<i64>,
    pub assessment_type: AssessmentType,
    // 学期 1..=3
    pub term: i32,
    pub academic_year: String,
    pub score: f64,
    pub max_score: f64,
    pub comment: Option<String>,
    pub assessed_on: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Grade {
    /// 百分比成绩；满分非正时无意义，返回 None
    pub fn percentage(&self) -> Option<f64> {
        percentage(self.score, self.max_score)
    }

    pub fn letter(&self) -> Option<LetterGrade> {
        self.percentage().map(LetterGrade::from_percentage)
    }

    pub fn passed(&self) -> bool {
        self.percentage().is_some_and(|p| p >= PASS_MARK)
    }
}

pub fn percentage(score: f64, max_score: f64) -> Option<f64> {
    if max_score > 0.0 && max_score.is_finite() && score.is_finite() {
        Some(score / max_score * 100.0)
    } else {
        None
    }
}

/// 分数校验：`max_score > 0` 且 `0 <= score <= max_score`
pub fn validate_score(score: f64, max_score: f64) -> Result<(), String> {
    if !score.is_finite() || !max_score.is_finite() {
        return Err("Score and max score must be finite numbers".to_string());
    }
    if max_score <= 0.0 {
        return Err("Max score must be greater than 0".to_string());
    }
    if score < 0.0 || score > max_score {
        return Err(format!("Score must be between 0 and {max_score}"));
    }
    Ok(())
}

pub fn validate_term(term: i32) -> Result<(), String> {
    if (1..=3).contains(&term) {
        Ok(())
    } else {
        Err("Term must be 1, 2 or 3".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn grade(score: f64, max_score: f64) -> Grade {
        Grade {
            id: 1,
            student_id: 1,
            subject_id: 1,
            class_id: None,
            teacher_id: None,
            assessment_type: AssessmentType::Test,
            term: 1,
            academic_year: "2024/2025".to_string(),
            score,
            max_score,
            comment: None,
            assessed_on: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_letter_boundaries() {
        assert_eq!(LetterGrade::from_percentage(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(89.99), LetterGrade::B);
        assert_eq!(LetterGrade::from_percentage(80.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_percentage(70.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_percentage(60.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_percentage(59.9), LetterGrade::F);
    }

    #[test]
    fn test_percentage_and_pass_mark() {
        let g = grade(35.0, 50.0);
        assert_eq!(g.percentage(), Some(70.0));
        assert!(g.passed());
        assert_eq!(g.letter(), Some(LetterGrade::C));

        let g = grade(34.0, 50.0);
        assert!(!g.passed());

        let g = grade(10.0, 0.0);
        assert_eq!(g.percentage(), None);
        assert!(!g.passed());
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(0.0, 100.0).is_ok());
        assert!(validate_score(100.0, 100.0).is_ok());
        assert!(validate_score(-1.0, 100.0).is_err());
        assert!(validate_score(101.0, 100.0).is_err());
        assert!(validate_score(5.0, 0.0).is_err());
        assert!(validate_score(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_validate_term() {
        assert!(validate_term(1).is_ok());
        assert!(validate_term(3).is_ok());
        assert!(validate_term(0).is_err());
        assert!(validate_term(4).is_err());
    }
}
