use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use super::entities::{Grade, LetterGrade, PASS_MARK};
use crate::models::common::PaginationInfo;

/// 带派生字段的成绩
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub grade: Grade,
    pub percentage: Option<f64>,
    pub letter: Option<LetterGrade>,
    pub passed: bool,
}

impl From<Grade> for GradeView {
    fn from(grade: Grade) -> Self {
        let percentage = grade.percentage();
        let letter = grade.letter();
        let passed = grade.passed();
        Self {
            grade,
            percentage,
            letter,
            passed,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeResponse {
    pub grade: GradeView,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<GradeView>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct SubjectAverage {
    pub subject_id: i64,
    pub subject_name: Option<String>,
    pub assessments: u32,
    pub average: f64,
    pub letter: LetterGrade,
    pub passed: bool,
}

/// 成绩单
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct ReportCard {
    pub student_id: i64,
    pub term: Option<i32>,
    pub academic_year: Option<String>,
    pub subjects: Vec<SubjectAverage>,
    pub overall_average: Option<f64>,
    pub overall_letter: Option<LetterGrade>,
    pub passed: bool,
}

impl ReportCard {
    /// 按科目汇总平均百分比；总平均为各科平均值的平均
    pub fn build(
        student_id: i64,
        term: Option<i32>,
        academic_year: Option<String>,
        grades: &[Grade],
        subject_names: &BTreeMap<i64, String>,
    ) -> Self {
        let mut per_subject: BTreeMap<i64, (f64, u32)> = BTreeMap::new();
        for (subject_id, pct) in grades
            .iter()
            .filter_map(|g| g.percentage().map(|p| (g.subject_id, p)))
        {
            let entry = per_subject.entry(subject_id).or_insert((0.0, 0));
            entry.0 += pct;
            entry.1 += 1;
        }

        let subjects: Vec<SubjectAverage> = per_subject
            .into_iter()
            .map(|(subject_id, (sum, count))| {
                let average = round2(sum / count as f64);
                SubjectAverage {
                    subject_id,
                    subject_name: subject_names.get(&subject_id).cloned(),
                    assessments: count,
                    average,
                    letter: LetterGrade::from_percentage(average),
                    passed: average >= PASS_MARK,
                }
            })
            .collect();

        let overall_average = if subjects.is_empty() {
            None
        } else {
            Some(round2(
                subjects.iter().map(|s| s.average).sum::<f64>() / subjects.len() as f64,
            ))
        };

        Self {
            student_id,
            term,
            academic_year,
            overall_letter: overall_average.map(LetterGrade::from_percentage),
            passed: overall_average.is_some_and(|avg| avg >= PASS_MARK),
            overall_average,
            subjects,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::AssessmentType;
    use chrono::{NaiveDate, Utc};

    fn grade(id: i64, subject_id: i64, score: f64, max_score: f64) -> Grade {
        Grade {
            id,
            student_id: 7,
            subject_id,
            class_id: None,
            teacher_id: None,
            assessment_type: AssessmentType::Quiz,
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
    fn test_report_card_averages() {
        let grades = vec![
            grade(1, 1, 90.0, 100.0),
            grade(2, 1, 80.0, 100.0),
            grade(3, 2, 30.0, 50.0),
            grade(4, 2, 5.0, 0.0),
        ];
        let mut names = BTreeMap::new();
        names.insert(1, "Mathematics".to_string());

        let card = ReportCard::build(7, Some(1), None, &grades, &names);
        assert_eq!(card.subjects.len(), 2);
        assert_eq!(card.subjects[0].average, 85.0);
        assert_eq!(card.subjects[0].letter, LetterGrade::B);
        assert_eq!(card.subjects[0].subject_name.as_deref(), Some("Mathematics"));
        assert_eq!(card.subjects[1].assessments, 1);
        assert_eq!(card.subjects[1].average, 60.0);
        assert!(!card.subjects[1].passed);
        assert_eq!(card.overall_average, Some(72.5));
        assert_eq!(card.overall_letter, Some(LetterGrade::C));
        assert!(card.passed);
    }

    #[test]
    fn test_empty_report_card() {
        let card = ReportCard::build(7, None, None, &[], &BTreeMap::new());
        assert!(card.subjects.is_empty());
        assert_eq!(card.overall_average, None);
        assert!(!card.passed);
    }

    #[test]
    fn test_grade_view_serializes_flat() {
        let view = GradeView::from(grade(1, 1, 45.0, 50.0));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["score"], 45.0);
        assert_eq!(json["percentage"], 90.0);
        assert_eq!(json["letter"], "A");
        assert_eq!(json["passed"], true);
    }
}
