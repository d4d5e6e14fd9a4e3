use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AssessmentType;
use crate::models::common::{PaginationQuery, deserialize_optional_parsed};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub term: Option<i32>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    // 未提供时取学生当前班级
    pub class_id: Option<i64>,
    pub assessment_type: AssessmentType,
    pub term: i32,
    pub academic_year: String,
    pub score: f64,
    pub max_score: f64,
    pub comment: Option<String>,
    pub assessed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct UpdateGradeRequest {
    pub assessment_type: Option<AssessmentType>,
    pub term: Option<i32>,
    pub academic_year: Option<String>,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    pub comment: Option<String>,
    pub assessed_on: Option<NaiveDate>,
}

// 成绩单查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct ReportCardParams {
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub term: Option<i32>,
    pub academic_year: Option<String>,
}

// 成绩列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    // 可见范围：限定学生集合
    pub student_ids: Option<Vec<i64>>,
    // 可见范围：限定班级集合
    pub class_ids: Option<Vec<i64>>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub term: Option<i32>,
    pub academic_year: Option<String>,
}

// 写入存储层的成绩
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub student_id: i64,
    pub subject_id: i64,
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub assessment_type: AssessmentType,
    pub term: i32,
    pub academic_year: String,
    pub score: f64,
    pub max_score: f64,
    pub comment: Option<String>,
    pub assessed_on: NaiveDate,
}
