//! 成绩存储操作

use super::{SeaOrmStorage, fetch_page, write_error};
use crate::entity::format_date;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{Result, SchoolHubError};
use crate::models::grades::{
    entities::Grade,
    requests::{GradeListQuery, NewGrade, UpdateGradeRequest},
    responses::{GradeListResponse, GradeView},
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 录入成绩（分数合法性由服务层校验）
    pub async fn create_grade_impl(&self, grade: NewGrade) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(grade.student_id),
            subject_id: Set(grade.subject_id),
            class_id: Set(grade.class_id),
            teacher_id: Set(grade.teacher_id),
            assessment_type: Set(grade.assessment_type.to_string()),
            term: Set(grade.term),
            academic_year: Set(grade.academic_year),
            score: Set(grade.score),
            max_score: Set(grade.max_score),
            comment: Set(grade.comment),
            assessed_on: Set(format_date(grade.assessed_on)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("录入成绩", e))?;

        Ok(result.into_grade())
    }

    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 分页列出成绩
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let mut select = Grades::find();

        if let Some(student_ids) = query.student_ids {
            select = select.filter(Column::StudentId.is_in(student_ids));
        }
        if let Some(class_ids) = query.class_ids {
            select = select.filter(Column::ClassId.is_in(class_ids));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(term) = query.term {
            select = select.filter(Column::Term.eq(term));
        }
        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year.as_str()));
        }

        select = select
            .order_by_desc(Column::AssessedOn)
            .order_by_desc(Column::Id);

        let (grades, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "成绩").await?;

        Ok(GradeListResponse {
            items: grades
                .into_iter()
                .map(|m| GradeView::from(m.into_grade()))
                .collect(),
            pagination,
        })
    }

    /// 学生成绩（成绩单用）
    pub async fn list_student_grades_impl(
        &self,
        student_id: i64,
        term: Option<i32>,
        academic_year: Option<String>,
    ) -> Result<Vec<Grade>> {
        let mut select = Grades::find().filter(Column::StudentId.eq(student_id));

        if let Some(term) = term {
            select = select.filter(Column::Term.eq(term));
        }
        if let Some(academic_year) = academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }

        let models = select
            .order_by_asc(Column::SubjectId)
            .order_by_asc(Column::AssessedOn)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询学生成绩失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_grade()).collect())
    }

    pub async fn list_recent_grades_impl(&self, student_id: i64, limit: u64) -> Result<Vec<Grade>> {
        let models = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::AssessedOn)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询最近成绩失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 日期以 `YYYY-MM-DD` 存储，字符串比较即日期比较
    pub async fn list_grades_since_impl(
        &self,
        student_ids: &[i64],
        since: NaiveDate,
    ) -> Result<Vec<Grade>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Grades::find()
            .filter(Column::StudentId.is_in(student_ids.to_vec()))
            .filter(Column::AssessedOn.gte(format_date(since)))
            .order_by_asc(Column::AssessedOn)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_grade()).collect())
    }

    pub async fn update_grade_impl(
        &self,
        id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        if self.get_grade_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(assessment_type) = update.assessment_type {
            model.assessment_type = Set(assessment_type.to_string());
        }
        if let Some(term) = update.term {
            model.term = Set(term);
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }
        if let Some(score) = update.score {
            model.score = Set(score);
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(comment) = update.comment {
            model.comment = Set(Some(comment));
        }
        if let Some(assessed_on) = update.assessed_on {
            model.assessed_on = Set(format_date(assessed_on));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新成绩", e))?;

        self.get_grade_by_id_impl(id).await
    }

    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::errors::SchoolHubError;
    use crate::models::grades::{
        entities::{AssessmentType, LetterGrade},
        requests::{GradeListQuery, NewGrade, UpdateGradeRequest},
    };
    use crate::models::subjects::requests::CreateSubjectRequest;
    use crate::storage::Storage;
    use chrono::NaiveDate;

    fn new_grade(student_id: i64, subject_id: i64, score: f64, day: u32) -> NewGrade {
        NewGrade {
            student_id,
            subject_id,
            class_id: None,
            teacher_id: None,
            assessment_type: AssessmentType::Test,
            term: 1,
            academic_year: "2025/2026".to_string(),
            score,
            max_score: 100.0,
            comment: None,
            assessed_on: NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
        }
    }

    async fn subject(storage: &super::SeaOrmStorage, code: &str) -> i64 {
        storage
            .create_subject(CreateSubjectRequest {
                code: code.to_string(),
                name: code.to_string(),
                description: None,
                credits: None,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_list_and_recent() {
        let storage = test_support::storage().await;
        let student = test_support::student(&storage, "S-1", None).await;
        let math = subject(&storage, "MATH").await;
        let eng = subject(&storage, "ENG").await;

        storage.create_grade(new_grade(student, math, 92.0, 1)).await.unwrap();
        storage.create_grade(new_grade(student, eng, 64.0, 5)).await.unwrap();
        storage.create_grade(new_grade(student, math, 78.0, 9)).await.unwrap();

        let page = storage
            .list_grades_with_pagination(GradeListQuery {
                subject_id: Some(math),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.items[0].grade.score, 78.0);
        assert_eq!(page.items[0].letter, Some(LetterGrade::C));

        let recent = storage.list_recent_grades(student, 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].assessed_on.to_string(), "2025-10-09");

        let since = storage
            .list_grades_since(&[student], NaiveDate::from_ymd_opt(2025, 10, 5).unwrap())
            .await
            .unwrap();
        assert_eq!(since.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_student_rejected_and_update() {
        let storage = test_support::storage().await;
        let math = subject(&storage, "MATH").await;
        let err = storage
            .create_grade(new_grade(777, math, 50.0, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolHubError::Validation(_)));

        let student = test_support::student(&storage, "S-2", None).await;
        let grade = storage.create_grade(new_grade(student, math, 50.0, 1)).await.unwrap();
        let updated = storage
            .update_grade(
                grade.id,
                UpdateGradeRequest {
                    score: Some(71.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.passed());

        let by_term = storage
            .list_student_grades(student, Some(2), None)
            .await
            .unwrap();
        assert!(by_term.is_empty());
        assert!(storage.delete_grade(grade.id).await.unwrap());
    }
}
