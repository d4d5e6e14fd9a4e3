use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use tracing::{debug, info};

use super::PointService;
use super::matcher::{StudentActivity, match_rules, window_start};
use crate::errors::{Result, SchoolHubError};
use crate::models::attendance::entities::AttendanceRecord;
use crate::models::grades::entities::Grade;
use crate::models::points::{
    entities::SuggestionStatus,
    requests::{GenerateSuggestionsRequest, SuggestionListParams, SuggestionListQuery},
    responses::{GenerateSuggestionsResponse, ReviewSuggestionResponse},
};
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};
use crate::services::access::{Scope, resolve_scope, teaches_class};
use crate::services::common::{current_user, forbidden, not_found, storage_error};
use crate::storage::Storage;

fn group_by_student<T>(items: Vec<T>, key: impl Fn(&T) -> i64) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for item in items {
        grouped.entry(key(&item)).or_default().push(item);
    }
    grouped
}

fn already_reviewed() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::PointSuggestionAlreadyReviewed,
        "Suggestion has already been reviewed",
    ))
}

/// 对范围内的在读学生运行规则匹配，并保存规则窗口内尚无记录的建议
pub(crate) async fn collect_suggestions(
    storage: &Arc<dyn Storage>,
    scope: &Scope,
    class_id: Option<i64>,
    today: NaiveDate,
) -> Result<GenerateSuggestionsResponse> {
    let rules: Vec<_> = storage
        .list_active_point_rules()
        .await?
        .into_iter()
        .filter(|r| r.is_evaluable())
        .collect();
    let students: Vec<_> = storage
        .list_active_students(class_id)
        .await?
        .into_iter()
        .filter(|s| scope.allows_student(s.id))
        .collect();

    if rules.is_empty() || students.is_empty() {
        return Ok(GenerateSuggestionsResponse {
            matched: 0,
            skipped: 0,
            created: Vec::new(),
        });
    }

    let widest = rules.iter().map(|r| r.window_days).max().unwrap_or(1);
    let since = window_start(today, widest);
    let student_ids: Vec<i64> = students.iter().map(|s| s.id).collect();

    let attendance = group_by_student(
        storage.list_attendance_since(&student_ids, since).await?,
        |r: &AttendanceRecord| r.student_id,
    );
    let grades = group_by_student(
        storage.list_grades_since(&student_ids, since).await?,
        |g: &Grade| g.student_id,
    );

    let activities: Vec<StudentActivity<'_>> = students
        .iter()
        .map(|s| StudentActivity {
            student_id: s.id,
            attendance: attendance.get(&s.id).map(Vec::as_slice).unwrap_or(&[]),
            grades: grades.get(&s.id).map(Vec::as_slice).unwrap_or(&[]),
        })
        .collect();

    let candidates = match_rules(&rules, &activities, today);
    let matched = candidates.len();
    debug!("Point matcher produced {} candidates", matched);

    let windows: HashMap<i64, i32> = rules.iter().map(|r| (r.id, r.window_days)).collect();
    let now = chrono::Utc::now();
    let mut fresh = Vec::with_capacity(matched);
    for candidate in candidates {
        let days = windows.get(&candidate.rule_id).copied().unwrap_or(1);
        let cutoff = now - chrono::Duration::days(i64::from(days));
        if !storage
            .has_suggestion_since(candidate.rule_id, candidate.student_id, cutoff)
            .await?
        {
            fresh.push(candidate);
        }
    }
    let skipped = matched - fresh.len();

    let created = if fresh.is_empty() {
        Vec::new()
    } else {
        storage.create_point_suggestions(fresh).await?
    };

    Ok(GenerateSuggestionsResponse {
        matched,
        skipped,
        created,
    })
}

/// 运行匹配并保存建议；规则窗口内已有建议的 (规则, 学生) 跳过
pub async fn generate_suggestions(
    service: &PointService,
    data: GenerateSuggestionsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    if let Some(class_id) = data.class_id {
        match teaches_class(&storage, &user, class_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Ok(forbidden(
                    ErrorCode::ClassPermissionDenied,
                    "You do not teach this class",
                ));
            }
            Err(e) => return Ok(storage_error("Failed to check access", e)),
        }
    }
    let scope = match resolve_scope(&storage, &user).await {
        Ok(scope) => scope,
        Err(e) => return Ok(storage_error("Failed to resolve scope", e)),
    };

    let today = chrono::Local::now().date_naive();
    let response = match collect_suggestions(&storage, &scope, data.class_id, today).await {
        Ok(response) => response,
        Err(e) => return Ok(storage_error("Failed to generate suggestions", e)),
    };
    info!(
        "User {} generated {} point suggestions ({} matched, {} skipped)",
        user.id,
        response.created.len(),
        response.matched,
        response.skipped
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Suggestions generated",
    )))
}

pub async fn list_suggestions(
    service: &PointService,
    params: SuggestionListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let scope = match resolve_scope(&storage, &user).await {
        Ok(scope) => scope,
        Err(e) => return Ok(storage_error("Failed to resolve scope", e)),
    };

    let (page, size) = params.pagination.normalized();
    let query = SuggestionListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        student_ids: scope.student_ids(),
        status: params.status,
        student_id: params.student_id,
    };

    match storage.list_point_suggestions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Suggestions retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve suggestions", e)),
    }
}

/// 审核建议，只有待审核状态可以处理
pub async fn review_suggestion(
    service: &PointService,
    id: i64,
    approve: bool,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let suggestion = match storage.get_point_suggestion_by_id(id).await {
        Ok(Some(suggestion)) => suggestion,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::PointSuggestionNotFound,
                "Suggestion not found",
            ));
        }
        Err(e) => return Ok(storage_error("Failed to load suggestion", e)),
    };
    if suggestion.status != SuggestionStatus::Pending {
        return Ok(already_reviewed());
    }

    if user.role != UserRole::Admin {
        match resolve_scope(&storage, &user).await {
            Ok(scope) if scope.allows_student(suggestion.student_id) => {}
            Ok(_) => {
                return Ok(forbidden(
                    ErrorCode::Forbidden,
                    "You can only review suggestions for students in your classes",
                ));
            }
            Err(e) => return Ok(storage_error("Failed to resolve scope", e)),
        }
    }

    let result = if approve {
        storage
            .approve_point_suggestion(id, user.id)
            .await
            .map(|r| r.map(|(suggestion, tx)| (suggestion, Some(tx))))
    } else {
        storage
            .reject_point_suggestion(id, user.id)
            .await
            .map(|r| r.map(|suggestion| (suggestion, None)))
    };

    match result {
        Ok(Some((suggestion, transaction))) => {
            info!(
                "Suggestion {} {} by user {}",
                suggestion.id, suggestion.status, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ReviewSuggestionResponse {
                    suggestion,
                    transaction,
                },
                if approve {
                    "Suggestion approved"
                } else {
                    "Suggestion rejected"
                },
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::PointSuggestionNotFound,
            "Suggestion not found",
        )),
        // 并发审核时存储层返回冲突
        Err(SchoolHubError::Conflict(_)) => Ok(already_reviewed()),
        Err(e) => Ok(storage_error("Failed to review suggestion", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::{entities::AttendanceStatus, requests::AttendanceUpsert};
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::points::{
        entities::{PointCategory, RuleCondition},
        requests::CreatePointRuleRequest,
    };
    use crate::storage::sea_orm_storage::test_support;

    async fn present(storage: &dyn Storage, student_id: i64, date: NaiveDate) {
        storage
            .upsert_attendance(AttendanceUpsert {
                student_id,
                class_id: None,
                date,
                status: AttendanceStatus::Present,
                note: None,
                recorded_by: None,
            })
            .await
            .unwrap();
    }

    fn created_for(response: &GenerateSuggestionsResponse) -> Vec<i64> {
        let mut ids: Vec<i64> = response.created.iter().map(|s| s.student_id).collect();
        ids.sort_unstable();
        ids
    }

    #[tokio::test]
    async fn test_collect_suggestions_scope_and_window() {
        let today = chrono::Local::now().date_naive();
        let seeded = test_support::storage().await;

        let class = seeded
            .create_class(CreateClassRequest {
                name: "Grade 8B".to_string(),
                grade_level: "8".to_string(),
                section: Some("B".to_string()),
                academic_year: "2024/2025".to_string(),
                teacher_ids: Vec::new(),
                subject_ids: Vec::new(),
                room: None,
                capacity: None,
            })
            .await
            .unwrap();
        let a = test_support::student(&seeded, "S-A", None).await;
        let b = test_support::student(&seeded, "S-B", None).await;
        let c = test_support::student(&seeded, "S-C", Some(class.id)).await;
        for student in [a, b, c] {
            present(&seeded, student, today).await;
        }
        seeded
            .create_point_rule(
                CreatePointRuleRequest {
                    name: "Perfect month".to_string(),
                    description: None,
                    condition: RuleCondition::PerfectAttendance,
                    threshold: 1.0,
                    window_days: 30,
                    points: 5,
                    category: Some(PointCategory::Attendance),
                    active: None,
                },
                None,
            )
            .await
            .unwrap();
        let storage: Arc<dyn Storage> = Arc::new(seeded);

        // 教师范围内只有学生 a
        let teacher_scope = Scope::Teacher {
            teacher_id: None,
            class_ids: Vec::new(),
            student_ids: vec![a],
        };
        let first = collect_suggestions(&storage, &teacher_scope, None, today)
            .await
            .unwrap();
        assert_eq!((first.matched, first.skipped), (1, 0));
        assert_eq!(created_for(&first), vec![a]);

        // 窗口期内再次生成：全部跳过
        let second = collect_suggestions(&storage, &teacher_scope, None, today)
            .await
            .unwrap();
        assert_eq!((second.matched, second.skipped), (1, 1));
        assert!(second.created.is_empty());

        // 按班级过滤只评估班级内学生
        let by_class = collect_suggestions(&storage, &Scope::All, Some(class.id), today)
            .await
            .unwrap();
        assert_eq!((by_class.matched, by_class.skipped), (1, 0));
        assert_eq!(created_for(&by_class), vec![c]);

        // 全校范围：a 与 c 已有建议，只新建 b
        let all = collect_suggestions(&storage, &Scope::All, None, today)
            .await
            .unwrap();
        assert_eq!((all.matched, all.skipped), (3, 2));
        assert_eq!(created_for(&all), vec![b]);

        let again = collect_suggestions(&storage, &Scope::All, None, today)
            .await
            .unwrap();
        assert_eq!((again.matched, again.skipped), (3, 3));
        assert!(again.created.is_empty());
    }

    #[test]
    fn test_group_by_student() {
        let grouped = group_by_student(vec![(1, 'a'), (2, 'b'), (1, 'c')], |item| item.0);
        assert_eq!(grouped[&1], vec![(1, 'a'), (1, 'c')]);
        assert_eq!(grouped[&2], vec![(2, 'b')]);
    }
}
