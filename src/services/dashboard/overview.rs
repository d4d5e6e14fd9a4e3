//! 按角色汇总首页数据

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, NaiveDate};
use futures_util::future::try_join_all;

use super::DashboardService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::attendance::responses::AttendanceSummary;
use crate::models::dashboard::responses::{
    AdminDashboard, ChildOverview, ClassOverview, DashboardResponse, ParentDashboard,
    StudentDashboard, TeacherDashboard,
};
use crate::models::events::entities::{SchoolEvent, academic_year_start_for};
use crate::models::grades::responses::GradeView;
use crate::models::users::entities::{User, UserRole};
use crate::services::access::{resolve_scope, teacher_profile};
use crate::services::common::{current_user, storage_error};
use crate::storage::Storage;

const RECENT_GRADES: u64 = 5;

/// 本学年起始日（9 月 1 日）
fn school_year_start(today: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(academic_year_start_for(today), 9, 1)
}

pub async fn get_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);
    let today = chrono::Local::now().date_naive();
    let horizon = service.get_config().school.upcoming_event_days.max(0);

    let result = async {
        let upcoming = storage
            .list_events_between(today, today + Duration::days(horizon))
            .await?;
        match user.role {
            UserRole::Admin => admin_dashboard(&storage, upcoming).await,
            UserRole::Teacher => teacher_dashboard(&storage, &user, upcoming).await,
            UserRole::Student => student_dashboard(&storage, &user, today, upcoming).await,
            UserRole::Parent => parent_dashboard(&storage, &user, today, upcoming).await,
        }
    }
    .await;

    match result {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            dashboard,
            "Dashboard retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to build dashboard", e)),
    }
}

async fn admin_dashboard(
    storage: &Arc<dyn Storage>,
    upcoming_events: Vec<SchoolEvent>,
) -> Result<DashboardResponse> {
    let (users, students, teachers, classes, subjects, pending_suggestions) = tokio::try_join!(
        storage.count_users(),
        storage.count_students(None),
        storage.count_teachers(),
        storage.count_classes(),
        storage.count_subjects(),
        storage.count_pending_suggestions(None),
    )?;

    Ok(DashboardResponse::Admin(AdminDashboard {
        users,
        students,
        teachers,
        classes,
        subjects,
        pending_suggestions,
        upcoming_events,
    }))
}

async fn teacher_dashboard(
    storage: &Arc<dyn Storage>,
    user: &User,
    upcoming_events: Vec<SchoolEvent>,
) -> Result<DashboardResponse> {
    let teacher = teacher_profile(storage, user).await?;
    let classes = match &teacher {
        Some(teacher) => storage.list_classes_by_teacher(teacher.id).await?,
        None => Vec::new(),
    };
    let counts = try_join_all(classes.iter().map(|c| storage.count_students(Some(c.id)))).await?;
    let classes = classes
        .into_iter()
        .zip(counts)
        .map(|(class, student_count)| ClassOverview {
            class,
            student_count,
        })
        .collect();

    let scope = resolve_scope(storage, user).await?;
    let (pending_suggestions, unread_messages) = tokio::try_join!(
        storage.count_pending_suggestions(scope.student_ids()),
        storage.count_unread_messages(user.id),
    )?;

    Ok(DashboardResponse::Teacher(TeacherDashboard {
        teacher_id: teacher.map(|t| t.id),
        classes,
        pending_suggestions,
        upcoming_events,
        unread_messages,
    }))
}

async fn student_dashboard(
    storage: &Arc<dyn Storage>,
    user: &User,
    today: NaiveDate,
    upcoming_events: Vec<SchoolEvent>,
) -> Result<DashboardResponse> {
    let unread_messages = storage.count_unread_messages(user.id).await?;
    let Some(student) = storage.get_student_by_user_id(user.id).await? else {
        return Ok(DashboardResponse::Student(StudentDashboard {
            student: None,
            points: 0,
            attendance: None,
            recent_grades: Vec::new(),
            upcoming_events,
            unread_messages,
        }));
    };

    let from = school_year_start(today);
    let (records, grades) = tokio::try_join!(
        storage.list_student_attendance(student.id, from, Some(today)),
        storage.list_recent_grades(student.id, RECENT_GRADES),
    )?;

    Ok(DashboardResponse::Student(StudentDashboard {
        points: student.points,
        attendance: Some(AttendanceSummary::from_records(
            student.id,
            from,
            Some(today),
            &records,
        )),
        recent_grades: grades.into_iter().map(GradeView::from).collect(),
        student: Some(student),
        upcoming_events,
        unread_messages,
    }))
}

async fn parent_dashboard(
    storage: &Arc<dyn Storage>,
    user: &User,
    today: NaiveDate,
    upcoming_events: Vec<SchoolEvent>,
) -> Result<DashboardResponse> {
    let children = storage.list_students_by_parent(user.id).await?;
    let from = school_year_start(today);
    let records = try_join_all(
        children
            .iter()
            .map(|child| storage.list_student_attendance(child.id, from, Some(today))),
    )
    .await?;

    let children = children
        .into_iter()
        .zip(records)
        .map(|(student, records)| {
            let summary = AttendanceSummary::from_records(student.id, from, Some(today), &records);
            ChildOverview {
                points: student.points,
                attendance_rate: summary.attendance_rate,
                student,
            }
        })
        .collect();

    Ok(DashboardResponse::Parent(ParentDashboard {
        children,
        upcoming_events,
        unread_messages: storage.count_unread_messages(user.id).await?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_year_start() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(school_year_start(d), NaiveDate::from_ymd_opt(2024, 9, 1));
        let d = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(school_year_start(d), NaiveDate::from_ymd_opt(2024, 9, 1));
    }
}
