use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PointService;
use crate::models::ApiResponse;
use crate::models::points::{
    entities::LeaderboardEntry, requests::LeaderboardParams, responses::LeaderboardResponse,
};
use crate::models::students::entities::Student;
use crate::services::common::storage_error;

const MAX_LEADERBOARD_SIZE: u64 = 100;

/// 名次按余额降序依次编号
pub(crate) fn rank_students(students: Vec<Student>) -> Vec<LeaderboardEntry> {
    students
        .into_iter()
        .enumerate()
        .map(|(i, student)| LeaderboardEntry {
            rank: i as u32 + 1,
            student_id: student.id,
            student_name: student.full_name(),
            class_id: student.class_id,
            points: student.points,
        })
        .collect()
}

pub async fn leaderboard(
    service: &PointService,
    params: LeaderboardParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let limit = params
        .limit
        .unwrap_or(service.get_config().school.leaderboard_size)
        .clamp(1, MAX_LEADERBOARD_SIZE);
    let storage = service.get_storage(request);

    match storage
        .list_top_students_by_points(params.class_id, limit)
        .await
    {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            LeaderboardResponse {
                class_id: params.class_id,
                entries: rank_students(students),
            },
            "Leaderboard retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to load leaderboard", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::{Gender, StudentStatus};
    use chrono::{NaiveDate, Utc};

    fn student(id: i64, points: i64) -> Student {
        Student {
            id,
            user_id: None,
            parent_user_id: None,
            student_number: format!("S{id:03}"),
            first_name: "Musu".into(),
            last_name: format!("Kollie{id}"),
            gender: Gender::Female,
            date_of_birth: None,
            class_id: Some(1),
            guardian_name: None,
            guardian_phone: None,
            address: None,
            status: StudentStatus::Active,
            points,
            enrolled_on: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_rank_students() {
        let entries = rank_students(vec![student(4, 50), student(2, 30)]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].student_id, 4);
        assert_eq!(entries[0].student_name, "Musu Kollie4");
        assert_eq!(entries[1].rank, 2);
        assert_eq!(entries[1].points, 30);
    }
}
