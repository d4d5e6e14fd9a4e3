//! 业务数据模型
//!
//! 每个业务模块按 `entities` / `requests` / `responses` 划分。

#[macro_use]
pub mod common;

pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod events;
pub mod grades;
pub mod messages;
pub mod points;
pub mod resources;
pub mod students;
pub mod subjects;
pub mod system;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 认证与用户；3xxx 学籍与教学组织；4xxx 教学记录与校务。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证与用户
    AuthFailed = 2000,
    RegistrationDisabled = 2001,
    UserNotFound = 2100,
    UserAlreadyExists = 2101,
    UserNameInvalid = 2102,
    UserEmailInvalid = 2103,
    UserPasswordInvalid = 2104,
    UserEmailAlreadyExists = 2105,
    UserCreationFailed = 2106,
    UserUpdateFailed = 2107,
    UserDeleteFailed = 2108,
    CanNotDeleteCurrentUser = 2109,

    // 学生 / 教师 / 班级 / 科目
    StudentNotFound = 3000,
    StudentAlreadyExists = 3001,
    StudentInvalid = 3002,
    TeacherNotFound = 3100,
    TeacherAlreadyExists = 3101,
    TeacherInvalid = 3102,
    ClassNotFound = 3200,
    ClassAlreadyExists = 3201,
    ClassInvalid = 3202,
    ClassPermissionDenied = 3203,
    SubjectNotFound = 3300,
    SubjectAlreadyExists = 3301,
    SubjectInvalid = 3302,

    // 成绩 / 考勤 / 积分 / 消息 / 校历 / 资料
    GradeNotFound = 4000,
    GradeInvalid = 4001,
    GradePermissionDenied = 4002,
    AttendanceInvalid = 4100,
    AttendancePermissionDenied = 4101,
    PointRuleNotFound = 4200,
    PointRuleInvalid = 4201,
    PointSuggestionNotFound = 4202,
    PointSuggestionAlreadyReviewed = 4203,
    PointTransactionInvalid = 4204,
    InsufficientPoints = 4205,
    MessageNotFound = 4300,
    MessageInvalid = 4301,
    EventNotFound = 4400,
    EventInvalid = 4401,
    ResourceNotFound = 4500,
    ResourceInvalid = 4501,
    ResourcePermissionDenied = 4502,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 1001);
        assert_eq!(ErrorCode::InsufficientPoints as i32, 4205);
    }

    #[test]
    fn test_api_response_shape() {
        let response = ApiResponse::error_empty(ErrorCode::StudentNotFound, "Student not found");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 3000);
        assert_eq!(json["message"], "Student not found");
        assert!(json.get("data").is_none());
    }
}
