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

use actix_web::web;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use dashboard::configure_dashboard_routes;
pub use events::configure_event_routes;
pub use grades::configure_grade_routes;
pub use messages::configure_message_routes;
pub use points::configure_point_routes;
pub use resources::configure_resource_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

/// 注册全部 API 路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_student_routes)
        .configure(configure_teacher_routes)
        .configure(configure_classes_routes)
        .configure(configure_subject_routes)
        .configure(configure_grade_routes)
        .configure(configure_attendance_routes)
        .configure(configure_point_routes)
        .configure(configure_message_routes)
        .configure(configure_event_routes)
        .configure(configure_resource_routes)
        .configure(configure_dashboard_routes)
        .configure(configure_system_routes);
}
