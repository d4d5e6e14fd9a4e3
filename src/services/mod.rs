//! 业务服务层
//!
//! 每个模块一个服务结构体，每个操作一个文件。服务通过请求上的
//! `app_data` 取得存储实例，领域错误统一转换为带 `ErrorCode` 的响应。

/// 定义持有存储句柄的服务结构体
macro_rules! storage_service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name {
            storage: Option<std::sync::Arc<dyn crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> std::sync::Arc<dyn crate::storage::Storage> {
                if let Some(storage) = &self.storage {
                    storage.clone()
                } else {
                    request
                        .app_data::<actix_web::web::Data<std::sync::Arc<dyn crate::storage::Storage>>>()
                        .expect("Storage not found in app data")
                        .get_ref()
                        .clone()
                }
            }

            #[allow(dead_code)]
            pub(crate) fn get_config(&self) -> &'static crate::config::AppConfig {
                crate::config::AppConfig::get()
            }
        }
    };
}

pub mod access;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
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

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use events::EventService;
pub use grades::GradeService;
pub use messages::MessageService;
pub use points::PointService;
pub use resources::ResourceService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use users::UserService;
