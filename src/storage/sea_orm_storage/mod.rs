//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod classes;
mod events;
mod grades;
mod messages;
mod points;
mod resources;
mod students;
mod subjects;
mod teachers;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolHubError};
use crate::models::PaginationInfo;
use crate::models::common::pagination::MAX_PAGE;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, Select, SqlErr,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::run_migrations(&db).await?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 内存 SQLite 实例，单连接以保证所有查询看到同一个库
    pub async fn connect_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| SchoolHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| SchoolHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Self::run_migrations(&db).await?;

        Ok(Self { db })
    }

    async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 页码与每页数量，每页最多 100 条
pub(crate) fn page_and_size(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    (
        page.unwrap_or(1).clamp(1, MAX_PAGE) as u64,
        size.unwrap_or(10).clamp(1, 100) as u64,
    )
}

/// 分页查询，`what` 用于错误信息
pub(crate) async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    page: Option<i64>,
    size: Option<i64>,
    what: &str,
) -> Result<(Vec<E::Model>, PaginationInfo)>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync + 'static,
{
    let (page, size) = page_and_size(page, size);
    let paginator = select.paginate(db, size);

    let total = paginator
        .num_items()
        .await
        .map_err(|e| SchoolHubError::database_operation(format!("查询{what}总数失败: {e}")))?;

    let items = paginator
        .fetch_page(page - 1)
        .await
        .map_err(|e| SchoolHubError::database_operation(format!("查询{what}列表失败: {e}")))?;

    Ok((items, PaginationInfo::new(page, size, total)))
}

/// 写操作错误转换：唯一约束冲突转为 Conflict，外键约束失败转为 Validation
pub(crate) fn write_error(action: &str, err: DbErr) -> SchoolHubError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            SchoolHubError::conflict(format!("{action}失败: 记录已存在 ({detail})"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            SchoolHubError::validation(format!("{action}失败: 关联记录不存在 ({detail})"))
        }
        _ => SchoolHubError::database_operation(format!("{action}失败: {err}")),
    }
}

// Storage trait 实现
use crate::models::{
    attendance::{
        entities::AttendanceRecord,
        requests::{AttendanceListQuery, AttendanceUpsert},
        responses::AttendanceListResponse,
    },
    classes::{
        entities::SchoolClass,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    events::{
        entities::SchoolEvent,
        requests::{EventListQuery, NewEvent, UpdateEventRequest},
        responses::EventListResponse,
    },
    grades::{
        entities::Grade,
        requests::{GradeListQuery, NewGrade, UpdateGradeRequest},
        responses::GradeListResponse,
    },
    messages::{
        entities::Message,
        requests::{MessageListQuery, NewMessage},
        responses::MessageListResponse,
    },
    points::{
        entities::{PointRule, PointSuggestion, PointTransaction},
        requests::{
            CreatePointRuleRequest, NewPointTransaction, NewSuggestion, PointRuleListQuery,
            SuggestionListQuery, TransactionListQuery, UpdatePointRuleRequest,
        },
        responses::{PointRuleListResponse, SuggestionListResponse, TransactionListResponse},
    },
    resources::{
        entities::DocumentResource,
        requests::{CreateResourceRequest, ResourceListQuery, UpdateResourceRequest},
        responses::ResourceListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn list_students_by_parent(&self, parent_user_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_parent_impl(parent_user_id).await
    }

    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_class_impl(class_id).await
    }

    async fn list_active_students(&self, class_id: Option<i64>) -> Result<Vec<Student>> {
        self.list_active_students_impl(class_id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn count_students(&self, class_id: Option<i64>) -> Result<u64> {
        self.count_students_impl(class_id).await
    }

    // 教师模块
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn list_teachers_by_ids(&self, ids: &[i64]) -> Result<Vec<Teacher>> {
        self.list_teachers_by_ids_impl(ids).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    async fn count_teachers(&self) -> Result<u64> {
        self.count_teachers_impl().await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<SchoolClass> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<SchoolClass>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_by_teacher(&self, teacher_id: i64) -> Result<Vec<SchoolClass>> {
        self.list_classes_by_teacher_impl(teacher_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<SchoolClass>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn count_classes(&self) -> Result<u64> {
        self.count_classes_impl().await
    }

    // 科目模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects_by_ids(&self, ids: &[i64]) -> Result<Vec<Subject>> {
        self.list_subjects_by_ids_impl(ids).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    async fn count_subjects(&self) -> Result<u64> {
        self.count_subjects_impl().await
    }

    // 成绩模块
    async fn create_grade(&self, grade: NewGrade) -> Result<Grade> {
        self.create_grade_impl(grade).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn list_student_grades(
        &self,
        student_id: i64,
        term: Option<i32>,
        academic_year: Option<String>,
    ) -> Result<Vec<Grade>> {
        self.list_student_grades_impl(student_id, term, academic_year)
            .await
    }

    async fn list_recent_grades(&self, student_id: i64, limit: u64) -> Result<Vec<Grade>> {
        self.list_recent_grades_impl(student_id, limit).await
    }

    async fn list_grades_since(
        &self,
        student_ids: &[i64],
        since: NaiveDate,
    ) -> Result<Vec<Grade>> {
        self.list_grades_since_impl(student_ids, since).await
    }

    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Option<Grade>> {
        self.update_grade_impl(id, update).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    // 考勤模块
    async fn upsert_attendance(&self, record: AttendanceUpsert) -> Result<AttendanceRecord> {
        self.upsert_attendance_impl(record).await
    }

    async fn upsert_attendance_batch(
        &self,
        records: Vec<AttendanceUpsert>,
    ) -> Result<Vec<AttendanceRecord>> {
        self.upsert_attendance_batch_impl(records).await
    }

    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        self.list_attendance_with_pagination_impl(query).await
    }

    async fn list_student_attendance(
        &self,
        student_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_student_attendance_impl(student_id, from, to)
            .await
    }

    async fn list_attendance_since(
        &self,
        student_ids: &[i64],
        since: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_since_impl(student_ids, since).await
    }

    // 积分模块
    async fn create_point_transaction(
        &self,
        transaction: NewPointTransaction,
    ) -> Result<(PointTransaction, i64)> {
        self.create_point_transaction_impl(transaction).await
    }

    async fn list_point_transactions_with_pagination(
        &self,
        query: TransactionListQuery,
    ) -> Result<TransactionListResponse> {
        self.list_point_transactions_with_pagination_impl(query)
            .await
    }

    async fn list_top_students_by_points(
        &self,
        class_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<Student>> {
        self.list_top_students_by_points_impl(class_id, limit).await
    }

    async fn create_point_rule(
        &self,
        rule: CreatePointRuleRequest,
        created_by: Option<i64>,
    ) -> Result<PointRule> {
        self.create_point_rule_impl(rule, created_by).await
    }

    async fn get_point_rule_by_id(&self, id: i64) -> Result<Option<PointRule>> {
        self.get_point_rule_by_id_impl(id).await
    }

    async fn list_point_rules_with_pagination(
        &self,
        query: PointRuleListQuery,
    ) -> Result<PointRuleListResponse> {
        self.list_point_rules_with_pagination_impl(query).await
    }

    async fn list_active_point_rules(&self) -> Result<Vec<PointRule>> {
        self.list_active_point_rules_impl().await
    }

    async fn update_point_rule(
        &self,
        id: i64,
        update: UpdatePointRuleRequest,
    ) -> Result<Option<PointRule>> {
        self.update_point_rule_impl(id, update).await
    }

    async fn delete_point_rule(&self, id: i64) -> Result<bool> {
        self.delete_point_rule_impl(id).await
    }

    async fn has_suggestion_since(
        &self,
        rule_id: i64,
        student_id: i64,
        since: chrono::DateTime<chrono::Utc>,
    ) -> Result<bool> {
        self.has_suggestion_since_impl(rule_id, student_id, since)
            .await
    }

    async fn create_point_suggestions(
        &self,
        suggestions: Vec<NewSuggestion>,
    ) -> Result<Vec<PointSuggestion>> {
        self.create_point_suggestions_impl(suggestions).await
    }

    async fn get_point_suggestion_by_id(&self, id: i64) -> Result<Option<PointSuggestion>> {
        self.get_point_suggestion_by_id_impl(id).await
    }

    async fn list_point_suggestions_with_pagination(
        &self,
        query: SuggestionListQuery,
    ) -> Result<SuggestionListResponse> {
        self.list_point_suggestions_with_pagination_impl(query)
            .await
    }

    async fn count_pending_suggestions(&self, student_ids: Option<Vec<i64>>) -> Result<u64> {
        self.count_pending_suggestions_impl(student_ids).await
    }

    async fn approve_point_suggestion(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<Option<(PointSuggestion, PointTransaction)>> {
        self.approve_point_suggestion_impl(id, reviewer_id).await
    }

    async fn reject_point_suggestion(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<Option<PointSuggestion>> {
        self.reject_point_suggestion_impl(id, reviewer_id).await
    }

    // 消息模块
    async fn create_message(&self, message: NewMessage) -> Result<Message> {
        self.create_message_impl(message).await
    }

    async fn get_message_by_id(&self, id: i64) -> Result<Option<Message>> {
        self.get_message_by_id_impl(id).await
    }

    async fn list_messages_with_pagination(
        &self,
        query: MessageListQuery,
    ) -> Result<MessageListResponse> {
        self.list_messages_with_pagination_impl(query).await
    }

    async fn mark_message_read(&self, id: i64, user_id: i64) -> Result<Option<Message>> {
        self.mark_message_read_impl(id, user_id).await
    }

    async fn count_unread_messages(&self, user_id: i64) -> Result<u64> {
        self.count_unread_messages_impl(user_id).await
    }

    async fn delete_message_for_user(&self, id: i64, user_id: i64) -> Result<bool> {
        self.delete_message_for_user_impl(id, user_id).await
    }

    // 校历模块
    async fn create_event(&self, event: NewEvent) -> Result<SchoolEvent> {
        self.create_event_impl(event).await
    }

    async fn create_events_if_absent(
        &self,
        events: Vec<NewEvent>,
    ) -> Result<(Vec<SchoolEvent>, usize)> {
        self.create_events_if_absent_impl(events).await
    }

    async fn get_event_by_id(&self, id: i64) -> Result<Option<SchoolEvent>> {
        self.get_event_by_id_impl(id).await
    }

    async fn list_events_with_pagination(
        &self,
        query: EventListQuery,
    ) -> Result<EventListResponse> {
        self.list_events_with_pagination_impl(query).await
    }

    async fn list_events_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SchoolEvent>> {
        self.list_events_between_impl(from, to).await
    }

    async fn update_event(
        &self,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<SchoolEvent>> {
        self.update_event_impl(id, update).await
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        self.delete_event_impl(id).await
    }

    // 资料模块
    async fn create_resource(
        &self,
        resource: CreateResourceRequest,
        uploaded_by: i64,
    ) -> Result<DocumentResource> {
        self.create_resource_impl(resource, uploaded_by).await
    }

    async fn get_resource_by_id(&self, id: i64) -> Result<Option<DocumentResource>> {
        self.get_resource_by_id_impl(id).await
    }

    async fn list_resources_with_pagination(
        &self,
        query: ResourceListQuery,
    ) -> Result<ResourceListResponse> {
        self.list_resources_with_pagination_impl(query).await
    }

    async fn update_resource(
        &self,
        id: i64,
        update: UpdateResourceRequest,
    ) -> Result<Option<DocumentResource>> {
        self.update_resource_impl(id, update).await
    }

    async fn delete_resource(&self, id: i64) -> Result<bool> {
        self.delete_resource_impl(id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::models::students::{entities::Gender, requests::CreateStudentRequest};
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::Storage;

    pub(crate) async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::connect_in_memory()
            .await
            .expect("in-memory storage")
    }

    pub(crate) async fn user(storage: &SeaOrmStorage, name: &str, role: UserRole) -> i64 {
        storage
            .create_user(CreateUserRequest {
                username: name.to_string(),
                email: format!("{name}@school.lr"),
                password: "hash".to_string(),
                role,
                display_name: None,
                avatar_url: None,
            })
            .await
            .expect("create user")
            .id
    }

    pub(crate) fn new_student(number: &str, first: &str, last: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            student_number: number.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            gender: Gender::Female,
            date_of_birth: None,
            class_id: None,
            user_id: None,
            parent_user_id: None,
            guardian_name: None,
            guardian_phone: None,
            address: None,
            enrolled_on: None,
        }
    }

    /// 创建学生并返回 ID，可指定班级
    pub(crate) async fn student(storage: &SeaOrmStorage, number: &str, class_id: Option<i64>) -> i64 {
        let mut req = new_student(number, "Test", number);
        req.class_id = class_id;
        storage.create_student(req).await.expect("create student").id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("schoolhub.db").unwrap(),
            "sqlite://schoolhub.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/db").unwrap(),
            "postgres://u:p@localhost/db"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[test]
    fn test_page_and_size() {
        assert_eq!(page_and_size(None, None), (1, 10));
        assert_eq!(page_and_size(Some(0), Some(500)), (1, 100));
        assert_eq!(page_and_size(Some(3), Some(0)), (3, 1));
        assert_eq!(
            page_and_size(Some(i64::MAX), Some(100)),
            (MAX_PAGE as u64, 100)
        );
    }

    #[tokio::test]
    async fn test_far_page_returns_empty() {
        use crate::models::subjects::requests::SubjectListQuery;

        let storage = test_support::storage().await;
        let page = storage
            .list_subjects_with_pagination(SubjectListQuery {
                page: Some(i64::MAX),
                size: Some(100),
                search: None,
            })
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.page, MAX_PAGE);
    }

    #[tokio::test]
    async fn test_in_memory_storage_migrates() {
        let storage = test_support::storage().await;
        assert_eq!(storage.count_users().await.unwrap(), 0);
        assert_eq!(storage.count_subjects().await.unwrap(), 0);
    }
}
