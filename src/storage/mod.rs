use std::sync::Arc;

use chrono::NaiveDate;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段需为哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 学生档案方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过学生本人的登录账号查找档案
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    // 家长名下的学生
    async fn list_students_by_parent(&self, parent_user_id: i64) -> Result<Vec<Student>>;
    // 班级花名册
    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>>;
    // 在读学生，可限定班级
    async fn list_active_students(&self, class_id: Option<i64>) -> Result<Vec<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn count_students(&self, class_id: Option<i64>) -> Result<u64>;

    /// 教师档案方法
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_by_ids(&self, ids: &[i64]) -> Result<Vec<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
    async fn count_teachers(&self) -> Result<u64>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<SchoolClass>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<SchoolClass>>;
    // 教师任教的全部班级
    async fn list_classes_by_teacher(&self, teacher_id: i64) -> Result<Vec<SchoolClass>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<SchoolClass>>;
    // 删除班级
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    async fn count_classes(&self) -> Result<u64>;

    /// 科目方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_by_ids(&self, ids: &[i64]) -> Result<Vec<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;
    async fn count_subjects(&self) -> Result<u64>;

    /// 成绩方法
    async fn create_grade(&self, grade: NewGrade) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
    // 学生的全部成绩，可按学期和学年筛选
    async fn list_student_grades(
        &self,
        student_id: i64,
        term: Option<i32>,
        academic_year: Option<String>,
    ) -> Result<Vec<Grade>>;
    // 最近的若干条成绩
    async fn list_recent_grades(&self, student_id: i64, limit: u64) -> Result<Vec<Grade>>;
    // 指定学生自某日起的成绩（积分规则匹配用）
    async fn list_grades_since(&self, student_ids: &[i64], since: NaiveDate)
    -> Result<Vec<Grade>>;
    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Option<Grade>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;

    /// 考勤方法
    // 同一学生同一天只保留一条，后写覆盖
    async fn upsert_attendance(&self, record: AttendanceUpsert) -> Result<AttendanceRecord>;
    // 批量写入，整体在一个事务内
    async fn upsert_attendance_batch(
        &self,
        records: Vec<AttendanceUpsert>,
    ) -> Result<Vec<AttendanceRecord>>;
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    async fn list_student_attendance(
        &self,
        student_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>>;
    async fn list_attendance_since(
        &self,
        student_ids: &[i64],
        since: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>>;

    /// 积分方法
    // 写入流水并调整余额，返回流水和变动后的余额
    async fn create_point_transaction(
        &self,
        transaction: NewPointTransaction,
    ) -> Result<(PointTransaction, i64)>;
    async fn list_point_transactions_with_pagination(
        &self,
        query: TransactionListQuery,
    ) -> Result<TransactionListResponse>;
    // 按积分余额降序
    async fn list_top_students_by_points(
        &self,
        class_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<Student>>;

    async fn create_point_rule(
        &self,
        rule: CreatePointRuleRequest,
        created_by: Option<i64>,
    ) -> Result<PointRule>;
    async fn get_point_rule_by_id(&self, id: i64) -> Result<Option<PointRule>>;
    async fn list_point_rules_with_pagination(
        &self,
        query: PointRuleListQuery,
    ) -> Result<PointRuleListResponse>;
    async fn list_active_point_rules(&self) -> Result<Vec<PointRule>>;
    async fn update_point_rule(
        &self,
        id: i64,
        update: UpdatePointRuleRequest,
    ) -> Result<Option<PointRule>>;
    async fn delete_point_rule(&self, id: i64) -> Result<bool>;

    // 该规则对该学生自某时刻起是否已有建议
    async fn has_suggestion_since(
        &self,
        rule_id: i64,
        student_id: i64,
        since: chrono::DateTime<chrono::Utc>,
    ) -> Result<bool>;
    async fn create_point_suggestions(
        &self,
        suggestions: Vec<NewSuggestion>,
    ) -> Result<Vec<PointSuggestion>>;
    async fn get_point_suggestion_by_id(&self, id: i64) -> Result<Option<PointSuggestion>>;
    async fn list_point_suggestions_with_pagination(
        &self,
        query: SuggestionListQuery,
    ) -> Result<SuggestionListResponse>;
    async fn count_pending_suggestions(&self, student_ids: Option<Vec<i64>>) -> Result<u64>;
    // 审核通过：标记建议并生成流水（同一事务）
    async fn approve_point_suggestion(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<Option<(PointSuggestion, PointTransaction)>>;
    async fn reject_point_suggestion(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<Option<PointSuggestion>>;

    /// 消息方法
    async fn create_message(&self, message: NewMessage) -> Result<Message>;
    async fn get_message_by_id(&self, id: i64) -> Result<Option<Message>>;
    async fn list_messages_with_pagination(
        &self,
        query: MessageListQuery,
    ) -> Result<MessageListResponse>;
    // 仅收件人可标记已读
    async fn mark_message_read(&self, id: i64, user_id: i64) -> Result<Option<Message>>;
    async fn count_unread_messages(&self, user_id: i64) -> Result<u64>;
    // 按发件/收件一侧删除，双方都删除后移除记录
    async fn delete_message_for_user(&self, id: i64, user_id: i64) -> Result<bool>;

    /// 校历事件方法
    async fn create_event(&self, event: NewEvent) -> Result<SchoolEvent>;
    // 跳过同标题同开始日期的事件，返回新建的事件和跳过数量
    async fn create_events_if_absent(
        &self,
        events: Vec<NewEvent>,
    ) -> Result<(Vec<SchoolEvent>, usize)>;
    async fn get_event_by_id(&self, id: i64) -> Result<Option<SchoolEvent>>;
    async fn list_events_with_pagination(&self, query: EventListQuery)
    -> Result<EventListResponse>;
    // 与日期区间有交集的事件
    async fn list_events_between(&self, from: NaiveDate, to: NaiveDate)
    -> Result<Vec<SchoolEvent>>;
    async fn update_event(
        &self,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<SchoolEvent>>;
    async fn delete_event(&self, id: i64) -> Result<bool>;

    /// 教学资料方法
    async fn create_resource(
        &self,
        resource: CreateResourceRequest,
        uploaded_by: i64,
    ) -> Result<DocumentResource>;
    async fn get_resource_by_id(&self, id: i64) -> Result<Option<DocumentResource>>;
    async fn list_resources_with_pagination(
        &self,
        query: ResourceListQuery,
    ) -> Result<ResourceListResponse>;
    async fn update_resource(
        &self,
        id: i64,
        update: UpdateResourceRequest,
    ) -> Result<Option<DocumentResource>>;
    async fn delete_resource(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
