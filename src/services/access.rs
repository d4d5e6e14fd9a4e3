//! 按角色计算当前用户的数据可见范围
//!
//! 管理员可见全部；教师可见任教班级及其学生；学生只见本人；家长只见子女。

use std::sync::Arc;

use crate::errors::Result;
use crate::models::students::entities::Student;
use crate::models::teachers::entities::Teacher;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    All,
    Teacher {
        teacher_id: Option<i64>,
        class_ids: Vec<i64>,
        student_ids: Vec<i64>,
    },
    Family {
        student_ids: Vec<i64>,
    },
}

impl Scope {
    /// 可见学生集合，`None` 表示不限
    pub fn student_ids(&self) -> Option<Vec<i64>> {
        match self {
            Scope::All => None,
            Scope::Teacher { student_ids, .. } | Scope::Family { student_ids } => {
                Some(student_ids.clone())
            }
        }
    }

    pub fn allows_student(&self, student_id: i64) -> bool {
        match self {
            Scope::All => true,
            Scope::Teacher { student_ids, .. } | Scope::Family { student_ids } => {
                student_ids.contains(&student_id)
            }
        }
    }

    /// 是否可以管理该班级（录入成绩、点名）
    pub fn manages_class(&self, class_id: i64) -> bool {
        match self {
            Scope::All => true,
            Scope::Teacher { class_ids, .. } => class_ids.contains(&class_id),
            Scope::Family { .. } => false,
        }
    }

    pub fn teacher_id(&self) -> Option<i64> {
        match self {
            Scope::Teacher { teacher_id, .. } => *teacher_id,
            _ => None,
        }
    }
}

/// 当前用户关联的教师档案
pub async fn teacher_profile(storage: &Arc<dyn Storage>, user: &User) -> Result<Option<Teacher>> {
    if user.role != UserRole::Teacher {
        return Ok(None);
    }
    storage.get_teacher_by_user_id(user.id).await
}

/// 学生或家长账号关联的学生档案
pub async fn linked_students(storage: &Arc<dyn Storage>, user: &User) -> Result<Vec<Student>> {
    match user.role {
        UserRole::Student => Ok(storage
            .get_student_by_user_id(user.id)
            .await?
            .into_iter()
            .collect()),
        UserRole::Parent => storage.list_students_by_parent(user.id).await,
        UserRole::Admin | UserRole::Teacher => Ok(Vec::new()),
    }
}

/// 单个学生是否对当前用户可见
pub async fn can_view_student(
    storage: &Arc<dyn Storage>,
    user: &User,
    student: &Student,
) -> Result<bool> {
    match user.role {
        UserRole::Admin => Ok(true),
        UserRole::Student | UserRole::Parent => Ok(student.is_linked_to(user.id)),
        UserRole::Teacher => {
            let Some(class_id) = student.class_id else {
                return Ok(false);
            };
            teaches_class(storage, user, class_id).await
        }
    }
}

/// 管理员，或该班级的任课教师
pub async fn teaches_class(storage: &Arc<dyn Storage>, user: &User, class_id: i64) -> Result<bool> {
    match user.role {
        UserRole::Admin => Ok(true),
        UserRole::Teacher => {
            let Some(teacher) = teacher_profile(storage, user).await? else {
                return Ok(false);
            };
            Ok(storage
                .get_class_by_id(class_id)
                .await?
                .is_some_and(|class| class.has_teacher(teacher.id)))
        }
        UserRole::Student | UserRole::Parent => Ok(false),
    }
}

pub async fn resolve_scope(storage: &Arc<dyn Storage>, user: &User) -> Result<Scope> {
    match user.role {
        UserRole::Admin => Ok(Scope::All),
        UserRole::Teacher => {
            let Some(teacher) = teacher_profile(storage, user).await? else {
                // 未关联教师档案的教师账号看不到任何班级
                return Ok(Scope::Teacher {
                    teacher_id: None,
                    class_ids: Vec::new(),
                    student_ids: Vec::new(),
                });
            };
            let class_ids: Vec<i64> = storage
                .list_classes_by_teacher(teacher.id)
                .await?
                .into_iter()
                .map(|class| class.id)
                .collect();
            let mut student_ids = Vec::new();
            for class_id in &class_ids {
                student_ids.extend(
                    storage
                        .list_students_by_class(*class_id)
                        .await?
                        .into_iter()
                        .map(|s| s.id),
                );
            }
            Ok(Scope::Teacher {
                teacher_id: Some(teacher.id),
                class_ids,
                student_ids,
            })
        }
        UserRole::Student | UserRole::Parent => Ok(Scope::Family {
            student_ids: linked_students(storage, user)
                .await?
                .into_iter()
                .map(|s| s.id)
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::teachers::requests::CreateTeacherRequest;
    use crate::storage::sea_orm_storage::test_support;

    async fn current(storage: &Arc<dyn Storage>, id: i64) -> User {
        storage.get_user_by_id(id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_scopes_by_role() {
        let seaorm = test_support::storage().await;
        let teacher_user = test_support::user(&seaorm, "tkollie", UserRole::Teacher).await;
        let parent_user = test_support::user(&seaorm, "pdoe", UserRole::Parent).await;
        let admin_user = test_support::user(&seaorm, "admin", UserRole::Admin).await;

        let teacher = seaorm
            .create_teacher(CreateTeacherRequest {
                employee_number: "T-001".into(),
                first_name: "Tina".into(),
                last_name: "Kollie".into(),
                user_id: Some(teacher_user),
                email: None,
                phone: None,
                subject_ids: vec![],
                qualification: None,
                hired_on: None,
            })
            .await
            .unwrap();
        let class = seaorm
            .create_class(CreateClassRequest {
                name: "Grade 9 A".into(),
                grade_level: "9".into(),
                section: Some("A".into()),
                academic_year: "2024/2025".into(),
                teacher_ids: vec![teacher.id],
                subject_ids: vec![],
                room: None,
                capacity: None,
            })
            .await
            .unwrap();
        let in_class = test_support::student(&seaorm, "S-1", Some(class.id)).await;
        let other = test_support::student(&seaorm, "S-2", None).await;

        let mut child = test_support::new_student("S-3", "Ama", "Doe");
        child.parent_user_id = Some(parent_user);
        let child = seaorm.create_student(child).await.unwrap();

        let storage: Arc<dyn Storage> = Arc::new(seaorm);

        let admin = resolve_scope(&storage, &current(&storage, admin_user).await)
            .await
            .unwrap();
        assert_eq!(admin, Scope::All);
        assert!(admin.allows_student(other));

        let scope = resolve_scope(&storage, &current(&storage, teacher_user).await)
            .await
            .unwrap();
        assert_eq!(scope.teacher_id(), Some(teacher.id));
        assert!(scope.manages_class(class.id));
        assert!(scope.allows_student(in_class));
        assert!(!scope.allows_student(other));

        let scope = resolve_scope(&storage, &current(&storage, parent_user).await)
            .await
            .unwrap();
        assert_eq!(scope.student_ids(), Some(vec![child.id]));
        assert!(!scope.manages_class(class.id));

        let teacher_account = current(&storage, teacher_user).await;
        let roster = storage.get_student_by_id(in_class).await.unwrap().unwrap();
        let outsider = storage.get_student_by_id(other).await.unwrap().unwrap();
        assert!(can_view_student(&storage, &teacher_account, &roster).await.unwrap());
        assert!(!can_view_student(&storage, &teacher_account, &outsider).await.unwrap());
        assert!(teaches_class(&storage, &teacher_account, class.id).await.unwrap());

        let parent_account = current(&storage, parent_user).await;
        assert!(can_view_student(&storage, &parent_account, &child).await.unwrap());
        assert!(!can_view_student(&storage, &parent_account, &roster).await.unwrap());
    }
}
