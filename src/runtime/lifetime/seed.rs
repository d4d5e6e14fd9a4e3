//! 启动时的初始数据
//!
//! 空库时创建管理员；开启 `school.seed_default_users` 时额外创建一组演示账号
//! （教师、学生、家长）及其档案、科目和班级。

use std::sync::Arc;

use chrono::Datelike;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::events::entities::{academic_year_label, academic_year_start_for};
use crate::models::students::{entities::Gender, requests::CreateStudentRequest};
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::{generate_initial_password, hash_password};

const GENERATED_PASSWORD_LENGTH: usize = 16;

/// 优先读取环境变量，否则生成随机密码并打印
fn initial_password(env_key: &str, account: &str) -> String {
    std::env::var(env_key).unwrap_or_else(|_| {
        let pwd = generate_initial_password(GENERATED_PASSWORD_LENGTH);
        warn!("==========================================================");
        warn!("  {} NOT SET - USING GENERATED PASSWORD", env_key);
        warn!("  Generated {} password: {}", account, pwd);
        warn!("  Please save this password or set {}", env_key);
        warn!("==========================================================");
        pwd
    })
}

async fn create_account(
    storage: &Arc<dyn Storage>,
    username: &str,
    role: UserRole,
    display_name: &str,
    password: &str,
) -> Result<User> {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@schoolhub.local"),
            password: hash_password(password)?,
            role,
            display_name: Some(display_name.to_string()),
            avatar_url: None,
        })
        .await
}

/// 用户表为空时创建默认管理员
pub async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => info!("No users found in database, creating default admin account..."),
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let password = initial_password("ADMIN_PASSWORD", "admin");
    match create_account(storage, "admin", UserRole::Admin, "Administrator", &password).await {
        Ok(user) => info!(
            "Default admin account created (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 创建演示账号；`teacher` 用户已存在时跳过
pub async fn seed_demo_accounts(storage: &Arc<dyn Storage>) {
    match storage.get_user_by_username("teacher").await {
        Ok(Some(_)) => {
            debug!("Demo accounts already present, skipping demo seed");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            warn!("Failed to check demo accounts: {}, skipping demo seed", e);
            return;
        }
    }

    match create_demo_school(storage).await {
        Ok(()) => info!("Demo teacher, student and parent accounts created"),
        Err(e) => warn!("Failed to seed demo accounts: {}", e),
    }
}

async fn create_demo_school(storage: &Arc<dyn Storage>) -> Result<()> {
    let password = initial_password("DEMO_PASSWORD", "demo accounts");

    let teacher_user =
        create_account(storage, "teacher", UserRole::Teacher, "Demo Teacher", &password).await?;
    let student_user =
        create_account(storage, "student", UserRole::Student, "Demo Student", &password).await?;
    let parent_user =
        create_account(storage, "parent", UserRole::Parent, "Demo Parent", &password).await?;

    let mut subject_ids = Vec::new();
    for (code, name) in [("MATH", "Mathematics"), ("ENG", "English Language")] {
        let subject = storage
            .create_subject(CreateSubjectRequest {
                code: code.to_string(),
                name: name.to_string(),
                description: None,
                credits: Some(1),
            })
            .await?;
        subject_ids.push(subject.id);
    }

    let teacher = storage
        .create_teacher(CreateTeacherRequest {
            employee_number: "T-0001".to_string(),
            first_name: "Demo".to_string(),
            last_name: "Teacher".to_string(),
            user_id: Some(teacher_user.id),
            email: Some(teacher_user.email.clone()),
            phone: None,
            subject_ids: subject_ids.clone(),
            qualification: None,
            hired_on: None,
        })
        .await?;

    let today = chrono::Local::now().date_naive();
    let class = storage
        .create_class(CreateClassRequest {
            name: format!("Grade 7A {}", today.year()),
            grade_level: "7".to_string(),
            section: Some("A".to_string()),
            academic_year: academic_year_label(academic_year_start_for(today)),
            teacher_ids: vec![teacher.id],
            subject_ids,
            room: None,
            capacity: Some(40),
        })
        .await?;

    storage
        .create_student(CreateStudentRequest {
            student_number: "S-0001".to_string(),
            first_name: "Demo".to_string(),
            last_name: "Student".to_string(),
            gender: Gender::Other,
            date_of_birth: None,
            class_id: Some(class.id),
            user_id: Some(student_user.id),
            parent_user_id: Some(parent_user.id),
            guardian_name: Some("Demo Parent".to_string()),
            guardian_phone: None,
            address: None,
            enrolled_on: None,
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn memory_storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::connect_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_seed_admin_only_on_empty_database() {
        let storage = memory_storage().await;
        seed_admin(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);
        let admin = storage.get_user_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, UserRole::Admin);

        seed_admin(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_demo_accounts_links_records() {
        let storage = memory_storage().await;
        seed_demo_accounts(&storage).await;

        let parent = storage.get_user_by_username("parent").await.unwrap().unwrap();
        let children = storage.list_students_by_parent(parent.id).await.unwrap();
        assert_eq!(children.len(), 1);

        let teacher_user = storage.get_user_by_username("teacher").await.unwrap().unwrap();
        let teacher = storage
            .get_teacher_by_user_id(teacher_user.id)
            .await
            .unwrap()
            .unwrap();
        let classes = storage.list_classes_by_teacher(teacher.id).await.unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(children[0].class_id, Some(classes[0].id));

        // 再次执行不会重复创建
        seed_demo_accounts(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 3);
    }
}
