//! 教师档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Option<i64>,
    #[sea_orm(unique)]
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    // JSON 数组
    #[sea_orm(column_type = "Text")]
    pub subject_ids: String,
    pub qualification: Option<String>,
    pub status: String,
    pub hired_on: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(self) -> crate::models::teachers::entities::Teacher {
        use super::{parse_date, parse_id_list, timestamp_to_datetime};
        use crate::models::teachers::entities::{Teacher, TeacherStatus};

        Teacher {
            id: self.id,
            user_id: self.user_id,
            employee_number: self.employee_number,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            subject_ids: parse_id_list(&self.subject_ids),
            qualification: self.qualification,
            status: self
                .status
                .parse::<TeacherStatus>()
                .unwrap_or(TeacherStatus::Active),
            hired_on: self.hired_on.as_deref().map(parse_date),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
