//! 学生档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Option<i64>,
    pub parent_user_id: Option<i64>,
    #[sea_orm(unique)]
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: Option<String>,
    pub class_id: Option<i64>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub status: String,
    pub points: i64,
    pub enrolled_on: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id",
        on_delete = "SetNull"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use super::{parse_date, timestamp_to_datetime};
        use crate::models::students::entities::{Gender, Student, StudentStatus};

        Student {
            id: self.id,
            user_id: self.user_id,
            parent_user_id: self.parent_user_id,
            student_number: self.student_number,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender.parse::<Gender>().unwrap_or(Gender::Other),
            date_of_birth: self.date_of_birth.as_deref().map(parse_date),
            class_id: self.class_id,
            guardian_name: self.guardian_name,
            guardian_phone: self.guardian_phone,
            address: self.address,
            status: self
                .status
                .parse::<StudentStatus>()
                .unwrap_or(StudentStatus::Active),
            points: self.points,
            enrolled_on: parse_date(&self.enrolled_on),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
