//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub grade_level: String,
    pub section: Option<String>,
    pub academic_year: String,
    // JSON 数组
    #[sea_orm(column_type = "Text")]
    pub teacher_ids: String,
    // JSON 数组
    #[sea_orm(column_type = "Text")]
    pub subject_ids: String,
    pub room: Option<String>,
    pub capacity: Option<i32>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_class(self) -> crate::models::classes::entities::SchoolClass {
        use super::{parse_id_list, timestamp_to_datetime};
        use crate::models::classes::entities::SchoolClass;

        SchoolClass {
            id: self.id,
            name: self.name,
            grade_level: self.grade_level,
            section: self.section,
            academic_year: self.academic_year,
            teacher_ids: parse_id_list(&self.teacher_ids),
            subject_ids: parse_id_list(&self.subject_ids),
            room: self.room,
            capacity: self.capacity,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
