use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_core_tables::{Classes, Students, Subjects, Teachers, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::ClassId).big_integer().null())
                    .col(ColumnDef::new(Grades::TeacherId).big_integer().null())
                    .col(ColumnDef::new(Grades::AssessmentType).string().not_null())
                    .col(ColumnDef::new(Grades::Term).integer().not_null())
                    .col(ColumnDef::new(Grades::AcademicYear).string().not_null())
                    .col(ColumnDef::new(Grades::Score).double().not_null())
                    .col(ColumnDef::new(Grades::MaxScore).double().not_null())
                    .col(ColumnDef::new(Grades::Comment).text().null())
                    .col(ColumnDef::new(Grades::AssessedOn).string().not_null())
                    .col(ColumnDef::new(Grades::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考勤表
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Attendance::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attendance::ClassId).big_integer().null())
                    .col(ColumnDef::new(Attendance::Date).string().not_null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::Note).string().null())
                    .col(ColumnDef::new(Attendance::RecordedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Attendance::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendance::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::RecordedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一学生同一天只有一条考勤记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_student_date")
                    .table(Attendance::Table)
                    .col(Attendance::StudentId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建积分规则表
        manager
            .create_table(
                Table::create()
                    .table(PointRules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointRules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PointRules::Name).string().not_null())
                    .col(ColumnDef::new(PointRules::Description).text().null())
                    .col(ColumnDef::new(PointRules::ConditionType).string().not_null())
                    .col(ColumnDef::new(PointRules::Threshold).double().not_null())
                    .col(ColumnDef::new(PointRules::WindowDays).integer().not_null())
                    .col(ColumnDef::new(PointRules::Points).integer().not_null())
                    .col(ColumnDef::new(PointRules::Category).string().not_null())
                    .col(
                        ColumnDef::new(PointRules::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(PointRules::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(PointRules::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointRules::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PointRules::Table, PointRules::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建积分建议表
        manager
            .create_table(
                Table::create()
                    .table(PointSuggestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointSuggestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PointSuggestions::RuleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointSuggestions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PointSuggestions::Points).integer().not_null())
                    .col(ColumnDef::new(PointSuggestions::Reason).text().not_null())
                    .col(ColumnDef::new(PointSuggestions::Status).string().not_null())
                    .col(
                        ColumnDef::new(PointSuggestions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointSuggestions::ReviewedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PointSuggestions::ReviewedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PointSuggestions::Table, PointSuggestions::RuleId)
                            .to(PointRules::Table, PointRules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PointSuggestions::Table, PointSuggestions::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_point_suggestions_rule_student")
                    .table(PointSuggestions::Table)
                    .col(PointSuggestions::RuleId)
                    .col(PointSuggestions::StudentId)
                    .to_owned(),
            )
            .await?;

        // 创建积分流水表
        manager
            .create_table(
                Table::create()
                    .table(PointTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointTransactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PointTransactions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PointTransactions::Points).integer().not_null())
                    .col(ColumnDef::new(PointTransactions::Reason).text().not_null())
                    .col(ColumnDef::new(PointTransactions::Category).string().not_null())
                    .col(
                        ColumnDef::new(PointTransactions::AwardedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(PointTransactions::RuleId).big_integer().null())
                    .col(
                        ColumnDef::new(PointTransactions::SuggestionId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PointTransactions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PointTransactions::Table, PointTransactions::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PointTransactions::Table, PointTransactions::AwardedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PointTransactions::Table, PointTransactions::RuleId)
                            .to(PointRules::Table, PointRules::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建消息表
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::ThreadId).string().not_null())
                    .col(ColumnDef::new(Messages::SenderId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Messages::RecipientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Messages::Subject).string().not_null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(ColumnDef::new(Messages::ReadAt).big_integer().null())
                    .col(
                        ColumnDef::new(Messages::DeletedBySender)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Messages::DeletedByRecipient)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Messages::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::RecipientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_messages_recipient_id")
                    .table(Messages::Table)
                    .col(Messages::RecipientId)
                    .to_owned(),
            )
            .await?;

        // 创建校历事件表
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::EventType).string().not_null())
                    .col(ColumnDef::new(Events::StartDate).string().not_null())
                    .col(ColumnDef::new(Events::EndDate).string().not_null())
                    .col(
                        ColumnDef::new(Events::AllDay)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Events::Term).integer().null())
                    .col(ColumnDef::new(Events::AcademicYear).string().null())
                    .col(ColumnDef::new(Events::Source).string().not_null())
                    .col(ColumnDef::new(Events::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Events::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Events::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Events::Table, Events::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_start_date")
                    .table(Events::Table)
                    .col(Events::StartDate)
                    .to_owned(),
            )
            .await?;

        // 创建资料表
        manager
            .create_table(
                Table::create()
                    .table(Resources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Resources::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Resources::Title).string().not_null())
                    .col(ColumnDef::new(Resources::Description).text().null())
                    .col(ColumnDef::new(Resources::Category).string().not_null())
                    .col(ColumnDef::new(Resources::Url).string().not_null())
                    .col(ColumnDef::new(Resources::ClassId).big_integer().null())
                    .col(ColumnDef::new(Resources::SubjectId).big_integer().null())
                    .col(ColumnDef::new(Resources::Visibility).string().not_null())
                    .col(
                        ColumnDef::new(Resources::UploadedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Resources::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Resources::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Resources::Table, Resources::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Resources::Table, Resources::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Resources::Table, Resources::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PointTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PointSuggestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PointRules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    StudentId,
    SubjectId,
    ClassId,
    TeacherId,
    AssessmentType,
    Term,
    AcademicYear,
    Score,
    MaxScore,
    Comment,
    AssessedOn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    StudentId,
    ClassId,
    Date,
    Status,
    Note,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PointRules {
    #[sea_orm(iden = "point_rules")]
    Table,
    Id,
    Name,
    Description,
    ConditionType,
    Threshold,
    WindowDays,
    Points,
    Category,
    Active,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PointSuggestions {
    #[sea_orm(iden = "point_suggestions")]
    Table,
    Id,
    RuleId,
    StudentId,
    Points,
    Reason,
    Status,
    CreatedAt,
    ReviewedBy,
    ReviewedAt,
}

#[derive(DeriveIden)]
enum PointTransactions {
    #[sea_orm(iden = "point_transactions")]
    Table,
    Id,
    StudentId,
    Points,
    Reason,
    Category,
    AwardedBy,
    RuleId,
    SuggestionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    #[sea_orm(iden = "messages")]
    Table,
    Id,
    ThreadId,
    SenderId,
    RecipientId,
    Subject,
    Body,
    ReadAt,
    DeletedBySender,
    DeletedByRecipient,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Events {
    #[sea_orm(iden = "events")]
    Table,
    Id,
    Title,
    Description,
    EventType,
    StartDate,
    EndDate,
    AllDay,
    Term,
    AcademicYear,
    Source,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Resources {
    #[sea_orm(iden = "resources")]
    Table,
    Id,
    Title,
    Description,
    Category,
    Url,
    ClassId,
    SubjectId,
    Visibility,
    UploadedBy,
    CreatedAt,
    UpdatedAt,
}
