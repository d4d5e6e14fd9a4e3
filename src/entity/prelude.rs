//! 预导入模块，方便使用

pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::events::{ActiveModel as EventActiveModel, Entity as Events, Model as EventModel};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::messages::{
    ActiveModel as MessageActiveModel, Entity as Messages, Model as MessageModel,
};
pub use super::point_rules::{
    ActiveModel as PointRuleActiveModel, Entity as PointRules, Model as PointRuleModel,
};
pub use super::point_suggestions::{
    ActiveModel as PointSuggestionActiveModel, Entity as PointSuggestions,
    Model as PointSuggestionModel,
};
pub use super::point_transactions::{
    ActiveModel as PointTransactionActiveModel, Entity as PointTransactions,
    Model as PointTransactionModel,
};
pub use super::resources::{
    ActiveModel as ResourceActiveModel, Entity as Resources, Model as ResourceModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
