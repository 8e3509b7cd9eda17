//! Aliased re-exports of every entity, for call sites that touch several
//! of them at once.

pub use super::build::{
    ActiveModel as BuildActiveModel, Column as BuildColumn, Entity as Build, Model as BuildModel,
};
pub use super::configuration::{
    ActiveModel as ConfigurationActiveModel, Column as ConfigurationColumn,
    Entity as Configuration, Model as ConfigurationModel,
};
pub use super::job::{
    ActiveModel as JobActiveModel, Column as JobColumn, Entity as Job, Model as JobModel,
};
pub use super::test_case::{
    ActiveModel as TestCaseActiveModel, Column as TestCaseColumn, Entity as TestCase,
    Model as TestCaseModel,
};
pub use super::test_log::{
    ActiveModel as TestLogActiveModel, Column as TestLogColumn, Entity as TestLog,
    Model as TestLogModel,
};
