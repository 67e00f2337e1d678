//! 预导入模块，方便使用

pub use super::answers::{
    ActiveModel as AnswerActiveModel, Entity as Answers, Model as AnswerModel,
};
pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::question_options::{
    ActiveModel as QuestionOptionActiveModel, Entity as QuestionOptions,
    Model as QuestionOptionModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::student_answers::{
    ActiveModel as StudentAnswerActiveModel, Entity as StudentAnswers,
    Model as StudentAnswerModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
