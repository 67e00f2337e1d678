use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::ProfileName).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建考核表
        // unit_id / module_id / lesson_id 是课程结构的外部引用，不在本库建模
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessments::UnitId).big_integer().not_null())
                    .col(ColumnDef::new(Assessments::ModuleId).big_integer().null())
                    .col(ColumnDef::new(Assessments::LessonId).big_integer().null())
                    .col(
                        ColumnDef::new(Assessments::AssessmentType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::Title).string().not_null())
                    .col(ColumnDef::new(Assessments::Instructions).text().null())
                    .col(ColumnDef::new(Assessments::Points).double().not_null())
                    .col(ColumnDef::new(Assessments::DueDate).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assessments::ScheduledStart)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::ScheduledEnd)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::DurationMinutes)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::AllowLateSubmission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::ShowAnswersAfterSubmission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Questions::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Questions::QuestionText).text().not_null())
                    .col(ColumnDef::new(Questions::QuestionType).string().not_null())
                    .col(
                        ColumnDef::new(Questions::Points)
                            .double()
                            .not_null()
                            .default(1.0),
                    )
                    .col(
                        ColumnDef::new(Questions::SortOrder)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::AssessmentId)
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选择题选项表
        manager
            .create_table(
                Table::create()
                    .table(QuestionOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionOptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuestionOptions::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionOptions::OptionText)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionOptions::IsCorrect)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(QuestionOptions::SortOrder)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuestionOptions::Table, QuestionOptions::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建标准答案表
        manager
            .create_table(
                Table::create()
                    .table(Answers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Answers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Answers::QuestionId).big_integer().not_null())
                    .col(ColumnDef::new(Answers::AnswerText).text().null())
                    .col(ColumnDef::new(Answers::IsCorrectForTf).boolean().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answers::Table, Answers::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::Content).text().null())
                    .col(ColumnDef::new(Submissions::Grade).double().null())
                    .col(ColumnDef::new(Submissions::AutoGradedScore).double().null())
                    .col(ColumnDef::new(Submissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(Submissions::IsGraded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Submissions::IsLate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Submissions::IsZeroGraded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::GradedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssessmentId)
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生作答表
        manager
            .create_table(
                Table::create()
                    .table(StudentAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentAnswers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentAnswers::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAnswers::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAnswers::SelectedOptionId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(StudentAnswers::AnswerText).text().null())
                    .col(ColumnDef::new(StudentAnswers::PointsEarned).double().null())
                    .col(ColumnDef::new(StudentAnswers::IsCorrect).boolean().null())
                    .col(ColumnDef::new(StudentAnswers::Feedback).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAnswers::Table, StudentAnswers::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAnswers::Table, StudentAnswers::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // 选项被删除时只断开引用，不级联删除作答记录
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAnswers::Table, StudentAnswers::SelectedOptionId)
                            .to(QuestionOptions::Table, QuestionOptions::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 考核表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_unit_id")
                    .table(Assessments::Table)
                    .col(Assessments::UnitId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_module_id")
                    .table(Assessments::Table)
                    .col(Assessments::ModuleId)
                    .to_owned(),
            )
            .await?;

        // 题目表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_assessment_id")
                    .table(Questions::Table)
                    .col(Questions::AssessmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_question_options_question_id")
                    .table(QuestionOptions::Table)
                    .col(QuestionOptions::QuestionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_answers_question_id")
                    .table(Answers::Table)
                    .col(Answers::QuestionId)
                    .to_owned(),
            )
            .await?;

        // 提交表唯一索引：每个学生对每个考核至多一条提交
        // 重复提交由该约束在存储层拒绝，而非应用层先查后插
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_submissions_assessment_student")
                    .table(Submissions::Table)
                    .col(Submissions::AssessmentId)
                    .col(Submissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_student_id")
                    .table(Submissions::Table)
                    .col(Submissions::StudentId)
                    .to_owned(),
            )
            .await?;

        // 学生作答表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_answers_submission_id")
                    .table(StudentAnswers::Table)
                    .col(StudentAnswers::SubmissionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_answers_question_id")
                    .table(StudentAnswers::Table)
                    .col(StudentAnswers::QuestionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(StudentAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Answers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuestionOptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    ProfileName,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assessments {
    #[sea_orm(iden = "assessments")]
    Table,
    Id,
    UnitId,
    ModuleId,
    LessonId,
    AssessmentType,
    Title,
    Instructions,
    Points,
    DueDate,
    ScheduledStart,
    ScheduledEnd,
    DurationMinutes,
    AllowLateSubmission,
    IsApproved,
    ShowAnswersAfterSubmission,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    AssessmentId,
    QuestionText,
    QuestionType,
    Points,
    SortOrder,
}

#[derive(DeriveIden)]
enum QuestionOptions {
    #[sea_orm(iden = "question_options")]
    Table,
    Id,
    QuestionId,
    OptionText,
    IsCorrect,
    SortOrder,
}

#[derive(DeriveIden)]
enum Answers {
    #[sea_orm(iden = "answers")]
    Table,
    Id,
    QuestionId,
    AnswerText,
    IsCorrectForTf,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    AssessmentId,
    StudentId,
    Content,
    Grade,
    AutoGradedScore,
    Feedback,
    IsGraded,
    IsLate,
    IsZeroGraded,
    SubmittedAt,
    GradedAt,
}

#[derive(DeriveIden)]
enum StudentAnswers {
    #[sea_orm(iden = "student_answers")]
    Table,
    Id,
    SubmissionId,
    QuestionId,
    SelectedOptionId,
    AnswerText,
    PointsEarned,
    IsCorrect,
    Feedback,
}
