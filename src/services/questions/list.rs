use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::middlewares::RequireJWT;
use crate::models::questions::entities::QuestionOption;
use crate::models::questions::responses::{
    QuestionDetail, QuestionListResponse, QuestionOptionView,
};
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};

pub(super) fn option_view(option: QuestionOption, reveal_correctness: bool) -> QuestionOptionView {
    QuestionOptionView {
        id: option.id,
        option_text: option.option_text,
        is_correct: reveal_correctness.then_some(option.is_correct),
        sort_order: option.sort_order,
    }
}

pub async fn list_questions(
    service: &QuestionService,
    request: &HttpRequest,
    assessment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let assessment = match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(assessment)) => assessment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssessmentNotFound,
                "考核不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询考核失败: {e}"),
                )),
            );
        }
    };

    // 出题方看全部；学生只看到已开放的考核题目，且不暴露选项正确性
    let is_author = current_user
        .role
        .has_capability(Capability::AuthorQuestions);
    if !is_author && !assessment.is_available(chrono::Utc::now()) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "考核不存在",
        )));
    }

    match storage.list_questions_by_assessment(assessment_id).await {
        Ok(questions) => {
            let items = questions
                .into_iter()
                .map(|(question, options)| QuestionDetail {
                    question,
                    options: options
                        .into_iter()
                        .map(|o| option_view(o, is_author))
                        .collect(),
                    canonical_answer: None,
                })
                .collect();

            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(QuestionListResponse { items }, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询题目列表失败: {e}"),
            )),
        ),
    }
}
