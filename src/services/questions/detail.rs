use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use super::list::option_view;
use crate::middlewares::RequireJWT;
use crate::models::questions::responses::QuestionDetail;
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let (question, options) = match storage.get_question_with_options(question_id).await {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "题目不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询题目失败: {e}"),
                )),
            );
        }
    };

    let is_author = current_user
        .role
        .has_capability(Capability::AuthorQuestions);

    // 学生视角：题目所属考核必须已开放
    if !is_author {
        match storage.get_assessment_by_id(question.assessment_id).await {
            Ok(Some(assessment)) if assessment.is_available(chrono::Utc::now()) => {}
            Ok(_) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::QuestionNotFound,
                    "题目不存在",
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
        }
    }

    // 标准答案仅出题人可见
    let canonical_answer = if is_author {
        match storage.get_canonical_answer(question_id).await {
            Ok(answer) => answer,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询标准答案失败: {e}"),
                    )),
                );
            }
        }
    } else {
        None
    };

    let detail = QuestionDetail {
        question,
        options: options
            .into_iter()
            .map(|o| option_view(o, is_author))
            .collect(),
        canonical_answer,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功")))
}
