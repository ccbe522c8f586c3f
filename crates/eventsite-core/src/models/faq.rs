use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateFaqRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Question is required"))]
    pub question: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Answer is required"))]
    pub answer: String,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateFaqRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Question must not be empty"))]
    pub question: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Answer must not be empty"))]
    pub answer: Option<String>,
}

impl CreateFaqRequest {
    pub fn into_draft(self) -> Faq {
        let now = Utc::now();
        Faq {
            id: 0,
            question: self.question,
            answer: self.answer,
            created_at: now,
            updated_at: now,
        }
    }
}

impl UpdateFaqRequest {
    pub fn apply_to(self, faq: &mut Faq) {
        if let Some(question) = self.question {
            faq.question = question;
        }
        if let Some(answer) = self.answer {
            faq.answer = answer;
        }
    }
}
