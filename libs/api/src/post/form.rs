use entity::prelude::*;
use notion::{PostDraft, SubmitError};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::response::IntoNotice;

use super::request::PostFormFields;

pub const CONFIRMATION: &str = "Post added to Notion!";

/// Lifecycle of one submission:
/// `Idle -> Validating -> {Submitting -> {Succeeded, Failed}, ValidationFailed}`,
/// after which the form returns to `Idle`.
#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    Idle,
    Validating,
    ValidationFailed,
    Submitting,
    Succeeded,
    Failed,
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub state: FormState,
    pub message: String,
    pub page_id: Option<String>,
    pub write_status: Option<u16>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostForm {
    state: FormState,
    fields: PostFormFields,
    outcome: Option<Outcome>,
}

impl PostForm {
    pub fn new(fields: PostFormFields) -> Self {
        Self {
            state: FormState::Idle,
            fields,
            outcome: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn fields(&self) -> &PostFormFields {
        &self.fields
    }

    /// Returns the post to write when every field parses. Otherwise the form
    /// stops in `ValidationFailed`.
    pub fn validate(&mut self) -> Option<PostRecord> {
        if self.state != FormState::Idle {
            warn!(task = "validate form", state = ?self.state, "form is busy");
            return None;
        }
        self.state = FormState::Validating;

        let draft = PostDraft::from(self.fields.clone());
        match draft.validate() {
            Ok(record) => {
                self.state = FormState::Submitting;
                Some(record)
            }
            Err(e) => {
                self.state = FormState::ValidationFailed;
                self.outcome = Some(Outcome {
                    state: FormState::ValidationFailed,
                    message: e.to_string(),
                    page_id: None,
                    write_status: None,
                });
                None
            }
        }
    }

    /// Records the result of the write started by [`PostForm::validate`].
    pub fn complete(&mut self, result: Result<String, SubmitError>) {
        if self.state != FormState::Submitting {
            warn!(task = "complete form", state = ?self.state, "nothing was submitted");
            return;
        }

        let outcome = match result {
            Ok(page_id) => Outcome {
                state: FormState::Succeeded,
                message: CONFIRMATION.to_string(),
                page_id: Some(page_id),
                write_status: None,
            },
            Err(e) => {
                let write_status = match &e {
                    SubmitError::Write { status, .. } => Some(*status),
                    _ => None,
                };
                let message = match e {
                    e @ SubmitError::Write { .. } => e.to_string(),
                    e @ SubmitError::NoDatabase { .. } => e.into_notice("404-001"),
                    e => e.into_notice("502-002"),
                };
                Outcome {
                    state: FormState::Failed,
                    message,
                    page_id: None,
                    write_status,
                }
            }
        };

        self.state = outcome.state;
        self.outcome = Some(outcome);
    }

    /// Returns the form to `Idle`. A successful submission clears the fields
    /// back to their defaults; failures keep what was typed.
    pub fn finish(mut self) -> (Self, Option<Outcome>) {
        if self.state == FormState::Succeeded {
            self.fields = PostFormFields::default();
        }
        self.state = FormState::Idle;
        let outcome = self.outcome.take();

        (self, outcome)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fields() -> PostFormFields {
        PostFormFields {
            title: "Q2 numbers".to_string(),
            platform: "X".to_string(),
            post_type: "Image".to_string(),
            content_type: "Data Insights".to_string(),
            date: "2024-07-01".to_string(),
            reach: "5,000".to_string(),
            likes: "40".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_success_resets_fields() {
        // Arrange
        let mut form = PostForm::new(fields());

        // Act
        let record = form.validate();
        assert_eq!(form.state(), FormState::Submitting);
        form.complete(Ok("page-1".to_string()));
        assert_eq!(form.state(), FormState::Succeeded);
        let (form, outcome) = form.finish();

        // Assert
        assert_eq!(record.map(|r| r.reach), Some(5000));
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.fields(), &PostFormFields::default());
        let outcome = outcome.unwrap();
        assert_eq!(outcome.state, FormState::Succeeded);
        assert_eq!(outcome.message, CONFIRMATION);
        assert_eq!(outcome.page_id.as_deref(), Some("page-1"));
    }

    #[test]
    fn test_validation_failure_keeps_fields() {
        // Arrange
        let typed = PostFormFields {
            reach: "abc".to_string(),
            ..fields()
        };
        let mut form = PostForm::new(typed.clone());

        // Act
        let record = form.validate();
        let (form, outcome) = form.finish();

        // Assert
        assert!(record.is_none());
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.fields(), &typed);
        let outcome = outcome.unwrap();
        assert_eq!(outcome.state, FormState::ValidationFailed);
        assert!(outcome.message.contains("Reach"));
    }

    #[test]
    fn test_write_failure_keeps_fields_and_message() {
        // Arrange
        let mut form = PostForm::new(fields());
        form.validate();

        // Act
        form.complete(Err(SubmitError::Write {
            status: 400,
            message: "body failed validation".to_string(),
        }));
        let (form, outcome) = form.finish();

        // Assert
        assert_eq!(form.fields(), &fields());
        let outcome = outcome.unwrap();
        assert_eq!(outcome.state, FormState::Failed);
        assert_eq!(outcome.write_status, Some(400));
        assert_eq!(outcome.message, "Error 400: body failed validation");
    }

    #[test]
    fn test_complete_without_submitting_is_ignored() {
        let mut form = PostForm::new(fields());

        form.complete(Ok("page-1".to_string()));

        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.finish().1, None);
    }
}
