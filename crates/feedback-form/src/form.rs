use feedback_types::{Rating, Submission};
use tracing::{debug, error, warn};

use crate::transport::{Transport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    /// Request is in flight, submit control is disabled
    Loading,
    Success,
    Error,
}

/// Values the user is editing, not yet submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub rating: Rating,
    pub message: String,
}

impl Default for Draft {
    fn default() -> Self {
        Draft {
            name: String::new(),
            rating: Rating::DEFAULT,
            message: String::new(),
        }
    }
}

impl Draft {
    pub fn is_complete(&self) -> bool {
        !self.message.is_empty()
    }

    pub fn to_submission(&self) -> Submission {
        Submission::new(self.name.clone(), self.rating, self.message.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Failed,
    /// Nothing was sent, either a request is already in flight or the message is missing
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    draft: Draft,
    status: FormStatus,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn can_submit(&self) -> bool {
        self.status != FormStatus::Loading
    }

    pub fn update_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn update_rating(&mut self, rating: Rating) {
        self.draft.rating = rating;
    }

    pub fn update_message(&mut self, message: impl Into<String>) {
        self.draft.message = message.into();
    }

    /// Leaves the confirmation panel, fields were already cleared on success.
    pub fn send_another(&mut self) {
        if self.status == FormStatus::Success {
            self.status = FormStatus::Idle;
        }
    }

    /// First half of a submission: enters `Loading` and returns the payload to send.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            debug!("Submission already in progress");
            return None;
        }
        if !self.draft.is_complete() {
            debug!("Message is required");
            return None;
        }
        self.status = FormStatus::Loading;
        Some(self.draft.to_submission())
    }

    /// Second half of a submission: applies the result of the request.
    pub fn finish_submit(&mut self, result: Result<(), TransportError>) -> SubmitOutcome {
        if self.status != FormStatus::Loading {
            warn!("Submission result without pending submission, ignoring");
            return SubmitOutcome::Ignored;
        }
        match result {
            Ok(()) => {
                self.status = FormStatus::Success;
                self.draft = Draft::default();
                SubmitOutcome::Submitted
            }
            Err(e) => {
                match &e {
                    TransportError::Rejected { status, message } => {
                        error!(status, ?message, "Feedback was rejected by server")
                    }
                    TransportError::Network(cause) => {
                        error!("Feedback could not be delivered: {cause}")
                    }
                }
                self.status = FormStatus::Error;
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit<T: Transport>(&mut self, transport: &T) -> SubmitOutcome {
        match self.begin_submit() {
            Some(submission) => {
                let result = transport.send(&submission).await;
                self.finish_submit(result)
            }
            None => SubmitOutcome::Ignored,
        }
    }
}
