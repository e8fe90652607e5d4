use std::fmt;

use feedback_types::Rating;

use crate::form::{FeedbackForm, FormStatus};

pub const PAGE_TITLE: &str = "We value your feedback";
pub const PAGE_SUBTITLE: &str = "Please let us know how we did.";
pub const ERROR_TEXT: &str = "Something went wrong. Please try again.";
pub const SUBMIT_LABEL: &str = "Submit Feedback";
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub id: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarButton {
    pub rating: Rating,
    /// Stars up to the selected rating are highlighted
    pub lit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub name: FieldView,
    pub stars: Vec<StarButton>,
    pub message: FieldView,
    pub submit: SubmitButton,
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationView {
    pub title: &'static str,
    pub text: &'static str,
    pub action: &'static str,
}

/// What the form shows for its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
    Entry(EntryView),
    Confirmation(ConfirmationView),
}

impl FormView {
    pub fn of(form: &FeedbackForm) -> Self {
        let status = form.status();
        if status == FormStatus::Success {
            return FormView::Confirmation(ConfirmationView {
                title: "Thank You!",
                text: "Your feedback has been received.",
                action: "Send another response",
            });
        }

        let draft = form.draft();
        let loading = status == FormStatus::Loading;
        FormView::Entry(EntryView {
            name: FieldView {
                id: "name",
                label: "Name (Optional)",
                placeholder: "John Doe",
                value: draft.name.clone(),
                required: false,
            },
            stars: Rating::ALL
                .iter()
                .map(|&rating| StarButton {
                    rating,
                    lit: rating <= draft.rating,
                })
                .collect(),
            message: FieldView {
                id: "message",
                label: "Feedback",
                placeholder: "Tell us what you think...",
                value: draft.message.clone(),
                required: true,
            },
            submit: SubmitButton {
                label: if loading { SENDING_LABEL } else { SUBMIT_LABEL },
                disabled: loading,
            },
            error: (status == FormStatus::Error).then_some(ERROR_TEXT),
        })
    }
}

impl fmt::Display for FieldView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = if self.value.is_empty() {
            format!("<{}>", self.placeholder)
        } else {
            self.value.clone()
        };
        let marker = if self.required { " *" } else { "" };
        write!(f, "{}{}: {}", self.label, marker, value)
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{PAGE_TITLE}")?;
        writeln!(f, "{PAGE_SUBTITLE}")?;
        writeln!(f)?;
        match self {
            FormView::Confirmation(c) => {
                writeln!(f, "{}", c.title)?;
                writeln!(f, "{}", c.text)?;
                write!(f, "[{}]", c.action)
            }
            FormView::Entry(e) => {
                writeln!(f, "{}", e.name)?;
                let stars: String = e
                    .stars
                    .iter()
                    .map(|s| if s.lit { '★' } else { '☆' })
                    .collect();
                writeln!(f, "Rating: {stars}")?;
                writeln!(f, "{}", e.message)?;
                let disabled = if e.submit.disabled { " (disabled)" } else { "" };
                write!(f, "[{}]{}", e.submit.label, disabled)?;
                if let Some(error) = e.error {
                    write!(f, "\n{error}")?;
                }
                Ok(())
            }
        }
    }
}
