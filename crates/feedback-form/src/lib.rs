//! Client side of the feedback form: draft state, submission and what is shown to the user.
pub mod form;
pub mod transport;
pub mod view;

pub use form::{Draft, FeedbackForm, FormStatus, SubmitOutcome};
pub use transport::{HttpTransport, Transport, TransportError};
pub use view::FormView;
