//! Shared form core: pure validators, the password strength scorer, field
//! state and the validation/submission state machine. Login and registration
//! differ only in their [`FormSchema`] and in how they read the response of
//! their single external call.

pub mod field;
pub mod machine;
pub mod strength;
pub mod submission;
pub mod validation;

pub use field::{FieldSet, FormField};
pub use machine::{Form, FormSchema, FormState, PendingSubmit, Rejection};
pub use strength::{PasswordStrength, StrengthMeter, StrengthTone};
pub use submission::{FailureReason, Outcome, SubmissionResult};
pub use validation::{FieldError, PasswordPolicy};
