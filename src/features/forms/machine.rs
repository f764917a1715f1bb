//! Form validation and submission state machine shared by every flow.
//!
//! A [`Form`] owns its field state and moves through
//! `Editing -> Submitting -> Succeeded | Failed -> Editing`. Validation is
//! synchronous and runs on every mutation; submission is split into
//! [`Form::begin_submit`] (pre-flight guard) and [`Form::finish_submit`] so the
//! single external call happens outside the borrow of the form. `Submitting`
//! doubles as the in-flight guard: a second `begin_submit` is rejected.

use super::{
    field::{FieldSet, FormField},
    validation::{FieldError, MIN_PASSWORD_LENGTH},
};
use crate::app_lib::Translate;
use std::fmt;
use tracing::debug;

/// Describes the fields of one form and how each is validated.
pub trait FormSchema {
    type Field: Copy + Eq + fmt::Debug + 'static;

    /// Every field, in display order.
    const FIELDS: &'static [Self::Field];

    fn is_required(&self, field: Self::Field) -> bool;

    /// Computes the error for `field` from the current values. `shown` is true
    /// once the field was blurred or the form submitted.
    fn validate(
        &self,
        field: Self::Field,
        values: &FieldSet<Self::Field>,
        shown: bool,
    ) -> Option<FieldError>;

    /// Message key for an inline field error.
    fn message_key(&self, error: FieldError) -> &'static str;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

/// Why `begin_submit` refused to start a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// A submission is already in flight.
    InFlight,
    /// At least one field already showed an error when submit was pressed.
    InvalidFields,
    /// A required field is empty but showed no error yet.
    MissingRequired,
}

#[derive(Clone, Debug)]
pub struct Form<S: FormSchema> {
    schema: S,
    fields: FieldSet<S::Field>,
    submitted: bool,
    state: FormState,
}

impl<S: FormSchema> Form<S> {
    pub fn new(schema: S) -> Self {
        Self {
            schema,
            fields: FieldSet::new(S::FIELDS),
            submitted: false,
            state: FormState::Editing,
        }
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn has_submitted(&self) -> bool {
        self.submitted
    }

    pub fn values(&self) -> &FieldSet<S::Field> {
        &self.fields
    }

    pub fn field(&self, field: S::Field) -> Option<&FormField> {
        self.fields.get(field)
    }

    pub fn value(&self, field: S::Field) -> &str {
        self.fields.value(field)
    }

    pub fn error(&self, field: S::Field) -> Option<FieldError> {
        self.fields.get(field).and_then(|entry| entry.error)
    }

    /// Inline error text for `field`, resolved through `t`.
    pub fn error_message(&self, field: S::Field, t: &impl Translate) -> Option<String> {
        let min = MIN_PASSWORD_LENGTH.to_string();
        self.error(field)
            .map(|error| t.t_with(self.schema.message_key(error), &[("min", min.as_str())]))
    }

    /// Sets a value and recomputes every field's error, which covers
    /// dependents such as the confirmation match. Leaves a terminal state for
    /// `Editing`; an in-flight submission stays in flight.
    pub fn update_field(&mut self, field: S::Field, value: impl Into<String>) {
        let Some(entry) = self.fields.get_mut(field) else {
            return;
        };
        entry.value = value.into();
        if matches!(self.state, FormState::Succeeded | FormState::Failed) {
            self.state = FormState::Editing;
        }
        self.revalidate();
    }

    /// Marks a field as blurred.
    pub fn touch(&mut self, field: S::Field) {
        if let Some(entry) = self.fields.get_mut(field) {
            entry.touched = true;
        }
        self.revalidate();
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|(_, entry)| entry.error.is_some())
    }

    pub fn missing_required(&self) -> bool {
        self.fields
            .iter()
            .any(|(field, entry)| self.schema.is_required(field) && entry.is_empty())
    }

    /// True iff no field shows an error, every required field has a value and
    /// nothing is in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.has_errors() && !self.missing_required()
    }

    /// Runs the pre-flight checks and enters `Submitting` when they pass.
    /// Errors visible before the press are reported as invalid fields; the
    /// press then marks the form as submitted so gated errors become visible.
    ///
    /// # Errors
    /// Returns the [`Rejection`] that blocked the submission. Nothing changes
    /// for `InFlight`; the other rejections move the form to `Failed`.
    pub fn begin_submit(&mut self) -> Result<(), Rejection> {
        if self.is_submitting() {
            debug!("submission already in flight");
            return Err(Rejection::InFlight);
        }

        let had_errors = self.has_errors();
        self.submitted = true;
        self.revalidate();

        let rejection = if had_errors {
            Some(Rejection::InvalidFields)
        } else if self.missing_required() || self.has_errors() {
            Some(Rejection::MissingRequired)
        } else {
            None
        };

        if let Some(rejection) = rejection {
            debug!(?rejection, "submission blocked before sending");
            self.state = FormState::Failed;
            return Err(rejection);
        }

        self.state = FormState::Submitting;
        Ok(())
    }

    /// Enters `Submitting` for a call that does not use the form's fields,
    /// such as a third-party sign-in redirect. Only the in-flight guard applies.
    ///
    /// # Errors
    /// Returns `Rejection::InFlight` while another call is running.
    pub fn begin_redirect(&mut self) -> Result<(), Rejection> {
        if self.is_submitting() {
            return Err(Rejection::InFlight);
        }
        self.state = FormState::Submitting;
        Ok(())
    }

    /// Guards the external call started by `begin_submit` or `begin_redirect`.
    /// Dropping the guard without [`PendingSubmit::finish`], e.g. when the
    /// awaiting future is cancelled, records a failure.
    pub fn pending(&mut self) -> PendingSubmit<'_, S> {
        PendingSubmit { form: self }
    }

    /// Records the outcome of the external call started by `begin_submit` or
    /// `begin_redirect`.
    pub fn finish_submit(&mut self, succeeded: bool) {
        if !self.is_submitting() {
            return;
        }
        self.state = if succeeded {
            FormState::Succeeded
        } else {
            FormState::Failed
        };
        debug!(state = ?self.state, "submission finished");
    }

    fn revalidate(&mut self) {
        let snapshot = self.fields.clone();
        let submitted = self.submitted;
        for (field, entry) in self.fields.iter_mut() {
            let shown = submitted || entry.touched;
            entry.error = self.schema.validate(field, &snapshot, shown);
        }
    }
}

/// An in-flight submission; see [`Form::pending`].
#[must_use]
pub struct PendingSubmit<'a, S: FormSchema> {
    form: &'a mut Form<S>,
}

impl<S: FormSchema> PendingSubmit<'_, S> {
    pub fn finish(self, succeeded: bool) {
        self.form.finish_submit(succeeded);
    }
}

impl<S: FormSchema> Drop for PendingSubmit<'_, S> {
    fn drop(&mut self) {
        if self.form.is_submitting() {
            debug!("submission abandoned before finishing");
            self.form.finish_submit(false);
        }
    }
}
