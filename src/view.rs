//! State of the student management console.
//!
//! Every operation is split into a `begin_*` step that decides what (if
//! anything) to send to the backend, and a `finish_*` step that folds the
//! backend's answer back into local state. Nothing in here performs I/O, so
//! the caller can release its lock while the request is in flight.

use crate::{
    data::student::{Student, StudentForm, StudentId, StudentPayload},
    error::{RosterError, RosterResult},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Load,
    Submit,
    Delete(StudentId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Added,
    Updated,
    Deleted,
    PasswordMismatch,
}

impl Notice {
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Added => "Student added successfully!",
            Self::Updated => "Student updated successfully!",
            Self::Deleted => "Student deleted successfully!",
            Self::PasswordMismatch => "Passwords do not match!",
        }
    }

    ///blocking notices stop the user rather than just informing them
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::PasswordMismatch)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<Option<bool>> for Confirmation {
    fn from(value: Option<bool>) -> Self {
        if value.unwrap_or(false) {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

#[derive(Debug)]
pub enum PendingSubmit {
    Create(StudentPayload),
    Update(StudentId, StudentPayload),
}

#[derive(Debug, Default)]
pub struct ManagementView {
    students: Vec<Student>,
    search_term: String,
    form: StudentForm,
    editing: Option<StudentId>,
    error: Option<String>,
    notice: Option<Notice>,
    in_flight: Vec<Operation>,
}

impl ManagementView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub const fn form(&self) -> &StudentForm {
        &self.form
    }

    pub const fn editing(&self) -> Option<&StudentId> {
        self.editing.as_ref()
    }

    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    ///notices are shown once
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn in_flight(&self) -> &[Operation] {
        &self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.contains(&Operation::Load)
    }

    pub fn find(&self, raw_id: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|student| student.id.to_string() == raw_id)
    }

    /// The records whose name or email contain the search term, ignoring
    /// case. Recomputed on every call.
    pub fn filtered(&self) -> Vec<&Student> {
        let term = self.search_term.to_lowercase();
        self.students
            .iter()
            .filter(|student| student.matches(&term))
            .collect()
    }

    fn start(&mut self, operation: Operation) {
        self.in_flight.push(operation);
    }

    fn end(&mut self, operation: &Operation) {
        if let Some(index) = self.in_flight.iter().position(|op| op == operation) {
            self.in_flight.remove(index);
        }
    }

    pub fn begin_load(&mut self) {
        self.start(Operation::Load);
    }

    pub fn finish_load(&mut self, result: RosterResult<Vec<Student>>) {
        match result {
            Ok(students) => {
                info!(count = students.len(), "Loaded students");
                self.students = students;
            }
            Err(e) => self.fail("Error fetching students: ", &e),
        }
        self.end(&Operation::Load);
    }

    /// Starts a create. The form decides this, never edit-mode, so an add
    /// form posted while some record is being edited still creates.
    pub fn begin_create(&mut self, form: StudentForm) -> Option<PendingSubmit> {
        self.begin_submit(form, None)
    }

    /// Starts an update of the record the edit form was rendered for.
    pub fn begin_update(
        &mut self,
        raw_id: &str,
        form: StudentForm,
    ) -> RosterResult<Option<PendingSubmit>> {
        let Some(id) = self.find(raw_id).map(|student| student.id.clone()) else {
            return Err(RosterError::MissingStudent { id: raw_id.into() });
        };
        Ok(self.begin_submit(form, Some(id)))
    }

    // a mismatch never reaches the backend; it raises a blocking notice instead
    fn begin_submit(
        &mut self,
        form: StudentForm,
        target: Option<StudentId>,
    ) -> Option<PendingSubmit> {
        if !form.passwords_match() {
            warn!("Refusing to submit student form with mismatched passwords");
            self.notice = Some(Notice::PasswordMismatch);
            self.form = StudentForm {
                password: StudentForm::default().password,
                confirm_password: StudentForm::default().confirm_password,
                ..form
            };
            return None;
        }

        let pending = match target {
            Some(id) => PendingSubmit::Update(id.clone(), form.to_payload(Some(id))),
            None => PendingSubmit::Create(form.to_payload(None)),
        };

        self.form = form;
        self.start(Operation::Submit);
        Some(pending)
    }

    pub fn finish_submit(&mut self, pending: &PendingSubmit, result: RosterResult<Student>) {
        match (pending, result) {
            (PendingSubmit::Update(id, _), Ok(updated)) => {
                info!(%id, "Updated student");
                for student in &mut self.students {
                    if &student.id == id {
                        *student = updated.clone();
                    }
                }
                self.notice = Some(Notice::Updated);
                self.reset_form();
            }
            (PendingSubmit::Create(_), Ok(created)) => {
                info!(id = %created.id, "Added student");
                self.students.push(created);
                self.notice = Some(Notice::Added);
                self.reset_form();
            }
            (_, Err(e)) => self.fail("Error: ", &e),
        }
        self.end(&Operation::Submit);
    }

    /// Copies a record into the form and switches to edit-mode. Returns
    /// `false` if the record isn't in the list.
    pub fn edit(&mut self, raw_id: &str) -> bool {
        let Some((form, id)) = self
            .find(raw_id)
            .map(|student| (StudentForm::from_student(student), student.id.clone()))
        else {
            return false;
        };

        self.form = form;
        self.editing = Some(id);
        true
    }

    pub fn reset_form(&mut self) {
        self.form = StudentForm::default();
        self.editing = None;
    }

    /// Back to what a freshly opened page shows. The record list and any
    /// in-flight markers are left alone; the next load replaces the list.
    pub fn remount(&mut self) {
        self.reset_form();
        self.search_term.clear();
        self.error = None;
        self.notice = None;
    }

    /// A declined delete is a no-op even for ids that aren't listed.
    pub fn begin_delete(
        &mut self,
        raw_id: &str,
        confirmation: Confirmation,
    ) -> RosterResult<Option<StudentId>> {
        if confirmation == Confirmation::Declined {
            debug!(raw_id, "Delete declined");
            return Ok(None);
        }

        let Some(id) = self.find(raw_id).map(|student| student.id.clone()) else {
            return Err(RosterError::MissingStudent { id: raw_id.into() });
        };

        self.start(Operation::Delete(id.clone()));
        Ok(Some(id))
    }

    pub fn finish_delete(&mut self, id: &StudentId, result: RosterResult<()>) {
        match result {
            Ok(()) => {
                info!(%id, "Deleted student");
                self.students.retain(|student| &student.id != id);
                self.notice = Some(Notice::Deleted);
            }
            Err(e) => self.fail("Error deleting student: ", &e),
        }
        self.end(&Operation::Delete(id.clone()));
    }

    fn fail(&mut self, prefix: &str, error: &RosterError) {
        warn!(?error, "Backend operation failed");
        self.error = Some(format!("{prefix}{}", error.user_message()));
    }
}
