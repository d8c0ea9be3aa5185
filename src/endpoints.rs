//! Relative paths of every backend resource the console knows about.
//!
//! Only the student paths are driven by the console itself; the progress and
//! event paths belong to sibling views and are kept here so every backend path
//! lives in one place.

use std::{borrow::Cow, fmt};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Section {
    Student,
    Progress,
    Event,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Endpoint<'a> {
    Login,
    Register,
    DisplayStudents,
    StudentById(&'a str),
    UpdateStudent(&'a str),
    DeleteStudent(&'a str),

    ProgressByStudent(&'a str),
    SaveProgress,
    AllProgress,
    UpdateProgress(&'a str),
    DeleteProgress(&'a str),

    AllEvents,
    SearchEvent(&'a str),
    CreateEvent,
    UpdateEvent(&'a str),
    DeleteEvent(&'a str),
}

impl Endpoint<'_> {
    pub fn path(&self) -> Cow<'static, str> {
        let (prefix, id) = match self {
            Self::Login => return Cow::Borrowed(""),
            Self::Register => return Cow::Borrowed("student/register"),
            Self::DisplayStudents => return Cow::Borrowed("student/all"),
            Self::StudentById(id) => ("student/search_student", id),
            Self::UpdateStudent(id) => ("student/updateStudent", id),
            Self::DeleteStudent(id) => ("student/deleteStudent", id),

            Self::ProgressByStudent(id) => ("task-progress/student", id),
            Self::SaveProgress => return Cow::Borrowed("task-progress/save_progress"),
            Self::AllProgress => return Cow::Borrowed("task-progress/all_progress"),
            Self::UpdateProgress(id) => ("task-progress/update", id),
            Self::DeleteProgress(id) => ("task-progress/delete", id),

            Self::AllEvents => return Cow::Borrowed("events/all_events"),
            Self::SearchEvent(id) => ("events/all_events", id),
            Self::CreateEvent => return Cow::Borrowed("events/create_events"),
            Self::UpdateEvent(id) => ("events/update", id),
            Self::DeleteEvent(id) => ("events/delete", id),
        };

        Cow::Owned(format!("{prefix}/{id}"))
    }

    pub const fn section(&self) -> Section {
        match self {
            Self::Login
            | Self::Register
            | Self::DisplayStudents
            | Self::StudentById(_)
            | Self::UpdateStudent(_)
            | Self::DeleteStudent(_) => Section::Student,
            Self::ProgressByStudent(_)
            | Self::SaveProgress
            | Self::AllProgress
            | Self::UpdateProgress(_)
            | Self::DeleteProgress(_) => Section::Progress,
            Self::AllEvents
            | Self::SearchEvent(_)
            | Self::CreateEvent
            | Self::UpdateEvent(_)
            | Self::DeleteEvent(_) => Section::Event,
        }
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
