use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier. The backend may hand out numbers or strings, so
/// both are accepted and sent back in the shape they arrived in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub full_name: String,
    pub phone: String,
    pub email: String,
}

impl Student {
    ///case-insensitive substring match against name and email
    pub fn matches(&self, lowercase_term: &str) -> bool {
        self.full_name.to_lowercase().contains(lowercase_term)
            || self.email.to_lowercase().contains(lowercase_term)
    }
}

/// Form state shared by the create and edit flows. Passwords stay secret and
/// are never rendered back into the page.
#[derive(Debug, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
    #[serde(default = "empty_secret")]
    pub confirm_password: SecretString,
}

fn empty_secret() -> SecretString {
    SecretString::from("")
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone: String::new(),
            email: String::new(),
            password: empty_secret(),
            confirm_password: empty_secret(),
        }
    }
}

impl StudentForm {
    pub fn from_student(student: &Student) -> Self {
        Self {
            full_name: student.full_name.clone(),
            phone: student.phone.clone(),
            email: student.email.clone(),
            ..Self::default()
        }
    }

    pub fn passwords_match(&self) -> bool {
        self.password.expose_secret() == self.confirm_password.expose_secret()
    }

    /// Builds what actually goes over the wire. The confirmation never leaves
    /// the console and an empty password is left out entirely.
    pub fn to_payload(&self, id: Option<StudentId>) -> StudentPayload {
        let password = self.password.expose_secret();

        StudentPayload {
            id,
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            password: if password.is_empty() {
                None
            } else {
                Some(SecretString::from(password))
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<StudentId>,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_password"
    )]
    pub password: Option<SecretString>,
}

#[allow(clippy::ref_option)]
fn serialize_password<S: serde::Serializer>(
    password: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match password {
        Some(password) => serializer.serialize_str(password.expose_secret()),
        None => serializer.serialize_none(),
    }
}
