use crate::statics;
use std::fmt;
use thiserror::Error;

/// What a name or price check was about. Used to phrase validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Category,
    Model,
    Config,
    Price,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Subject::Category => statics::EN_SUBJECT_CATEGORY,
            Subject::Model => statics::EN_SUBJECT_MODEL,
            Subject::Config => statics::EN_SUBJECT_CONFIG,
            Subject::Price => statics::EN_SUBJECT_PRICE,
        })
    }
}

/// The input text is not syntactically valid structured data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid JSON format: {message}")]
    Malformed { message: String },
}

/// Well-formed input that does not have the shape of a price catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid data structure in JSON file at {path}: {reason}")]
pub struct SchemaError {
    pub path: String,
    pub reason: String,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Business-rule violation on a user-entered name or price.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("The {subject} name cannot be empty")]
    Empty { subject: Subject },

    #[error("A {subject} named \"{name}\" already exists")]
    Duplicate { subject: Subject, name: String },

    #[error("This field is required")]
    MissingRequired,

    #[error("The value must be a number, got \"{input}\"")]
    NotANumber { input: String },

    #[error("The price cannot be negative")]
    Negative,

    #[error("The value must be a finite number")]
    NotFinite,
}

/// A referenced category/model/configuration path is absent.
///
/// Deletes treat this as a no-op; adds and updates surface it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Category \"{category}\" does not exist")]
    Category { category: String },

    #[error("Model \"{model}\" does not exist in category \"{category}\"")]
    Model { category: String, model: String },

    #[error("Configuration \"{config}\" does not exist in \"{category}\" / \"{model}\"")]
    Config {
        category: String,
        model: String,
        config: String,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    #[error("Another deletion is awaiting confirmation")]
    AlreadyPending,

    #[error("No deletion is awaiting confirmation")]
    NothingPending,
}

/// Everything an editor intent can fail with. Each variant renders as a single
/// human-readable message.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("{}", statics::EN_ERR_NOTHING_TO_SAVE)]
    NothingToSave,

    #[error("{0:#}")]
    Io(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_subject() {
        let err = ValidationError::Empty {
            subject: Subject::Model,
        };
        assert_eq!(err.to_string(), "The model name cannot be empty");

        let err = ValidationError::Duplicate {
            subject: Subject::Config,
            name: "256GB".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "A configuration named \"256GB\" already exists"
        );
    }

    #[test]
    fn editor_error_is_transparent_over_causes() {
        let err: EditorError = NotFoundError::Category {
            category: "iPad".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Category \"iPad\" does not exist");

        let err = EditorError::Io(anyhow::anyhow!("disk full").context("writing \"x.json\""));
        assert_eq!(err.to_string(), "writing \"x.json\": disk full");
    }
}
