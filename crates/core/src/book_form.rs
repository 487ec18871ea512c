//! The add-book form: two required text fields, author name and book name.
//!
//! Submitted values are trimmed before validation. A failed check yields a
//! [`BoundBookForm`] carrying the submitted values and one message per
//! offending field, so the page can be redisplayed as the user left it.

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::Validate;

/// Maximum length of author and book names, in characters.
///
/// Matches the `VARCHAR(64)` columns of `authors.name` and `books.name`.
pub const MAX_NAME_LEN: u64 = 64;

/// Form field carrying the author name.
pub const AUTHOR_FIELD: &str = "author_name";

/// Form field carrying the book title.
pub const BOOK_FIELD: &str = "book_name";

/// Raw form payload as posted by the browser.
///
/// Missing fields deserialize as empty strings so that an incomplete post
/// is reported as a validation failure rather than a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, max = MAX_NAME_LEN, message = "Please enter the author"))]
    pub author_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = MAX_NAME_LEN, message = "Please enter the book title"))]
    pub book_name: String,
}

/// A submission that passed validation. Both names are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSubmission {
    pub author_name: String,
    pub book_name: String,
}

/// A form bound to submitted values plus its validation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundBookForm {
    pub values: BookForm,
    errors: BTreeMap<String, String>,
}

impl BookForm {
    /// Copy of the form with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> BookForm {
        BookForm {
            author_name: self.author_name.trim().to_string(),
            book_name: self.book_name.trim().to_string(),
        }
    }

    /// Trim and validate the form.
    pub fn check(&self) -> Result<BookSubmission, BoundBookForm> {
        let values = self.trimmed();
        match values.validate() {
            Ok(()) => Ok(BookSubmission {
                author_name: values.author_name,
                book_name: values.book_name,
            }),
            Err(errs) => {
                let errors = errs
                    .field_errors()
                    .into_iter()
                    .map(|(field, list)| {
                        let message = list
                            .first()
                            .and_then(|e| e.message.as_ref())
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "Invalid value".to_string());
                        (field.to_string(), message)
                    })
                    .collect();
                Err(BoundBookForm { values, errors })
            }
        }
    }
}

impl BoundBookForm {
    /// An unsubmitted form.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A form showing previously submitted values without errors.
    pub fn with_values(values: BookForm) -> Self {
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
