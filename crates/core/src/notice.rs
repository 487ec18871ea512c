//! One-shot messages shown to the user on the next rendered page.

/// Outcome of an add-book submission, as presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The form was not submitted, or failed validation.
    Prompt,
    /// A book with the same title already exists; nothing was written.
    Duplicate,
    /// The book (and possibly its author) was stored.
    Submitted,
    /// The write failed and was rolled back.
    Failed,
}

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl Notice {
    /// Text shown to the user. Never contains error details.
    pub fn message(self) -> &'static str {
        match self {
            Notice::Prompt => "Please enter the required content",
            Notice::Duplicate => "Book already exists, do not add a duplicate",
            Notice::Submitted => "Submission succeeded",
            Notice::Failed => "Submission failed",
        }
    }

    pub fn level(self) -> NoticeLevel {
        match self {
            Notice::Prompt => NoticeLevel::Info,
            Notice::Submitted => NoticeLevel::Success,
            Notice::Duplicate | Notice::Failed => NoticeLevel::Error,
        }
    }
}

impl NoticeLevel {
    /// CSS class name used by the page templates.
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice-info",
            NoticeLevel::Success => "notice-success",
            NoticeLevel::Error => "notice-error",
        }
    }
}
