//! Document metadata

use chrono::NaiveDateTime;

/// Document properties written to `docProps/core.xml` and `docProps/app.xml`
///
/// Every field is optional. `created` is never filled in automatically, so a
/// workbook built twice from the same calls serializes to the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub manager: Option<String>,
    pub company: Option<String>,
    pub category: Option<String>,
    pub keywords: Option<String>,
    pub comments: Option<String>,
    /// Creation time, interpreted as UTC
    pub created: Option<NaiveDateTime>,
}

impl DocProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_manager<S: Into<String>>(mut self, manager: S) -> Self {
        self.manager = Some(manager.into());
        self
    }

    pub fn with_company<S: Into<String>>(mut self, company: S) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_keywords<S: Into<String>>(mut self, keywords: S) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_comments<S: Into<String>>(mut self, comments: S) -> Self {
        self.comments = Some(comments.into());
        self
    }

    pub fn with_created(mut self, created: NaiveDateTime) -> Self {
        self.created = Some(created);
        self
    }

    /// `created` in the W3CDTF form used by core properties
    pub fn created_w3cdtf(&self) -> Option<String> {
        self.created
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
    }
}
