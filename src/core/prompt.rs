//! Interactive prompt capability
//!
//! The logger never talks to a terminal itself; `Logger::prompt` forwards to
//! whatever [`Prompter`] it was configured with.

use super::error::Result;
use serde::{Deserialize, Serialize};

/// Kind of answer being asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromptKind {
    Text {
        default: Option<String>,
        placeholder: Option<String>,
    },
    Confirm {
        initial: bool,
    },
    Select {
        options: Vec<String>,
        initial: Option<String>,
    },
    Multiselect {
        options: Vec<String>,
        required: bool,
    },
}

impl Default for PromptKind {
    fn default() -> Self {
        PromptKind::Text {
            default: None,
            placeholder: None,
        }
    }
}

/// What to do when the user cancels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelStrategy {
    /// Return the default / initial value
    #[default]
    Default,
    /// Return `PromptAnswer::Cancelled`
    Null,
    /// Return an error
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOptions {
    #[serde(flatten)]
    pub kind: PromptKind,
    #[serde(default)]
    pub cancel: CancelStrategy,
}

impl PromptOptions {
    pub fn text() -> Self {
        Self::default()
    }

    pub fn confirm(initial: bool) -> Self {
        Self {
            kind: PromptKind::Confirm { initial },
            ..Default::default()
        }
    }

    pub fn select<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: PromptKind::Select {
                options: options.into_iter().map(Into::into).collect(),
                initial: None,
            },
            ..Default::default()
        }
    }

    pub fn multiselect<I, S>(options: I, required: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: PromptKind::Multiselect {
                options: options.into_iter().map(Into::into).collect(),
                required,
            },
            ..Default::default()
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_cancel(mut self, cancel: CancelStrategy) -> Self {
        self.cancel = cancel;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAnswer {
    Text(String),
    Confirm(bool),
    Select(String),
    Multiselect(Vec<String>),
    Cancelled,
}

/// Something that can ask the user a question
pub trait Prompter: Send + Sync {
    fn prompt(&self, message: &str, options: &PromptOptions) -> Result<PromptAnswer>;
}

impl<F> Prompter for F
where
    F: Fn(&str, &PromptOptions) -> Result<PromptAnswer> + Send + Sync,
{
    fn prompt(&self, message: &str, options: &PromptOptions) -> Result<PromptAnswer> {
        self(message, options)
    }
}
