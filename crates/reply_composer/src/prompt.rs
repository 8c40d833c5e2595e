use std::fmt;

use history_store::RequestSnapshot;

const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Formal,
    Casual,
    Firm,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Formal, Tone::Casual, Tone::Firm];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Formal => "Formal",
            Self::Casual => "Casual",
            Self::Firm => "Firm",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyLength {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl ReplyLength {
    pub const ALL: [ReplyLength; 3] = [ReplyLength::Short, ReplyLength::Medium, ReplyLength::Detailed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Detailed => "Detailed",
        }
    }
}

impl fmt::Display for ReplyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composer form contents submitted for one generate call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplyRequest {
    pub original_email: String,
    pub sender_name: String,
    pub designation: String,
    pub company_name: String,
    pub tone: Tone,
    pub length: ReplyLength,
    pub context_notes: String,
}

impl ReplyRequest {
    /// True when the email field holds more than whitespace.
    pub fn has_email(&self) -> bool {
        !self.original_email.trim().is_empty()
    }

    /// Persisted copy of the form, fields kept as entered.
    pub fn to_snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            original_email: self.original_email.clone(),
            sender_name: self.sender_name.clone(),
            designation: self.designation.clone(),
            company_name: self.company_name.clone(),
            tone: self.tone.to_string(),
            length: self.length.to_string(),
            context_notes: self.context_notes.clone(),
        }
    }
}

/// Message sent to the agent for `request`.
///
/// Empty sender fields read as `Not provided`. The trailing context line is
/// left empty when no notes were given.
pub fn build_prompt(request: &ReplyRequest) -> String {
    let context = if request.context_notes.is_empty() {
        String::new()
    } else {
        format!("Additional Context: {}", request.context_notes)
    };

    format!(
        "Original Email:\n{email}\n\n\
         Sender Details:\n\
         - Name: {name}\n\
         - Designation: {designation}\n\
         - Company: {company}\n\n\
         Reply Preferences:\n\
         - Tone: {tone}\n\
         - Length: {length}\n\n\
         {context}",
        email = request.original_email,
        name = or_not_provided(&request.sender_name),
        designation = or_not_provided(&request.designation),
        company = or_not_provided(&request.company_name),
        tone = request.tone,
        length = request.length,
    )
}

fn or_not_provided(value: &str) -> &str {
    if value.is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}
