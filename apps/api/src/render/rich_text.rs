//! Rich-text cells that mix two type sizes.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub font_size: f64,
    pub bold: bool,
}

impl TextRun {
    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Ordered runs. Never contains an empty run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RichText {
    runs: Vec<TextRun>,
}

impl RichText {
    /// `lead`, then `follow` on the next line. Blank parts are dropped along with the
    /// line break, so a missing secondary element yields a single run.
    pub fn two_line(lead: TextRun, follow: TextRun) -> Self {
        let mut runs = Vec::with_capacity(2);
        let lead_present = !lead.text.trim().is_empty();
        if lead_present {
            runs.push(lead);
        }
        if !follow.text.trim().is_empty() {
            let text = if lead_present {
                format!("\n{}", follow.text)
            } else {
                follow.text
            };
            runs.push(TextRun { text, ..follow });
        }
        Self { runs }
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Full name in large type; nationality in parentheses, small, on the line below.
pub fn name_with_nationality(name: &str, nationality: &str) -> RichText {
    let nationality = nationality.trim();
    let follow = if nationality.is_empty() {
        String::new()
    } else {
        format!("({nationality})")
    };
    RichText::two_line(TextRun::new(name, 16.0).bold(), TextRun::new(follow, 9.0))
}

/// Postal code in small type above the street address.
pub fn postal_address(postal_code: &str, street: &str) -> RichText {
    let postal_code = postal_code.trim();
    let lead = if postal_code.is_empty() {
        String::new()
    } else {
        format!("〒{postal_code}")
    };
    RichText::two_line(TextRun::new(lead, 9.0), TextRun::new(street, 11.0))
}
