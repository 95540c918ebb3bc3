//! Search-grounded summaries for the legal pages.

/// Generative API client.
pub mod gemini;

pub use gemini::fetch;

/// Which legal page to summarize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegalPage {
    Privacy,
    Agreement,
}

impl LegalPage {
    /// Prompt sent to the model.
    pub fn query(self) -> &'static str {
        match self {
            LegalPage::Privacy => {
                "Search for and summarize the core principles of a standard Privacy Policy for an AI avatar application, focusing on biometric data protection and user rights."
            }
            LegalPage::Agreement => {
                "Search for and summarize the essential components of a User Agreement for content creators on platforms like YouTube, specifically regarding AI-generated media."
            }
        }
    }

    /// Search provider shown on the loading line.
    pub fn provider(self) -> &'static str {
        match self {
            LegalPage::Privacy => "Google",
            LegalPage::Agreement => "YouTube",
        }
    }
}

/// One citation returned with the summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// Summary text plus its citations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroundedContent {
    /// `None` when the model returned no text.
    pub text: Option<String>,
    pub sources: Vec<Source>,
}
