use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of characters shown in a history preview before the ellipsis
pub const PREVIEW_CHARS: usize = 80;

/// Current stage of the wizard
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Stage {
    #[default]
    SeedInput,
    SelectKeyword,
    SelectTitle,
    SelectTopic,
    ReviewContent,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Self::SeedInput,
        Self::SelectKeyword,
        Self::SelectTitle,
        Self::SelectTopic,
        Self::ReviewContent,
    ];

    /// Zero-based stage index
    pub fn index(&self) -> usize {
        match self {
            Self::SeedInput => 0,
            Self::SelectKeyword => 1,
            Self::SelectTitle => 2,
            Self::SelectTopic => 3,
            Self::ReviewContent => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Total number of stages
    pub fn total() -> usize {
        Self::ALL.len()
    }

    /// The stage a successful request from `self` lands on
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Stepper label
    pub fn label(&self) -> &'static str {
        match self {
            Self::SeedInput => "Enter Seed Keyword",
            Self::SelectKeyword => "Select Keyword",
            Self::SelectTitle => "Select Title",
            Self::SelectTopic => "Choose Topic",
            Self::ReviewContent => "Generate Content",
        }
    }

    /// Heading shown above the stage body
    pub fn title(&self) -> &'static str {
        match self {
            Self::SeedInput => "Enter a seed keyword",
            Self::SelectKeyword => "Step 1: Select a Keyword",
            Self::SelectTitle => "Step 2: Select a Title",
            Self::SelectTopic => "Step 3: Select a Topic",
            Self::ReviewContent => "Generated Content",
        }
    }

    /// Message shown when the request issued from this stage fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::SeedInput => "Failed to generate keywords. Please try again.",
            Self::SelectKeyword => "Failed to generate titles. Please try again.",
            Self::SelectTitle => "Failed to generate topics. Please try again.",
            Self::SelectTopic => "Failed to generate content. Please try again.",
            // Nothing is requested from the last stage
            Self::ReviewContent => "Request failed. Please try again.",
        }
    }

    /// Stages that present a pick list
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            Self::SelectKeyword | Self::SelectTitle | Self::SelectTopic
        )
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// All stage-scoped selection and result state for one session.
///
/// Fields are grouped by the stage that owns them. Entering a stage clears
/// everything owned by later stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WizardState {
    pub stage: Stage,

    /// SeedInput
    pub seed_keyword: String,

    /// SelectKeyword
    pub keyword_options: Vec<String>,
    pub selected_keyword: Option<String>,

    /// SelectTitle
    pub title_options: Vec<String>,
    pub selected_title: Option<String>,

    /// SelectTopic
    pub topic_options: Vec<String>,
    pub selected_topic: Option<String>,

    /// ReviewContent
    pub content: Option<String>,
    pub seo_score: Option<u32>,

    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every field owned by a stage later than `stage`
    pub fn clear_after(&mut self, stage: Stage) {
        if stage < Stage::SelectKeyword {
            self.keyword_options.clear();
            self.selected_keyword = None;
        }
        if stage < Stage::SelectTitle {
            self.title_options.clear();
            self.selected_title = None;
        }
        if stage < Stage::SelectTopic {
            self.topic_options.clear();
            self.selected_topic = None;
        }
        if stage < Stage::ReviewContent {
            self.content = None;
            self.seo_score = None;
        }
    }

    /// Options listed for `stage` (empty for stages without a pick list)
    pub fn options_for(&self, stage: Stage) -> &[String] {
        match stage {
            Stage::SelectKeyword => &self.keyword_options,
            Stage::SelectTitle => &self.title_options,
            Stage::SelectTopic => &self.topic_options,
            Stage::SeedInput | Stage::ReviewContent => &[],
        }
    }

    /// The value picked on `stage`, if any
    pub fn selection_for(&self, stage: Stage) -> Option<&str> {
        match stage {
            Stage::SelectKeyword => self.selected_keyword.as_deref(),
            Stage::SelectTitle => self.selected_title.as_deref(),
            Stage::SelectTopic => self.selected_topic.as_deref(),
            Stage::SeedInput | Stage::ReviewContent => None,
        }
    }
}

/// Generated article plus its score, as returned by the content endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub content: String,
    #[serde(rename = "seoScore")]
    pub seo_score: u32,
}

/// Parsed result of one stage request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagePayload {
    /// Newline-delimited candidates for the keyword, title and topic stages
    Candidates(Vec<String>),
    /// Final article for the content stage
    Content(GeneratedContent),
}

/// Identifies one in-flight request. Results carrying any other ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub id: u64,
    /// Stage the request was issued from
    pub stage: Stage,
}

/// The outbound call a ticket stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageInput {
    Keywords { keyword: String },
    Titles { keyword: String },
    Topics { title: String },
    Content { topic: String },
}

/// A ticket together with the call to make for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRequest {
    pub ticket: RequestTicket,
    pub input: StageInput,
}

/// Immutable snapshot taken each time an article is generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub seed_keyword: String,
    pub selected_keyword: String,
    pub selected_title: String,
    pub selected_topic: String,
    pub content: String,
    pub seo_score: u32,
}

impl HistoryEntry {
    /// First characters of the article for list views
    pub fn preview(&self) -> String {
        if self.content.is_empty() {
            return "No content".to_string();
        }
        let head: String = self.content.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}
