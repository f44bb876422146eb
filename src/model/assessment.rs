use serde::{Deserialize, Serialize};

/// An assessment made up of ordered categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    #[serde(rename = "_id")]
    pub id: String,
    pub test_name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A named section of a test, scored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub category_name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Test {
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.category_name == name)
    }

    /// Number of questions across all categories.
    pub fn total_questions(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }
}
