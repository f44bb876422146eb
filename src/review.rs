//! Answering a test and reviewing per-category results.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Marks, Test};

/// The option a student picked for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedAnswer {
    pub answer: String,
    pub submitted: bool,
}

/// A student's answers, per category and question id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: HashMap<String, HashMap<String, SelectedAnswer>>,
}

/// Correct answers in a category and the share of its questions they cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub score: u32,
    /// Two decimal places, e.g. `"66.67"`.
    pub percentage: String,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str, question_id: &str) -> Option<&SelectedAnswer> {
        self.answers.get(category)?.get(question_id)
    }

    /// Pick `option` for a question. Picking again replaces the answer and
    /// clears its submitted flag.
    pub fn select(&mut self, category: &str, question_id: &str, option: &str) {
        self.answers
            .entry(category.to_string())
            .or_default()
            .insert(
                question_id.to_string(),
                SelectedAnswer {
                    answer: option.to_string(),
                    submitted: false,
                },
            );
    }

    /// Flip the submitted flag. Un-submitting clears the answer.
    pub fn toggle_submitted(&mut self, category: &str, question_id: &str) {
        let entry = self
            .answers
            .entry(category.to_string())
            .or_default()
            .entry(question_id.to_string())
            .or_default();
        if entry.submitted {
            entry.submitted = false;
            entry.answer.clear();
        } else {
            entry.submitted = true;
        }
    }

    /// Names of categories whose every question has been submitted, in test
    /// order.
    pub fn completed_categories(&self, test: &Test) -> Vec<String> {
        test.categories
            .iter()
            .filter(|c| {
                c.questions.iter().all(|q| {
                    self.get(&c.category_name, &q.id)
                        .is_some_and(|a| a.submitted)
                })
            })
            .map(|c| c.category_name.clone())
            .collect()
    }

    /// Whether every category of `test` is complete.
    pub fn is_complete(&self, test: &Test) -> bool {
        self.completed_categories(test).len() == test.categories.len()
    }

    /// Correct answers per category, as sent to the API on submission.
    pub fn compute_marks(&self, test: &Test) -> Marks {
        test.categories
            .iter()
            .map(|c| (c.category_name.clone(), self.correct_in(test, &c.category_name)))
            .collect()
    }

    fn correct_in(&self, test: &Test, category: &str) -> u32 {
        test.category(category)
            .map(|c| {
                c.questions
                    .iter()
                    .filter(|q| {
                        self.get(category, &q.id)
                            .is_some_and(|a| a.answer == q.correct_answer)
                    })
                    .count() as u32
            })
            .unwrap_or(0)
    }
}

/// Score a category from the answers picked on `sheet`.
///
/// An unknown or empty category scores `0` at `"0.00"`.
pub fn category_stats(test: &Test, sheet: &AnswerSheet, category: &str) -> CategoryStats {
    let Some(total) = test.category(category).map(|c| c.questions.len()) else {
        return CategoryStats {
            score: 0,
            percentage: format_percentage(0.0),
        };
    };
    let correct = sheet.correct_in(test, category);
    CategoryStats {
        score: correct,
        percentage: format_percentage(percentage(u64::from(correct), total)),
    }
}

/// Stats for marks already stored by the API. The denominator is the
/// category size, or 1 when the category is unknown or empty.
pub fn marks_stats(test: &Test, category: &str, marks: u32) -> CategoryStats {
    let total = test
        .category(category)
        .map(|c| c.questions.len())
        .filter(|&n| n > 0)
        .unwrap_or(1);
    CategoryStats {
        score: marks,
        percentage: format_percentage(percentage(u64::from(marks), total)),
    }
}

/// `correct / total * 100`, or 0 for an empty denominator.
pub(crate) fn percentage(correct: u64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

/// Two decimal places, halves rounded away from zero (`3.125` is `"3.13"`).
fn format_percentage(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}
