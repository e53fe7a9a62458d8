//! Question browsing: filtering and pagination.

use serde::Serialize;

use crate::model::{Difficulty, Question, Status};

/// Questions shown per page when browsing.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Criteria for narrowing the catalog. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    /// Exact category title.
    pub category: Option<String>,
    /// Case-insensitive substring of the prompt or the reference answer.
    pub keyword: Option<String>,
    /// Any of these difficulties.
    pub difficulties: Vec<Difficulty>,
    pub status: Option<Status>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(category) = &self.category {
            if &question.category != category {
                return false;
            }
        }
        if let Some(keyword) = self.keyword.as_deref().map(str::trim) {
            if !keyword.is_empty() {
                let keyword = keyword.to_lowercase();
                if !question.question.to_lowercase().contains(&keyword)
                    && !question.answer.to_lowercase().contains(&keyword)
                {
                    return false;
                }
            }
        }
        if !self.difficulties.is_empty() && !self.difficulties.contains(&question.difficulty) {
            return false;
        }
        if let Some(status) = self.status {
            if question.status != status {
                return false;
            }
        }
        true
    }

    /// Matching questions, in input order.
    pub fn apply<'a>(&self, questions: &'a [Question]) -> Vec<&'a Question> {
        questions.iter().filter(|q| self.matches(q)).collect()
    }
}

/// One page of items.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually shown.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice out a 1-based page, clamping the page number into range.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
        total_items: items.len(),
    }
}
