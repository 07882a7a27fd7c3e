use rand::{thread_rng, Rng};

/// Category type the frontend sends when the player picked "all categories".
pub const ALL_CATEGORIES: &str = "click";

/// Source of the uniform index draw used to pick the next quiz question.
pub trait IndexPicker: Send + Sync {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngPicker;

impl IndexPicker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        thread_rng().gen_range(0..len)
    }
}

/// Which questions a quiz round draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl QuizScope {
    /// `None` when a specific category was requested without an id.
    pub fn resolve(kind: &str, id: Option<i64>) -> Option<QuizScope> {
        if kind == ALL_CATEGORIES {
            return Some(QuizScope::All);
        }
        id.map(QuizScope::Category)
    }

    pub fn category(self) -> Option<i64> {
        match self {
            QuizScope::All => None,
            QuizScope::Category(id) => Some(id),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuizScope::All => "all",
            QuizScope::Category(_) => "category",
        }
    }
}

pub fn choose<T>(mut candidates: Vec<T>, picker: &dyn IndexPicker) -> Option<T> {
    if candidates.is_empty() {
        return None;
    }
    let index = picker.pick(candidates.len()) % candidates.len();
    Some(candidates.swap_remove(index))
}
