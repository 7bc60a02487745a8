use thiserror::Error;

use crate::model::question::{MediaRef, Question};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("question catalog cannot be empty")]
    Empty,
}

/// The fixed set of questions available to a session.
///
/// A session draws a random permutation of the whole catalog; the catalog
/// itself never changes while sessions run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Creates a catalog from a list of questions.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` if the list is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { questions })
    }

    /// The compiled-in default question set.
    ///
    /// # Panics
    ///
    /// Panics only if the built-in data is invalid, which is covered by a
    /// test.
    #[must_use]
    pub fn builtin() -> Self {
        let strings = |list: &[&str]| -> Vec<String> {
            list.iter().map(|s| (*s).to_owned()).collect()
        };

        let questions = vec![
            Question::new(
                "What is the capital of France?",
                strings(&["Berlin", "Madrid", "Paris", "Rome"]),
                "Paris",
                Some(
                    MediaRef::from_file("assets/pariz.jpg")
                        .expect("built-in media path should be valid"),
                ),
                None,
            ),
            Question::new(
                "Which planet is known as the Red Planet?",
                strings(&["Earth", "Mars", "Jupiter", "Saturn"]),
                "Mars",
                None,
                None,
            ),
            Question::new(
                "Who wrote 'Hamlet'?",
                strings(&[
                    "Leo Tolstoy",
                    "William Shakespeare",
                    "Mark Twain",
                    "Jane Austen",
                ]),
                "William Shakespeare",
                None,
                None,
            ),
            Question::new(
                "Which is the largest mammal?",
                strings(&["Elephant", "Giraffe", "Blue Whale", "Hippopotamus"]),
                "Blue Whale",
                Some(
                    MediaRef::from_file("assets/bluewhale.jpg")
                        .expect("built-in media path should be valid"),
                ),
                None,
            ),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("built-in questions should be valid");

        Self { questions }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        // A constructed catalog is never empty; kept for the len/is_empty pair.
        self.questions.is_empty()
    }

    /// Consumes the catalog, yielding the owned question list.
    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}
