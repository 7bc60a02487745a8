use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least 2 options, got {len}")]
    NotEnoughOptions { len: usize },

    #[error("option text cannot be empty")]
    EmptyOption,

    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },

    #[error("media reference cannot be empty")]
    EmptyMediaRef,

    #[error("media URL is not valid")]
    InvalidMediaUrl,
}

//
// ─── MEDIA REFERENCE ───────────────────────────────────────────────────────────
//

/// Reference to an image or audio asset shown alongside a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    FilePath(PathBuf),
    Url(Url),
}

impl MediaRef {
    /// Reference a bundled asset by path.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyMediaRef` for an empty path.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, QuestionError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(QuestionError::EmptyMediaRef);
        }
        Ok(MediaRef::FilePath(path))
    }

    /// Reference a remote asset by URL.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyMediaRef` for blank input and
    /// `QuestionError::InvalidMediaUrl` if the URL does not parse.
    pub fn from_url(url: impl AsRef<str>) -> Result<Self, QuestionError> {
        let raw = url.as_ref().trim();
        if raw.is_empty() {
            return Err(QuestionError::EmptyMediaRef);
        }
        let url = Url::parse(raw).map_err(|_| QuestionError::InvalidMediaUrl)?;
        Ok(MediaRef::Url(url))
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            MediaRef::FilePath(p) => Some(p.as_path()),
            MediaRef::Url(_) => None,
        }
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            MediaRef::Url(u) => Some(u),
            MediaRef::FilePath(_) => None,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One multiple-choice question: a prompt, its options, and the correct
/// answer, with optional image/audio attachments.
///
/// Immutable once constructed; the catalog is a fixed compiled-in set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    answer: String,
    image: Option<MediaRef>,
    audio: Option<MediaRef>,
}

impl Question {
    /// Creates a validated question.
    ///
    /// The correct `answer` must match one of `options` exactly. If the
    /// options list contains duplicate text equal to the answer, the match
    /// is by text only, so any of those occurrences submitted counts as
    /// correct.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for an empty prompt, fewer than two options,
    /// a blank option, or an answer that is not among the options.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
        image: Option<MediaRef>,
        audio: Option<MediaRef>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::NotEnoughOptions { len: options.len() });
        }
        if options.iter().any(|option| option.trim().is_empty()) {
            return Err(QuestionError::EmptyOption);
        }

        let answer = answer.into();
        if !options.iter().any(|option| *option == answer) {
            return Err(QuestionError::AnswerNotInOptions { answer });
        }

        Ok(Self {
            prompt: prompt.trim().to_owned(),
            options,
            answer,
            image,
            audio,
        })
    }

    // Accessors
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn image(&self) -> Option<&MediaRef> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn audio(&self) -> Option<&MediaRef> {
        self.audio.as_ref()
    }

    /// True when `choice` is one of this question's options.
    #[must_use]
    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|option| option == choice)
    }

    /// Exact string comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn question_new_happy_path() {
        let question = Question::new(
            "What is the capital of France?",
            options(&["Berlin", "Madrid", "Paris", "Rome"]),
            "Paris",
            Some(MediaRef::from_file("assets/pariz.jpg").unwrap()),
            None,
        )
        .unwrap();

        assert_eq!(question.prompt(), "What is the capital of France?");
        assert_eq!(question.options().len(), 4);
        assert_eq!(question.answer(), "Paris");
        assert!(question.is_correct("Paris"));
        assert!(!question.is_correct("Berlin"));
        assert_eq!(
            question.image().and_then(MediaRef::as_path),
            Some(Path::new("assets/pariz.jpg"))
        );
        assert!(question.audio().is_none());
    }

    #[test]
    fn rejects_empty_prompt() {
        let err = Question::new("   ", options(&["a", "b"]), "a", None, None).unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new("Q?", options(&["only"]), "only", None, None).unwrap_err();
        assert_eq!(err, QuestionError::NotEnoughOptions { len: 1 });
    }

    #[test]
    fn rejects_blank_option() {
        let err = Question::new("Q?", options(&["a", "  "]), "a", None, None).unwrap_err();
        assert_eq!(err, QuestionError::EmptyOption);
    }

    #[test]
    fn rejects_answer_outside_options() {
        let err = Question::new("Q?", options(&["a", "b"]), "c", None, None).unwrap_err();
        assert_eq!(
            err,
            QuestionError::AnswerNotInOptions {
                answer: "c".to_owned()
            }
        );
    }

    #[test]
    fn duplicate_option_text_matches_by_text() {
        let question =
            Question::new("Q?", options(&["dup", "dup", "other"]), "dup", None, None).unwrap();
        assert!(question.is_correct("dup"));
        assert!(question.has_option("dup"));
    }

    #[test]
    fn media_ref_rejects_empty_inputs() {
        assert_eq!(
            MediaRef::from_file("").unwrap_err(),
            QuestionError::EmptyMediaRef
        );
        assert_eq!(
            MediaRef::from_url("  ").unwrap_err(),
            QuestionError::EmptyMediaRef
        );
        assert_eq!(
            MediaRef::from_url("not a url").unwrap_err(),
            QuestionError::InvalidMediaUrl
        );
    }

    #[test]
    fn media_ref_parses_url() {
        let media = MediaRef::from_url("https://example.com/clip.ogg").unwrap();
        assert_eq!(
            media.as_url().map(Url::as_str),
            Some("https://example.com/clip.ogg")
        );
        assert!(media.as_path().is_none());
    }
}
