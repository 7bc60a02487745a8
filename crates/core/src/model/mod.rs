mod catalog;
mod ids;
mod question;
mod record;
mod settings;

pub use catalog::{Catalog, CatalogError};
pub use ids::SessionId;
pub use question::{MediaRef, Question, QuestionError};
pub use record::{RecordError, ResultRecord};
pub use settings::{QuizSettings, SettingsError};
