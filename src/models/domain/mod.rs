pub mod history_filter;
pub mod question;
pub mod quiz;
pub mod submission;
pub mod user;
pub use history_filter::{DateRange, HistoryFilter, ScoreFilter};
pub use question::Question;
pub use quiz::{Difficulty, Quiz};
pub use submission::{Explanation, QuestionResponse, Submission};
pub use user::User;
