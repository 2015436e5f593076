pub mod completion_service;
pub mod email_service;
pub mod notification_service;
pub mod quiz_generation;
pub mod quiz_service;
pub mod scoring;
pub mod submission_service;
pub mod user_service;
