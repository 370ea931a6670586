//! Non-blocking validators whose findings travel as warnings.

pub mod domain;
pub mod notification;

pub use domain::TppDomainValidator;
pub use notification::TppNotificationDataValidator;
