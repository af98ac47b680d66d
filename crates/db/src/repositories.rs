pub mod booking;
pub mod template;
