pub mod ensure_calendar;

pub use ensure_calendar::ensure_calendar;
