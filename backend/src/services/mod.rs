pub mod holiday_source;
pub mod planning;
pub mod search;
pub mod vacation;
pub mod weekly;
