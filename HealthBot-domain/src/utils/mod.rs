// Time, validation and BMI helpers shared by the services and handlers
pub mod bmi;
pub mod time;
pub mod validation;

pub use bmi::{calculate_bmi, get_bmi_category, BmiCategory};
pub use time::{format_datetime, format_timestamp, parse_time, parse_time_at, to_storage_string};
pub use validation::validate_email;
