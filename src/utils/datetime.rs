use chrono::{DateTime, Local};
use std::time::SystemTime;

/// Converts a SystemTime to a formatted string in the local timezone
/// in the format "YYYY-MM-DD HH:MM:SS".
pub fn format_system_time(system_time: SystemTime) -> String {
    let datetime: DateTime<Local> = system_time.into();
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Returns the current timestamp formatted as a string in the local timezone.
pub fn get_formatted_current_timestamp() -> String {
    format_system_time(SystemTime::now())
}
