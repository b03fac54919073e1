//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "yurei".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_line_api_base() -> String {
    "https://api.line.me/v2/bot".to_string()
}

pub fn default_azure_timeout_secs() -> u64 {
    60
}

pub fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_server_port() -> u16 {
    8000
}

pub fn default_broadcast_interval_hours() -> u64 {
    10
}

pub fn default_broadcast_recipient() -> String {
    "U0ff87ac4e0bdf60194f7e65fa98bb31c".to_string()
}
