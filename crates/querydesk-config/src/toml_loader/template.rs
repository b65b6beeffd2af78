//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# QueryDesk Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[backend]
# endpoint = "http://localhost:3000/api/query"
# transport = "post_json"      # post_json, get_path
# connect_timeout_secs = 10    # 1-120
# request_timeout_secs = 0     # 0 = wait indefinitely

[connection]
# endpoint = "http://127.0.0.1:8000/database/createconnection"
# user = ""
# password = ""
# host = "localhost"
# port = "5432"
# database = ""
# database_type = "Postgres"   # Postgres, SQLlite, MongoDB

[session]
# loading_reset_delay_ms = 300 # 0-10000
# notification_capacity = 16   # 1-256

[output]
# format = "text"              # text, html
# html_path = "transcript.html"

[logging]
# level = "info"               # trace, debug, info, warn, error
"##
}
