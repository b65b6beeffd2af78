//! Validation for the `[session]` section.

use crate::schema::QueryDeskConfig;

use super::helpers::validate_range;

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &QueryDeskConfig) {
    validate_range(
        errors,
        "session.loading_reset_delay_ms",
        config.session.loading_reset_delay_ms,
        0,
        10_000,
    );
    validate_range(
        errors,
        "session.notification_capacity",
        config.session.notification_capacity,
        1,
        256,
    );
}
