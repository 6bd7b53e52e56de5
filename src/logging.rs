//! Browser console logging.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the console logger and panic hook once per page.
///
/// Later calls are no-ops; the first controller's level wins.
pub fn init(level: log::Level) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(level) {
            // Another logger was installed by the embedding page.
            log::debug!("console logger not installed: {err}");
        }
    });
}
