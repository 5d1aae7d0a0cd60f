//! Routes `log` records into the in-terminal log pane.

use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

/// Install the `tui-logger` backend. Later calls are ignored.
/// Records reach the widget history through the backend's own thread.
pub fn initialize(level: LevelFilter) {
    INIT.call_once(|| {
        if tui_logger::init_logger(level).is_ok() {
            tui_logger::set_default_level(level);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_can_be_called_repeatedly() {
        initialize(LevelFilter::Debug);
        initialize(LevelFilter::Trace);
        log::debug!("logger installed");
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
