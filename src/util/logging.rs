//! Console logging for the webview.

/// Route `log` records to the browser console and install the panic hook.
///
/// Repeated calls keep the first logger. Outside the webview this is a no-op;
/// tests and tools install their own logger if they want one.
pub fn init(level: log::Level) {
    #[cfg(feature = "csr")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            log::debug!("console logger already installed");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = level;
    }
}
