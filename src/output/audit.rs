//! A printer that mirrors every message into the tracing log
//!
//! Enable it with `printers = ["console", "log"]` to keep an audit trail of
//! what the user was shown.

use tracing::{error, info, warn};

use super::printer::Printer;

pub fn printer() -> Printer {
    Printer::builder()
        .confirm(|m| info!(target: "fidelius::audit", kind = "confirm", "{m}"))
        .success(|m| info!(target: "fidelius::audit", kind = "success", "{m}"))
        .warning(|m| warn!(target: "fidelius::audit", kind = "warning", "{m}"))
        .error(|m| error!(target: "fidelius::audit", kind = "error", "{m}"))
        .raw(|m| info!(target: "fidelius::audit", kind = "raw", "{m}"))
        .build()
}
