//! Engine-wide constants
//!
//! Single source of truth for payload formats and configuration defaults.

/// Platform drag-data format identifiers
pub mod payload {
    /// MIME type under which the drag payload is stored on the data transfer
    pub const MIME_TYPE: &str = "application/x-reorder-entity";
}

/// Configuration file location
pub mod files {
    /// File name of the engine configuration inside the config directory
    pub const CONFIG_FILE: &str = "reorder.json";
}

/// Default values for engine configuration
pub mod defaults {
    /// Escape cancels an active drag
    pub const ESCAPE_CANCELS: bool = true;
    /// Emit events to the configured sink
    pub const EMIT_EVENTS: bool = true;
}
