//! Identifiers shared by every copy of the library loaded on a page.
//!
//! These must stay literal so independently bundled copies agree on them.

/// Element id of the print surface (`0xdefaced`)
pub const SURFACE_ID: &str = "crossprint-iframe-233811181";

/// Global event name of the print signal (`0xd00dfeed`)
pub const PRINT_SIGNAL_ID: &str = "crossprint-signal-3490578157";

/// Element id of the injected page style block
pub const PAGE_STYLE_ID: &str = "page-style";
