//! Layout dimension constants for TUI rendering.

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the navigation sidebar, borders included.
pub const SIDEBAR_WIDTH: u16 = 26;

/// Height of the search input widget in lines (border + text).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the pagination bar below the table.
pub const PAGINATION_HEIGHT: u16 = 1;

/// Width of the leading checkbox column on selectable tables.
pub const CHECKBOX_WIDTH: u16 = 3;

/// Width percentage for the help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for the help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
