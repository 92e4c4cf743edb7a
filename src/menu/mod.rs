//! Menu parsing for the gopher directory-listing format
//!
//! This module handles the line-oriented menu responses returned by a gopher
//! service:
//! - Item-type classification from the leading tag character
//! - Tokenizing tab-separated menu lines into structured records
//! - Deriving `gopher://` URLs for discovered resources

mod item;
mod line;
mod url;

pub use item::{ItemType, ResourceKind};
pub use line::{parse_menu, MenuLine};
pub use url::gopher_url;
