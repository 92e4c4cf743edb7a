//! Item type definitions for menu entries
//!
//! The leading character of every menu line is an item-type tag. Only the
//! subset of tags this service's dialect actually uses is distinguished;
//! everything else collapses into [`ItemType::Unknown`].

use std::fmt;

/// The kind of entry a single menu line describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// A sub-directory to traverse (tag "1")
    Directory,

    /// A plain text file (tag "0")
    TextFile,

    /// A binary file, read until the connection closes (tag "9")
    BinaryFile,

    /// An error entry reported by the service (tag "3")
    ErrorEntry,

    /// An informational line (tag "i")
    InfoEntry,

    /// Any tag this crawler does not act on
    Unknown,
}

impl ItemType {
    /// Classifies a tag character into an item type
    pub fn from_tag(tag: char) -> Self {
        match tag {
            '1' => Self::Directory,
            '0' => Self::TextFile,
            '9' => Self::BinaryFile,
            '3' => Self::ErrorEntry,
            'i' => Self::InfoEntry,
            _ => Self::Unknown,
        }
    }

    /// The tag character used in menu lines and derived URLs
    ///
    /// Unknown entries keep no tag of their own; they render as '?'.
    pub fn tag(&self) -> char {
        match self {
            Self::Directory => '1',
            Self::TextFile => '0',
            Self::BinaryFile => '9',
            Self::ErrorEntry => '3',
            Self::InfoEntry => 'i',
            Self::Unknown => '?',
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Directory => "directory",
            Self::TextFile => "text file",
            Self::BinaryFile => "binary file",
            Self::ErrorEntry => "error entry",
            Self::InfoEntry => "info entry",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// The tracked category of a successfully downloaded resource
///
/// Image is a sub-kind of binary: it is stored verbatim and excluded from
/// the extrema table, which tracks text and binary only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Text,
    Binary,
    Image,
}

impl ResourceKind {
    /// Short label used for storage keys and report headings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Binary => "binary",
            Self::Image => "image",
        }
    }

    /// File extension applied when persisting a resource of this kind
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => ".txt",
            Self::Binary => ".dat",
            Self::Image => ".jpeg",
        }
    }

    /// The menu tag a resource of this kind was announced under
    pub fn tag(&self) -> char {
        match self {
            Self::Text => '0',
            Self::Binary | Self::Image => '9',
        }
    }

    /// Text and non-image binary bodies carry a textual end-of-transmission
    /// marker that must be stripped before storage; images do not.
    pub fn trims_terminator(&self) -> bool {
        !matches!(self, Self::Image)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
