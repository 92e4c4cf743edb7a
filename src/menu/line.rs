//! Tokenizer for gopher menu lines
//!
//! Each menu line is a single item-type tag character followed by
//! tab-separated fields: display string, selector, host, port. The tokenizer
//! turns one line into a structured [`MenuLine`] and never fails: malformed
//! lines still produce a record (with their actual field count), and blank
//! lines produce nothing at all.

use crate::menu::ItemType;

/// A structured view of one menu line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLine {
    /// Classification of the leading tag character
    pub item_type: ItemType,

    /// Human-readable display string (first field)
    pub display: String,

    /// Selector/path field, empty when the line carries none
    pub selector: String,

    /// Host field as written, empty when the line carries none
    pub host: String,

    /// Port field as written; kept as text so a garbled port is still
    /// comparable and reportable
    pub port: String,

    /// Number of tab-separated fields after the tag
    pub field_count: usize,

    /// Everything after the tag, verbatim, for diagnostics
    pub rest: String,
}

impl MenuLine {
    /// Tokenizes a single menu line
    ///
    /// Returns `None` for lines that are empty after trimming, so a parser
    /// iterating a response never indexes into a missing tag character.
    pub fn parse(line: &str) -> Option<MenuLine> {
        let line = line.trim();
        let tag = line.chars().next()?;
        let rest = &line[tag.len_utf8()..];

        let fields: Vec<&str> = rest.split('\t').collect();

        Some(MenuLine {
            item_type: ItemType::from_tag(tag),
            display: fields.first().copied().unwrap_or("").to_string(),
            selector: fields.get(1).copied().unwrap_or("").to_string(),
            host: fields.get(2).copied().unwrap_or("").to_string(),
            port: fields.get(3).copied().unwrap_or("").to_string(),
            field_count: fields.len(),
            rest: rest.to_string(),
        })
    }

    /// Returns true if the line carries the conventional four fields
    pub fn is_well_formed(&self) -> bool {
        self.field_count == 4
    }

    /// Returns true if the line's host/port fields name the given service
    pub fn points_at(&self, host: &str, port: u16) -> bool {
        self.host == host && self.port == port.to_string()
    }

    /// Returns true if any part of the line suggests a jpeg image
    pub fn mentions_jpeg(&self) -> bool {
        self.rest.contains("jpeg")
    }
}

/// Tokenizes a whole menu response into structured lines
///
/// Blank lines and the lone "." end-of-menu marker are dropped; everything
/// else, well-formed or not, is kept for the caller to act on.
pub fn parse_menu(response: &str) -> Vec<MenuLine> {
    response
        .lines()
        .filter(|line| line.trim() != ".")
        .filter_map(MenuLine::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directory_line() {
        let line = MenuLine::parse("1Documents\t/docs\tgopher.example.org\t70").unwrap();
        assert_eq!(line.item_type, ItemType::Directory);
        assert_eq!(line.display, "Documents");
        assert_eq!(line.selector, "/docs");
        assert_eq!(line.host, "gopher.example.org");
        assert_eq!(line.port, "70");
        assert!(line.is_well_formed());
    }

    #[test]
    fn test_parse_text_file_line() {
        let line = MenuLine::parse("0Readme\t/readme.txt\thost\t70").unwrap();
        assert_eq!(line.item_type, ItemType::TextFile);
        assert_eq!(line.selector, "/readme.txt");
    }

    #[test]
    fn test_parse_binary_line_with_jpeg_hint() {
        let line = MenuLine::parse("9Photo\t/pics/cat.jpeg\thost\t70").unwrap();
        assert_eq!(line.item_type, ItemType::BinaryFile);
        assert!(line.mentions_jpeg());

        let plain = MenuLine::parse("9Archive\t/archive.tar\thost\t70").unwrap();
        assert!(!plain.mentions_jpeg());
    }

    #[test]
    fn test_parse_error_line() {
        let line = MenuLine::parse("3File not found\terror\thost\t70").unwrap();
        assert_eq!(line.item_type, ItemType::ErrorEntry);
        assert_eq!(line.rest, "File not found\terror\thost\t70");
    }

    #[test]
    fn test_parse_info_line() {
        let line = MenuLine::parse("iWelcome to the archive\tfake\t(NULL)\t0").unwrap();
        assert_eq!(line.item_type, ItemType::InfoEntry);
        assert_eq!(line.display, "Welcome to the archive");
    }

    #[test]
    fn test_parse_unknown_tag() {
        let line = MenuLine::parse("7Search\t/search\thost\t70").unwrap();
        assert_eq!(line.item_type, ItemType::Unknown);
    }

    #[test]
    fn test_parse_empty_line_is_skipped() {
        assert!(MenuLine::parse("").is_none());
        assert!(MenuLine::parse("   ").is_none());
        assert!(MenuLine::parse("\r").is_none());
    }

    #[test]
    fn test_parse_malformed_line_keeps_field_count() {
        let line = MenuLine::parse("1Broken\t/broken").unwrap();
        assert_eq!(line.item_type, ItemType::Directory);
        assert_eq!(line.field_count, 2);
        assert!(!line.is_well_formed());
        assert_eq!(line.host, "");
        assert_eq!(line.port, "");
    }

    #[test]
    fn test_parse_bare_tag() {
        let line = MenuLine::parse("1").unwrap();
        assert_eq!(line.item_type, ItemType::Directory);
        assert_eq!(line.field_count, 1);
        assert_eq!(line.selector, "");
    }

    #[test]
    fn test_points_at_matches_host_and_port() {
        let line = MenuLine::parse("1Docs\t/docs\tgopher.example.org\t70").unwrap();
        assert!(line.points_at("gopher.example.org", 70));
        assert!(!line.points_at("gopher.example.org", 7070));
        assert!(!line.points_at("other.example.org", 70));
    }

    #[test]
    fn test_parse_menu_splits_and_filters() {
        let response = "1Docs\t/docs\thost\t70\r\n0Readme\t/readme.txt\thost\t70\r\n\r\n.\r\n";
        let lines = parse_menu(response);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_type, ItemType::Directory);
        assert_eq!(lines[1].item_type, ItemType::TextFile);
    }

    #[test]
    fn test_parse_menu_tolerates_garbage_between_entries() {
        let response = "1Docs\t/docs\thost\t70\nnot a real tag line\n0F\t/f\thost\t70\n";
        let lines = parse_menu(response);
        // The garbage line classifies as Unknown but parsing continues
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].item_type, ItemType::Unknown);
        assert_eq!(lines[2].item_type, ItemType::TextFile);
    }
}
