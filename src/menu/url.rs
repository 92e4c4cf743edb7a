//! Derived URL construction
//!
//! Every visited directory and downloaded resource is reported by a
//! `gopher://` URL that can be pasted into any gopher-aware client. The
//! scheme embeds the item-type tag between the authority and the selector.

/// Builds the canonical URL for a resource on the service
///
/// # Example
///
/// ```
/// use spelunk::menu::gopher_url;
///
/// let url = gopher_url("gopher.example.org", 70, '1', "/docs");
/// assert_eq!(url, "gopher://gopher.example.org:70/1/docs");
/// ```
pub fn gopher_url(host: &str, port: u16, tag: char, selector: &str) -> String {
    format!("gopher://{}:{}/{}{}", host, port, tag, selector)
}
