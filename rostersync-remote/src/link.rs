//! `Link` header pagination (RFC 8288, as GitHub emits it).

/// URL of the `rel="next"` entry in a `Link` header, if any.
///
/// ```
/// use rostersync_remote::link::next_link;
///
/// let header = r#"<https://api.github.com/orgs/acme/members?page=2>; rel="next", <https://api.github.com/orgs/acme/members?page=5>; rel="last""#;
/// assert_eq!(next_link(header), Some("https://api.github.com/orgs/acme/members?page=2"));
/// ```
pub fn next_link(header: &str) -> Option<&str> {
    header
        .split(',')
        .map(str::trim)
        .find(|part| part.contains(r#"rel="next""#))
        .and_then(|part| {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            part.get(start..end)
        })
}
