/// Page size for list commands: `--limit`, else the configured default.
///
/// A limit of `0` means unbounded.
#[must_use]
pub fn page_limit(flag: Option<u32>, configured: u32) -> Option<u32> {
    match flag.unwrap_or(configured) {
        0 => None,
        limit => Some(limit),
    }
}
