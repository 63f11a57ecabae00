use crate::anki::source::escape_search_term;

/// Browser search listing the reviewed, unsuspended cards of one group.
pub fn browse_query(tag: &str) -> String {
    format!("tag:\"{}\" -is:suspended -is:new", escape_search_term(tag))
}
