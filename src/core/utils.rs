pub const TAG_SEPARATOR: &str = "::";

/// Splits a tag into its hierarchy segments.
pub fn tag_components(tag: &str) -> Vec<&str> {
    tag.split(TAG_SEPARATOR).collect()
}

pub fn tag_depth(tag: &str) -> usize {
    tag.split(TAG_SEPARATOR).count()
}

/// Joins the first `depth` segments of `tag`, or `None` if the tag is shallower than that.
pub fn truncate_tag(tag: &str, depth: usize) -> Option<String> {
    let components = tag_components(tag);
    if components.len() < depth {
        return None;
    }
    Some(components[..depth].join(TAG_SEPARATOR))
}

pub trait TagPath {
    /// True if `self` equals `ancestor` or sits below it, comparing segments case-insensitively.
    fn is_under(&self, ancestor: &str) -> bool;
}

impl TagPath for str {
    fn is_under(&self, ancestor: &str) -> bool {
        let own = tag_components(self);
        let parent = tag_components(ancestor);
        if own.len() < parent.len() {
            return false;
        }
        own.iter().zip(parent.iter()).all(|(a, b)| a.to_lowercase() == b.to_lowercase())
    }
}

impl TagPath for String {
    fn is_under(&self, ancestor: &str) -> bool {
        self.as_str().is_under(ancestor)
    }
}

/// Median of an unordered sample. Averages the two middle values for even sizes.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
