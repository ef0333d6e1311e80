//! Shared Macros

/// Deduplicate a collection while preserving first-seen order.
#[macro_export]
macro_rules! dedupe {
    ($list:expr) => {{
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for item in $list {
            if seen.insert(item.clone()) {
                result.push(item);
            }
        }
        result
    }};
}
