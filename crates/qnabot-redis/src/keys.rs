//! Key layout.
//!
//! Every entity lives in a hash under field `data` as JSON. Sorted sets keyed
//! by insertion time (microseconds) under `qnabot:index:` index them
//! globally and per bot.

const PREFIX: &str = "qnabot";

pub fn qna(id: &str) -> String {
    format!("{}:qna:{}", PREFIX, id)
}

pub fn qna_index(bot_id: Option<&str>) -> String {
    match bot_id {
        Some(bot) => format!("{}:index:bot:{}:qna", PREFIX, bot),
        None => format!("{}:index:qna", PREFIX),
    }
}

pub fn bot(id: &str) -> String {
    format!("{}:bot:{}", PREFIX, id)
}

pub fn bot_index() -> String {
    format!("{}:index:bots", PREFIX)
}

pub fn unresolved(id: &str) -> String {
    format!("{}:unresolved:{}", PREFIX, id)
}

pub fn unresolved_index(bot_id: Option<&str>) -> String {
    match bot_id {
        Some(bot) => format!("{}:index:bot:{}:unresolved", PREFIX, bot),
        None => format!("{}:index:unresolved", PREFIX),
    }
}

/// Inclusive `ZRANGE` bounds for one page, or `None` for an empty page.
///
/// Bounds saturate at `isize::MAX` so a huge offset or limit never wraps
/// into a negative (from-the-end) index.
pub fn page_range(offset: usize, limit: usize) -> Option<(isize, isize)> {
    if limit == 0 {
        return None;
    }
    let stop = offset.saturating_add(limit - 1);
    Some((
        isize::try_from(offset).unwrap_or(isize::MAX),
        isize::try_from(stop).unwrap_or(isize::MAX),
    ))
}

/// Sorted-set score for "now".
pub fn now_score() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(qna("q1"), "qnabot:qna:q1");
        assert_eq!(qna_index(None), "qnabot:index:qna");
        assert_eq!(qna_index(Some("b1")), "qnabot:index:bot:b1:qna");
        assert_eq!(bot("b1"), "qnabot:bot:b1");
        assert_eq!(unresolved_index(Some("b1")), "qnabot:index:bot:b1:unresolved");
    }

    #[test]
    fn test_page_range() {
        assert_eq!(page_range(0, 0), None);
        assert_eq!(page_range(0, 20), Some((0, 19)));
        assert_eq!(page_range(40, 20), Some((40, 59)));
    }

    #[test]
    fn test_page_range_never_goes_negative() {
        assert_eq!(page_range(0, usize::MAX), Some((0, isize::MAX)));
        assert_eq!(page_range(1, usize::MAX), Some((1, isize::MAX)));
        assert_eq!(page_range(usize::MAX, 1), Some((isize::MAX, isize::MAX)));
    }

    #[test]
    fn test_indexes_never_collide_with_records() {
        for id in ["all", "index", "b1"] {
            assert_ne!(qna(id), qna_index(None));
            assert_ne!(bot(id), bot_index());
            assert_ne!(unresolved(id), unresolved_index(None));
        }
        assert_ne!(qna_index(Some("b1")), unresolved_index(Some("b1")));
    }
}
