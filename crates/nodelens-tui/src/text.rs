/// Truncate to `width` characters, marking the cut with a trailing `…`.
/// Only the rendered label is shortened; callers keep the full string for
/// the status line.
pub fn truncate_with_ellipsis(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width == 1 {
        return "…".into();
    }
    let prefix: String = s.chars().take(width - 1).collect();
    format!("{prefix}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_with_ellipsis("worker", 12), "worker");
        assert_eq!(truncate_with_ellipsis("exactly-12ch", 12), "exactly-12ch");
    }

    #[test]
    fn long_group_name_in_twelve_columns() {
        assert_eq!(truncate_with_ellipsis("very-long-node-group-name-example", 12), "very-long-n…");
    }

    #[test]
    fn multibyte_names_cut_on_char_boundaries() {
        assert_eq!(truncate_with_ellipsis("nœud-très-long", 6), "nœud-…");
    }

    #[test]
    fn degenerate_widths() {
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
        assert_eq!(truncate_with_ellipsis("abc", 1), "…");
    }
}
