//! Kubernetes quantity parsing and humanized formatting.
//!
//! kubectl reports CPU as cores, millicores (`250m`), microcores (`u`) or
//! nanocores (`n`), and memory with binary suffixes (`Ki`/`Mi`/`Gi`/`Ti`).
//! The metrics API additionally emits `<unknown>` for nodes it has not
//! scraped yet.

/// Parse a CPU quantity into cores. Returns `None` for `<unknown>` or
/// unparseable input.
pub fn parse_cpu(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "<unknown>" {
        return None;
    }
    if let Some(n) = raw.strip_suffix('n') {
        return n.parse::<f64>().ok().map(|v| v / 1_000_000_000.0);
    }
    if let Some(u) = raw.strip_suffix('u') {
        return u.parse::<f64>().ok().map(|v| v / 1_000_000.0);
    }
    if let Some(m) = raw.strip_suffix('m') {
        return m.parse::<f64>().ok().map(|v| v / 1_000.0);
    }
    raw.parse::<f64>().ok()
}

/// Parse a memory quantity into bytes. Returns `None` for `<unknown>` or
/// unparseable input.
pub fn parse_memory(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "<unknown>" {
        return None;
    }
    let suffixes: [(&str, u64); 4] = [("Ki", 1 << 10), ("Mi", 1 << 20), ("Gi", 1 << 30), ("Ti", 1 << 40)];
    for (suffix, mult) in suffixes {
        if let Some(v) = raw.strip_suffix(suffix) {
            return v.parse::<u64>().ok().map(|n| n * mult);
        }
    }
    raw.parse::<u64>().ok()
}

/// Format cores for display: sub-core values as millicores, otherwise one
/// decimal place.
pub fn format_cpu(cores: f64) -> String {
    if cores < 1.0 {
        format!("{}m", (cores * 1000.0).round() as u64)
    } else {
        format!("{cores:.1}")
    }
}

/// Format bytes with the largest binary unit that keeps the value >= 1.
pub fn format_memory(bytes: u64) -> String {
    let units = ["B", "Ki", "Mi", "Gi", "Ti"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < units.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1}{}", units[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cpu_handles_cores_and_millicores() {
        assert_eq!(parse_cpu("4"), Some(4.0));
        assert_eq!(parse_cpu("250m"), Some(0.25));
        assert_eq!(parse_cpu("1.5"), Some(1.5));
    }

    #[test]
    fn parse_cpu_handles_metrics_api_units() {
        assert_eq!(parse_cpu("1500000000n"), Some(1.5));
        assert_eq!(parse_cpu("250000u"), Some(0.25));
    }

    #[test]
    fn parse_cpu_rejects_unknown_and_garbage() {
        assert_eq!(parse_cpu("<unknown>"), None);
        assert_eq!(parse_cpu(""), None);
        assert_eq!(parse_cpu("lots"), None);
    }

    #[test]
    fn parse_memory_handles_binary_suffixes() {
        assert_eq!(parse_memory("1Ki"), Some(1024));
        assert_eq!(parse_memory("2Mi"), Some(2 * 1024 * 1024));
        assert_eq!(parse_memory("3Gi"), Some(3 * 1024 * 1024 * 1024));
        assert_eq!(parse_memory("1024"), Some(1024));
    }

    #[test]
    fn parse_memory_rejects_unknown() {
        assert_eq!(parse_memory("<unknown>"), None);
    }

    #[test]
    fn format_cpu_switches_units_at_one_core() {
        assert_eq!(format_cpu(0.25), "250m");
        assert_eq!(format_cpu(1.0), "1.0");
        assert_eq!(format_cpu(12.5), "12.5");
    }

    #[test]
    fn format_memory_picks_largest_unit() {
        assert_eq!(format_memory(512), "512.0B");
        assert_eq!(format_memory(2048), "2.0Ki");
        assert_eq!(format_memory(3 * 1024 * 1024 * 1024), "3.0Gi");
    }
}
