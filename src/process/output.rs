//! Output trimming for failure summaries.

/// Maximum number of trailing lines shown when a captured tool fails.
pub const OUTPUT_TAIL_MAX_LINES: usize = 50;

/// Maximum total characters shown when a captured tool fails.
pub const OUTPUT_TAIL_MAX_CHARS: usize = 4096;

/// Keep the last `max_lines` lines of `output`, then cap the result at
/// `max_chars` characters (again keeping the tail).
pub fn truncate_output(output: &str, max_lines: usize, max_chars: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    let tail = lines[start..].join("\n");

    let char_count = tail.chars().count();
    if char_count <= max_chars {
        return tail;
    }

    let kept: String = tail.chars().skip(char_count - max_chars).collect();
    format!("...(truncated)...\n{}", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_output_unchanged() {
        assert_eq!(truncate_output("a\nb", 10, 100), "a\nb");
        assert_eq!(truncate_output("", 10, 100), "");
    }

    #[test]
    fn test_keeps_last_lines() {
        let output = (1..=10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        assert_eq!(truncate_output(&output, 3, 100), "8\n9\n10");
    }

    #[test]
    fn test_caps_characters_on_char_boundary() {
        let result = truncate_output("ééééé", 10, 2);
        assert_eq!(result, "...(truncated)...\néé");
    }
}
