//! Field delimiter inference.
//!
//! Samples a prefix of the decoded text and checks how consistently each
//! recognized delimiter splits the sampled lines. Parsing each line with a
//! real CSV reader keeps quoted fields from miscounting (a comma inside a
//! quoted field must not vote for comma).

/// Delimiters recognized by default: comma, semicolon, tab, pipe.
pub const DEFAULT_DELIMITERS: &[u8] = &[b',', b';', b'\t', b'|'];

/// Number of lines sampled by default.
pub const DEFAULT_SNIFF_LINES: usize = 10;

/// Infer the most likely field delimiter.
///
/// For each candidate, count fields per sampled line. A candidate is viable
/// only if it yields more than one field on the first line; among viable
/// candidates the score is (lines matching the first line's field count) ×
/// (field count), highest wins. Returns `None` when no candidate is viable,
/// which callers treat as a failed parse attempt.
pub fn sniff_delimiter(content: &str, candidates: &[u8], sample_lines: usize) -> Option<u8> {
    let sample: Vec<&str> = content.lines().take(sample_lines.max(1)).collect();

    if sample.is_empty() {
        return None;
    }

    let mut best: Option<u8> = None;
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample.iter().map(|line| field_count(line, delim)).collect();

        let target = counts[0];
        if target <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = Some(delim);
        }
    }

    best
}

/// Number of fields a single line splits into under a delimiter.
fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map(|r| r.len())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(content: &str) -> Option<u8> {
        sniff_delimiter(content, DEFAULT_DELIMITERS, DEFAULT_SNIFF_LINES)
    }

    #[test]
    fn test_sniff_comma() {
        assert_eq!(sniff("Name,Age,City\nAlice,30,Paris\nBob,25,London\n"), Some(b','));
    }

    #[test]
    fn test_sniff_semicolon() {
        assert_eq!(sniff("Name;Age;City\nAlice;30;Paris\nBob;25;London\n"), Some(b';'));
    }

    #[test]
    fn test_sniff_tab() {
        assert_eq!(sniff("Name\tAge\tCity\nAlice\t30\tParis\n"), Some(b'\t'));
    }

    #[test]
    fn test_sniff_pipe() {
        assert_eq!(sniff("Name|Age|City\nAlice|30|Paris\n"), Some(b'|'));
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        let content =
            "Name;Address;City\n\"Doe, Jane\";\"123 Main St, Apt 4\";Paris\nBob;\"456 Elm\";London\n";
        assert_eq!(sniff(content), Some(b';'));
    }

    #[test]
    fn test_sniff_single_column_fails() {
        assert_eq!(sniff("value\n1\n2\n3\n"), None);
    }

    #[test]
    fn test_sniff_empty_content_fails() {
        assert_eq!(sniff(""), None);
    }

    #[test]
    fn test_sniff_respects_candidate_list() {
        // Semicolon-delimited content, but semicolon is not a candidate
        assert_eq!(
            sniff_delimiter("a;b;c\nd;e;f\n", &[b','], DEFAULT_SNIFF_LINES),
            None
        );
    }

    #[test]
    fn test_sniff_prefers_consistent_delimiter() {
        // Commas appear on the first line only; semicolons split every line
        let content = "a;b,x;c\n1;2;3\n4;5;6\n7;8;9\n";
        assert_eq!(sniff(content), Some(b';'));
    }
}
