//! Utilities for the records output format
//!
//! Every line starts with a record type letter: `H` header, `P` path,
//! `N` node, `R` relationship, `T` relationship type, `L` label.

/// Escape double quotes so a value can sit inside a quoted field
pub fn escape_quotes(s: &str) -> String {
    s.replace('\"', r#"\""#)
}

/// Quoted field with embedded quotes escaped
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", escape_quotes(s))
}

/// Comma-separated list, `-` when empty
pub fn csv_or_dash<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Header line: `H pathgraph=1 records=1 mode=<mode> k=v...`
pub fn format_header(mode: &str, fields: &[(&str, String)]) -> String {
    let mut line = format!("H pathgraph=1 records=1 mode={}", mode);
    for (key, value) in fields {
        line.push_str(&format!(" {}={}", key, value));
    }
    line
}

/// Node line: `N <id> "<key>" labels=<csv>`
pub fn format_node_record(id: usize, key: Option<&str>, labels: &[String]) -> String {
    format!(
        "N {} {} labels={}",
        id,
        quoted(key.unwrap_or("")),
        csv_or_dash(labels)
    )
}

/// Relationship line: `R <id> "<type>" <start> <end>`
pub fn format_relationship_record(id: usize, rel_type: &str, start: usize, end: usize) -> String {
    format!("R {} {} {} {}", id, quoted(rel_type), start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_quotes(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_quotes("plain"), "plain");
        assert_eq!(quoted(r#"New "York""#), r#""New \"York\"""#);
    }

    #[test]
    fn test_header() {
        let line = format_header("path", &[("from", "a".into()), ("found", "true".into())]);
        assert_eq!(line, "H pathgraph=1 records=1 mode=path from=a found=true");
    }

    #[test]
    fn test_node_record() {
        assert_eq!(
            format_node_record(3, Some("berlin"), &["City".to_string(), "Capital".to_string()]),
            "N 3 \"berlin\" labels=City,Capital"
        );
        assert_eq!(format_node_record(0, None, &[]), "N 0 \"\" labels=-");
    }

    #[test]
    fn test_relationship_record() {
        assert_eq!(format_relationship_record(7, "ROAD", 1, 2), "R 7 \"ROAD\" 1 2");
        assert_eq!(
            format_relationship_record(8, "BUS LINE", 2, 3),
            "R 8 \"BUS LINE\" 2 3"
        );
    }
}
