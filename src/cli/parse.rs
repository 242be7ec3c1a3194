use pathgraph_core::config::Algorithm;
use pathgraph_core::format::OutputFormat;
use pathgraph_core::graph::Direction;

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse algorithm name from string
pub fn parse_algorithm(s: &str) -> std::result::Result<Algorithm, String> {
    s.parse::<Algorithm>()
}

/// Parse relationship direction from string
pub fn parse_direction(s: &str) -> std::result::Result<Direction, String> {
    s.parse::<Direction>()
}

/// Parse a `first,second` pair of property names
pub fn parse_key_pair(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once(',') {
        Some((a, b)) if !a.trim().is_empty() && !b.trim().is_empty() && !b.contains(',') => {
            Ok((a.trim().to_string(), b.trim().to_string()))
        }
        _ => Err(format!("expected two comma-separated property names, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_pair() {
        assert_eq!(
            parse_key_pair("lat, lon").unwrap(),
            ("lat".to_string(), "lon".to_string())
        );
        assert!(parse_key_pair("x").is_err());
        assert!(parse_key_pair("x,").is_err());
        assert!(parse_key_pair("x,y,z").is_err());
    }

    #[test]
    fn test_parse_format_message() {
        let err = parse_format("xml").unwrap_err();
        assert!(err.contains("unknown format: xml"));
    }
}
