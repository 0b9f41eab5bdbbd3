//! Structured VCF meta-line parsing.
//!
//! VCF headers declare contigs and INFO/FORMAT fields with structured
//! meta-lines of the form:
//!
//! ```text
//! ##INFO=<ID=DP,Number=1,Type=Integer,Description="Total Depth">
//! ##contig=<ID=chr1,length=248956422>
//! ```
//!
//! [`MetaLine::parse`] turns one such line into its tag plus an ordered
//! key/value listing, without interpreting any of the values. Splitting on
//! `,` respects double-quoted strings and backslash escapes, so a
//! `Description="a, b"` value stays in one piece. Anything that does not
//! match the structured shape parses to `None`; callers decide whether that
//! is an error or a tolerated line.
//!
//! # Examples
//!
//! ```
//! use genolens::formats::MetaLine;
//!
//! let line = "##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">";
//! let meta = MetaLine::parse(line).unwrap();
//!
//! assert_eq!(meta.tag, "INFO");
//! assert_eq!(meta.id(), Some("DP"));
//! assert_eq!(meta.get("Type"), Some("Integer"));
//!
//! // Unstructured meta-lines are not errors, just not structured.
//! assert!(MetaLine::parse("##fileformat=VCFv4.2").is_none());
//! ```

/// A parsed structured meta-line (`##TAG=<key=value,...>`).
///
/// Borrows from the input line; key/value pairs keep declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaLine<'a> {
    /// Tag between `##` and `=` (e.g., `INFO`, `FORMAT`, `contig`)
    pub tag: &'a str,
    fields: Vec<(&'a str, &'a str)>,
}

impl<'a> MetaLine<'a> {
    /// Parses a structured meta-line.
    ///
    /// Returns `None` unless the line starts with `##`, carries a `TAG=`
    /// part, and binds it to a `<...>` body. The body is delimited by the
    /// first `<` and the last `>`, so nested angle brackets inside values
    /// stay intact. Pieces without `=` (bare flags, trailing commas) are
    /// skipped.
    pub fn parse(line: &'a str) -> Option<MetaLine<'a>> {
        let rest = line.strip_prefix("##")?;
        let eq = rest.find('=')?;
        let tag = &rest[..eq];
        let value = &rest[eq + 1..];

        let start = value.find('<')?;
        let end = value.rfind('>')?;
        if end <= start {
            return None;
        }
        let body = &value[start + 1..end];

        Some(MetaLine {
            tag,
            fields: split_structured_fields(body),
        })
    }

    /// Looks up the first value bound to `key`.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// The `ID` value, if present and non-empty.
    pub fn id(&self) -> Option<&'a str> {
        self.get("ID").filter(|id| !id.is_empty())
    }

    /// All key/value pairs in declaration order.
    pub fn fields(&self) -> &[(&'a str, &'a str)] {
        &self.fields
    }
}

/// Splits a `key=value,key=value` body on unescaped, unquoted commas.
fn split_structured_fields(body: &str) -> Vec<(&str, &str)> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                push_pair(&mut fields, &body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_pair(&mut fields, &body[start..]);

    fields
}

fn push_pair<'a>(fields: &mut Vec<(&'a str, &'a str)>, piece: &'a str) {
    if let Some(eq) = piece.find('=') {
        fields.push((&piece[..eq], &piece[eq + 1..]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_info_line() {
        let line = "##INFO=<ID=AC,Number=A,Type=Integer,Description=\"Allele count\">";
        let meta = MetaLine::parse(line).unwrap();

        assert_eq!(meta.tag, "INFO");
        assert_eq!(meta.id(), Some("AC"));
        assert_eq!(meta.get("Number"), Some("A"));
        assert_eq!(meta.get("Type"), Some("Integer"));
        assert_eq!(meta.get("Description"), Some("\"Allele count\""));
    }

    #[test]
    fn test_parse_contig_line() {
        let meta = MetaLine::parse("##contig=<ID=chr1,length=248956422>").unwrap();
        assert_eq!(meta.tag, "contig");
        assert_eq!(meta.id(), Some("chr1"));
        assert_eq!(meta.get("length"), Some("248956422"));
    }

    #[test]
    fn test_parse_contig_without_length() {
        let meta = MetaLine::parse("##contig=<ID=chrM>").unwrap();
        assert_eq!(meta.id(), Some("chrM"));
        assert_eq!(meta.get("length"), None);
    }

    #[test]
    fn test_field_order_preserved() {
        let meta = MetaLine::parse("##FORMAT=<Number=1,ID=GT,Type=String>").unwrap();
        let keys: Vec<&str> = meta.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["Number", "ID", "Type"]);
        assert_eq!(meta.id(), Some("GT"));
    }

    #[test]
    fn test_quoted_comma_stays_in_value() {
        let line = "##INFO=<ID=CSQ,Description=\"Consequence, from VEP\",Number=.>";
        let meta = MetaLine::parse(line).unwrap();
        assert_eq!(
            meta.get("Description"),
            Some("\"Consequence, from VEP\"")
        );
        assert_eq!(meta.get("Number"), Some("."));
    }

    #[test]
    fn test_escaped_comma_stays_in_value() {
        let meta = MetaLine::parse("##INFO=<ID=X\\,Y,Number=1>").unwrap();
        assert_eq!(meta.id(), Some("X\\,Y"));
        assert_eq!(meta.get("Number"), Some("1"));
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        let line = "##INFO=<ID=Q,Description=\"say \\\"hi\\\", twice\">";
        let meta = MetaLine::parse(line).unwrap();
        assert_eq!(meta.id(), Some("Q"));
        assert_eq!(
            meta.get("Description"),
            Some("\"say \\\"hi\\\", twice\"")
        );
    }

    #[test]
    fn test_nested_angle_brackets() {
        let meta = MetaLine::parse("##ALT=<ID=DEL,Description=\"Deletion <x>\">").unwrap();
        assert_eq!(meta.id(), Some("DEL"));
    }

    #[test]
    fn test_trailing_comma_tolerated() {
        let meta = MetaLine::parse("##contig=<ID=chr2,>").unwrap();
        assert_eq!(meta.id(), Some("chr2"));
        assert_eq!(meta.fields().len(), 1);
    }

    #[test]
    fn test_missing_id_key() {
        let meta = MetaLine::parse("##contig=<length=1000>").unwrap();
        assert_eq!(meta.id(), None);
    }

    #[test]
    fn test_empty_id_is_absent() {
        let meta = MetaLine::parse("##contig=<ID=,length=5>").unwrap();
        assert_eq!(meta.id(), None);
        assert_eq!(meta.get("ID"), Some(""));
    }

    #[test]
    fn test_unstructured_lines_rejected() {
        assert!(MetaLine::parse("##fileformat=VCFv4.2").is_none());
        assert!(MetaLine::parse("##source=test").is_none());
        assert!(MetaLine::parse("#CHROM\tPOS").is_none());
        assert!(MetaLine::parse("chr1\t100").is_none());
        assert!(MetaLine::parse("##broken").is_none());
        assert!(MetaLine::parse("##broken=<no_close").is_none());
        assert!(MetaLine::parse("##broken=>only_close<").is_none());
    }
}
