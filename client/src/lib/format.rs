//! Pretty printing of info replies.
//!
//! A reply value is a list of `;` separated entries, each entry a list of
//! `,` separated `name=value` fields:
//!
//! ```text
//! BB9000000000001:
//!     - ns: test
//!       objects: 42
//!     - ns: bar
//!       objects: 7
//! ```
//!
//! A value with a single entry is printed as is, next to the node name.

use std::io::{self, Write};

use common::InfoResponse;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("malformed field {0:?}, expected name=value")]
    MalformedField(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Writes the reply of every node, in node order. Nodes that failed or
/// returned nothing are skipped.
pub fn write_response<W: Write>(out: &mut W, response: &InfoResponse) -> Result<(), FormatError> {
    for (node, reply) in response {
        let result = match reply {
            Ok(Some(result)) => result.trim(),
            Ok(None) => continue,
            Err(e) => {
                warn!("skipping {}: {}", node, e);
                continue;
            }
        };
        if !result.is_empty() {
            write_node(out, node, result)?;
        }
    }
    Ok(())
}

/// Writes one node's non-empty, trimmed reply value.
pub fn write_node<W: Write>(out: &mut W, node: &str, result: &str) -> Result<(), FormatError> {
    let entries: Vec<&str> = result.split(';').collect();
    if entries.len() == 1 {
        writeln!(out, "{}: {}", node, result)?;
        return Ok(());
    }

    writeln!(out, "{}:", node)?;
    for entry in entries.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
        for (i, field) in entry.split(',').enumerate() {
            let (name, value) = field
                .split_once('=')
                .ok_or_else(|| FormatError::MalformedField(field.to_string()))?;
            if i == 0 {
                writeln!(out, "    - {}: {}", name, value)?;
            } else {
                writeln!(out, "      {}: {}", name, value)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ClientError;

    fn render(response: &InfoResponse) -> String {
        let mut out = Vec::new();
        write_response(&mut out, response).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn single(node: &str, value: Option<&str>) -> InfoResponse {
        let mut response = InfoResponse::new();
        response.insert(node.to_string(), Ok(value.map(String::from)));
        response
    }

    #[test]
    fn multiple_entries_become_bullets() {
        let output = render(&single("BB9", Some("key1=val1;key2=val2")));
        assert_eq!(output, "BB9:\n    - key1: val1\n    - key2: val2\n");
    }

    #[test]
    fn later_fields_are_nested() {
        let output = render(&single(
            "BB9",
            Some("ns=test,objects=42;ns=bar,objects=7,tombstones=0"),
        ));
        assert_eq!(
            output,
            "BB9:\n    - ns: test\n      objects: 42\n    - ns: bar\n      objects: 7\n      tombstones: 0\n"
        );
    }

    #[test]
    fn single_entry_is_one_line() {
        assert_eq!(render(&single("BB9", Some("status=ok"))), "BB9: status=ok\n");
    }

    #[test]
    fn single_entry_is_trimmed() {
        assert_eq!(render(&single("BB9", Some("  7.1.0\n"))), "BB9: 7.1.0\n");
    }

    #[test]
    fn empty_and_missing_results_are_skipped() {
        assert_eq!(render(&single("BB9", Some("   "))), "");
        assert_eq!(render(&single("BB9", Some(""))), "");
        assert_eq!(render(&single("BB9", None)), "");
    }

    #[test]
    fn failed_nodes_are_skipped() {
        let mut response = single("B2", Some("status=ok"));
        response.insert(
            "A1".to_string(),
            Err(ClientError::Disconnected("10.0.0.1:3000".to_string())),
        );
        assert_eq!(render(&response), "B2: status=ok\n");
    }

    #[test]
    fn blank_entries_are_dropped() {
        let output = render(&single("BB9", Some("a=1; ;b=2;")));
        assert_eq!(output, "BB9:\n    - a: 1\n    - b: 2\n");
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        let output = render(&single("BB9", Some("filter=a=b;x=1")));
        assert_eq!(output, "BB9:\n    - filter: a=b\n    - x: 1\n");
    }

    #[test]
    fn nodes_print_in_order() {
        let mut response = single("B2", Some("status=ok"));
        response.insert("A1".to_string(), Ok(Some("status=ok".to_string())));
        assert_eq!(render(&response), "A1: status=ok\nB2: status=ok\n");
    }

    #[test]
    fn field_without_equals_is_an_error() {
        let mut out = Vec::new();
        let result = write_response(&mut out, &single("BB9", Some("a=1;broken")));

        match result {
            Err(FormatError::MalformedField(field)) => assert_eq!(field, "broken"),
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(String::from_utf8(out).unwrap(), "BB9:\n    - a: 1\n");
    }
}
