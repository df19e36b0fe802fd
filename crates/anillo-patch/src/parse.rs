//! Patch text parsing.
//!
//! The strict inverse of [`render`](crate::emit::render): rebuilding a
//! graph from emitted text reproduces the node and connection sequences
//! exactly, in order and content. Node ids are implied by line order, so
//! the parser feeds lines back through [`PatchGraph`]'s own append API and
//! inherits its reference and parameter-shape checks.

use std::path::Path;

use anillo_core::{NodeId, NodeKind, ParamValue, PatchGraph};

use crate::emit::{PATCH_HEADER, PATCH_TRAILER};
use crate::error::PatchError;

/// Parses patch text back into a [`PatchGraph`].
pub fn parse(text: &str) -> Result<PatchGraph, PatchError> {
    let mut lines = text.lines().enumerate();
    match lines.next() {
        Some((_, line)) if line == PATCH_HEADER => {}
        _ => return Err(PatchError::MissingHeader),
    }

    let mut graph = PatchGraph::new();
    let mut in_connections = false;
    let mut trailer_seen = false;
    for (index, line) in lines {
        let line_no = index + 1;
        if trailer_seen {
            if !line.trim().is_empty() {
                return Err(PatchError::Malformed {
                    line: line_no,
                    message: "content after the trailing coords line".to_string(),
                });
            }
            continue;
        }
        if line == PATCH_TRAILER {
            trailer_seen = true;
            continue;
        }
        let tokens = tokenize(line, line_no)?;
        let Some(first) = tokens.first() else {
            return Err(PatchError::Malformed {
                line: line_no,
                message: "empty line inside patch body".to_string(),
            });
        };
        if first.chars().all(|c| c.is_ascii_digit()) {
            in_connections = true;
            parse_connection(&tokens, line_no, &mut graph)?;
        } else {
            if in_connections {
                return Err(PatchError::Malformed {
                    line: line_no,
                    message: "node line after the first connection line".to_string(),
                });
            }
            parse_node(&tokens, line_no, &mut graph)?;
        }
    }
    if !trailer_seen {
        return Err(PatchError::MissingTrailer);
    }
    Ok(graph)
}

/// Reads and parses a patch file.
pub fn read_patch(path: &Path) -> Result<PatchGraph, PatchError> {
    let text = std::fs::read_to_string(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

fn parse_node(
    tokens: &[String],
    line_no: usize,
    graph: &mut PatchGraph,
) -> Result<(), PatchError> {
    let kind = NodeKind::from_wire_name(&tokens[0]).ok_or_else(|| PatchError::UnknownKind {
        line: line_no,
        name: tokens[0].clone(),
    })?;
    let [x, y] = parse_ints::<i32, 2>(tokens.get(1..3), line_no, "node position")?;
    let params = tokens[3..]
        .iter()
        .map(|t| ParamValue::parse_token(t))
        .collect();
    graph.add_node(kind, x, y, params)?;
    Ok(())
}

fn parse_connection(
    tokens: &[String],
    line_no: usize,
    graph: &mut PatchGraph,
) -> Result<(), PatchError> {
    if tokens.len() != 4 {
        return Err(PatchError::Malformed {
            line: line_no,
            message: format!("connection line needs 4 fields, got {}", tokens.len()),
        });
    }
    let [src, outlet, dst, inlet] = parse_ints::<u32, 4>(Some(tokens), line_no, "connection")?;
    graph.connect(NodeId::new(src), outlet, NodeId::new(dst), inlet)?;
    Ok(())
}

fn parse_ints<T: std::str::FromStr, const N: usize>(
    tokens: Option<&[String]>,
    line_no: usize,
    what: &str,
) -> Result<[T; N], PatchError> {
    let malformed = || PatchError::Malformed {
        line: line_no,
        message: format!("{what} needs {N} integer fields"),
    };
    let tokens = tokens.ok_or_else(malformed)?;
    if tokens.len() < N {
        return Err(malformed());
    }
    let mut out = Vec::with_capacity(N);
    for t in &tokens[..N] {
        out.push(t.parse::<T>().map_err(|_| malformed())?);
    }
    out.try_into().map_err(|_| malformed())
}

/// Splits a line into atoms, keeping double-quoted atoms (with backslash
/// escapes) intact so string parameters survive embedded whitespace.
fn tokenize(line: &str, line_no: usize) -> Result<Vec<String>, PatchError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;
    for c in line.chars() {
        if escaped {
            current.push(c);
            escaped = false;
        } else if in_quotes && c == '\\' {
            current.push(c);
            escaped = true;
        } else if c == '"' {
            current.push(c);
            in_quotes = !in_quotes;
        } else if c.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if in_quotes {
        return Err(PatchError::Malformed {
            line: line_no,
            message: "unterminated string atom".to_string(),
        });
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::render;

    fn frame(body: &str) -> String {
        if body.is_empty() {
            format!("{PATCH_HEADER}\n{PATCH_TRAILER}\n")
        } else {
            format!("{PATCH_HEADER}\n{body}\n{PATCH_TRAILER}\n")
        }
    }

    #[test]
    fn rejects_missing_header() {
        assert!(matches!(
            parse("inlet 0 0\n"),
            Err(PatchError::MissingHeader)
        ));
    }

    #[test]
    fn rejects_missing_trailer() {
        let text = format!("{PATCH_HEADER}\ninlet 0 0\n");
        assert!(matches!(parse(&text), Err(PatchError::MissingTrailer)));
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = parse(&frame("widget 0 0")).unwrap_err();
        assert!(matches!(
            err,
            PatchError::UnknownKind { line: 2, ref name } if name == "widget"
        ));
    }

    #[test]
    fn rejects_dangling_connection_id() {
        let err = parse(&frame("inlet 0 0\noutlet 5 5\n0 0 9 0")).unwrap_err();
        assert!(matches!(err, PatchError::Graph(_)));
    }

    #[test]
    fn rejects_node_line_after_connections() {
        let err = parse(&frame("inlet 0 0\noutlet 5 5\n0 0 1 0\ninlet 9 9")).unwrap_err();
        assert!(matches!(err, PatchError::Malformed { line: 5, .. }));
    }

    #[test]
    fn rejects_short_connection_line() {
        let err = parse(&frame("inlet 0 0\n0 0 0")).unwrap_err();
        assert!(matches!(err, PatchError::Malformed { line: 3, .. }));
    }

    #[test]
    fn rejects_content_after_trailer() {
        let text = format!("{PATCH_HEADER}\n{PATCH_TRAILER}\ninlet 0 0\n");
        assert!(matches!(
            parse(&text),
            Err(PatchError::Malformed { line: 3, .. })
        ));
    }

    #[test]
    fn empty_frame_parses_to_empty_graph() {
        let graph = parse(&frame("")).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn negative_coordinates_parse() {
        let graph = parse(&frame("bng -15 -3 15")).unwrap();
        let node = &graph.nodes()[0];
        assert_eq!((node.x, node.y), (-15, -3));
    }

    #[test]
    fn quoted_atoms_keep_whitespace() {
        let text = frame("send 10 10 \"two words\"");
        let graph = parse(&text).unwrap();
        assert_eq!(
            graph.nodes()[0].params[0],
            ParamValue::Str("two words".to_string())
        );
        assert_eq!(render(&graph), text);
    }

    #[test]
    fn round_trips_a_hand_written_patch() {
        let text = frame("inlet 20 450\nselect 20 500 0 1 2\nlatch 700 500 0.5\n0 0 1 0");
        let graph = parse(&text).unwrap();
        assert_eq!(render(&graph), text);
    }
}
