//! Outline notation → MindMap.
//!
//! A small brace-block format for writing topic trees by hand (fixtures,
//! demos, tests). Built on `winnow` 0.7.
//!
//! ```text
//! # Comments start with `#`
//! topic @root "Launch plan" {
//!   structure: org-chart
//!   topic @design "Design" { collapsed: true
//!     topic @mockups "Mockups"
//!   }
//!   topic @qa "QA" { pin: 50, 80  size: 140 48 }
//! }
//! floating @note "Parking lot" { pin: 600, -200 }
//! ```

use crate::error::OutlineError;
use crate::id::TopicId;
use crate::model::{MindMap, Point, Size, Topic};
use crate::structure::{Direction, Structure};
use petgraph::graph::NodeIndex;
use winnow::combinator::{alt, delimited, opt, preceded};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// Parse an outline document into a `MindMap`.
///
/// Exactly one `topic` block must appear at the top level; any number of
/// `floating` blocks may follow it.
#[must_use = "parsing result should be used"]
pub fn parse_outline(input: &str) -> Result<MindMap, OutlineError> {
    let mut root: Option<ParsedTopic> = None;
    let mut floating = Vec::new();
    let mut rest = input;

    skip_ws_and_comments(&mut rest);

    while !rest.is_empty() {
        let is_floating = starts_with_keyword(rest, "floating");
        if !is_floating && !starts_with_keyword(rest, "topic") {
            return Err(syntax_error(
                input,
                rest,
                "expected `topic` or `floating`".to_string(),
            ));
        }

        let parsed = parse_topic_block
            .parse_next(&mut rest)
            .map_err(|e| syntax_error(input, rest, format!("topic parse error: {e}")))?;

        if is_floating {
            floating.push(parsed);
        } else if root.is_some() {
            return Err(OutlineError::MultipleRoots(parsed.topic.id));
        } else {
            root = Some(parsed);
        }

        skip_ws_and_comments(&mut rest);
    }

    let root = root.ok_or(OutlineError::MissingRoot)?;
    let mut map = MindMap::new(root.topic);
    let root_idx = map.root;
    for child in root.children {
        insert_recursive(&mut map, root_idx, child)?;
    }
    for parsed in floating {
        let idx = map.add_floating(parsed.topic)?;
        for child in parsed.children {
            insert_recursive(&mut map, idx, child)?;
        }
    }

    log::debug!("parsed outline with {} topics", map.graph.node_count());
    Ok(map)
}

/// Internal representation during parsing before inserting into the map.
#[derive(Debug)]
struct ParsedTopic {
    topic: Topic,
    children: Vec<ParsedTopic>,
}

fn insert_recursive(
    map: &mut MindMap,
    parent: NodeIndex,
    parsed: ParsedTopic,
) -> Result<(), OutlineError> {
    let idx = map.add_topic(parent, parsed.topic)?;
    for child in parsed.children {
        insert_recursive(map, idx, child)?;
    }
    Ok(())
}

fn syntax_error(input: &str, rest: &str, message: String) -> OutlineError {
    let offset = input.len() - rest.len();
    let line = input[..offset].matches('\n').count() + 1;
    OutlineError::Syntax { line, message }
}

fn starts_with_keyword(s: &str, keyword: &str) -> bool {
    s.strip_prefix(keyword).is_some_and(|after| {
        after.is_empty() || after.starts_with([' ', '\t', '\n', '\r', '@', '"', '{'])
    })
}

// ─── Topic blocks ───────────────────────────────────────────────────────

fn parse_topic_block(input: &mut &str) -> ModalResult<ParsedTopic> {
    let _ = alt(("topic", "floating")).parse_next(input)?;
    skip_space(input);
    let id = opt(parse_topic_id).parse_next(input)?;
    skip_space(input);
    let label = opt(parse_quoted_string).parse_next(input)?;

    let id = id.unwrap_or_else(TopicId::anonymous);
    // Unlabelled topics show their id; anonymous ones stay blank.
    let text = match label {
        Some(label) => label.to_string(),
        None if id.is_anonymous() => String::new(),
        None => id.as_str().to_string(),
    };
    let mut topic = Topic::new(id, text);
    let mut children = Vec::new();

    skip_space(input);
    if input.starts_with('{') {
        let _ = '{'.parse_next(input)?;
        skip_ws_and_comments(input);

        while !input.starts_with('}') {
            if input.is_empty() {
                return Err(ErrMode::Cut(ContextError::new()));
            }
            if starts_with_keyword(input, "topic") {
                children.push(parse_topic_block.parse_next(input)?);
            } else {
                parse_property(input, &mut topic)?;
            }
            skip_ws_and_comments(input);
        }

        let _ = '}'.parse_next(input)?;
    }

    Ok(ParsedTopic { topic, children })
}

fn parse_property(input: &mut &str, topic: &mut Topic) -> ModalResult<()> {
    let key = parse_identifier.parse_next(input)?;
    skip_space(input);
    let _ = ':'.parse_next(input)?;
    skip_space(input);

    match key {
        "structure" => {
            let value = parse_word
                .context(StrContext::Label("structure"))
                .parse_next(input)?;
            topic.structure = Some(Structure::parse(value));
        }
        "collapsed" => {
            topic.collapsed = alt(("true".value(true), "false".value(false)))
                .context(StrContext::Label("collapsed flag"))
                .parse_next(input)?;
        }
        "direction" => {
            let value = parse_word
                .context(StrContext::Label("direction"))
                .parse_next(input)?;
            topic.direction_hint = Direction::parse(value);
            if topic.direction_hint.is_none() {
                log::warn!("{}: unknown direction `{value}` ignored", topic.id);
            }
        }
        "pin" => {
            let (x, y) = parse_pair
                .context(StrContext::Label("pin coordinates"))
                .parse_next(input)?;
            topic.position = Some(Point::new(x, y));
        }
        "size" => {
            let (w, h) = parse_pair
                .context(StrContext::Label("size"))
                .parse_next(input)?;
            topic.size = Some(Size::new(w, h));
        }
        _ => {
            log::warn!("{}: unknown property `{key}` skipped", topic.id);
            let _ = take_till::<_, _, ContextError>(0.., |c: char| {
                c == '\n' || c == ';' || c == '}'
            })
            .parse_next(input);
        }
    }

    skip_opt_separator(input);
    Ok(())
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn skip_ws_and_comments(input: &mut &str) {
    loop {
        let before = *input;
        *input = input.trim_start();
        if input.starts_with('#') {
            if let Some(pos) = input.find('\n') {
                *input = &input[pos + 1..];
            } else {
                *input = "";
            }
            continue;
        }
        if *input == before {
            break;
        }
    }
}

/// Consume optional horizontal whitespace (concrete error type avoids inference issues).
fn skip_space(input: &mut &str) {
    use winnow::ascii::space0;
    let _: Result<&str, ErrMode<ContextError>> = space0.parse_next(input);
}

fn skip_opt_separator(input: &mut &str) {
    if input.starts_with(';') || input.starts_with(',') {
        *input = &input[1..];
    }
}

fn parse_identifier<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

/// Identifier that may contain dashes (`org-chart-up`).
fn parse_word<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '-').parse_next(input)
}

fn parse_topic_id(input: &mut &str) -> ModalResult<TopicId> {
    preceded('@', parse_identifier)
        .map(TopicId::intern)
        .parse_next(input)
}

fn parse_quoted_string<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited('"', take_till(0.., '"'), '"').parse_next(input)
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    if input.starts_with('-') {
        *input = &input[1..];
    }
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ =
            take_while::<_, _, ContextError>(0.., |c: char| c.is_ascii_digit()).parse_next(input);
    }
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f32>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

/// `x, y` or `x y`.
fn parse_pair(input: &mut &str) -> ModalResult<(f32, f32)> {
    let a = parse_number.parse_next(input)?;
    skip_space(input);
    if input.starts_with(',') {
        *input = &input[1..];
        skip_space(input);
    }
    let b = parse_number.parse_next(input)?;
    Ok((a, b))
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::StructureKind;
    use pretty_assertions::assert_eq;

    fn child_ids(map: &MindMap, idx: NodeIndex) -> Vec<String> {
        map.children(idx)
            .into_iter()
            .map(|c| map.graph[c].id.as_str().to_string())
            .collect()
    }

    #[test]
    fn parses_nested_topics_in_order() {
        let map = parse_outline(
            r#"
topic @ol_root "Central" {
  topic @ol_a "A" {
    topic @ol_a1 "A1"
    topic @ol_a2 "A2"
  }
  topic @ol_b "B"
}
"#,
        )
        .unwrap();

        assert_eq!(map.graph[map.root].text, "Central");
        assert_eq!(child_ids(&map, map.root), vec!["ol_a", "ol_b"]);
        let a = map.index_of(TopicId::intern("ol_a")).unwrap();
        assert_eq!(child_ids(&map, a), vec!["ol_a1", "ol_a2"]);
    }

    #[test]
    fn parses_properties() {
        let map = parse_outline(
            r#"
# header comment
topic @op_root {
  structure: org-chart-up
  topic @op_a "A" { collapsed: true; pin: 50, -80.5 }
  topic @op_b "B" {
    direction: right
    size: 140 48
  }
}
"#,
        )
        .unwrap();

        let root = &map.graph[map.root];
        assert_eq!(root.text, "op_root");
        assert_eq!(
            root.structure,
            Some(Structure::with_direction(StructureKind::OrgChart, Direction::Up))
        );

        let a = map.get_by_id(TopicId::intern("op_a")).unwrap();
        assert!(a.collapsed);
        assert_eq!(a.position, Some(Point::new(50.0, -80.5)));

        let b = map.get_by_id(TopicId::intern("op_b")).unwrap();
        assert_eq!(b.direction_hint, Some(Direction::Right));
        assert_eq!(b.size, Some(Size::new(140.0, 48.0)));
    }

    #[test]
    fn floating_blocks_become_floating_roots() {
        let map = parse_outline(
            r#"
topic @of_root
floating @of_note "Note" { pin: 400, 0
  topic @of_detail
}
"#,
        )
        .unwrap();

        assert_eq!(map.floating.len(), 1);
        let note = map.floating[0];
        assert_eq!(map.graph[note].id, TopicId::intern("of_note"));
        assert_eq!(map.parent(note), None);
        assert_eq!(child_ids(&map, note), vec!["of_detail"]);
    }

    #[test]
    fn unknown_properties_are_skipped() {
        let map = parse_outline("topic @ou_root { color: #ff0000\n structure: timeline }").unwrap();
        assert_eq!(
            map.graph[map.root].structure,
            Some(Structure::new(StructureKind::Timeline))
        );
    }

    #[test]
    fn reports_line_of_bad_statement() {
        let err = parse_outline("topic @oe_root\n\nshape @oe_x").unwrap_err();
        assert!(matches!(err, OutlineError::Syntax { line: 3, .. }), "{err:?}");
    }

    #[test]
    fn rejects_missing_and_duplicate_roots() {
        assert_eq!(parse_outline("# nothing here\n").unwrap_err(), OutlineError::MissingRoot);
        let err = parse_outline("topic @od_a\ntopic @od_b").unwrap_err();
        assert_eq!(err, OutlineError::MultipleRoots(TopicId::intern("od_b")));
    }

    #[test]
    fn duplicate_ids_surface_model_error() {
        let err = parse_outline("topic @dup_root { topic @dup_x topic @dup_x }").unwrap_err();
        assert!(matches!(err, OutlineError::Model(_)), "{err:?}");
    }

    #[test]
    fn anonymous_topics_get_generated_ids() {
        let map = parse_outline("topic @oa_root { topic \"Idea\" topic }").unwrap();
        let children = map.children(map.root);
        assert_eq!(children.len(), 2);
        let labelled = &map.graph[children[0]];
        assert!(labelled.id.is_anonymous());
        assert_eq!(labelled.text, "Idea");
        assert_eq!(map.graph[children[1]].text, "");
        assert_eq!(map.graph[map.root].text, "oa_root");
    }
}
