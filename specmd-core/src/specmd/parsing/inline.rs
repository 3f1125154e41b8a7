//! Inline markup
//!
//!     Tokenizes a run of text with a logos lexer and pairs up the markers:
//!
//!         **bold**   *italic*   `code`   [text](url)
//!
//!     A marker without a partner is kept as literal text, as is anything the lexer does not
//!     recognize (a lone backtick, for instance). Adjacent text is merged.

use crate::specmd::ast::{Bold, InlineCode, Italic, Link, Node, Text};
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InlineToken {
    #[token("**")]
    Strong,

    #[token("*")]
    Emphasis,

    #[regex(r"`[^`]*`")]
    Code,

    #[regex(r"\[[^\]]*\]\([^)]*\)")]
    Link,

    #[token("[")]
    OpenBracket,

    #[regex(r"[^*`\[]+")]
    Text,
}

type Piece<'s> = (Option<InlineToken>, &'s str);

fn tokenize(text: &str) -> Vec<Piece<'_>> {
    let mut lexer = InlineToken::lexer(text);
    let mut pieces = Vec::new();
    while let Some(token) = lexer.next() {
        pieces.push((token.ok(), lexer.slice()));
    }
    pieces
}

/// Parse inline markup into inline nodes
pub fn parse_inlines(text: &str) -> Vec<Node> {
    let pieces = tokenize(text);
    let mut nodes = Vec::new();
    build(&pieces, &mut nodes);
    nodes
}

fn build(pieces: &[Piece<'_>], out: &mut Vec<Node>) {
    let mut i = 0;
    while i < pieces.len() {
        let (token, slice) = pieces[i];
        match token {
            Some(marker @ (InlineToken::Strong | InlineToken::Emphasis)) => {
                let close = pieces[i + 1..]
                    .iter()
                    .position(|(t, _)| *t == Some(marker))
                    .map(|offset| i + 1 + offset);
                match close {
                    Some(end) if end > i + 1 => {
                        let mut inner = Vec::new();
                        build(&pieces[i + 1..end], &mut inner);
                        out.push(match marker {
                            InlineToken::Strong => Bold::new(inner).into(),
                            _ => Italic::new(inner).into(),
                        });
                        i = end + 1;
                        continue;
                    }
                    _ => push_text(out, slice),
                }
            }
            Some(InlineToken::Code) => {
                out.push(InlineCode::new(&slice[1..slice.len() - 1]).into());
            }
            Some(InlineToken::Link) => out.push(link(slice)),
            Some(InlineToken::OpenBracket) | Some(InlineToken::Text) | None => {
                push_text(out, slice)
            }
        }
        i += 1;
    }
}

fn link(slice: &str) -> Node {
    match slice.find("](") {
        Some(split) => {
            let label = &slice[1..split];
            let url = &slice[split + 2..slice.len() - 1];
            Link::new(url, parse_inlines(label)).into()
        }
        None => Text::new(slice).into(),
    }
}

fn push_text(out: &mut Vec<Node>, slice: &str) {
    if let Some(Node::Text(last)) = out.last_mut() {
        last.value.push_str(slice);
        return;
    }
    out.push(Text::new(slice).into());
}
