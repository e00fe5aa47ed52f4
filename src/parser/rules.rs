//! The rule tables of both grammars, in the order rules are tried.

use crate::adapters::Level;
use crate::nodes::Token;
use crate::parser::inlines::{self, emphasis, Cursor};
use crate::parser::{autolink, block, table, Lexer};
use crate::Result;

pub(crate) type BlockTokenizer = fn(&mut Lexer<'_>, &str) -> Result<Option<Token>>;
pub(crate) type InlineTokenizer = fn(&mut Lexer<'_>, &str, &Cursor<'_>) -> Result<Option<Token>>;

pub(crate) struct BlockRule {
    pub name: &'static str,
    pub tokenize: BlockTokenizer,
    /// Only tried where paragraphs may start.
    pub top_only: bool,
    /// Sees its input cut short at the earliest extension start.
    pub clip: bool,
}

pub(crate) struct InlineRule {
    pub name: &'static str,
    pub tokenize: InlineTokenizer,
    pub clip: bool,
}

pub(crate) struct Grammar {
    pub block: &'static [BlockRule],
    pub inline: &'static [InlineRule],
}

const fn rule(name: &'static str, tokenize: BlockTokenizer) -> BlockRule {
    BlockRule {
        name,
        tokenize,
        top_only: false,
        clip: false,
    }
}

const fn span(name: &'static str, tokenize: InlineTokenizer) -> InlineRule {
    InlineRule {
        name,
        tokenize,
        clip: false,
    }
}

const PARAGRAPH: BlockRule = BlockRule {
    name: "paragraph",
    tokenize: block::paragraph,
    top_only: true,
    clip: true,
};

const INLINE_TEXT: InlineRule = InlineRule {
    name: "inline_text",
    tokenize: inlines::inline_text,
    clip: true,
};

static BLOCK: [BlockRule; 13] = [
    rule("space", block::space),
    rule("code", block::code),
    rule("fences", block::fences),
    rule("heading", block::heading),
    rule("hr", block::hr),
    rule("blockquote", block::blockquote),
    rule("list", block::list),
    rule("html", block::html),
    rule("def", block::def),
    rule("table", table::table),
    rule("lheading", block::lheading),
    PARAGRAPH,
    rule("text", block::text),
];

static BLOCK_PEDANTIC: [BlockRule; 11] = [
    rule("space", block::space),
    rule("code", block::code),
    rule("heading", block::heading_pedantic),
    rule("hr", block::hr),
    rule("blockquote", block::blockquote),
    rule("list", block::list),
    rule("html", block::html),
    rule("def", block::def_pedantic),
    rule("lheading", block::lheading),
    PARAGRAPH,
    rule("text", block::text),
];

static INLINE: [InlineRule; 11] = [
    span("escape", inlines::backslash_escape),
    span("tag", inlines::tag),
    span("link", inlines::link),
    span("reflink", inlines::reflink),
    span("em_strong", emphasis::em_strong),
    span("codespan", inlines::codespan),
    span("br", inlines::br),
    span("del", inlines::del),
    span("autolink", autolink::autolink),
    span("url", autolink::url),
    INLINE_TEXT,
];

static INLINE_PEDANTIC: [InlineRule; 9] = [
    span("escape", inlines::backslash_escape),
    span("tag", inlines::tag),
    span("link", inlines::link_pedantic),
    span("reflink", inlines::reflink_pedantic),
    span("em_strong", emphasis::em_strong),
    span("codespan", inlines::codespan),
    span("br", inlines::br),
    span("autolink", autolink::autolink),
    INLINE_TEXT,
];

pub(crate) static NORMAL: Grammar = Grammar {
    block: &BLOCK,
    inline: &INLINE,
};

pub(crate) static PEDANTIC: Grammar = Grammar {
    block: &BLOCK_PEDANTIC,
    inline: &INLINE_PEDANTIC,
};

/// Whether `name` is a built-in rule at `level` in either grammar.
/// Extensions registered under such a name replace that rule.
pub(crate) fn is_builtin(level: Level, name: &str) -> bool {
    match level {
        Level::Block => BLOCK.iter().any(|r| r.name == name),
        Level::Inline => INLINE.iter().any(|r| r.name == name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pedantic_has_no_gfm_rules() {
        assert!(is_builtin(Level::Block, "fences"));
        for name in ["fences", "table"] {
            assert!(!PEDANTIC.block.iter().any(|r| r.name == name));
        }
        for name in ["del", "url"] {
            assert!(!PEDANTIC.inline.iter().any(|r| r.name == name));
        }
        assert!(!is_builtin(Level::Inline, "fences"));
    }

    #[test]
    fn catch_alls_come_last() {
        assert_eq!(NORMAL.block.last().map(|r| r.name), Some("text"));
        assert_eq!(NORMAL.inline.last().map(|r| r.name), Some("inline_text"));
        assert!(NORMAL.block.iter().filter(|r| r.clip).all(|r| r.name == "paragraph"));
    }
}
