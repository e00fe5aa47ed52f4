//! The token tree produced by the lexer.

use std::collections::BTreeMap;

/// The core token enum.
///
/// Every token carries `raw`, the exact source text it consumed. Tokens with
/// inline content keep both the `text` that was tokenized and the resulting
/// `tokens`. On inline tokens `text` is already HTML-escaped, ready to be
/// written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// **Block**. One or more blank lines.
    Space {
        /// Source text.
        raw: String,
    },

    /// **Block**. A code block; may be fenced or indented. Its text is not
    /// parsed as markdown.
    ///
    /// ``` md
    /// ~~~rust
    /// fn main() {}
    /// ~~~
    /// ```
    Code {
        /// Source text.
        raw: String,
        /// The first word of the info string, unescaped.
        lang: Option<String>,
        /// The contents of the block.
        text: String,
        /// How the block was written.
        style: CodeBlockStyle,
    },

    /// **Block**. An ATX (`## Title`) or setext (`Title\n---`) heading.
    /// Contains **inlines**.
    Heading {
        /// Source text.
        raw: String,
        /// 1 through 6.
        depth: u8,
        /// The heading text before inline tokenization.
        text: String,
        /// Inline children.
        tokens: Vec<Token>,
    },

    /// **Block**. A thematic break.
    ///
    /// ``` md
    /// * * *
    /// ```
    Hr {
        /// Source text.
        raw: String,
    },

    /// **Block**. A block quote. Contains other **blocks**.
    ///
    /// ``` md
    /// > A block quote.
    /// ```
    Blockquote {
        /// Source text.
        raw: String,
        /// The quoted text with its `>` markers removed.
        text: String,
        /// Block children.
        tokens: Vec<Token>,
    },

    /// **Block**. A list. Contains list items.
    List(NodeList),

    /// **Block**. A list item, as found in [`NodeList::items`].
    ListItem(ListItem),

    /// **Block** or **Inline**. Raw HTML, passed through unescaped.
    Html {
        /// Source text.
        raw: String,
        /// The HTML to output.
        text: String,
        /// Whether this came from a block-level rule.
        block: bool,
    },

    /// **Block**. A link reference definition. Renders nothing; the lexer
    /// records it in the document's [`RefMap`](crate::parser::RefMap).
    ///
    /// ``` md
    /// [label]: https://example.com "Title"
    /// ```
    Def {
        /// Source text.
        raw: String,
        /// The normalized label.
        tag: String,
        /// The destination.
        href: String,
        /// The title, if any.
        title: Option<String>,
    },

    /// **Block**. A GFM table.
    Table(NodeTable),

    /// **Block**. A paragraph. Contains **inlines**.
    Paragraph {
        /// Source text.
        raw: String,
        /// Paragraph text before inline tokenization.
        text: String,
        /// Inline children.
        tokens: Vec<Token>,
    },

    /// **Block** or **Inline**. Text. At block level (inside list items and
    /// other nested blocks) it carries inline children; at inline level
    /// `tokens` is empty and `text` is escaped HTML.
    Text {
        /// Source text.
        raw: String,
        /// The text.
        text: String,
        /// Inline children, for block-level text.
        tokens: Vec<Token>,
    },

    /// **Inline**. A backslash escape.
    Escape {
        /// Source text.
        raw: String,
        /// The escaped character, HTML-escaped.
        text: String,
    },

    /// **Inline**. A link, autolink or bare URL. Contains other **inlines**.
    Link(NodeLink),

    /// **Inline**. An image.
    Image(NodeLink),

    /// **Inline**. Strong emphasis. Contains other **inlines**.
    Strong {
        /// Source text.
        raw: String,
        /// The text between the delimiters.
        text: String,
        /// Inline children.
        tokens: Vec<Token>,
    },

    /// **Inline**. Emphasis. Contains other **inlines**.
    Em {
        /// Source text.
        raw: String,
        /// The text between the delimiters.
        text: String,
        /// Inline children.
        tokens: Vec<Token>,
    },

    /// **Inline**. A code span.
    Codespan {
        /// Source text.
        raw: String,
        /// The code, HTML-escaped.
        text: String,
    },

    /// **Inline**. A hard line break.
    Br {
        /// Source text.
        raw: String,
    },

    /// **Inline**. Strikethrough. Contains other **inlines**.
    Del {
        /// Source text.
        raw: String,
        /// The text between the tildes.
        text: String,
        /// Inline children.
        tokens: Vec<Token>,
    },

    /// A token produced by a tokenizer extension.
    Custom(CustomToken),
}

/// How a code block was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeBlockStyle {
    /// Indented by four spaces.
    Indented,
    /// Between ```` ``` ```` or `~~~` fences.
    Fenced,
}

/// The metadata of a list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeList {
    /// Source text.
    pub raw: String,
    /// Whether the list is ordered.
    pub ordered: bool,
    /// The number of the first item, for ordered lists.
    pub start: Option<u32>,
    /// Whether items are separated by blank lines.
    pub loose: bool,
    /// The items.
    pub items: Vec<ListItem>,
}

/// One item of a list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    /// Source text, bullet included.
    pub raw: String,
    /// Whether the item started with a task marker.
    pub task: bool,
    /// For task items, whether the box is ticked.
    pub checked: Option<bool>,
    /// Whether this item made its list loose.
    pub loose: bool,
    /// The item's content with the bullet and indentation removed.
    pub text: String,
    /// Block children.
    pub tokens: Vec<Token>,
}

/// Alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAlignment {
    /// `:--`
    Left,
    /// `:-:`
    Center,
    /// `--:`
    Right,
}

impl TableAlignment {
    /// The value of the HTML `align` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableAlignment::Left => "left",
            TableAlignment::Center => "center",
            TableAlignment::Right => "right",
        }
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableCell {
    /// Cell text, trimmed.
    pub text: String,
    /// Inline children.
    pub tokens: Vec<Token>,
}

/// The metadata and cells of a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeTable {
    /// Source text.
    pub raw: String,
    /// Per-column alignment; `None` when the separator has no colon.
    pub align: Vec<Option<TableAlignment>>,
    /// The header row.
    pub header: Vec<TableCell>,
    /// Body rows, each with as many cells as the header.
    pub rows: Vec<Vec<TableCell>>,
}

/// The details of a link or image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeLink {
    /// Source text.
    pub raw: String,
    /// The destination.
    pub href: String,
    /// The title, HTML-escaped.
    pub title: Option<String>,
    /// The link text. For images this is the escaped alt text.
    pub text: String,
    /// Inline children; always empty for images.
    pub tokens: Vec<Token>,
    /// The body of a trailing `{...}` attribute block.
    pub attributes: Option<String>,
}

/// A token made by an extension tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomToken {
    /// The token type; renderer extensions registered under this name
    /// render it.
    pub name: String,
    /// Source text.
    pub raw: String,
    /// Text to tokenize as inlines during the inline pass, when
    /// `inline` is set.
    pub text: String,
    /// Children: blocks the extension produced itself, or the inline
    /// tokens of `text`.
    pub tokens: Vec<Token>,
    /// Queue `text` for inline tokenization into `tokens`.
    pub inline: bool,
    /// Free-form data for the extension's renderer.
    pub meta: BTreeMap<String, String>,
}

impl Token {
    /// The token type, as used to look up renderer extensions.
    pub fn kind(&self) -> &str {
        match self {
            Token::Space { .. } => "space",
            Token::Code { .. } => "code",
            Token::Heading { .. } => "heading",
            Token::Hr { .. } => "hr",
            Token::Blockquote { .. } => "blockquote",
            Token::List(..) => "list",
            Token::ListItem(..) => "list_item",
            Token::Html { .. } => "html",
            Token::Def { .. } => "def",
            Token::Table(..) => "table",
            Token::Paragraph { .. } => "paragraph",
            Token::Text { .. } => "text",
            Token::Escape { .. } => "escape",
            Token::Link(..) => "link",
            Token::Image(..) => "image",
            Token::Strong { .. } => "strong",
            Token::Em { .. } => "em",
            Token::Codespan { .. } => "codespan",
            Token::Br { .. } => "br",
            Token::Del { .. } => "del",
            Token::Custom(custom) => &custom.name,
        }
    }

    /// The source text the token consumed.
    pub fn raw(&self) -> &str {
        match self {
            Token::Space { raw }
            | Token::Code { raw, .. }
            | Token::Heading { raw, .. }
            | Token::Hr { raw }
            | Token::Blockquote { raw, .. }
            | Token::Html { raw, .. }
            | Token::Def { raw, .. }
            | Token::Paragraph { raw, .. }
            | Token::Text { raw, .. }
            | Token::Escape { raw, .. }
            | Token::Strong { raw, .. }
            | Token::Em { raw, .. }
            | Token::Codespan { raw, .. }
            | Token::Br { raw }
            | Token::Del { raw, .. } => raw,
            Token::List(list) => &list.raw,
            Token::ListItem(item) => &item.raw,
            Token::Table(table) => &table.raw,
            Token::Link(link) | Token::Image(link) => &link.raw,
            Token::Custom(custom) => &custom.raw,
        }
    }

    pub(crate) fn raw_mut(&mut self) -> &mut String {
        match self {
            Token::Space { raw }
            | Token::Code { raw, .. }
            | Token::Heading { raw, .. }
            | Token::Hr { raw }
            | Token::Blockquote { raw, .. }
            | Token::Html { raw, .. }
            | Token::Def { raw, .. }
            | Token::Paragraph { raw, .. }
            | Token::Text { raw, .. }
            | Token::Escape { raw, .. }
            | Token::Strong { raw, .. }
            | Token::Em { raw, .. }
            | Token::Codespan { raw, .. }
            | Token::Br { raw }
            | Token::Del { raw, .. } => raw,
            Token::List(list) => &mut list.raw,
            Token::ListItem(item) => &mut item.raw,
            Token::Table(table) => &mut table.raw,
            Token::Link(link) | Token::Image(link) => &mut link.raw,
            Token::Custom(custom) => &mut custom.raw,
        }
    }

    /// Shorthand for an inline text token whose text needs no escaping.
    pub fn text(raw: impl Into<String>, text: impl Into<String>) -> Token {
        Token::Text {
            raw: raw.into(),
            text: text.into(),
            tokens: vec![],
        }
    }

    /// Mutable access to the directly nested tokens, if this token has any.
    /// Lists expose nothing here; their items are reached through
    /// [`NodeList::items`], and table cells through [`NodeTable`].
    pub fn children_mut(&mut self) -> Option<&mut Vec<Token>> {
        match self {
            Token::Heading { tokens, .. }
            | Token::Blockquote { tokens, .. }
            | Token::Paragraph { tokens, .. }
            | Token::Text { tokens, .. }
            | Token::Strong { tokens, .. }
            | Token::Em { tokens, .. }
            | Token::Del { tokens, .. } => Some(tokens),
            Token::ListItem(item) => Some(&mut item.tokens),
            Token::Link(link) => Some(&mut link.tokens),
            Token::Custom(custom) => Some(&mut custom.tokens),
            _ => None,
        }
    }
}

/// Calls `f` on every token of the tree in document order, parents before
/// their children. List items and table cells are visited through their
/// containers.
pub fn walk_tokens<F>(tokens: &mut [Token], f: &mut F)
where
    F: FnMut(&mut Token),
{
    for token in tokens.iter_mut() {
        f(token);
        match token {
            Token::List(list) => {
                for item in &mut list.items {
                    walk_tokens(&mut item.tokens, f);
                }
            }
            Token::Table(table) => {
                for cell in table.header.iter_mut().chain(table.rows.iter_mut().flatten()) {
                    walk_tokens(&mut cell.tokens, f);
                }
            }
            other => {
                if let Some(children) = other.children_mut() {
                    walk_tokens(children, f);
                }
            }
        }
    }
}
