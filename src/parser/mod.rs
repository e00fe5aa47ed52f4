mod autolink;
mod block;
pub(crate) mod inlines;
pub mod options;
pub(crate) mod rules;
mod table;

pub use crate::parser::options::Options;

use crate::adapters::{Level, TokenizerExtension};
use crate::error::Error;
use crate::nodes::{self, CodeBlockStyle, Token};
use crate::plugins::Plugins;
use crate::parser::inlines::Cursor;
use crate::parser::rules::Grammar;
use crate::strings;
use crate::Result;
use rustc_hash::FxHashMap;

/// Lex a Markdown document to a [`Document`]: its token tree plus the link
/// reference definitions found in it.
///
/// ```
/// # use markdownmaster::{parse_document, nodes::Token, Options, Plugins};
/// let options = Options::default();
/// let plugins = Plugins::default();
/// let doc = parse_document("# Hi\n\n[home]: /\n", &options, &plugins).unwrap();
/// assert!(matches!(doc.tokens[0], Token::Heading { depth: 1, .. }));
/// assert_eq!(doc.links.lookup("HOME").unwrap().href, "/");
/// ```
pub fn parse_document<'a>(
    md: &str,
    options: &'a Options,
    plugins: &'a Plugins<'a>,
) -> Result<Document> {
    Lexer::new(options, plugins).lex(md)
}

/// Lex a fragment as inline content only. No block structure is recognised
/// and no link reference definitions are known.
pub fn parse_inline<'a>(md: &str, options: &'a Options, plugins: &'a Plugins<'a>) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(options, plugins);
    let mut tokens = lexer.inline_tokens(md)?;
    lexer.run_walkers(&mut tokens);
    Ok(tokens)
}

/// The lexer's output.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Top-level block tokens.
    pub tokens: Vec<Token>,
    /// Every link reference definition, keyed by normalized label.
    pub links: RefMap,
}

/// A reference-style link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// The destination, unescaped.
    pub href: String,
    /// The title, unescaped.
    pub title: Option<String>,
}

/// Link reference definitions by normalized label. The first definition of
/// a label wins.
#[derive(Debug, Clone, Default)]
pub struct RefMap {
    map: FxHashMap<String, ResolvedReference>,
}

impl RefMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a definition unless the label is already taken. Returns
    /// whether it was recorded.
    pub fn insert(&mut self, label: &str, reference: ResolvedReference) -> bool {
        let key = strings::normalize_label(label);
        if self.map.contains_key(&key) {
            return false;
        }
        self.map.insert(key, reference);
        true
    }

    pub fn lookup(&self, label: &str) -> Option<&ResolvedReference> {
        self.map.get(&strings::normalize_label(label))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.lookup(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Normalized labels and their targets, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedReference)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Flags carried across rule invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerState {
    /// Inside a link's text, or between `<a>` and `</a>`. Bare URLs are not
    /// linked here.
    pub in_link: bool,
    /// Between an opening and closing `pre`, `code`, `kbd` or `script` tag.
    /// Text is not escaped here.
    pub in_raw_block: bool,
    /// Lexing at a level where paragraphs may start.
    pub top: bool,
}

impl Default for LexerState {
    fn default() -> Self {
        LexerState {
            in_link: false,
            in_raw_block: false,
            top: true,
        }
    }
}

/// Turns Markdown into tokens: a block pass over the whole document, then an
/// inline pass over every token holding inline text, in document order.
pub struct Lexer<'a> {
    options: &'a Options,
    plugins: &'a Plugins<'a>,
    grammar: &'static Grammar,
    links: RefMap,
    state: LexerState,
}

impl<'a> Lexer<'a> {
    pub fn new(options: &'a Options, plugins: &'a Plugins<'a>) -> Self {
        let grammar = if options.parse.pedantic {
            &rules::PEDANTIC
        } else {
            &rules::NORMAL
        };
        Lexer {
            options,
            plugins,
            grammar,
            links: RefMap::new(),
            state: LexerState::default(),
        }
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// The link reference definitions seen so far.
    pub fn links(&self) -> &RefMap {
        &self.links
    }

    pub fn state(&self) -> &LexerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LexerState {
        &mut self.state
    }

    /// Lexes a whole document.
    pub fn lex(mut self, src: &str) -> Result<Document> {
        let mut tokens = self.blocks(src, true)?;
        self.fill_inlines(&mut tokens)?;
        self.run_walkers(&mut tokens);
        Ok(Document {
            tokens,
            links: self.links,
        })
    }

    /// Tokenizes block content at the current nesting level. Inline
    /// content of the result is filled in later by the inline pass.
    pub fn block_tokens(&mut self, src: &str) -> Result<Vec<Token>> {
        let top = self.state.top;
        self.blocks(src, top)
    }

    /// Tokenizes block content, with paragraphs allowed only if `top`.
    pub fn blocks(&mut self, src: &str, top: bool) -> Result<Vec<Token>> {
        let src = strings::normalize_source(src, self.options.parse.pedantic);
        let saved = std::mem::replace(&mut self.state.top, top);
        let tokens = self.block_loop(&src);
        self.state.top = saved;
        tokens
    }

    fn block_loop(&mut self, src: &str) -> Result<Vec<Token>> {
        let plugins = self.plugins;
        let grammar = self.grammar;
        let mut tokens: Vec<Token> = vec![];
        let mut rest = src;
        let mut last_paragraph_clipped = false;

        'outer: while !rest.is_empty() {
            for ext in plugins.tokenizers(Level::Block) {
                if let Some(token) = self.run_extension(ext, rest)? {
                    rest = &rest[token.raw().len()..];
                    tokens.push(token);
                    continue 'outer;
                }
            }

            for rule in grammar.block {
                if rule.top_only && !self.state.top {
                    continue;
                }
                let input = if rule.clip {
                    self.clip(rest, Level::Block)
                } else {
                    rest
                };

                let mut found = None;
                for ext in plugins.overrides(Level::Block, rule.name) {
                    found = self.run_extension(ext, input)?;
                    if found.is_some() {
                        break;
                    }
                }
                if found.is_none() {
                    found = (rule.tokenize)(self, input)?;
                }
                let Some(token) = found else {
                    continue;
                };

                let clipped = input.len() != rest.len();
                rest = &rest[token.raw().len()..];
                match (rule.name, token) {
                    ("space", token) if token.raw().len() == 1 && !tokens.is_empty() => {
                        if let Some(last) = tokens.last_mut() {
                            last.raw_mut().push_str(token.raw());
                        }
                    }
                    ("code", Token::Code { raw, text, style: CodeBlockStyle::Indented, .. })
                        if matches!(tokens.last(), Some(Token::Paragraph { .. } | Token::Text { .. })) =>
                    {
                        extend_text(&mut tokens, &raw, &text, "\n");
                    }
                    ("def", Token::Def { raw, .. })
                        if matches!(tokens.last(), Some(Token::Paragraph { .. } | Token::Text { .. })) =>
                    {
                        extend_text(&mut tokens, &raw, raw.trim_end_matches('\n'), "\n");
                    }
                    ("def", Token::Def { raw, tag, href, title }) => {
                        let reference = ResolvedReference {
                            href: href.clone(),
                            title: title.clone(),
                        };
                        if !self.links.insert(&tag, reference) {
                            log::debug!("ignoring duplicate definition of [{}]", tag);
                        }
                        tokens.push(Token::Def { raw, tag, href, title });
                    }
                    ("paragraph", Token::Paragraph { raw, text, .. })
                        if last_paragraph_clipped
                            && matches!(tokens.last(), Some(Token::Paragraph { .. })) =>
                    {
                        let separator = match tokens.last() {
                            Some(last) if last.raw().ends_with('\n') => "\n",
                            _ => "",
                        };
                        extend_text(&mut tokens, &raw, &text, separator);
                        last_paragraph_clipped = clipped;
                    }
                    ("paragraph", token) => {
                        last_paragraph_clipped = clipped;
                        tokens.push(token);
                    }
                    ("text", Token::Text { raw, text, .. })
                        if matches!(tokens.last(), Some(Token::Text { .. })) =>
                    {
                        extend_text(&mut tokens, &raw, &text, "\n");
                    }
                    (_, token) => tokens.push(token),
                }
                continue 'outer;
            }

            let err = Error::UngroundedParse {
                level: Level::Block,
                byte: rest.as_bytes()[0],
                offset: src.len() - rest.len(),
            };
            if self.options.parse.silent {
                log::error!("{}", err);
                break;
            }
            return Err(err);
        }

        Ok(tokens)
    }

    /// Tokenizes inline content.
    pub fn inline_tokens(&mut self, src: &str) -> Result<Vec<Token>> {
        let plugins = self.plugins;
        let grammar = self.grammar;
        let masked = inlines::mask(src, &self.links);
        let mut tokens: Vec<Token> = vec![];
        let mut rest = src;
        let mut prev_char: Option<char> = None;
        let mut keep_prev = false;

        'outer: while !rest.is_empty() {
            if !keep_prev {
                prev_char = None;
            }
            keep_prev = false;

            for ext in plugins.tokenizers(Level::Inline) {
                if let Some(token) = self.run_extension(ext, rest)? {
                    rest = &rest[token.raw().len()..];
                    tokens.push(token);
                    continue 'outer;
                }
            }

            let cursor = Cursor {
                masked: &masked[masked.len() - rest.len()..],
                prev_char,
            };

            for rule in grammar.inline {
                let input = if rule.clip {
                    self.clip(rest, Level::Inline)
                } else {
                    rest
                };

                let mut found = None;
                for ext in plugins.overrides(Level::Inline, rule.name) {
                    found = self.run_extension(ext, input)?;
                    if found.is_some() {
                        break;
                    }
                }
                if found.is_none() {
                    found = (rule.tokenize)(self, input, &cursor)?;
                }
                let Some(token) = found else {
                    continue;
                };

                rest = &rest[token.raw().len()..];
                if rule.name == "inline_text" {
                    if !token.raw().ends_with('_') {
                        prev_char = token.raw().chars().last();
                    }
                    keep_prev = true;
                }

                match token {
                    Token::Text { raw, text, .. }
                        if matches!(rule.name, "tag" | "reflink" | "inline_text")
                            && matches!(tokens.last(), Some(Token::Text { .. })) =>
                    {
                        extend_text(&mut tokens, &raw, &text, "");
                    }
                    token => tokens.push(token),
                }
                continue 'outer;
            }

            let err = Error::UngroundedParse {
                level: Level::Inline,
                byte: rest.as_bytes()[0],
                offset: src.len() - rest.len(),
            };
            if self.options.parse.silent {
                log::error!("{}", err);
                break;
            }
            return Err(err);
        }

        Ok(tokens)
    }

    /// The inline pass: every token still holding untokenized inline text,
    /// in document order.
    fn fill_inlines(&mut self, tokens: &mut [Token]) -> Result<()> {
        for token in tokens.iter_mut() {
            match token {
                Token::Heading { text, tokens, .. }
                | Token::Paragraph { text, tokens, .. }
                | Token::Text { text, tokens, .. } => {
                    if tokens.is_empty() && !text.is_empty() {
                        *tokens = self.inline_tokens(text)?;
                    }
                }
                Token::Blockquote { tokens, .. } => self.fill_inlines(tokens)?,
                Token::List(list) => {
                    for item in &mut list.items {
                        self.fill_inlines(&mut item.tokens)?;
                    }
                }
                Token::ListItem(item) => self.fill_inlines(&mut item.tokens)?,
                Token::Table(table) => {
                    for cell in table.header.iter_mut().chain(table.rows.iter_mut().flatten()) {
                        if cell.tokens.is_empty() && !cell.text.is_empty() {
                            cell.tokens = self.inline_tokens(&cell.text)?;
                        }
                    }
                }
                Token::Custom(custom) => {
                    if custom.inline {
                        if custom.tokens.is_empty() && !custom.text.is_empty() {
                            custom.tokens = self.inline_tokens(&custom.text)?;
                        }
                    } else {
                        self.fill_inlines(&mut custom.tokens)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn run_walkers(&self, tokens: &mut [Token]) {
        for walker in self.plugins.walkers() {
            nodes::walk_tokens(tokens, &mut |token| walker(token));
        }
    }

    fn run_extension(&mut self, ext: &dyn TokenizerExtension, src: &str) -> Result<Option<Token>> {
        match ext.tokenize(self, src)? {
            Some(token) if token.raw().is_empty() => {
                log::warn!("extension `{}` matched no input; ignoring its token", ext.name());
                Ok(None)
            }
            Some(token) if !src.starts_with(token.raw()) => {
                log::warn!("extension `{}` returned a token not taken from its input", ext.name());
                Ok(None)
            }
            found => Ok(found),
        }
    }

    /// Cuts `src` short where an extension at `level` says its syntax might
    /// start, never before the first character.
    fn clip<'s>(&self, src: &'s str, level: Level) -> &'s str {
        let Some(first) = src.chars().next() else {
            return src;
        };
        let skip = first.len_utf8();
        let tail = &src[skip..];
        let start = self
            .plugins
            .start_probes(level)
            .filter_map(|ext| ext.start(tail))
            .min();
        match start {
            Some(ix) if tail.is_char_boundary(ix.min(tail.len())) => &src[..skip + ix.min(tail.len())],
            _ => src,
        }
    }
}

/// Appends `raw` and `text` to the last token of `tokens`, which must hold
/// text.
fn extend_text(tokens: &mut [Token], raw: &str, text: &str, separator: &str) {
    if let Some(
        Token::Paragraph {
            raw: last_raw,
            text: last_text,
            ..
        }
        | Token::Text {
            raw: last_raw,
            text: last_text,
            ..
        },
    ) = tokens.last_mut()
    {
        last_raw.push_str(raw);
        last_text.push_str(separator);
        last_text.push_str(text);
    }
}
