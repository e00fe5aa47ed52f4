//! The HTML renderer.

mod slugger;

pub use slugger::Slugger;

use std::borrow::Cow;
use std::collections::HashMap;

use crate::character_set::character_set;
use crate::ctype::isxdigit;
use crate::entity;
use crate::error::Error;
use crate::nodes::{ListItem, NodeList, NodeTable, TableAlignment, Token};
use crate::parser::Options;
use crate::plugins::Plugins;
use crate::strings;
use crate::Result;

/// Formats a token tree as HTML.
///
/// ```
/// # use markdownmaster::{format_html, parse_document, Options, Plugins};
/// let options = Options::default();
/// let plugins = Plugins::default();
/// let doc = parse_document("Hello *world*", &options, &plugins).unwrap();
/// assert_eq!(
///     format_html(&doc.tokens, &options, &plugins).unwrap(),
///     "<p>Hello <em>world</em></p>\n"
/// );
/// ```
pub fn format_html(tokens: &[Token], options: &Options, plugins: &Plugins<'_>) -> Result<String> {
    HtmlRenderer::new(options, plugins).render(tokens, true)
}

/// Walks a token tree and writes HTML, one method per token type.
///
/// Renderer extensions registered for a token's type are offered the token
/// first; the built-in output is used when all of them decline. The methods
/// producing a single element are public so extensions can build on them.
pub struct HtmlRenderer<'a> {
    options: &'a Options,
    plugins: &'a Plugins<'a>,
    slugger: Slugger,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(options: &'a Options, plugins: &'a Plugins<'a>) -> Self {
        HtmlRenderer {
            options,
            plugins,
            slugger: Slugger::new(),
        }
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// The slugger giving headings their ids in this document.
    pub fn slugger(&mut self) -> &mut Slugger {
        &mut self.slugger
    }

    /// Renders block tokens. Outside of `top`, text tokens are written
    /// bare instead of as paragraphs.
    pub fn render(&mut self, tokens: &[Token], top: bool) -> Result<String> {
        let mut out = String::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            i += 1;

            if let Some(html) = self.extension(token)? {
                out += &html;
                continue;
            }

            match token {
                Token::Space { .. } | Token::Def { .. } => {}
                Token::Hr { .. } => out += self.hr(),
                Token::Heading { depth, tokens, .. } => {
                    let text = self.render_inline(tokens)?;
                    let plain = entity::unescape_html(&self.render_plain(tokens)?);
                    out += &self.heading(&text, *depth, &plain);
                }
                Token::Code { text, lang, .. } => out += &self.code(text, lang.as_deref()),
                Token::Table(table) => out += &self.render_table(table)?,
                Token::Blockquote { tokens, .. } => {
                    let body = self.render(tokens, true)?;
                    out += &self.blockquote(&body);
                }
                Token::List(list) => out += &self.render_list(list)?,
                Token::ListItem(item) => out += &self.render_item(item, item.loose)?,
                Token::Html { text, .. } => out += text,
                Token::Paragraph { tokens, .. } => {
                    let text = self.render_inline(tokens)?;
                    out += &self.paragraph(&text);
                }
                Token::Text { .. } => {
                    let start = i - 1;
                    while matches!(tokens.get(i), Some(Token::Text { .. })) {
                        i += 1;
                    }
                    let run = &tokens[start..i];
                    if top {
                        out += &self.render(&[text_paragraph(run)], true)?;
                    } else {
                        let mut parts = vec![];
                        for text in run {
                            parts.push(self.block_text(text)?);
                        }
                        out += &parts.join("\n");
                    }
                }
                other => self.unknown(other)?,
            }
        }

        Ok(out)
    }

    /// Renders inline tokens.
    pub fn render_inline(&mut self, tokens: &[Token]) -> Result<String> {
        let mut out = String::new();

        for token in tokens {
            if let Some(html) = self.extension(token)? {
                out += &html;
                continue;
            }

            match token {
                Token::Escape { text, .. } | Token::Html { text, .. } => out += text,
                Token::Text { .. } => out += &self.block_text(token)?,
                Token::Link(link) => {
                    let text = self.render_inline(&link.tokens)?;
                    out += &self.link(&link.href, link.title.as_deref(), &text);
                }
                Token::Image(image) => {
                    out += &self.image(&image.href, image.title.as_deref(), &image.text)
                }
                Token::Strong { tokens, .. } => {
                    let text = self.render_inline(tokens)?;
                    out += &self.strong(&text);
                }
                Token::Em { tokens, .. } => {
                    let text = self.render_inline(tokens)?;
                    out += &self.em(&text);
                }
                Token::Codespan { text, .. } => out += &self.codespan(text),
                Token::Br { .. } => out += self.br(),
                Token::Del { tokens, .. } => {
                    let text = self.render_inline(tokens)?;
                    out += &self.del(&text);
                }
                other => self.unknown(other)?,
            }
        }

        Ok(out)
    }

    /// Only the text of inline tokens, without markup. Used for heading ids.
    pub fn render_plain(&mut self, tokens: &[Token]) -> Result<String> {
        let mut out = String::new();
        for token in tokens {
            match token {
                Token::Escape { text, .. }
                | Token::Html { text, .. }
                | Token::Codespan { text, .. }
                | Token::Image(crate::nodes::NodeLink { text, .. }) => out += text,
                Token::Text { text, tokens, .. } if tokens.is_empty() => out += text,
                Token::Text { tokens, .. }
                | Token::Strong { tokens, .. }
                | Token::Em { tokens, .. }
                | Token::Del { tokens, .. }
                | Token::Link(crate::nodes::NodeLink { tokens, .. }) => {
                    out += &self.render_plain(tokens)?
                }
                Token::Br { .. } => {}
                other => out += &self.render_inline(std::slice::from_ref(other))?,
            }
        }
        Ok(out)
    }

    fn block_text(&mut self, token: &Token) -> Result<String> {
        match token {
            Token::Text { text, tokens, .. } if tokens.is_empty() => Ok(text.clone()),
            Token::Text { tokens, .. } => self.render_inline(tokens),
            _ => Ok(String::new()),
        }
    }

    fn extension(&mut self, token: &Token) -> Result<Option<String>> {
        let plugins = self.plugins;
        for ext in plugins.renderers(token.kind()) {
            if let Some(html) = ext.render(self, token)? {
                return Ok(Some(html));
            }
        }
        Ok(None)
    }

    fn unknown(&self, token: &Token) -> Result<()> {
        let err = Error::UnknownTokenType(token.kind().to_string());
        if self.options.parse.silent {
            log::error!("{}", err);
            return Ok(());
        }
        Err(err)
    }

    fn render_table(&mut self, table: &NodeTable) -> Result<String> {
        let align = |i: usize| table.align.get(i).copied().flatten();

        let mut cells = String::new();
        for (i, cell) in table.header.iter().enumerate() {
            let content = self.render_inline(&cell.tokens)?;
            cells += &self.tablecell(&content, true, align(i));
        }
        let header = self.tablerow(&cells);

        let mut body = String::new();
        for row in &table.rows {
            let mut cells = String::new();
            for (i, cell) in row.iter().enumerate() {
                let content = self.render_inline(&cell.tokens)?;
                cells += &self.tablecell(&content, false, align(i));
            }
            body += &self.tablerow(&cells);
        }

        Ok(self.table(&header, &body))
    }

    fn render_list(&mut self, list: &NodeList) -> Result<String> {
        let mut body = String::new();
        for item in &list.items {
            body += &self.render_item(item, list.loose)?;
        }
        Ok(self.list(&body, list.ordered, list.start))
    }

    fn render_item(&mut self, item: &ListItem, loose: bool) -> Result<String> {
        if !item.task {
            let body = self.render(&item.tokens, loose)?;
            return Ok(self.listitem(&body));
        }

        let checkbox = self.checkbox(item.checked.unwrap_or(false));
        if !loose {
            let body = self.render(&item.tokens, loose)?;
            return Ok(self.listitem(&format!("{}{}", checkbox, body)));
        }

        // Loose items carry the box inside their first paragraph.
        let mut tokens = item.tokens.clone();
        match tokens.first_mut() {
            Some(
                Token::Paragraph {
                    text, tokens: inline, ..
                }
                | Token::Text {
                    text, tokens: inline, ..
                },
            ) => {
                let prefix = format!("{} ", checkbox);
                text.insert_str(0, &prefix);
                match inline.first_mut() {
                    Some(Token::Text { text, .. }) => text.insert_str(0, &prefix),
                    Some(_) => inline.insert(0, Token::text("", prefix)),
                    None => {}
                }
            }
            _ => tokens.insert(0, Token::text("", checkbox)),
        }
        let body = self.render(&tokens, loose)?;
        Ok(self.listitem(&body))
    }

    pub fn code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang
            .and_then(|l| l.split_whitespace().next())
            .filter(|l| !l.is_empty());
        let mut code = code.strip_suffix('\n').unwrap_or(code).to_string();
        code.push('\n');
        let class = lang.map(|l| format!("{}{}", self.options.render.lang_prefix, escape(l, true)));

        if let Some(highlighter) = self.plugins.render.codefence_syntax_highlighter {
            let mut code_attributes = HashMap::new();
            if let Some(class) = class {
                code_attributes.insert("class".to_string(), class);
            }
            return format!(
                "{}{}{}</code></pre>\n",
                highlighter.build_pre_tag(&HashMap::new()),
                highlighter.build_code_tag(&code_attributes),
                highlighter.highlight(lang, &code)
            );
        }

        match class {
            Some(class) => format!(
                "<pre><code class=\"{}\">{}</code></pre>\n",
                class,
                escape(&code, true)
            ),
            None => format!("<pre><code>{}</code></pre>\n", escape(&code, true)),
        }
    }

    pub fn blockquote(&self, quote: &str) -> String {
        format!("<blockquote>\n{}</blockquote>\n", quote)
    }

    /// `raw` is the plain text of the heading, from which its id is built.
    pub fn heading(&mut self, text: &str, depth: u8, raw: &str) -> String {
        match &self.options.extension.header_ids {
            Some(prefix) => {
                let id = format!("{}{}", prefix, self.slugger.slug(raw));
                format!("<h{} id=\"{}\">{}</h{}>\n", depth, id, text, depth)
            }
            None => format!("<h{}>{}</h{}>\n", depth, text, depth),
        }
    }

    pub fn hr(&self) -> &'static str {
        if self.options.render.xhtml {
            "<hr/>\n"
        } else {
            "<hr>\n"
        }
    }

    pub fn list(&self, body: &str, ordered: bool, start: Option<u32>) -> String {
        let tag = if ordered { "ol" } else { "ul" };
        let start = match start {
            Some(n) if ordered && n != 1 => format!(" start=\"{}\"", n),
            _ => String::new(),
        };
        format!("<{}{}>\n{}</{}>\n", tag, start, body, tag)
    }

    pub fn listitem(&self, text: &str) -> String {
        format!("<li>{}</li>\n", text)
    }

    pub fn checkbox(&self, checked: bool) -> String {
        format!(
            "<input {}disabled=\"\" type=\"checkbox\"{}> ",
            if checked { "checked=\"\" " } else { "" },
            if self.options.render.xhtml { " /" } else { "" }
        )
    }

    pub fn paragraph(&self, text: &str) -> String {
        format!("<p>{}</p>\n", text)
    }

    /// `<tbody>` is only written when there are body rows.
    pub fn table(&self, header: &str, body: &str) -> String {
        let body = if body.is_empty() {
            String::new()
        } else {
            format!("<tbody>{}</tbody>", body)
        };
        format!("<table>\n<thead>\n{}</thead>\n{}</table>\n", header, body)
    }

    pub fn tablerow(&self, content: &str) -> String {
        format!("<tr>\n{}</tr>\n", content)
    }

    pub fn tablecell(&self, content: &str, header: bool, align: Option<TableAlignment>) -> String {
        let tag = if header { "th" } else { "td" };
        match align {
            Some(align) => format!("<{} align=\"{}\">{}</{}>\n", tag, align.as_str(), content, tag),
            None => format!("<{}>{}</{}>\n", tag, content, tag),
        }
    }

    pub fn strong(&self, text: &str) -> String {
        format!("<strong>{}</strong>", text)
    }

    pub fn em(&self, text: &str) -> String {
        format!("<em>{}</em>", text)
    }

    pub fn codespan(&self, text: &str) -> String {
        format!("<code>{}</code>", text)
    }

    pub fn br(&self) -> &'static str {
        if self.options.render.xhtml {
            "<br/>"
        } else {
            "<br>"
        }
    }

    pub fn del(&self, text: &str) -> String {
        format!("<del>{}</del>", text)
    }

    /// A link, or just its text when the URL is rejected.
    pub fn link(&self, href: &str, title: Option<&str>, text: &str) -> String {
        let Some(href) = self.clean_url(href) else {
            return text.to_string();
        };
        let mut out = format!("<a href=\"{}\"", escape(&href, false));
        if let Some(title) = title {
            out += &format!(" title=\"{}\"", title);
        }
        out += &format!(">{}</a>", text);
        out
    }

    pub fn image(&self, href: &str, title: Option<&str>, text: &str) -> String {
        let Some(href) = self.clean_url(href) else {
            return text.to_string();
        };
        let mut out = format!("<img src=\"{}\" alt=\"{}\"", href, text);
        if let Some(title) = title {
            out += &format!(" title=\"{}\"", title);
        }
        out += if self.options.render.xhtml { "/>" } else { ">" };
        out
    }

    /// [`clean_url`] with this renderer's options.
    pub fn clean_url(&self, href: &str) -> Option<String> {
        let cleaned = clean_url(
            self.options.parse.sanitize,
            self.options.render.base_url.as_deref(),
            href,
        );
        if cleaned.is_none() {
            log::warn!("dropping link to `{}`", href);
        }
        cleaned
    }
}

/// Joins a run of block-level text tokens into one paragraph, with a
/// newline between each.
fn text_paragraph(run: &[Token]) -> Token {
    let mut raw = String::new();
    let mut text = String::new();
    let mut tokens = vec![];

    for (n, token) in run.iter().enumerate() {
        let Token::Text {
            raw: r,
            text: t,
            tokens: inline,
        } = token
        else {
            continue;
        };
        if n > 0 {
            text.push('\n');
            tokens.push(Token::text("\n", "\n"));
        }
        raw += r;
        text += t;
        if inline.is_empty() {
            tokens.push(Token::text(t.clone(), t.clone()));
        } else {
            tokens.extend(inline.iter().cloned());
        }
    }

    Token::Paragraph { raw, text, tokens }
}

/// Escapes text for HTML. Unless `encode` is set, `&` that already starts
/// an entity reference is left alone.
///
/// ```
/// # use markdownmaster::html::escape;
/// assert_eq!(escape("<a & b &amp; 'c'>", false), "&lt;a &amp; b &amp; &#39;c&#39;&gt;");
/// assert_eq!(escape("&amp;", true), "&amp;amp;");
/// ```
pub fn escape(text: &str, encode: bool) -> Cow<'_, str> {
    let b = text.as_bytes();
    let needs = |i: usize| match b[i] {
        b'<' | b'>' | b'"' | b'\'' => true,
        b'&' => encode || !starts_entity(&b[i + 1..]),
        _ => false,
    };
    let Some(first) = (0..b.len()).find(|&i| needs(i)) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 16);
    let mut org = 0;
    for i in first..b.len() {
        if !needs(i) {
            continue;
        }
        out.push_str(&text[org..i]);
        out.push_str(match b[i] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            _ => "&#39;",
        });
        org = i + 1;
    }
    out.push_str(&text[org..]);
    Cow::Owned(out)
}

/// `#?\w+;`
fn starts_entity(b: &[u8]) -> bool {
    let b = b.strip_prefix(b"#").unwrap_or(b);
    let n = b
        .iter()
        .take_while(|&&c| c.is_ascii_alphanumeric() || c == b'_')
        .count();
    n > 0 && b.get(n) == Some(&b';')
}

/// Bytes `encodeURI` leaves alone, plus `%` so existing escapes survive.
const URI_SAFE: [bool; 256] = character_set!(
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
    b"-_.!~*'();,/?:@&=+$#%"
);

/// Prepares a link destination for output: rejects script URLs when
/// sanitizing, resolves relative URLs against `base`, and percent-encodes
/// what is not allowed in a URI. `None` means the link should be dropped.
///
/// ```
/// # use markdownmaster::html::clean_url;
/// assert_eq!(clean_url(false, None, "/a b").as_deref(), Some("/a%20b"));
/// assert_eq!(clean_url(true, None, "javascript:alert(1)"), None);
/// assert_eq!(
///     clean_url(false, Some("http://x.tld/docs/page"), "/img.png").as_deref(),
///     Some("http://x.tld/img.png")
/// );
/// ```
pub fn clean_url(sanitize: bool, base: Option<&str>, href: &str) -> Option<String> {
    if sanitize {
        let decoded = percent_decode(&entity::unescape_html(href))?;
        let protocol = decoded
            .chars()
            .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
            .collect::<String>()
            .to_lowercase();
        if ["javascript:", "vbscript:", "data:"]
            .iter()
            .any(|p| protocol.starts_with(p))
        {
            return None;
        }
    }

    let href = match base {
        Some(base) if !base.is_empty() && !origin_independent(href) => Cow::Owned(resolve_url(base, href)),
        _ => Cow::Borrowed(href),
    };

    let mut out = String::with_capacity(href.len());
    for &c in href.as_bytes() {
        if URI_SAFE[c as usize] {
            out.push(c as char);
        } else {
            out += &format!("%{:02X}", c);
        }
    }
    Some(out)
}

/// Empty, starting with a scheme, or a query or fragment only.
fn origin_independent(href: &str) -> bool {
    let b = href.as_bytes();
    if b.is_empty() || b[0] == b'?' || b[0] == b'#' {
        return true;
    }
    if !b[0].is_ascii_alphabetic() {
        return false;
    }
    let n = b
        .iter()
        .take_while(|&&c| c.is_ascii_alphanumeric() || c == b'+' || c == b'.' || c == b'-')
        .count();
    b.get(n) == Some(&b':')
}

/// Resolves `href` against `base` the way a browser would for a document
/// at `base`.
pub fn resolve_url(base: &str, href: &str) -> String {
    let base = if is_just_domain(base) {
        format!("{}/", base)
    } else {
        strings::rtrim_char(base, '/', true).to_string()
    };

    let colon = match base.find(':') {
        Some(ix) if ix > 0 => ix,
        Some(_) => return format!("{}{}", base, href),
        None => {
            if href.starts_with('/') {
                return href.to_string();
            }
            return format!("{}{}", base, href);
        }
    };

    if href.starts_with("//") {
        format!("{}{}", &base[..colon + 1], href)
    } else if href.starts_with('/') {
        let after = colon + 1 + base[colon + 1..].bytes().take_while(|&c| c == b'/').count();
        let host_end = base[after..].find('/').map_or(base.len(), |ix| after + ix);
        format!("{}{}", &base[..host_end], href)
    } else {
        format!("{}{}", base, href)
    }
}

/// `scheme:`, optional slashes, then a host with no path.
fn is_just_domain(base: &str) -> bool {
    match base.find(':') {
        Some(ix) if ix > 0 => !base[ix + 1..].trim_start_matches('/').contains('/'),
        _ => false,
    }
}

fn percent_decode(s: &str) -> Option<String> {
    let b = s.as_bytes();
    let mut out = Vec::with_capacity(b.len());
    let mut i = 0;
    while i < b.len() {
        if b[i] == b'%' {
            let hex = b.get(i + 1..i + 3)?;
            if !hex.iter().all(|&c| isxdigit(c)) {
                return None;
            }
            let hi = (hex[0] as char).to_digit(16)?;
            let lo = (hex[1] as char).to_digit(16)?;
            out.push((hi * 16 + lo) as u8);
            i += 3;
        } else {
            out.push(b[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaping() {
        assert_eq!(escape("plain", false), "plain");
        assert!(matches!(escape("plain", false), Cow::Borrowed(_)));
        assert_eq!(escape("&#39; &x; &_;", false), "&#39; &x; &_;");
        assert_eq!(escape("a && b;", false), "a &amp;&amp; b;");
        assert_eq!(escape("\"q\"", true), "&quot;q&quot;");
    }

    #[test]
    fn url_resolution() {
        assert_eq!(resolve_url("http://a.tld", "b"), "http://a.tld/b");
        assert_eq!(resolve_url("http://a.tld/x/y", "b"), "http://a.tld/x/b");
        assert_eq!(resolve_url("http://a.tld/x/y", "//c.tld/d"), "http://c.tld/d");
        assert_eq!(resolve_url("http://a.tld/x/y", "/d"), "http://a.tld/d");
        assert_eq!(resolve_url("docs/page", "/d"), "/d");
        assert_eq!(resolve_url("docs/page", "d"), "docs/d");
    }

    #[test]
    fn url_cleaning() {
        assert_eq!(clean_url(false, None, "a[b]é").as_deref(), Some("a%5Bb%5D%C3%A9"));
        assert_eq!(clean_url(false, None, "%20").as_deref(), Some("%20"));
        assert_eq!(clean_url(true, None, "java&#115;cript:x"), None);
        assert_eq!(clean_url(true, None, "JaVa Script:x"), None);
        assert_eq!(clean_url(true, None, "%zz"), None);
        assert_eq!(clean_url(true, None, "data-ok.html").as_deref(), Some("data-ok.html"));
        assert_eq!(
            clean_url(false, Some("http://a.tld"), "#top").as_deref(),
            Some("#top")
        );
    }
}
