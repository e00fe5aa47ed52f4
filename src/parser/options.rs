//! Configuration for the lexer and renderer.  Extensions affect both.

#[cfg(feature = "bon")]
use bon::Builder;

#[derive(Default, Debug, Clone)]
/// Umbrella options struct.
pub struct Options {
    /// Enable GitHub flavoured extensions.
    pub extension: Extension,

    /// Configure parse-time options.
    pub parse: Parse,

    /// Configure render-time options.
    pub render: Render,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "bon", derive(Builder))]
/// Options to select extensions. Every extension is enabled by default.
pub struct Extension {
    /// Enables GFM tables.
    ///
    /// ```rust
    /// # use markdownmaster::{markdown_to_html, Options};
    /// let options = Options::default();
    /// assert_eq!(markdown_to_html("| a |\n|---|\n| b |\n", &options).unwrap(),
    ///            "<table>\n<thead>\n<tr>\n<th>a</th>\n</tr>\n</thead>\n\
    ///             <tbody><tr>\n<td>b</td>\n</tr>\n</tbody></table>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default = true))]
    pub table: bool,

    /// Enables `~~strikethrough~~` spans.
    ///
    /// ```rust
    /// # use markdownmaster::{markdown_to_html, Options};
    /// let options = Options::default();
    /// assert_eq!(markdown_to_html("Hello ~~world~~ there.\n", &options).unwrap(),
    ///            "<p>Hello <del>world</del> there.</p>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default = true))]
    pub strikethrough: bool,

    /// Turns bare URLs and email addresses into links.
    ///
    /// ```rust
    /// # use markdownmaster::{markdown_to_html, Options};
    /// let options = Options::default();
    /// assert_eq!(markdown_to_html("See www.example.com.\n", &options).unwrap(),
    ///            "<p>See <a href=\"http://www.example.com\">www.example.com</a>.</p>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default = true))]
    pub autolink: bool,

    /// Recognises `[ ]` and `[x]` markers at the start of list items.
    #[cfg_attr(feature = "bon", builder(default = true))]
    pub tasklist: bool,

    /// Gives headings an `id` attribute built from their text, with this
    /// prefix. `None` renders headings without ids.
    ///
    /// The builder leaves this unset unless asked; `Extension::default()` uses
    /// an empty prefix.
    ///
    /// ```rust
    /// # use markdownmaster::{markdown_to_html, Options};
    /// let mut options = Options::default();
    /// options.extension.header_ids = Some("user-content-".to_string());
    /// assert_eq!(markdown_to_html("# README\n", &options).unwrap(),
    ///            "<h1 id=\"user-content-readme\">README</h1>\n");
    /// ```
    pub header_ids: Option<String>,
}

impl Default for Extension {
    fn default() -> Self {
        Extension {
            table: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            header_ids: Some(String::new()),
        }
    }
}

impl Extension {
    /// Every extension switched off; headings still get ids.
    pub fn none() -> Self {
        Extension {
            table: false,
            strikethrough: false,
            autolink: false,
            tasklist: false,
            header_ids: Some(String::new()),
        }
    }
}

#[derive(Default, Debug, Clone)]
#[cfg_attr(feature = "bon", derive(Builder))]
/// Options for parser functions.
pub struct Parse {
    /// Follow the original markdown.pl behaviour where it differs from the
    /// modern grammar: no fenced code, no space required after `#`, any
    /// bullet may continue a list.
    #[cfg_attr(feature = "bon", builder(default))]
    pub pedantic: bool,

    /// Render every single newline inside a paragraph as `<br>`.
    ///
    /// ```rust
    /// # use markdownmaster::{markdown_to_html, Options};
    /// let mut options = Options::default();
    /// options.parse.breaks = true;
    /// assert_eq!(markdown_to_html("Hello.\nWorld.\n", &options).unwrap(),
    ///            "<p>Hello.<br>World.</p>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default))]
    pub breaks: bool,

    /// Punctuation (quotes, full-stops and hyphens) is converted into 'smart'
    /// punctuation.
    ///
    /// ```rust
    /// # use markdownmaster::{markdown_to_html, Options};
    /// let mut options = Options::default();
    /// options.parse.smart = true;
    /// assert_eq!(markdown_to_html("'Hello,' \"world\" ...", &options).unwrap(),
    ///            "<p>‘Hello,’ “world” …</p>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default))]
    pub smart: bool,

    /// Escape raw HTML instead of passing it through, and drop links to
    /// `javascript:`, `vbscript:` and `data:` URLs.
    ///
    /// ```rust
    /// # use markdownmaster::{markdown_to_html, Options};
    /// let mut options = Options::default();
    /// options.parse.sanitize = true;
    /// assert_eq!(markdown_to_html("a <b>c</b>", &options).unwrap(),
    ///            "<p>a &lt;b&gt;c&lt;/b&gt;</p>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default))]
    pub sanitize: bool,

    /// Log fatal errors and keep going with what was produced, instead of
    /// returning them.
    #[cfg_attr(feature = "bon", builder(default))]
    pub silent: bool,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "bon", derive(Builder))]
/// Options for formatter functions.
pub struct Render {
    /// Prefix for the language class of fenced code blocks.
    ///
    /// ```rust
    /// # use markdownmaster::{markdown_to_html, Options};
    /// let mut options = Options::default();
    /// options.render.lang_prefix = "lang-".to_string();
    /// assert_eq!(markdown_to_html("```rust\nfn main() {}\n```\n", &options).unwrap(),
    ///            "<pre><code class=\"lang-rust\">fn main() {}\n</code></pre>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default = String::from("language-"), into))]
    pub lang_prefix: String,

    /// Close void elements XHTML style: `<hr/>`, `<br/>`, `<img .../>`.
    #[cfg_attr(feature = "bon", builder(default))]
    pub xhtml: bool,

    /// Resolve relative link and image URLs against this base.
    ///
    /// ```rust
    /// # use markdownmaster::{markdown_to_html, Options};
    /// let mut options = Options::default();
    /// options.render.base_url = Some("https://example.com/docs/".to_string());
    /// assert_eq!(markdown_to_html("[a](intro.html)", &options).unwrap(),
    ///            "<p><a href=\"https://example.com/docs/intro.html\">a</a></p>\n");
    /// ```
    pub base_url: Option<String>,
}

impl Default for Render {
    fn default() -> Self {
        Render {
            lang_prefix: String::from("language-"),
            xhtml: false,
            base_url: None,
        }
    }
}
