//! The `markdownmaster` binary.

use markdownmaster::{markdown_to_html_with_plugins, Options, Plugins};

#[cfg(feature = "syntect")]
use markdownmaster::plugins::syntect::SyntectAdapter;

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

const EXIT_SUCCESS: i32 = 0;
const EXIT_PARSE_CONFIG: i32 = 2;
const EXIT_READ_INPUT: i32 = 3;
const EXIT_COMPILE: i32 = 4;

#[derive(Debug, Parser)]
#[command(about, author, version)]
#[command(after_help = "By default, markdownmaster will attempt to read command-line options from a config file specified by --config-file.  This behaviour can be disabled by passing --config-file none.  It is not an error if the file does not exist.")]
struct Cli {
    /// Markdown file(s) to compile; or standard input if none passed
    #[arg(value_name = "FILE")]
    files: Option<Vec<PathBuf>>,

    /// Path to config file containing command-line arguments, or 'none'
    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = get_default_config_path(),
    )]
    config_file: String,

    /// Specify extension name(s) to use; when given, only these are enabled
    #[arg(short, long = "extension", value_name = "EXTENSION", value_enum)]
    extensions: Vec<Extension>,

    /// Render headings without id attributes
    #[arg(long)]
    no_header_ids: bool,

    /// Prefix for heading ids
    #[arg(long, value_name = "PREFIX", conflicts_with = "no_header_ids")]
    header_prefix: Option<String>,

    /// Follow markdown.pl where it differs from the modern grammar
    #[arg(long)]
    pedantic: bool,

    /// Treat newlines as hard line breaks
    #[arg(long)]
    breaks: bool,

    /// Use smart punctuation
    #[arg(long)]
    smart: bool,

    /// Escape raw HTML and drop links to script URLs
    #[arg(long)]
    sanitize: bool,

    /// Log fatal errors and print what could be compiled
    #[arg(long)]
    silent: bool,

    /// Close void elements XHTML style
    #[arg(long)]
    xhtml: bool,

    /// Prefix for the language class of code blocks
    #[arg(long, value_name = "PREFIX", default_value = "language-")]
    lang_prefix: String,

    /// Resolve relative URLs against this base
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Do not recognise {...} attribute blocks
    #[arg(long)]
    no_attributes: bool,

    /// Syntax highlighting for code blocks with the given theme
    #[cfg(feature = "syntect")]
    #[arg(long, value_name = "THEME")]
    syntax_highlighting: Option<String>,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Extension {
    Table,
    Strikethrough,
    Autolink,
    Tasklist,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut cli = Cli::parse();

    if cli.config_file != "none" {
        if let Ok(config) = fs::read_to_string(&cli.config_file) {
            let mut args = match shell_words::split(&config) {
                Ok(args) => args,
                Err(err) => {
                    eprintln!("failed to parse {}: {}", cli.config_file, err);
                    process::exit(EXIT_PARSE_CONFIG);
                }
            };
            log::debug!("read {} arguments from {}", args.len(), cli.config_file);
            let mut argv = env::args();
            args.insert(0, argv.next().unwrap_or_default());
            args.extend(argv);
            cli = Cli::parse_from(args);
        }
    }

    let options = options_from(&cli);

    #[cfg(feature = "syntect")]
    let syntect = cli.syntax_highlighting.as_deref().map(SyntectAdapter::new);

    let mut plugins = if cli.no_attributes {
        Plugins::default()
    } else {
        Plugins::standard()
    };
    #[cfg(feature = "syntect")]
    if let Some(adapter) = &syntect {
        plugins.render.codefence_syntax_highlighter = Some(adapter);
    }

    let mut input = String::with_capacity(2048);
    match &cli.files {
        None => {
            io::stdin().read_to_string(&mut input)?;
        }
        Some(paths) => {
            for path in paths {
                match fs::read_to_string(path) {
                    Ok(s) => input.push_str(&s),
                    Err(err) => {
                        eprintln!("failed to read {}: {}", path.display(), err);
                        process::exit(EXIT_READ_INPUT);
                    }
                }
            }
        }
    }

    let html = match markdown_to_html_with_plugins(&input, &options, &plugins) {
        Ok(html) => html,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(EXIT_COMPILE);
        }
    };

    match cli.output {
        Some(path) => fs::write(path, html)?,
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(html.as_bytes())?;
            lock.flush()?;
        }
    }

    process::exit(EXIT_SUCCESS);
}

fn options_from(cli: &Cli) -> Options {
    let mut options = Options::default();

    if !cli.extensions.is_empty() {
        let enabled = |ext| cli.extensions.contains(&ext);
        options.extension.table = enabled(Extension::Table);
        options.extension.strikethrough = enabled(Extension::Strikethrough);
        options.extension.autolink = enabled(Extension::Autolink);
        options.extension.tasklist = enabled(Extension::Tasklist);
    }
    options.extension.header_ids = if cli.no_header_ids {
        None
    } else {
        Some(cli.header_prefix.clone().unwrap_or_default())
    };

    options.parse.pedantic = cli.pedantic;
    options.parse.breaks = cli.breaks;
    options.parse.smart = cli.smart;
    options.parse.sanitize = cli.sanitize;
    options.parse.silent = cli.silent;

    options.render.xhtml = cli.xhtml;
    options.render.lang_prefix = cli.lang_prefix.clone();
    options.render.base_url = cli.base_url.clone();

    options
}

#[cfg(all(not(windows), not(target_arch = "wasm32")))]
fn get_default_config_path() -> String {
    if let Ok(xdg_dirs) = xdg::BaseDirectories::with_prefix("markdownmaster") {
        if let Ok(path) = xdg_dirs.place_config_file("config") {
            if let Some(path_str) = path.to_str() {
                return path_str.into();
            }
        }
    }

    "markdownmaster.config".into()
}

#[cfg(any(windows, target_arch = "wasm32"))]
fn get_default_config_path() -> String {
    "markdownmaster.config".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_narrow_the_defaults() {
        let cli = Cli::parse_from(["markdownmaster", "-e", "table", "--no-header-ids"]);
        let options = options_from(&cli);
        assert!(options.extension.table);
        assert!(!options.extension.autolink);
        assert_eq!(options.extension.header_ids, None);

        let cli = Cli::parse_from(["markdownmaster", "--header-prefix", "h-", "--xhtml"]);
        let options = options_from(&cli);
        assert!(options.extension.autolink);
        assert_eq!(options.extension.header_ids.as_deref(), Some("h-"));
        assert!(options.render.xhtml);
    }
}
