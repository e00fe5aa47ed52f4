use entities::ENTITIES;
use std::io::Write;
use std::{env, path::PathBuf};

/// Tag names that open a type 6 HTML block.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption", "center",
    "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link", "main", "menu",
    "menuitem", "meta", "nav", "noframes", "ol", "optgroup", "option", "p", "param", "section",
    "source", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "track",
    "ul",
];

fn main() {
    let out_dir: PathBuf = env::var("OUT_DIR").unwrap().parse().unwrap();

    // entity::lookup is handed just the inner entity name, like "amp" for
    // "&amp;"; we only match those with a trailing ";".
    //
    // entities::ENTITIES includes many both with and without a trailing ";".
    // Exclude those without, and key the map on the bare name.
    let mut entities = phf_codegen::Map::new();
    for e in ENTITIES
        .iter()
        .filter(|e| e.entity.starts_with('&') && e.entity.ends_with(';'))
    {
        entities.entry(&e.entity[1..e.entity.len() - 1], &format!("{:?}", e.characters));
    }

    let mut tags = phf_codegen::Set::new();
    for tag in BLOCK_TAGS {
        tags.entry(*tag);
    }

    let out = std::fs::File::create(out_dir.join("entitydata.rs")).unwrap();
    let mut bw = std::io::BufWriter::new(out);
    writeln!(
        bw,
        "pub(crate) static ENTITIES: phf::Map<&'static str, &'static str> = {};",
        entities.build()
    )
    .unwrap();

    let out = std::fs::File::create(out_dir.join("blocktags.rs")).unwrap();
    let mut bw = std::io::BufWriter::new(out);
    writeln!(
        bw,
        "pub(crate) static BLOCK_TAGS: phf::Set<&'static str> = {};",
        tags.build()
    )
    .unwrap();
}
