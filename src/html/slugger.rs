use rustc_hash::FxHashMap;

/// Converts heading text to unique, human-readable element ids.
///
/// To guarantee uniqueness a slugger remembers every slug it has handed
/// out; the renderer uses one per document.
///
/// ```
/// # use markdownmaster::html::Slugger;
/// let mut slugger = Slugger::new();
/// assert_eq!(slugger.slug("Hello, World!"), "hello-world");
/// assert_eq!(slugger.slug("Hello, World!"), "hello-world-1");
/// assert_eq!(slugger.slug("hello world 1"), "hello-world-1-1");
/// ```
#[derive(Debug, Default)]
pub struct Slugger {
    seen: FxHashMap<String, usize>,
}

/// Removed from slugs along with general and supplemental punctuation.
const STRIPPED: &str = "\\'!\"#$%&()*+,./:;<=>?@[]^`{|}~";

impl Slugger {
    pub fn new() -> Self {
        Slugger::default()
    }

    /// The slug of `value` before de-duplication: lowercased and trimmed,
    /// tags and punctuation removed, whitespace turned into `-`.
    pub fn serialize(value: &str) -> String {
        let lower = value.to_lowercase();
        strip_tags(lower.trim())
            .chars()
            .filter(|&c| {
                !STRIPPED.contains(c)
                    && !('\u{2000}'..='\u{206F}').contains(&c)
                    && !('\u{2E00}'..='\u{2E7F}').contains(&c)
            })
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect()
    }

    /// The next unused slug for `value`, which is then taken.
    pub fn slug(&mut self, value: &str) -> String {
        let original = Slugger::serialize(value);
        let (slug, count) = self.next_free(&original);
        self.seen.insert(original, count);
        self.seen.insert(slug.clone(), 0);
        slug
    }

    /// The slug [`slug`](Self::slug) would return, without taking it.
    pub fn peek(&self, value: &str) -> String {
        self.next_free(&Slugger::serialize(value)).0
    }

    fn next_free(&self, original: &str) -> (String, usize) {
        let Some(&taken) = self.seen.get(original) else {
            return (original.to_string(), 0);
        };
        let mut count = taken;
        loop {
            count += 1;
            let slug = format!("{}-{}", original, count);
            if !self.seen.contains_key(&slug) {
                return (slug, count);
            }
        }
    }
}

/// Removes `<...>` spans that look like tags, on a single line.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(ix) = rest.find('<') {
        out.push_str(&rest[..ix]);
        let tail = &rest[ix..];
        let looks_like_tag = tail[1..]
            .chars()
            .next()
            .map_or(false, |c| c == '!' || c == '/' || c.is_ascii_alphabetic());
        match tail.find(['>', '\n']) {
            Some(end) if looks_like_tag && tail.as_bytes()[end] == b'>' => {
                rest = &tail[end + 1..];
            }
            _ => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization() {
        assert_eq!(Slugger::serialize("  Ticks aren't in  "), "ticks-arent-in");
        assert_eq!(Slugger::serialize("<em>Big</em> deal"), "big-deal");
        assert_eq!(Slugger::serialize("a < b"), "a--b");
        assert_eq!(Slugger::serialize("snake_case — dash-ed"), "snake_case--dash-ed");
    }

    #[test]
    fn duplicates() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("foo"), "foo");
        assert_eq!(slugger.peek("foo"), "foo-1");
        assert_eq!(slugger.slug("foo"), "foo-1");
        assert_eq!(slugger.slug("foo 1"), "foo-1-1");
        assert_eq!(slugger.slug("foo"), "foo-2");
    }
}
