/// An ordered attribute collection parsed from a `{.class #id}` block or
/// injected from configured defaults.
///
/// Class names keep their first-occurrence order and are deduplicated; at
/// most one id is kept (the last one wins). `extra` holds arbitrary
/// key=value pairs and is only ever populated by configured defaults — the
/// block grammar itself produces classes and ids only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet {
    pub classes: Vec<String>,
    pub id: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl AttributeSet {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.id.is_none() && self.extra.is_empty()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            classes: Vec::new(),
            id: None,
            extra: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn push_class(&mut self, class: &str) {
        if !self.classes.iter().any(|existing| existing == class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn set_id(&mut self, id: &str) {
        self.id = Some(id.to_string());
    }

    /// Moves a marker class to the front of the class list.
    pub(crate) fn prepend_class(&mut self, class: &str) {
        self.classes.retain(|existing| existing != class);
        self.classes.insert(0, class.to_string());
    }

    /// Merges injected defaults into this set. Default classes prepend and
    /// union; this set wins on id and key conflicts.
    pub(crate) fn merge_defaults(&self, defaults: &AttributeSet) -> AttributeSet {
        let mut merged = AttributeSet::default();
        for class in &defaults.classes {
            merged.push_class(class);
        }
        for class in &self.classes {
            merged.push_class(class);
        }
        merged.id = self.id.clone().or_else(|| defaults.id.clone());
        merged.extra = defaults
            .extra
            .iter()
            .filter(|(key, _)| !self.extra.iter().any(|(own, _)| own == key))
            .cloned()
            .chain(self.extra.iter().cloned())
            .collect();
        merged
    }
}

fn is_token_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

/// Scans an attribute block (`{.class #id}`) at the start of `text`.
///
/// The grammar is one or more `.class` / `#id` tokens, each optionally
/// followed by whitespace, wrapped in braces. Anything else is not an
/// attribute block: the scanner returns `None` and consumes nothing.
pub(crate) fn scan_attribute_block(text: &str) -> Option<(AttributeSet, usize)> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }
    let mut attrs = AttributeSet::default();
    let mut i = 1;
    let mut tokens = 0;
    loop {
        match bytes.get(i) {
            Some(&marker) if marker == b'.' || marker == b'#' => {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && is_token_char(bytes[end]) {
                    end += 1;
                }
                if end == start {
                    return None;
                }
                let token = &text[start..end];
                if marker == b'.' {
                    attrs.push_class(token);
                } else {
                    attrs.set_id(token);
                }
                tokens += 1;
                i = end;
                while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
                    i += 1;
                }
            }
            Some(&b'}') if tokens > 0 => return Some((attrs, i + 1)),
            _ => return None,
        }
    }
}

/// Splits a trailing attribute block off an inline fragment, as used by
/// heading titles (`# title {.wide #intro}`).
pub(crate) fn split_trailing_attributes(text: &str) -> (&str, AttributeSet) {
    if text.ends_with('}') {
        if let Some(open) = text.rfind('{') {
            if let Some((attrs, consumed)) = scan_attribute_block(&text[open..]) {
                if open + consumed == text.len() {
                    return (text[..open].trim_end(), attrs);
                }
            }
        }
    }
    (text, AttributeSet::default())
}
