use crate::ast::{
    Block, BlockKind, CodeBlock, Document, EmbedNode, ImageNode, Inline, InlineSeq, LinkNode,
    Table, TableAlign,
};
use crate::attrs::{self, AttributeSet};
use crate::config::Options;
use crate::reference::{Reference, ReferenceTable};

/// Per-document parser. Block scanning collects reference definitions as a
/// side effect; inline scanning is pure. Parsing never fails — malformed
/// input degrades to literal text and the fatal checks live in the
/// renderer.
pub(crate) struct Parser<'a> {
    options: &'a Options,
    references: ReferenceTable,
}

/// Ambient context threaded through inline scanning. The pipe marker is
/// only live inside a table row.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct InlineContext {
    pub(crate) in_table: bool,
}

struct LinkParts {
    text: String,
    url: String,
    title: Option<String>,
    refkey: Option<String>,
    consumed: usize,
    macros: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(options: &'a Options) -> Self {
        Self {
            options,
            references: ReferenceTable::default(),
        }
    }

    pub(crate) fn parse_document(mut self, source: &str) -> (Document, ReferenceTable) {
        let lines: Vec<&str> = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        let blocks = self.parse_blocks(&lines);
        (Document { blocks }, self.references)
    }

    pub(crate) fn parse_span(self, text: &str) -> (InlineSeq, ReferenceTable) {
        let inlines = self.parse_inline(text, InlineContext::default());
        (inlines, self.references)
    }

    fn parse_blocks(&mut self, lines: &[&str]) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            if lines[i].trim().is_empty() {
                i += 1;
                continue;
            }

            if let Some((block, next)) = self.parse_fenced_code(lines, i) {
                blocks.push(block);
                i = next;
                continue;
            }

            if let Some((block, next)) = self.parse_indented_code(lines, i) {
                blocks.push(block);
                i = next;
                continue;
            }

            if let Some(next) = self.parse_reference_definition(lines, i) {
                i = next;
                continue;
            }

            if let Some((block, next)) = self.parse_table(lines, i) {
                blocks.push(block);
                i = next;
                continue;
            }

            if let Some((block, next)) = self.parse_heading(lines, i) {
                blocks.push(block);
                i = next;
                continue;
            }

            if let Some((block, next)) = self.parse_setext_heading(lines, i) {
                blocks.push(block);
                i = next;
                continue;
            }

            let (block, next) = self.parse_paragraph(lines, i);
            if let Some(block) = block {
                blocks.push(block);
            }
            i = next;
        }
        blocks
    }

    fn parse_fenced_code(&self, lines: &[&str], start: usize) -> Option<(Block, usize)> {
        let line = lines[start];
        if !is_fence_start(line) {
            return None;
        }
        let trimmed = line.trim_start();
        let fence_len = count_leading(trimmed, '`');
        let info = trimmed[fence_len..].trim();
        let lang = info.split_whitespace().next().map(str::to_string);
        let mut end = lines.len();
        let mut next = lines.len();
        for (offset, candidate) in lines.iter().enumerate().skip(start + 1) {
            let close = candidate.trim();
            if close.len() >= fence_len && close.bytes().all(|b| b == b'`') {
                end = offset;
                next = offset + 1;
                break;
            }
        }
        let text = lines[start + 1..end].join("\n");
        Some((
            Block {
                attrs: AttributeSet::default(),
                kind: BlockKind::CodeBlock(CodeBlock { lang, text }),
            },
            next,
        ))
    }

    fn parse_indented_code(&self, lines: &[&str], start: usize) -> Option<(Block, usize)> {
        if !is_indented_code_line(lines[start]) {
            return None;
        }
        let mut content: Vec<String> = Vec::new();
        let mut i = start;
        while i < lines.len() {
            let line = lines[i];
            if is_indented_code_line(line) {
                content.push(strip_code_indent(line).to_string());
                i += 1;
            } else if line.trim().is_empty()
                && i + 1 < lines.len()
                && is_indented_code_line(lines[i + 1])
            {
                content.push(String::new());
                i += 1;
            } else {
                break;
            }
        }
        Some((
            Block {
                attrs: AttributeSet::default(),
                kind: BlockKind::CodeBlock(CodeBlock {
                    lang: None,
                    text: content.join("\n"),
                }),
            },
            i,
        ))
    }

    fn parse_reference_definition(&mut self, lines: &[&str], start: usize) -> Option<usize> {
        let (key, reference) = scan_reference_definition(lines[start])?;
        log::debug!("collected reference definition '{}'", key.to_lowercase());
        self.references.insert(&key, reference);
        Some(start + 1)
    }

    fn parse_table(&self, lines: &[&str], start: usize) -> Option<(Block, usize)> {
        let (attrs, header) = match table_attr_line(lines, start) {
            Some(set) => (set, start + 1),
            None => (AttributeSet::default(), start),
        };
        if !is_table_start(lines, header) {
            return None;
        }
        let aligns = parse_separator_aligns(lines[header + 1]);
        let ctx = InlineContext { in_table: true };
        let mut rows = Vec::new();
        rows.push(self.parse_inline(strip_table_row(lines[header]), ctx));
        let mut i = header + 2;
        while i < lines.len() {
            let line = lines[i].trim();
            if line.is_empty() || !line.contains('|') {
                break;
            }
            rows.push(self.parse_inline(strip_table_row(lines[i]), ctx));
            i += 1;
        }
        log::debug!("table block: {} columns, {} rows", aligns.len(), rows.len());
        Some((
            Block {
                attrs,
                kind: BlockKind::Table(Table { aligns, rows }),
            },
            i,
        ))
    }

    fn parse_heading(&self, lines: &[&str], start: usize) -> Option<(Block, usize)> {
        let trimmed = lines[start].trim();
        let level = count_leading(trimmed, '#');
        if level == 0 || level > 6 {
            return None;
        }
        let rest = &trimmed[level..];
        if !rest.is_empty() && !rest.starts_with(' ') {
            return None;
        }
        let title = rest.trim().trim_end_matches('#').trim_end();
        let (title, attrs) = attrs::split_trailing_attributes(title);
        let title = self.parse_inline(title, InlineContext::default());
        Some((
            Block {
                attrs,
                kind: BlockKind::Heading {
                    level: level as u8,
                    title,
                },
            },
            start + 1,
        ))
    }

    fn parse_setext_heading(&self, lines: &[&str], start: usize) -> Option<(Block, usize)> {
        let level = lines.get(start + 1).copied().and_then(setext_level)?;
        let text = lines[start].trim();
        if text.is_empty() {
            return None;
        }
        let (title, attrs) = attrs::split_trailing_attributes(text);
        let title = self.parse_inline(title, InlineContext::default());
        Some((
            Block {
                attrs,
                kind: BlockKind::Heading { level, title },
            },
            start + 2,
        ))
    }

    fn parse_paragraph(&self, lines: &[&str], start: usize) -> (Option<Block>, usize) {
        let mut end = start;
        while end < lines.len() {
            if lines[end].trim().is_empty() {
                break;
            }
            if end > start && self.interrupts_paragraph(lines, end) {
                break;
            }
            end += 1;
        }
        let joined = lines[start..end].join("\n");
        let text = joined.trim();
        if text.is_empty() {
            return (None, end.max(start + 1));
        }
        let content = self.parse_inline(text, InlineContext::default());
        (
            Some(Block {
                attrs: AttributeSet::default(),
                kind: BlockKind::Paragraph { content },
            }),
            end,
        )
    }

    fn interrupts_paragraph(&self, lines: &[&str], i: usize) -> bool {
        let line = lines[i];
        let trimmed = line.trim();
        if is_fence_start(line) {
            return true;
        }
        if is_atx_heading(trimmed) {
            return true;
        }
        if lines.get(i + 1).copied().and_then(setext_level).is_some() {
            return true;
        }
        if is_table_start(lines, i) || table_attr_line(lines, i).is_some() {
            return true;
        }
        scan_reference_definition(line).is_some()
    }

    pub(crate) fn parse_inline(&self, text: &str, ctx: InlineContext) -> InlineSeq {
        merge_special_attributes(self.scan_inline(text, ctx))
    }

    fn scan_inline(&self, text: &str, ctx: InlineContext) -> InlineSeq {
        let bytes = text.as_bytes();
        let mut out = InlineSeq::new();
        let mut buf = String::new();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' if i + 1 < bytes.len() && bytes[i + 1].is_ascii_punctuation() => {
                    buf.push(bytes[i + 1] as char);
                    i += 2;
                    continue;
                }
                b'`' => {
                    if let Some((inline, next)) = parse_code_span(text, i) {
                        flush_text(&mut out, &mut buf);
                        out.push(inline);
                        i = next;
                        continue;
                    }
                }
                b'@' => {
                    if let Some((inline, next)) = self.parse_mention(text, i, ctx) {
                        flush_text(&mut out, &mut buf);
                        out.push(inline);
                        i = next;
                        continue;
                    }
                }
                b'!' if bytes.get(i + 1) == Some(&b'[') => {
                    if let Some((inline, next)) = self.parse_image(text, i, ctx) {
                        flush_text(&mut out, &mut buf);
                        out.push(inline);
                        i = next;
                        continue;
                    }
                    // Unmatched bracket: swallow the bang and every opening
                    // bracket behind it so later scans cannot mis-pair them.
                    buf.push('!');
                    i += 1;
                    while i < bytes.len() && bytes[i] == b'[' {
                        buf.push('[');
                        i += 1;
                    }
                    continue;
                }
                b'[' => {
                    if let Some((inline, next)) = self.parse_link(text, i, ctx) {
                        flush_text(&mut out, &mut buf);
                        out.push(inline);
                        i = next;
                        continue;
                    }
                }
                b'{' => {
                    if let Some((set, len)) = attrs::scan_attribute_block(&text[i..]) {
                        flush_text(&mut out, &mut buf);
                        out.push(Inline::SpecialAttributes(set));
                        i += len;
                        continue;
                    }
                }
                b'|' if ctx.in_table => {
                    flush_text(&mut out, &mut buf);
                    out.push(Inline::CellBreak);
                    i += if bytes.get(i + 1) == Some(&b' ') { 2 } else { 1 };
                    continue;
                }
                b'*' | b'_' => {
                    if let Some((inline, next)) = self.parse_emphasis(text, i, ctx) {
                        flush_text(&mut out, &mut buf);
                        out.push(inline);
                        i = next;
                        continue;
                    }
                }
                b'<' => {
                    if let Some((inline, next)) = parse_autolink(text, i) {
                        flush_text(&mut out, &mut buf);
                        out.push(inline);
                        i = next;
                        continue;
                    }
                }
                _ => {}
            }
            let Some(ch) = text[i..].chars().next() else {
                break;
            };
            buf.push(ch);
            i += ch.len_utf8();
        }
        flush_text(&mut out, &mut buf);
        out
    }

    fn parse_mention(&self, text: &str, start: usize, ctx: InlineContext) -> Option<(Inline, usize)> {
        let rest = &text[start + 1..];
        let mut len = 0;
        for ch in rest.chars() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                len += ch.len_utf8();
            } else {
                break;
            }
        }
        if len == 0 {
            return None;
        }
        // The captured name is re-parsed so markup inside it still nests.
        let children = self.parse_inline(&rest[..len], ctx);
        Some((Inline::Mention { children }, start + 1 + len))
    }

    fn parse_link(&self, text: &str, start: usize, ctx: InlineContext) -> Option<(Inline, usize)> {
        let parts = self.scan_link_or_image(&text[start..])?;
        let children = self.parse_inline(&parts.text, ctx);
        let consumed = start + parts.consumed;
        Some((
            Inline::Link(LinkNode {
                url: parts.url,
                title: parts.title,
                refkey: parts.refkey,
                orig: text[start..consumed].to_string(),
                attrs: AttributeSet::default(),
                children,
            }),
            consumed,
        ))
    }

    fn parse_image(&self, text: &str, start: usize, _ctx: InlineContext) -> Option<(Inline, usize)> {
        let parts = self.scan_link_or_image(&text[start + 1..])?;
        let consumed = start + 1 + parts.consumed;
        let orig = text[start..consumed].to_string();
        if let Some(name) = parts.macros.as_deref() {
            if name != "thumb" && self.options.tags.allows("video") {
                let (default_width, default_height) = self.options.video_dimensions;
                return Some((
                    Inline::Embed(EmbedNode {
                        hosting: name.to_string(),
                        url: parts.url,
                        title: parts.title,
                        refkey: parts.refkey,
                        orig,
                        attrs: AttributeSet::default(),
                        width: parts.width.unwrap_or(default_width),
                        height: parts.height.unwrap_or(default_height),
                    }),
                    consumed,
                ));
            }
        }
        let thumb = parts.macros.as_deref() == Some("thumb") && self.options.tags.allows("thumb");
        Some((
            Inline::Image(ImageNode {
                url: parts.url,
                title: parts.title,
                refkey: parts.refkey,
                orig,
                attrs: AttributeSet::default(),
                alt: parts.text,
                width: parts.width.unwrap_or(0),
                height: parts.height.unwrap_or(0),
                thumb,
            }),
            consumed,
        ))
    }

    /// Shared scanner for `[text](url "title")`, `[text][key]`, `[text][]`
    /// and the `[text]` shortcut. A leading `:macro` token and an optional
    /// `WIDTHxHEIGHT` token are stripped from the text and reported through
    /// the side channel when the thumb or video tag is allowed.
    fn scan_link_or_image(&self, s: &str) -> Option<LinkParts> {
        let bytes = s.as_bytes();
        if bytes.first() != Some(&b'[') {
            return None;
        }
        let mut depth = 0usize;
        let mut close = None;
        for (idx, &b) in bytes.iter().enumerate() {
            match b {
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(idx);
                        break;
                    }
                }
                _ => {}
            }
        }
        let close = close?;
        let raw_text = &s[1..close];
        let mut url = String::new();
        let mut title = None;
        let mut refkey = None;
        let consumed;
        match bytes.get(close + 1) {
            Some(&b'(') => {
                let (target_url, target_title, len) = scan_target(&s[close + 2..])?;
                url = target_url;
                title = target_title;
                consumed = close + 2 + len;
            }
            Some(&b'[') => {
                let rest = &s[close + 2..];
                let end = rest.find(']')?;
                let key = if rest[..end].is_empty() {
                    raw_text
                } else {
                    &rest[..end]
                };
                refkey = Some(key.to_lowercase());
                consumed = close + 2 + end + 1;
            }
            _ => {
                refkey = Some(raw_text.to_lowercase());
                consumed = close + 1;
            }
        }

        let mut text;
        let mut macros = None;
        let mut width = None;
        let mut height = None;
        if raw_text.is_empty() {
            text = url.clone();
        } else {
            text = raw_text.to_string();
            if let Some(stripped) = raw_text.strip_prefix(':') {
                if let Some(name) = match_macro_name(stripped) {
                    text = text.replacen(&format!(":{}", name), "", 1);
                    let gated =
                        self.options.tags.allows("thumb") || self.options.tags.allows("video");
                    if gated {
                        macros = Some(name.to_string());
                    }
                    if let Some((w, h, token)) = find_dimensions(&text) {
                        text = text.replace(&token, "").trim().to_string();
                        if gated {
                            width = Some(w);
                            height = Some(h);
                        }
                    }
                }
            }
        }

        Some(LinkParts {
            text,
            url,
            title,
            refkey,
            consumed,
            macros,
            width,
            height,
        })
    }

    fn parse_emphasis(&self, text: &str, start: usize, ctx: InlineContext) -> Option<(Inline, usize)> {
        let bytes = text.as_bytes();
        let marker = bytes[start];
        let run = count_byte_run(bytes, start, marker);
        if run >= 2 {
            if let Some(close) = find_delimiter(bytes, start + 2, marker, 2) {
                let inner = &text[start + 2..close];
                if !inner.is_empty() {
                    return Some((Inline::Strong(self.parse_inline(inner, ctx)), close + 2));
                }
            }
        }
        if let Some(close) = find_delimiter(bytes, start + 1, marker, 1) {
            let inner = &text[start + 1..close];
            if !inner.is_empty() {
                return Some((Inline::Emph(self.parse_inline(inner, ctx)), close + 1));
            }
        }
        None
    }
}

/// Merges trailing special-attribute nodes into the preceding
/// link/image/embed node. Any other node kind resets the tracking; orphan
/// attribute nodes stay in the sequence and render as nothing.
fn merge_special_attributes(nodes: InlineSeq) -> InlineSeq {
    let mut out = InlineSeq::with_capacity(nodes.len());
    let mut tracked: Option<usize> = None;
    for node in nodes {
        match node {
            Inline::SpecialAttributes(set) => match tracked.take() {
                Some(idx) => {
                    if let Some(set) = attach_attrs(&mut out[idx], set) {
                        out.push(Inline::SpecialAttributes(set));
                    }
                }
                None => out.push(Inline::SpecialAttributes(set)),
            },
            Inline::Link(_) | Inline::Image(_) | Inline::Embed(_) => {
                out.push(node);
                tracked = Some(out.len() - 1);
            }
            other => {
                out.push(other);
                tracked = None;
            }
        }
    }
    out
}

fn attach_attrs(node: &mut Inline, attrs: AttributeSet) -> Option<AttributeSet> {
    match node {
        Inline::Link(link) => {
            link.attrs = attrs;
            None
        }
        Inline::Image(image) => {
            image.attrs = attrs;
            None
        }
        Inline::Embed(embed) => {
            embed.attrs = attrs;
            None
        }
        _ => Some(attrs),
    }
}

fn flush_text(out: &mut InlineSeq, buf: &mut String) {
    if !buf.is_empty() {
        out.push(Inline::Text(std::mem::take(buf)));
    }
}

fn parse_code_span(text: &str, start: usize) -> Option<(Inline, usize)> {
    let bytes = text.as_bytes();
    let run = count_byte_run(bytes, start, b'`');
    let mut i = start + run;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let close = count_byte_run(bytes, i, b'`');
            if close == run {
                let content = text[start + run..i].trim().to_string();
                return Some((Inline::CodeSpan(content), i + close));
            }
            i += close;
            continue;
        }
        i += 1;
    }
    None
}

fn parse_autolink(text: &str, start: usize) -> Option<(Inline, usize)> {
    let rest = &text[start + 1..];
    let end = rest.find('>')?;
    let candidate = &rest[..end];
    let has_scheme = ["http://", "https://", "ftp://"]
        .iter()
        .any(|scheme| candidate.starts_with(scheme));
    if !has_scheme || candidate.contains(char::is_whitespace) {
        return None;
    }
    Some((
        Inline::AutoLink {
            url: candidate.to_string(),
        },
        start + 1 + end + 1,
    ))
}

fn scan_target(s: &str) -> Option<(String, Option<String>, usize)> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    let url_start = i;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b')' {
        i += 1;
    }
    let url = s[url_start..i].to_string();
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let mut title = None;
    if let Some(&quote) = bytes.get(i) {
        if quote == b'"' || quote == b'\'' {
            let body = &s[i + 1..];
            let end = body.find(quote as char)?;
            let value = &body[..end];
            if !value.is_empty() {
                title = Some(value.to_string());
            }
            i += 1 + end + 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
        }
    }
    if bytes.get(i) != Some(&b')') {
        return None;
    }
    Some((url, title, i + 1))
}

fn scan_reference_definition(line: &str) -> Option<(String, Reference)> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix('[')?;
    let close = rest.find(']')?;
    let key = &rest[..close];
    if key.is_empty() || key.contains('[') {
        return None;
    }
    let rest = rest[close + 1..].strip_prefix(':')?;
    let mut rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    let url_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let url = &rest[..url_end];
    rest = rest[url_end..].trim_start();
    let mut title = None;
    if let Some(quote) = rest.chars().next().filter(|&c| c == '"' || c == '\'') {
        let body = &rest[1..];
        let end = body.find(quote)?;
        title = Some(body[..end].to_string());
        rest = body[end + 1..].trim_start();
    }
    let mut attrs = None;
    if rest.starts_with('{') {
        let (set, len) = attrs::scan_attribute_block(rest)?;
        attrs = Some(set);
        rest = rest[len..].trim_start();
    }
    if !rest.is_empty() {
        return None;
    }
    Some((
        key.to_string(),
        Reference {
            url: url.to_string(),
            title,
            attrs,
        },
    ))
}

fn match_macro_name(text: &str) -> Option<&'static str> {
    const MACROS: &[&str] = &[
        "thumb",
        "youtube",
        "vimeo",
        "rutube",
        "vk",
        "dailymotion",
        "sapo",
    ];
    MACROS.iter().copied().find(|name| text.starts_with(name))
}

fn find_dimensions(text: &str) -> Option<(u32, u32, String)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let width_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'x') {
            continue;
        }
        let height_start = i + 1;
        let mut j = height_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == height_start {
            i = height_start;
            continue;
        }
        match (
            text[width_start..i].parse::<u32>(),
            text[height_start..j].parse::<u32>(),
        ) {
            (Ok(width), Ok(height)) => {
                return Some((width, height, text[width_start..j].to_string()));
            }
            _ => i = j,
        }
    }
    None
}

fn find_delimiter(bytes: &[u8], from: usize, marker: u8, width: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == marker {
            let run = count_byte_run(bytes, i, marker);
            if run >= width {
                return Some(i);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    None
}

fn count_leading(text: &str, ch: char) -> usize {
    text.chars().take_while(|&c| c == ch).count()
}

fn count_byte_run(bytes: &[u8], start: usize, byte: u8) -> usize {
    let mut i = start;
    while i < bytes.len() && bytes[i] == byte {
        i += 1;
    }
    i - start
}

fn is_fence_start(line: &str) -> bool {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();
    indent < 4
        && count_leading(trimmed, '`') >= 3
        && !trimmed.trim_start_matches('`').contains('`')
}

fn is_atx_heading(trimmed: &str) -> bool {
    let level = count_leading(trimmed, '#');
    if level == 0 || level > 6 {
        return false;
    }
    let rest = &trimmed[level..];
    rest.is_empty() || rest.starts_with(' ')
}

fn is_indented_code_line(line: &str) -> bool {
    (line.starts_with("    ") || line.starts_with('\t')) && !line.trim().is_empty()
}

fn strip_code_indent(line: &str) -> &str {
    line.strip_prefix("    ")
        .or_else(|| line.strip_prefix('\t'))
        .unwrap_or(line)
}

fn setext_level(line: &str) -> Option<u8> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.bytes().all(|b| b == b'=') {
        Some(1)
    } else if trimmed.bytes().all(|b| b == b'-') {
        Some(2)
    } else {
        None
    }
}

fn is_table_start(lines: &[&str], header: usize) -> bool {
    let Some(line) = lines.get(header) else {
        return false;
    };
    line.contains('|')
        && lines
            .get(header + 1)
            .copied()
            .is_some_and(is_table_separator)
}

fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .bytes()
            .all(|b| matches!(b, b' ' | b'\t' | b'|' | b':' | b'-'))
}

fn table_attr_line(lines: &[&str], start: usize) -> Option<AttributeSet> {
    let trimmed = lines.get(start)?.trim();
    let (attrs, consumed) = attrs::scan_attribute_block(trimmed)?;
    if consumed != trimmed.len() {
        return None;
    }
    if !is_table_start(lines, start + 1) {
        return None;
    }
    Some(attrs)
}

fn parse_separator_aligns(line: &str) -> Vec<TableAlign> {
    line.trim()
        .trim_matches(|c: char| c == ' ' || c == '|')
        .split('|')
        .map(|col| {
            let col = col.trim();
            if col.is_empty() {
                return TableAlign::None;
            }
            match (col.starts_with(':'), col.ends_with(':')) {
                (true, true) => TableAlign::Center,
                (true, false) => TableAlign::Left,
                (false, true) => TableAlign::Right,
                (false, false) => TableAlign::None,
            }
        })
        .collect()
}

fn strip_table_row(line: &str) -> &str {
    let row = line.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    row.strip_suffix('|').unwrap_or(row)
}
