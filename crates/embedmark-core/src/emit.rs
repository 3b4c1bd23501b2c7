use once_cell::sync::Lazy;

use crate::ast::{Block, BlockKind, CodeBlock, Document, EmbedNode, ImageNode, Inline, LinkNode, Table, TableAlign};
use crate::attrs::AttributeSet;
use crate::config::{DummyMode, Options};
use crate::error::MarkdownError;
use crate::hosting;
use crate::reference::ReferenceTable;

/// Per-render emitter. Holds the mention sink and the table-cell cursor,
/// both scoped to one render pass; a fresh emitter is created for every
/// top-level parse call.
pub(crate) struct Emitter<'a> {
    options: &'a Options,
    references: &'a ReferenceTable,
    mentioned: Vec<String>,
    cell: Option<CellState>,
}

struct CellState {
    tag: &'static str,
    aligns: Vec<TableAlign>,
    index: usize,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(options: &'a Options, references: &'a ReferenceTable) -> Self {
        Self {
            options,
            references,
            mentioned: Vec::new(),
            cell: None,
        }
    }

    pub(crate) fn into_mentions(self) -> Vec<String> {
        self.mentioned
    }

    pub(crate) fn emit_document(&mut self, document: &Document) -> Result<String, MarkdownError> {
        let mut out = String::new();
        for block in &document.blocks {
            let html = self.emit_block(block)?;
            if html.is_empty() {
                continue;
            }
            out.push_str(&html);
            out.push('\n');
        }
        Ok(out.trim().to_string())
    }

    fn emit_block(&mut self, block: &Block) -> Result<String, MarkdownError> {
        match &block.kind {
            BlockKind::Paragraph { content } => {
                Ok(format!("<p>{}</p>", self.emit_inlines(content)?))
            }
            BlockKind::Heading { level, title } => {
                let attrs = self.render_attr_block(&block.attrs);
                Ok(format!(
                    "<h{}{}>{}</h{}>",
                    level,
                    attrs,
                    self.emit_inlines(title)?,
                    level
                ))
            }
            BlockKind::CodeBlock(code) => Ok(self.emit_code_block(code)),
            BlockKind::Table(table) => self.emit_table(block, table),
        }
    }

    fn emit_code_block(&self, code: &CodeBlock) -> String {
        if !self.options.tags.allows("code") {
            return String::new();
        }
        let class = code
            .lang
            .as_deref()
            .map(|lang| format!(" class=\"language-{}\"", escape_attr(lang)))
            .unwrap_or_default();
        let mut text = escape_html(&code.text);
        if !text.ends_with('\n') {
            text.push('\n');
        }
        format!("<pre><code{}>{}</code></pre>", class, text)
    }

    fn emit_table(&mut self, block: &Block, table: &Table) -> Result<String, MarkdownError> {
        if !self.options.tags.allows("table") {
            return Ok(String::new());
        }
        let mut content = String::from("<thead>\n");
        for (row_idx, row) in table.rows.iter().enumerate() {
            let tag = if row_idx == 0 { "th" } else { "td" };
            self.cell = Some(CellState {
                tag,
                aligns: table.aligns.clone(),
                index: 0,
            });
            let align = self.next_cell_align();
            let cells = self.emit_inlines(row)?;
            self.cell = None;
            content.push_str(&format!(
                "<tr><{}{}>{}</{}></tr>\n",
                tag, align, cells, tag
            ));
            if row_idx == 0 {
                content.push_str("</thead>\n<tbody>\n");
            }
        }
        let attrs = self.render_attr_block(&block.attrs);
        Ok(format!("<table{}>\n{}</tbody>\n</table>", attrs, content))
    }

    fn next_cell_align(&mut self) -> String {
        let Some(state) = self.cell.as_mut() else {
            return String::new();
        };
        let align = state
            .aligns
            .get(state.index)
            .copied()
            .unwrap_or(TableAlign::None);
        state.index += 1;
        match align.keyword() {
            Some(keyword) => format!(" align=\"{}\"", keyword),
            None => String::new(),
        }
    }

    pub(crate) fn emit_inlines(&mut self, inlines: &[Inline]) -> Result<String, MarkdownError> {
        let mut out = String::new();
        for inline in inlines {
            match inline {
                Inline::Text(text) => out.push_str(&self.render_text(text)),
                Inline::CodeSpan(code) => {
                    out.push_str("<code>");
                    out.push_str(&escape_html(code));
                    out.push_str("</code>");
                }
                Inline::Emph(children) => {
                    out.push_str("<em>");
                    out.push_str(&self.emit_inlines(children)?);
                    out.push_str("</em>");
                }
                Inline::Strong(children) => {
                    out.push_str("<strong>");
                    out.push_str(&self.emit_inlines(children)?);
                    out.push_str("</strong>");
                }
                Inline::AutoLink { url } => {
                    let escaped = escape_attr(url);
                    out.push_str(&format!("<a href=\"{}\">{}</a>", escaped, escaped));
                }
                Inline::Link(link) => out.push_str(&self.emit_link(link)?),
                Inline::Image(image) => out.push_str(&self.emit_image(image)?),
                Inline::Embed(embed) => out.push_str(&self.emit_embed(embed)?),
                Inline::Mention { children } => out.push_str(&self.emit_mention(children)?),
                Inline::CellBreak => {
                    if self.cell.is_some() {
                        let tag = match &self.cell {
                            Some(state) => state.tag,
                            None => "td",
                        };
                        let align = self.next_cell_align();
                        out.push_str(&format!("</{}><{}{}>", tag, tag, align));
                    }
                }
                Inline::SpecialAttributes(_) => {}
            }
        }
        Ok(out)
    }

    fn render_text(&self, text: &str) -> String {
        let escaped = escape_html(text);
        if !self.options.enable_newlines {
            return escaped;
        }
        let parts: Vec<&str> = escaped.split('\n').collect();
        let mut out = String::with_capacity(escaped.len());
        for (idx, part) in parts.iter().enumerate() {
            if idx + 1 < parts.len() {
                out.push_str(part.strip_suffix("  ").unwrap_or(part));
                out.push_str("<br />\n");
            } else {
                out.push_str(part);
            }
        }
        out
    }

    fn emit_link(&mut self, link: &LinkNode) -> Result<String, MarkdownError> {
        let mut url = link.url.clone();
        let mut title = link.title.clone();
        let mut attrs = link.attrs.clone();
        if let Some(key) = &link.refkey {
            match self.references.lookup(key) {
                Some(reference) => {
                    url = reference.url.clone();
                    if reference.title.is_some() {
                        title = reference.title.clone();
                    }
                    if let Some(ref_attrs) = &reference.attrs {
                        attrs = ref_attrs.clone();
                    }
                }
                None => return Ok(link.orig.clone()),
            }
        }
        if let Some(defaults) = self.options.default_attributes.get("link") {
            attrs = attrs.merge_defaults(defaults);
        }
        let children = self.emit_inlines(&link.children)?;
        Ok(format!(
            "<a href=\"{}\"{}{}{}>{}</a>",
            escape_attr(&url),
            title_attr(title.as_deref()),
            self.render_attr_block(&attrs),
            render_extra_attrs(&attrs),
            children
        ))
    }

    fn emit_image(&mut self, image: &ImageNode) -> Result<String, MarkdownError> {
        let mut url = image.url.clone();
        let mut title = image.title.clone();
        let mut attrs = image.attrs.clone();
        if let Some(key) = &image.refkey {
            match self.references.lookup(key) {
                Some(reference) => {
                    url = reference.url.clone();
                    if reference.title.is_some() {
                        title = reference.title.clone();
                    }
                    if let Some(ref_attrs) = &reference.attrs {
                        attrs = ref_attrs.clone();
                    }
                }
                None => return Ok(image.orig.clone()),
            }
        }
        match &self.options.image_resolver {
            Some(resolver) => {
                let path = format!("/{}", url.trim_start_matches('/'));
                url = resolver.resolve(&path, image.width, image.height);
            }
            None if image.thumb => {
                if self.options.strict_image_resolver {
                    return Err(MarkdownError::MissingImageResolver);
                }
                // Non-strict mode degrades the thumb to a plain image.
            }
            None => {}
        }
        Ok(format!(
            "<img src=\"{}\" alt=\"{}\"{}{} />",
            escape_attr(&url),
            escape_attr(&image.alt),
            title_attr(title.as_deref()),
            self.render_attr_block(&attrs)
        ))
    }

    fn emit_embed(&mut self, embed: &EmbedNode) -> Result<String, MarkdownError> {
        let mut url = embed.url.clone();
        let mut title = embed.title.clone();
        let mut attrs = embed.attrs.clone();
        if let Some(key) = &embed.refkey {
            match self.references.lookup(key) {
                Some(reference) => {
                    url = reference.url.clone();
                    if reference.title.is_some() {
                        title = reference.title.clone();
                    }
                    if let Some(ref_attrs) = &reference.attrs {
                        attrs = ref_attrs.clone();
                    }
                }
                None => return Ok(embed.orig.clone()),
            }
        }
        if self.options.dummy_mode.has(DummyMode::PLAIN_LINK) {
            return self.emit_dummy_anchor(embed, &url, title.as_deref(), attrs);
        }
        let src = hosting::embed_url(&embed.hosting, &url)?;
        Ok(format!(
            "<iframe src=\"{}\"{} width=\"{}\" height=\"{}\" allowfullscreen=\"allowfullscreen\" frameborder=\"0\"{}></iframe>",
            escape_attr(&src),
            title_attr(title.as_deref()),
            embed.width,
            embed.height,
            self.render_attr_block(&attrs)
        ))
    }

    fn emit_dummy_anchor(
        &self,
        embed: &EmbedNode,
        url: &str,
        title: Option<&str>,
        mut attrs: AttributeSet,
    ) -> Result<String, MarkdownError> {
        let href = hosting::watch_url(&embed.hosting, url)?;
        let src = hosting::embed_url(&embed.hosting, url)?;
        attrs.prepend_class(&self.options.dummy_video_class);
        Ok(format!(
            "<a href=\"{}\"{} style=\"width: {}px; height: {}px\" target=\"_blank\" rel=\"nofollow\"{}{}></a>",
            escape_attr(&href),
            title_attr(title),
            embed.width,
            embed.height,
            self.render_attr_block(&attrs),
            self.click_attr(&src, embed.width, embed.height, title.unwrap_or(""))
        ))
    }

    fn click_attr(&self, src: &str, width: u32, height: u32, title: &str) -> String {
        let mode = self.options.dummy_mode;
        let function = if mode.has(DummyMode::CLICK_TO_PLAY) {
            "playVideo"
        } else if mode.has(DummyMode::CLICK_TO_PLAY_MODAL) {
            "playVideoModal"
        } else {
            return String::new();
        };
        format!(
            " data-click=\"{}('{}', {}, {}, '{}')\"",
            function,
            escape_attr(src),
            width,
            height,
            escape_attr(title)
        )
    }

    fn emit_mention(&mut self, children: &[Inline]) -> Result<String, MarkdownError> {
        let username = self.emit_inlines(children)?;
        let url = match &self.options.username_resolver {
            Some(resolver) => resolver.resolve(&username).filter(|url| !url.is_empty()),
            None => None,
        };
        match url {
            Some(url) => {
                self.mentioned.push(username.clone());
                let name = escape_attr(&username);
                Ok(format!(
                    "<a href=\"{}\" title=\"{}\">@{}</a>",
                    escape_attr(&url),
                    name,
                    name
                ))
            }
            None => Ok(format!("@{}", username)),
        }
    }

    /// Renders a node's class/id attribute block, gated on the `class` tag.
    fn render_attr_block(&self, attrs: &AttributeSet) -> String {
        if !self.options.tags.allows("class") {
            return String::new();
        }
        let mut out = String::new();
        if !attrs.classes.is_empty() {
            out.push_str(&format!(
                " class=\"{}\"",
                escape_attr(&attrs.classes.join(" "))
            ));
        }
        if let Some(id) = &attrs.id {
            out.push_str(&format!(" id=\"{}\"", escape_attr(id)));
        }
        out
    }
}

/// Injected key=value defaults are not gated by the `class` tag.
fn render_extra_attrs(attrs: &AttributeSet) -> String {
    let mut out = String::new();
    for (name, value) in &attrs.extra {
        out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
    }
    out
}

fn title_attr(title: Option<&str>) -> String {
    match title {
        Some(title) if !title.is_empty() => format!(" title=\"{}\"", escape_attr(title)),
        _ => String::new(),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

static SANITIZER: Lazy<ammonia::Builder<'static>> = Lazy::new(build_sanitizer);

/// Cleans rendered HTML down to the tags and attributes this dialect can
/// legitimately produce.
pub(crate) fn sanitize(html: &str) -> String {
    SANITIZER.clean(html).to_string()
}

fn build_sanitizer() -> ammonia::Builder<'static> {
    let mut builder = ammonia::Builder::new();
    builder.tags(
        [
            "a", "br", "code", "em", "h1", "h2", "h3", "h4", "h5", "h6", "iframe", "img", "p",
            "pre", "strong", "table", "tbody", "td", "th", "thead", "tr",
        ]
        .into_iter()
        .collect(),
    );
    builder.generic_attributes(["class", "id"].into_iter().collect());
    builder.tag_attributes(
        [
            ("a", ["href", "title", "rel", "target", "style"]
                .into_iter()
                .collect()),
            ("img", ["src", "alt", "title"].into_iter().collect()),
            (
                "iframe",
                ["src", "title", "width", "height", "allowfullscreen", "frameborder"]
                    .into_iter()
                    .collect(),
            ),
            ("th", ["align"].into_iter().collect()),
            ("td", ["align"].into_iter().collect()),
            ("code", ["class"].into_iter().collect()),
        ]
        .into_iter()
        .collect(),
    );
    builder.generic_attribute_prefixes(["data-"].into_iter().collect());
    // The dialect injects its own rel attribute on links.
    builder.link_rel(None);
    builder
}
