use embedmark_core::{DummyMode, Markdown, MarkdownError, Options, TagPolicy};
use pretty_assertions::assert_eq;

fn markdown(options: Options) -> Markdown {
    Markdown::with_options(options)
}

#[test]
fn empty_input_renders_empty() {
    assert_eq!(Markdown::new().parse("").unwrap(), "");
}

#[test]
fn plain_markdown_baseline() {
    let html = Markdown::new()
        .parse("# Title\n\nSome *em* and **strong** and `code`.\n\n    indented")
        .unwrap();
    assert_eq!(
        html,
        "<h1>Title</h1>\n\
         <p>Some <em>em</em> and <strong>strong</strong> and <code>code</code>.</p>\n\
         <pre><code>indented\n</code></pre>"
    );
}

#[test]
fn fenced_code_carries_its_language() {
    let html = Markdown::new().parse("```rust\nfn main() {}\n```").unwrap();
    assert_eq!(
        html,
        "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
    );
}

#[test]
fn text_is_escaped() {
    let html = Markdown::new().parse("a & <b> done").unwrap();
    assert_eq!(html, "<p>a &amp; &lt;b&gt; done</p>");
}

#[test]
fn autolink() {
    let html = Markdown::new().parse("<http://example.com/>").unwrap();
    assert_eq!(
        html,
        "<p><a href=\"http://example.com/\">http://example.com/</a></p>"
    );
}

#[test]
fn video_inline_iframe() {
    let html = Markdown::new()
        .parse_inline_span("![:youtube 480x360](6JvDSwFtEC0 \"title\"){.class1 #id1 .class2}")
        .unwrap();
    assert_eq!(
        html,
        "<iframe src=\"//youtube.com/embed/6JvDSwFtEC0/\" title=\"title\" width=\"480\" \
         height=\"360\" allowfullscreen=\"allowfullscreen\" frameborder=\"0\" \
         class=\"class1 class2\" id=\"id1\"></iframe>"
    );
}

#[test]
fn video_dimensions_default_when_not_requested() {
    let html = Markdown::new()
        .parse_inline_span("![:youtube](6JvDSwFtEC0)")
        .unwrap();
    assert_eq!(
        html,
        "<iframe src=\"//youtube.com/embed/6JvDSwFtEC0/\" width=\"560\" height=\"315\" \
         allowfullscreen=\"allowfullscreen\" frameborder=\"0\"></iframe>"
    );
}

#[test]
fn video_through_reference_definition() {
    let html = Markdown::new()
        .parse("![:youtube 480x360][video]\nTest\n\n[video]: 6JvDSwFtEC0 {.class1 #id1 .class2}")
        .unwrap();
    assert_eq!(
        html,
        "<p><iframe src=\"//youtube.com/embed/6JvDSwFtEC0/\" width=\"480\" height=\"360\" \
         allowfullscreen=\"allowfullscreen\" frameborder=\"0\" class=\"class1 class2\" \
         id=\"id1\"></iframe>\nTest</p>"
    );
}

#[test]
fn denied_video_tag_degrades_to_a_plain_image() {
    let mut markdown = markdown(Options {
        tags: TagPolicy::deny(["video"]),
        ..Options::default()
    });
    let html = markdown
        .parse("![:youtube 480x360](6JvDSwFtEC0){.class1 #id1 .class2}")
        .unwrap();
    assert_eq!(
        html,
        "<p><img src=\"6JvDSwFtEC0\" alt=\"\" class=\"class1 class2\" id=\"id1\" /></p>"
    );
    assert!(!html.contains("<iframe"));
}

#[test]
fn dummy_mode_renders_a_placeholder_anchor() {
    let mut markdown = markdown(Options {
        dummy_mode: DummyMode::PLAIN_LINK,
        ..Options::default()
    });
    let html = markdown
        .parse("![:youtube 480x360][video]\nTest\n\n[video]: 6JvDSwFtEC0 {.class1 #id1 .class2}")
        .unwrap();
    assert_eq!(
        html,
        "<p><a href=\"https://www.youtube.com/watch?v=6JvDSwFtEC0\" \
         style=\"width: 480px; height: 360px\" target=\"_blank\" rel=\"nofollow\" \
         class=\"dummy-video class1 class2\" id=\"id1\"></a>\nTest</p>"
    );
}

#[test]
fn click_to_play_attaches_a_trigger_attribute() {
    let mut markdown = markdown(Options {
        dummy_mode: DummyMode::PLAIN_LINK | DummyMode::CLICK_TO_PLAY,
        ..Options::default()
    });
    let html = markdown
        .parse_inline_span("![:youtube](6JvDSwFtEC0 \"Demo\")")
        .unwrap();
    assert_eq!(
        html,
        "<a href=\"https://www.youtube.com/watch?v=6JvDSwFtEC0\" title=\"Demo\" \
         style=\"width: 560px; height: 315px\" target=\"_blank\" rel=\"nofollow\" \
         class=\"dummy-video\" \
         data-click=\"playVideo('//youtube.com/embed/6JvDSwFtEC0/', 560, 315, 'Demo')\"></a>"
    );
}

#[test]
fn table_with_attributes_and_alignment() {
    let html = Markdown::new()
        .parse(
            "\n{.class1 #id1 .class1}\n\
             | header_1 | header_2 | header_3 |\n\
             |:--| :--- | :---: |\n\
             | **Foo** | bar | 123 |\n\n",
        )
        .unwrap();
    assert_eq!(
        html,
        "<table class=\"class1\" id=\"id1\">\n\
         <thead>\n\
         <tr><th align=\"left\"> header_1 </th><th align=\"left\">header_2 </th>\
         <th align=\"center\">header_3 </th></tr>\n\
         </thead>\n\
         <tbody>\n\
         <tr><td align=\"left\"> <strong>Foo</strong> </td><td align=\"left\">bar </td>\
         <td align=\"center\">123 </td></tr>\n\
         </tbody>\n\
         </table>"
    );
}

#[test]
fn three_column_alignment_by_position() {
    let html = Markdown::new()
        .parse("a|b|c\n:--|:---:|---:\n1|2|3")
        .unwrap();
    assert_eq!(
        html,
        "<table>\n\
         <thead>\n\
         <tr><th align=\"left\">a</th><th align=\"center\">b</th><th align=\"right\">c</th></tr>\n\
         </thead>\n\
         <tbody>\n\
         <tr><td align=\"left\">1</td><td align=\"center\">2</td><td align=\"right\">3</td></tr>\n\
         </tbody>\n\
         </table>"
    );
}

#[test]
fn denied_table_tag_renders_nothing() {
    let mut markdown = markdown(Options {
        tags: TagPolicy::deny(["table"]),
        ..Options::default()
    });
    let html = markdown.parse("a|b\n--|--\n1|2").unwrap();
    assert_eq!(html, "");
}

#[test]
fn missing_separator_falls_through_to_a_paragraph() {
    let html = Markdown::new().parse("a | b\nplain text").unwrap();
    assert_eq!(html, "<p>a | b\nplain text</p>");
}

#[test]
fn link_inline_with_attributes_and_defaults() {
    let html = Markdown::new()
        .parse_inline_span("[text](http://test/ \"title text\"){.class1 #id1 .class2}")
        .unwrap();
    assert_eq!(
        html,
        "<a href=\"http://test/\" title=\"title text\" class=\"class1 class2\" id=\"id1\" \
         rel=\"nofollow\" target=\"_blank\">text</a>"
    );
}

#[test]
fn empty_link_text_displays_the_url() {
    let html = Markdown::new()
        .parse_inline_span("[](http://test/ \"title text\")")
        .unwrap();
    assert_eq!(
        html,
        "<a href=\"http://test/\" title=\"title text\" rel=\"nofollow\" \
         target=\"_blank\">http://test/</a>"
    );
}

#[test]
fn link_through_reference_definition() {
    let html = Markdown::new()
        .parse("[text][link]\nTest\n\n[link]: http://test/ {.class1 #id1 .class2}")
        .unwrap();
    assert_eq!(
        html,
        "<p><a href=\"http://test/\" class=\"class1 class2\" id=\"id1\" rel=\"nofollow\" \
         target=\"_blank\">text</a>\nTest</p>"
    );
}

#[test]
fn unresolved_references_render_their_source_verbatim() {
    let mut markdown = Markdown::new();
    assert_eq!(
        markdown.parse("[text][undefined]").unwrap(),
        "<p>[text][undefined]</p>"
    );
    assert_eq!(
        markdown.parse("![alt][undefined]").unwrap(),
        "<p>![alt][undefined]</p>"
    );
    assert_eq!(
        markdown
            .parse("![:youtube 480x360][undefined]")
            .unwrap(),
        "<p>![:youtube 480x360][undefined]</p>"
    );
}

#[test]
fn unmatched_brackets_degrade_to_literal_text() {
    assert_eq!(
        Markdown::new().parse("a ![[broken and [more").unwrap(),
        "<p>a ![[broken and [more</p>"
    );
}

#[test]
fn thumb_without_resolver_is_a_configuration_error_in_strict_mode() {
    let err = Markdown::new()
        .parse("![:thumb 50x50](/data/play.png)")
        .unwrap_err();
    assert!(matches!(err, MarkdownError::MissingImageResolver));
}

#[test]
fn thumb_without_resolver_degrades_when_not_strict() {
    let mut markdown = markdown(Options {
        strict_image_resolver: false,
        ..Options::default()
    });
    let html = markdown
        .parse("![:thumb 50x50](/data/play.png){.class2 #id2 .class}")
        .unwrap();
    assert_eq!(
        html,
        "<p><img src=\"/data/play.png\" alt=\"\" class=\"class2 class\" id=\"id2\" /></p>"
    );
}

#[test]
fn thumb_with_resolver_rewrites_the_url() {
    let resolver = |path: &str, width: u32, height: u32| {
        if width == 0 {
            path.to_string()
        } else {
            let name = path.rsplit('/').next().unwrap_or(path);
            format!("/data/cache/{}x{}/{}", width, height, name)
        }
    };
    let mut markdown = markdown(Options {
        image_resolver: Some(Box::new(resolver)),
        ..Options::default()
    });
    assert_eq!(
        markdown
            .parse("![:thumb 50x50](/data/play.png){.class2 #id2 .class}")
            .unwrap(),
        "<p><img src=\"/data/cache/50x50/play.png\" alt=\"\" class=\"class2 class\" \
         id=\"id2\" /></p>"
    );
    assert_eq!(
        markdown.parse("![:thumb](/data/play.png)").unwrap(),
        "<p><img src=\"/data/play.png\" alt=\"\" /></p>"
    );
}

#[test]
fn plain_image_without_resolver_keeps_its_url() {
    let html = Markdown::new()
        .parse("![foo](/data/play.png){.class2 #id2 .class}")
        .unwrap();
    assert_eq!(
        html,
        "<p><img src=\"/data/play.png\" alt=\"foo\" class=\"class2 class\" id=\"id2\" /></p>"
    );
}

#[test]
fn orphan_attribute_blocks_render_as_nothing() {
    assert_eq!(
        Markdown::new().parse("text {.a}").unwrap(),
        "<p>text </p>"
    );
}

#[test]
fn resolver_is_consulted_even_without_dimensions() {
    let resolver =
        |path: &str, width: u32, height: u32| format!("{}?w={}&h={}", path, width, height);
    let mut markdown = markdown(Options {
        image_resolver: Some(Box::new(resolver)),
        ..Options::default()
    });
    assert_eq!(
        markdown.parse("![foo](/pic.png)").unwrap(),
        "<p><img src=\"/pic.png?w=0&amp;h=0\" alt=\"foo\" /></p>"
    );
}

#[test]
fn denied_class_tag_strips_attribute_blocks() {
    let mut markdown = markdown(Options {
        tags: TagPolicy::deny(["class"]),
        ..Options::default()
    });
    let html = markdown.parse("h1 {.class1 #id1 .class2}\n==\n\ntext").unwrap();
    assert_eq!(html, "<h1>h1</h1>\n<p>text</p>");
}

#[test]
fn heading_attribute_blocks_render_when_allowed() {
    let html = Markdown::new().parse("h1 {.class1 #id1 .class2}\n==").unwrap();
    assert_eq!(html, "<h1 class=\"class1 class2\" id=\"id1\">h1</h1>");
}

#[test]
fn denied_code_tag_drops_code_blocks_entirely() {
    let mut markdown = markdown(Options {
        tags: TagPolicy::deny(["code"]),
        ..Options::default()
    });
    assert_eq!(markdown.parse("     foo").unwrap(), "");
    assert_eq!(
        markdown
            .parse("\nfoo\n\n```php\n            gjh\n\n```\n\nbar")
            .unwrap(),
        "<p>foo</p>\n<p>bar</p>"
    );
}

#[test]
fn mention_without_resolver_is_literal_and_unrecorded() {
    let mut markdown = Markdown::new();
    assert_eq!(markdown.parse("@name").unwrap(), "<p>@name</p>");
    assert!(markdown.mentioned_usernames().is_empty());
}

#[test]
fn resolved_mentions_link_and_are_recorded_in_order() {
    let mut markdown = markdown(Options {
        username_resolver: Some(Box::new(|username: &str| {
            Some(format!("/profile/{}", username))
        })),
        ..Options::default()
    });
    let html = markdown.parse("hi @bob and @alice!").unwrap();
    assert_eq!(
        html,
        "<p>hi <a href=\"/profile/bob\" title=\"bob\">@bob</a> and \
         <a href=\"/profile/alice\" title=\"alice\">@alice</a>!</p>"
    );
    assert_eq!(markdown.mentioned_usernames(), ["bob", "alice"]);
}

#[test]
fn declined_mentions_are_not_recorded() {
    let mut markdown = markdown(Options {
        username_resolver: Some(Box::new(|username: &str| {
            (username == "bob").then(|| "/u/bob".to_string())
        })),
        ..Options::default()
    });
    let html = markdown.parse("@bob @eve").unwrap();
    assert_eq!(
        html,
        "<p><a href=\"/u/bob\" title=\"bob\">@bob</a> @eve</p>"
    );
    assert_eq!(markdown.mentioned_usernames(), ["bob"]);
}

#[test]
fn mention_list_resets_between_parses() {
    let mut markdown = markdown(Options {
        username_resolver: Some(Box::new(|username: &str| {
            Some(format!("/u/{}", username))
        })),
        ..Options::default()
    });
    markdown.parse("@bob").unwrap();
    assert_eq!(markdown.mentioned_usernames(), ["bob"]);
    markdown.parse("no mentions here").unwrap();
    assert!(markdown.mentioned_usernames().is_empty());
}

#[test]
fn newline_mode_inserts_line_breaks() {
    let mut markdown = markdown(Options {
        enable_newlines: true,
        ..Options::default()
    });
    assert_eq!(markdown.parse("a\nb").unwrap(), "<p>a<br />\nb</p>");
    assert_eq!(markdown.parse("a  \nb").unwrap(), "<p>a<br />\nb</p>");

    let mut plain = Markdown::new();
    assert_eq!(plain.parse("a\nb").unwrap(), "<p>a\nb</p>");
}

#[test]
fn sanitized_output_keeps_dialect_markup() {
    let mut markdown = Markdown::new();
    let html = markdown
        .parse_sanitized("[text](http://test/)\n\n![:youtube](6JvDSwFtEC0)")
        .unwrap();
    assert!(html.contains("<a href=\"http://test/\""));
    assert!(html.contains("<iframe src=\"//youtube.com/embed/6JvDSwFtEC0/\""));
    assert!(html.contains("allowfullscreen"));
}
