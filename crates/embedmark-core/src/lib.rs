mod ast;
mod attrs;
mod config;
mod emit;
mod engine;
mod error;
mod hosting;
mod parser;
mod reference;

pub use ast::{
    Block, BlockKind, CodeBlock, Document, EmbedNode, ImageNode, Inline, InlineSeq, LinkNode,
    Table, TableAlign,
};
pub use attrs::AttributeSet;
pub use config::{DummyMode, ImageResolver, Options, TagPolicy, UsernameResolver};
pub use engine::Markdown;
pub use error::MarkdownError;
pub use reference::Reference;
