use crate::{FontVariantFlags, Span, TextSpan};

/// The role a block plays in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Body,
    PartHeader,
    ChapterHeader,
    MinorSectionHeader,
    NumberedList,
    BulletList,
    Code,
}

/// A block is a paragraph: a sequence of spans, like a block in an HTML DOM.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    block_type: BlockType,
    line_number: usize,
    counter: usize,
    in_block_quote: bool,
    spans: Vec<Span>,
}

impl Block {
    pub fn new(
        block_type: BlockType,
        line_number: usize,
        counter: usize,
        in_block_quote: bool,
    ) -> Block {
        Block {
            block_type,
            line_number,
            counter,
            in_block_quote,
            spans: Vec::new(),
        }
    }

    /// A plain body block holding a single unstyled text span.
    pub fn body(text: impl Into<String>) -> Block {
        let mut block = Block::new(BlockType::Body, 0, 0, false);
        block.add_span(Span::Text(TextSpan::new(text, FontVariantFlags::PLAIN)));
        block
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// The line in the source where this block started.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The counter for numbered lists.
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn in_block_quote(&self) -> bool {
        self.in_block_quote
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub(crate) fn spans_mut(&mut self) -> &mut [Span] {
        &mut self.spans
    }

    pub fn add_span(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// A copy of this block with a different block type.
    pub fn with_block_type(&self, block_type: BlockType) -> Block {
        Block {
            block_type,
            ..self.clone()
        }
    }

    /// The concatenated text of all text spans; other spans are ignored.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .filter_map(|span| match span {
                Span::Text(text_span) => Some(text_span.text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Builds a block one character at a time, coalescing characters with equal
/// style flags into single text spans.
pub struct BlockBuilder {
    block: Block,
    pending: String,
    flags: FontVariantFlags,
}

impl BlockBuilder {
    pub fn new(block_type: BlockType, line_number: usize, in_block_quote: bool) -> BlockBuilder {
        BlockBuilder::with_counter(block_type, line_number, 0, in_block_quote)
    }

    /// A builder for numbered list items.
    pub fn with_counter(
        block_type: BlockType,
        line_number: usize,
        counter: usize,
        in_block_quote: bool,
    ) -> BlockBuilder {
        BlockBuilder {
            block: Block::new(block_type, line_number, counter, in_block_quote),
            pending: String::new(),
            flags: FontVariantFlags::PLAIN,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.block.block_type()
    }

    /// Add one character in the given style.
    pub fn add_char(&mut self, ch: char, flags: FontVariantFlags) {
        if flags != self.flags {
            self.emit_span();
            self.flags = flags;
        }
        self.pending.push(ch);
    }

    /// Add a string in the given style.
    pub fn add_text(&mut self, text: &str, flags: FontVariantFlags) {
        for ch in text.chars() {
            self.add_char(ch, flags);
        }
    }

    /// Add any span, flushing pending text first.
    pub fn add_span(&mut self, span: Span) -> &mut BlockBuilder {
        self.emit_span();
        self.block.add_span(span);
        self
    }

    /// Add all of another block's spans. Its type and counter are ignored.
    pub fn add_block(&mut self, block: &Block) -> &mut BlockBuilder {
        for span in block.spans() {
            self.add_span(span.clone());
        }
        self
    }

    /// Whether anything has been added so far.
    pub fn is_empty(&self) -> bool {
        self.block.spans().is_empty() && self.pending.is_empty()
    }

    /// Build the block. Call at most once.
    pub fn build(mut self) -> Block {
        self.emit_span();
        self.block
    }

    fn emit_span(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.block.add_span(Span::Text(TextSpan::new(text, self.flags)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_coalesces_runs_by_flags() {
        let mut builder = BlockBuilder::new(BlockType::Body, 12, false);
        builder.add_text("plain ", FontVariantFlags::PLAIN);
        builder.add_text("loud", FontVariantFlags::PLAIN.bold(true));
        builder.add_text(" plain", FontVariantFlags::PLAIN);
        let block = builder.build();

        let spans = block.spans();
        assert_eq!(spans.len(), 3);
        match (&spans[0], &spans[1], &spans[2]) {
            (Span::Text(a), Span::Text(b), Span::Text(c)) => {
                assert_eq!(a.text, "plain ");
                assert!(!a.flags.bold);
                assert_eq!(b.text, "loud");
                assert!(b.flags.bold);
                assert_eq!(c.text, " plain");
            }
            other => panic!("unexpected spans: {other:?}"),
        }
        assert_eq!(block.text(), "plain loud plain");
        assert_eq!(block.line_number(), 12);
    }

    #[test]
    fn non_text_spans_flush_pending_text() {
        let mut builder = BlockBuilder::new(BlockType::Body, 1, false);
        builder.add_text("see page ", FontVariantFlags::PLAIN);
        builder.add_span(Span::PageRef(crate::PageRefSpan {
            name: "intro".to_string(),
            flags: FontVariantFlags::PLAIN,
        }));
        let block = builder.build();
        assert_eq!(block.spans().len(), 2);
    }
}
