//! Character-based text splitting.
//!
//! Chunks are capped at `chunk_size` bytes and consecutive chunks share
//! `chunk_overlap` bytes of context. A chunk prefers to end on a paragraph
//! break, then a line break, then a word boundary; only a window with none
//! of those is cut mid-token.

/// Splits document text into overlapping chunks.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(1000, 250)
    }
}

impl TextSplitter {
    /// Create a splitter. `chunk_overlap` must be smaller than `chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        debug_assert!(chunk_size > 0);
        debug_assert!(chunk_overlap < chunk_size);
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Split `text` into trimmed, non-empty chunks.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let len = text.len();
        let mut start = 0;

        while start < len {
            let mut end = (start + self.chunk_size).min(len);
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            if end < len {
                end = self.break_point(text, start, end);
            }

            let chunk = text[start..end].trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }

            if end == len {
                break;
            }

            let mut next = end.saturating_sub(self.chunk_overlap).max(start + 1);
            while !text.is_char_boundary(next) {
                next += 1;
            }
            start = next;
        }

        chunks
    }

    /// Last paragraph, line, or word boundary inside the window, preferring
    /// the coarsest separator. A break in the front half of the window is
    /// rejected (it would stall progress once the overlap steps back over
    /// it); a window with no usable boundary is cut at its end.
    fn break_point(&self, text: &str, start: usize, end: usize) -> usize {
        let window = &text[start..end];
        for sep in ["\n\n", "\n", " "] {
            if let Some(pos) = window.rfind(sep) {
                if pos + sep.len() > self.chunk_size / 2 {
                    return start + pos + sep.len();
                }
            }
        }
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let splitter = TextSplitter::default();
        let chunks = splitter.split("Reflow soldering melts solder paste in a controlled oven.");
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let splitter = TextSplitter::default();
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("   \n\n  ").is_empty());
    }

    #[test]
    fn test_chunks_respect_size_limit() {
        let splitter = TextSplitter::new(100, 20);
        let text = "word ".repeat(200);
        let chunks = splitter.split(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 100, "chunk of {} bytes", chunk.len());
        }
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let splitter = TextSplitter::new(60, 10);
        let text = format!("{}\n\n{}", "a".repeat(40), "b".repeat(40));
        let chunks = splitter.split(&text);

        assert_eq!(chunks[0], "a".repeat(40));
        assert!(chunks.last().unwrap().ends_with(&"b".repeat(40)));
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let splitter = TextSplitter::new(50, 20);
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliett kilo lima";
        let chunks = splitter.split(text);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let tail_word = pair[0].split_whitespace().last().unwrap();
            assert!(
                pair[1].contains(tail_word),
                "no shared context between '{}' and '{}'",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_no_content_is_lost() {
        let splitter = TextSplitter::new(80, 25);
        let text = "The solder paste application stage deposits paste through a stencil.\n\nComponent placement follows, then reflow, inspection, and testing.";
        let chunks = splitter.split(text);

        for word in text.split_whitespace() {
            assert!(
                chunks.iter().any(|c| c.contains(word)),
                "word '{word}' missing from all chunks"
            );
        }
    }

    #[test]
    fn test_oversized_token_is_hard_cut() {
        let splitter = TextSplitter::new(10, 2);
        let chunks = splitter.split(&"x".repeat(35));

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 10);
        }
    }

    #[test]
    fn test_multibyte_input_splits_on_char_boundaries() {
        let splitter = TextSplitter::new(10, 3);
        let text = "żółw ".repeat(20);
        // Would panic on a non-boundary slice if offsets were wrong
        let chunks = splitter.split(&text);
        assert!(!chunks.is_empty());
    }
}
