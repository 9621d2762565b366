//! Line boundary index
//!
//! Records the UTF-16 offset where each line begins so that the line
//! containing an offset can be found by binary search.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Ascending begin offsets, always starting with 0
    begins: Vec<usize>,
    /// Length of the indexed text in UTF-16 code units
    len: usize,
}

impl LineIndex {
    /// Scan `text` for `\n` and record the offset after each one
    pub fn new(text: &str) -> Self {
        let mut begins = vec![0];
        let mut offset = 0;
        for ch in text.chars() {
            offset += ch.len_utf16();
            if ch == '\n' {
                begins.push(offset);
            }
        }

        Self { begins, len: offset }
    }

    pub fn line_count(&self) -> usize {
        self.begins.len()
    }

    pub fn begins(&self) -> &[usize] {
        &self.begins
    }

    /// Index of the line containing `offset`
    pub fn line_of(&self, offset: usize) -> usize {
        find_line(&self.begins, offset)
    }

    /// Offset of the first character of `line`
    pub fn line_begin(&self, line: usize) -> usize {
        self.begins.get(line).copied().unwrap_or(self.len)
    }

    /// Offset of the `\n` terminating `line`, or the text length for the last line
    pub fn line_end(&self, line: usize) -> usize {
        match self.begins.get(line + 1) {
            Some(next) => next - 1,
            None => self.len,
        }
    }

    /// Span of `line` including its terminating `\n`
    pub fn line_span(&self, line: usize) -> (usize, usize) {
        let begin = self.line_begin(line);
        let end = self.begins.get(line + 1).copied().unwrap_or(self.len);
        (begin, end)
    }
}

/// Greatest index `i` with `begins[i] <= target`
///
/// `begins` must be ascending and start with 0, so an answer always exists.
pub fn find_line(begins: &[usize], target: usize) -> usize {
    begins.partition_point(|&begin| begin <= target).saturating_sub(1)
}

/// Line begin offsets of `text`
pub fn line_begins(text: &str) -> Vec<usize> {
    LineIndex::new(text).begins
}
