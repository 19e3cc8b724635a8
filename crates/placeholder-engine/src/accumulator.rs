use std::borrow::Cow;

/// Builds the substituted output from a source string.
///
/// Literal spans are never copied eagerly: the buffer is allocated on the
/// first replacement, and a run without replacements hands back the source
/// borrowed.
#[derive(Debug)]
pub(crate) struct Accumulator<'a> {
    source: &'a str,
    out: Option<String>,
    /// Source bytes already flushed into `out`.
    copied: usize,
}

impl<'a> Accumulator<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            out: None,
            copied: 0,
        }
    }

    /// Replaces `source[start..end]` with `value`. Spans must arrive in order
    /// and must not overlap.
    pub(crate) fn replace(&mut self, start: usize, end: usize, value: &str) {
        debug_assert!(self.copied <= start && start <= end);
        let source = self.source;
        let out = self
            .out
            .get_or_insert_with(|| String::with_capacity(source.len() + value.len()));
        out.push_str(&source[self.copied..start]);
        out.push_str(value);
        self.copied = end;
    }

    pub(crate) fn finish(self) -> Cow<'a, str> {
        match self.out {
            Some(mut out) => {
                out.push_str(&self.source[self.copied..]);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(self.source),
        }
    }
}
