//! A single naming scope.

use crate::radix::{IdSink, RadixEncoder};

/// One level of the section stack: an immutable scope prefix plus a counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    scope_prefix: Option<String>,
    counter: i64,
}

impl Section {
    /// The root scope: no prefix, counter at 1.
    pub fn root() -> Self {
        Self::with_counter(None, 1)
    }

    /// A child scope with a precomputed composite prefix.
    pub fn new(scope_prefix: impl Into<String>) -> Self {
        Self::with_counter(Some(scope_prefix.into()), 1)
    }

    /// A scope starting at an arbitrary counter value.
    pub fn with_counter(scope_prefix: Option<String>, counter: i64) -> Self {
        Self {
            scope_prefix,
            counter,
        }
    }

    pub fn scope_prefix(&self) -> Option<&str> {
        self.scope_prefix.as_deref()
    }

    /// Peek at the counter without consuming it.
    #[inline]
    pub fn current_counter(&self) -> i64 {
        self.counter
    }

    /// Append the next id to `sink` and advance the counter.
    ///
    /// Layout: `[global_prefix][scope_prefix "_"]<counter>`.
    pub fn write_next_id<S: IdSink + ?Sized>(
        &mut self,
        global_prefix: Option<&str>,
        encoder: &mut RadixEncoder,
        sink: &mut S,
    ) {
        let value = self.counter;
        self.counter = self.counter.wrapping_add(1);

        if let Some(prefix) = global_prefix {
            sink.push_str(prefix);
        }
        if let Some(scope) = &self.scope_prefix {
            sink.push_str(scope);
            sink.push_char('_');
        }
        encoder.encode_into(value, sink);
    }

    /// Build the next id as a new string and advance the counter.
    pub fn next_id(&mut self, global_prefix: Option<&str>, encoder: &mut RadixEncoder) -> String {
        let mut id = String::with_capacity(30);
        self.write_next_id(global_prefix, encoder, &mut id);
        id
    }

    /// Consume one id without producing it.
    #[inline]
    pub(crate) fn skip(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }
}
