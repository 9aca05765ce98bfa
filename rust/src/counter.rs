//! Section stack: nested naming scopes over a single build pass.
//!
//! Every scope entered gets a composite prefix built from a snapshot of the
//! counters currently on the stack, so two scopes opened at different points
//! never share a namespace even when their own counters both start at 1.

use crate::config::CounterConfig;
use crate::radix::{IdSink, MAX_RADIX, RadixEncoder};
use crate::section::Section;

/// Hierarchical unique id counter.
///
/// ```
/// use section_uid::SectionCounter;
///
/// let mut ids = SectionCounter::new();
/// assert_eq!(ids.next_id(), "1");
/// assert_eq!(ids.enter_scope(None), "2");
/// assert_eq!(ids.next_id(), "2_1");
/// ids.exit_scope();
/// assert_eq!(ids.next_id(), "3");
/// ```
#[derive(Debug, Clone)]
pub struct SectionCounter {
    sections: Vec<Section>,
    active: usize,
    prefix: Option<String>,
    encoder: RadixEncoder,
    builder: String,
    consume_on_exit: bool,
}

impl SectionCounter {
    /// Counter without a global prefix, radix 36.
    pub fn new() -> Self {
        Self::with_prefix_and_radix(None, MAX_RADIX)
    }

    pub fn with_prefix(prefix: Option<String>) -> Self {
        Self::with_prefix_and_radix(prefix, MAX_RADIX)
    }

    /// A radix outside `2..=36` is accepted and encodes as decimal.
    pub fn with_prefix_and_radix(prefix: Option<String>, radix: u32) -> Self {
        Self {
            sections: vec![Section::root()],
            active: 0,
            prefix,
            encoder: RadixEncoder::new(radix),
            builder: String::with_capacity(30),
            consume_on_exit: true,
        }
    }

    pub fn from_config(config: &CounterConfig) -> Self {
        let mut counter = Self::with_prefix_and_radix(config.prefix.clone(), config.radix);
        counter.consume_on_exit = config.consume_on_exit;
        counter
    }

    /// Open a nested scope and return its composite prefix.
    ///
    /// The prefix is every stacked counter, root first, joined by `_`, with
    /// `_<base>` appended when `base` is non-empty. No counter is advanced.
    pub fn enter_scope(&mut self, base: Option<&str>) -> String {
        self.builder.clear();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                self.builder.push('_');
            }
            self.encoder
                .encode_into(section.current_counter(), &mut self.builder);
        }
        if let Some(base) = base.filter(|b| !b.is_empty()) {
            self.builder.push('_');
            self.builder.push_str(base);
        }

        self.sections.push(Section::new(self.builder.as_str()));
        self.active += 1;
        log::trace!("entered scope {} at depth {}", self.builder, self.active);
        self.builder.clone()
    }

    /// Next id of the active scope as a new string.
    pub fn next_id(&mut self) -> String {
        self.sections[self.active].next_id(self.prefix.as_deref(), &mut self.encoder)
    }

    /// Append the next id of the active scope to `sink`.
    pub fn next_id_into<S: IdSink + ?Sized>(&mut self, sink: &mut S) {
        self.sections[self.active].write_next_id(self.prefix.as_deref(), &mut self.encoder, sink);
    }

    /// Close the active scope.
    ///
    /// The scope that is active afterwards (the root when nothing was open)
    /// has one id consumed without it being returned. Calling this at the
    /// root pops nothing but still consumes. `consume_on_exit = false`
    /// turns the consume off.
    pub fn exit_scope(&mut self) {
        if self.active == 0 {
            log::debug!("exit_scope at root, nothing to pop");
        } else {
            self.sections.pop();
            self.active -= 1;
            log::trace!("left scope, depth now {}", self.active);
        }

        if self.consume_on_exit {
            self.sections[self.active].skip();
        }
    }

    /// Generate `n` ids in the active scope.
    pub fn next_n(&mut self, n: usize) -> Vec<String> {
        (0..n).map(|_| self.next_id()).collect()
    }

    /// Number of open scopes above the root.
    pub fn depth(&self) -> usize {
        self.sections.len() - 1
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Counter of the active scope, not consumed.
    pub fn current_counter(&self) -> i64 {
        self.sections[self.active].current_counter()
    }

    /// Composite prefix of the active scope; `None` at the root.
    pub fn scope_prefix(&self) -> Option<&str> {
        self.sections[self.active].scope_prefix()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Radix as configured, before normalization.
    pub fn radix(&self) -> u32 {
        self.encoder.radix()
    }

    pub fn consume_on_exit(&self) -> bool {
        self.consume_on_exit
    }
}

impl Default for SectionCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SectionCounter {
    type Item = String;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkthrough() {
        let mut ids = SectionCounter::new();
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_id(), "2");
        assert_eq!(ids.enter_scope(None), "3");
        assert_eq!(ids.scope_prefix(), Some("3"));
        assert_eq!(ids.current_counter(), 1);
        assert_eq!(ids.next_id(), "3_1");
        assert_eq!(ids.next_id(), "3_2");
        ids.exit_scope();
        assert_eq!(ids.active_index(), 0);
        assert_eq!(ids.next_id(), "4");
    }

    #[test]
    fn test_enter_with_base() {
        let mut ids = SectionCounter::new();
        assert_eq!(ids.enter_scope(Some("form")), "1_form");
        assert_eq!(ids.next_id(), "1_form_1");
        assert_eq!(ids.enter_scope(Some("")), "1_2");
        assert_eq!(ids.next_id(), "1_2_1");
    }

    #[test]
    fn test_nested_prefix_snapshots_all_levels() {
        let mut ids = SectionCounter::new();
        ids.next_n(4);
        assert_eq!(ids.enter_scope(None), "5");
        ids.next_n(2);
        assert_eq!(ids.enter_scope(None), "5_3");
        assert_eq!(ids.depth(), 2);
        assert_eq!(ids.next_id(), "5_3_1");
    }

    #[test]
    fn test_exit_at_root_consumes() {
        let mut ids = SectionCounter::new();
        ids.next_id();
        assert_eq!(ids.current_counter(), 2);
        ids.exit_scope();
        assert_eq!(ids.current_counter(), 3);
        assert_eq!(ids.active_index(), 0);
        assert_eq!(ids.depth(), 0);
        assert_eq!(ids.next_id(), "3");
    }

    #[test]
    fn test_exit_without_consume() {
        let config = CounterConfig {
            consume_on_exit: false,
            ..CounterConfig::default()
        };
        let mut ids = SectionCounter::from_config(&config);
        assert!(!ids.consume_on_exit());
        assert_eq!(ids.enter_scope(None), "1");
        ids.next_id();
        ids.exit_scope();
        assert_eq!(ids.next_id(), "1");
        ids.exit_scope();
        assert_eq!(ids.next_id(), "2");
    }

    #[test]
    fn test_global_prefix_and_radix() {
        let mut ids = SectionCounter::with_prefix_and_radix(Some("j_id".to_string()), 2);
        assert_eq!(ids.prefix(), Some("j_id"));
        assert_eq!(ids.radix(), 2);
        assert_eq!(ids.next_id(), "j_id1");
        assert_eq!(ids.next_id(), "j_id10");
        assert_eq!(ids.enter_scope(None), "11");
        assert_eq!(ids.next_id(), "j_id11_1");
        assert_eq!(ids.next_id(), "j_id11_10");
    }

    #[test]
    fn test_invalid_radix_encodes_decimal() {
        let mut ids = SectionCounter::with_prefix_and_radix(None, 64);
        ids.next_n(10);
        assert_eq!(ids.next_id(), "11");
        assert_eq!(ids.radix(), 64);
    }

    #[test]
    fn test_next_id_into_appends() {
        let mut ids = SectionCounter::with_prefix(Some("p".to_string()));
        let mut out = String::from("id=");
        ids.next_id_into(&mut out);
        assert_eq!(out, "id=p1");
        ids.enter_scope(None);
        let mut bytes: Vec<u8> = Vec::new();
        ids.next_id_into(&mut bytes);
        assert_eq!(bytes, b"p2_1");
    }

    #[test]
    fn test_iterator_take() {
        let ids = SectionCounter::default();
        let v: Vec<String> = ids.take(3).collect();
        assert_eq!(v, ["1", "2", "3"]);
    }
}
