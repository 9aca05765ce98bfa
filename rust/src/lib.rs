//! section-uid: hierarchical unique id generation for incremental tree builds.
//!
//! A [`SectionCounter`] hands out short ids while a tree is being built. Each
//! subtree that needs its own namespace is opened with
//! [`SectionCounter::enter_scope`] and closed with
//! [`SectionCounter::exit_scope`]; ids generated inside carry the scope's
//! composite prefix so sibling subtrees never collide.
//!
//! # Format
//!
//! ```text
//! ID    ::= [ PREFIX ] [ SCOPE "_" ] NUM
//! SCOPE ::= NUM { "_" NUM } [ "_" BASE ]
//! NUM   ::= [ "-" ] DIGIT { DIGIT }        ; digits 0-9a-z in the configured radix
//! ```
//!
//! # Example
//!
//! ```
//! use section_uid::SectionCounter;
//!
//! let mut ids = SectionCounter::with_prefix(Some("j_id".to_string()));
//! assert_eq!(ids.next_id(), "j_id1");
//! ids.enter_scope(None);
//! assert_eq!(ids.next_id(), "j_id2_1");
//! ids.exit_scope();
//! ```

mod config;
mod counter;
mod error;
mod parse;
pub mod radix;
mod section;

pub use config::CounterConfig;
pub use counter::SectionCounter;
pub use error::SectionIdError;
pub use parse::{ParsedSectionId, parse_section_id, validate_section_id};
pub use radix::{IdSink, RadixEncoder, decode, encode};
pub use section::Section;
