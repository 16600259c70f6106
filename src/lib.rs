//! Prefix-based word suggestions over an append-only vocabulary.
//!
//! [`index::PrefixIndex`] owns the word list and a character trie built over
//! it, and writes the word list through a [`store::Store`] after every insert.

pub mod autocomplete;
pub mod handlers;
pub mod http;
pub mod importer;
pub mod index;
pub mod init;
pub mod models;
pub mod store;
