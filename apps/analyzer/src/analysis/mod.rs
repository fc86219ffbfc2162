// Résumé analysis: serialize → prompt → complete → recover → normalize → persist.
// The completion client and both stores are injected behind traits.

pub mod analyzer;
pub mod handlers;
pub mod normalize;
pub mod observer;
pub mod prompts;
pub mod recovery;
pub mod repository;
pub mod serializer;

#[cfg(test)]
pub mod testing;

pub use analyzer::Analyzer;
