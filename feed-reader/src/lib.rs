pub mod types;
pub mod traits;
pub mod config;
pub mod registry;
pub mod fetcher;
pub mod parser;
pub mod text;
pub mod sanitizer;
pub mod keywords;
pub mod sentiment;
pub mod translator;
pub mod composer;
pub mod session;

pub use types::*;
pub use traits::{FeedSource, PolarityScorer, Translator};
pub use config::ReaderConfig;
pub use registry::FeedRegistry;
pub use fetcher::{FeedFetcher, HttpFetcher};
pub use parser::FeedParser;
pub use sanitizer::strip_images;
pub use keywords::KeywordExtractor;
pub use sentiment::{LexiconScorer, SentimentAnalyzer, SentimentLabel};
pub use translator::{FieldTranslation, GoogleTranslator};
pub use composer::{AnalyzedDocument, DocumentComposer};
pub use session::ReaderSession;
