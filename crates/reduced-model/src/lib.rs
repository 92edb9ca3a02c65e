#![warn(missing_docs)]
//! Reduced Model - incremental lexical structure for source editors
//!
//! # Overview
//!
//! `reduced-model` tracks, for an editable buffer, what a full parser would be overkill for:
//! brace/paren/bracket nesting, line and block comments, and quoted literals. It answers the
//! structural questions an editor asks on every keystroke ("what encloses this line?",
//! "is this character inside a comment?", "which runs of this range are keywords?") with work
//! proportional to the size of the edit, not of the document.
//!
//! # Core Features
//!
//! - **Zipper Token Stream**: O(1) insertion/removal at the cursor, cursor moves cost the tokens crossed
//! - **Local Re-lexing**: an edit re-tokenizes only the tokens it touches
//! - **Fixed-Point Propagation**: comment/quote state is re-derived forward until it stops changing
//! - **Brace Queries**: enclosing brace, brace balancing, newline distances
//! - **Highlighting**: coalesced state runs, keyword/number/type classification
//! - **Source Document**: rope-backed host layer with indentation and comment commands
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Source Document (Rope + commands)          │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Brace Queries & Highlight Classifier       │  ← Pull queries
//! ├─────────────────────────────────────────────┤
//! │  Reduced Model (cursor + edits)             │  ← Incremental edits
//! ├─────────────────────────────────────────────┤
//! │  State Propagator                           │  ← Comment/quote state
//! ├─────────────────────────────────────────────┤
//! │  Token Stream (zipper) + Lexer              │  ← Tokens
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Using the model directly
//!
//! ```rust
//! use reduced_model::{BraceType, ReducedModel};
//!
//! let mut model = ReducedModel::new();
//! model.insert_text("{\n\n");
//!
//! let info = model.indent_information();
//! assert_eq!(info.brace_type, BraceType::Brace);
//! assert_eq!(info.distance_to_brace, Some(3));
//! assert_eq!(info.distance_to_prev_newline, Some(0));
//! ```
//!
//! ## Using a source document
//!
//! ```rust
//! use reduced_model::{HighlightCategory, LanguageConfig, SourceDocument};
//!
//! let mut doc = SourceDocument::from_text("int Y", LanguageConfig::java());
//! let runs = doc.highlight_status(0, 5).unwrap();
//! assert_eq!(runs[0].category, HighlightCategory::Keyword);
//! assert_eq!(runs[0].length, 3);
//! ```
//!
//! # Module Description
//!
//! - [`token`] - token kinds, lexical states and derived flags
//! - [`model`] - the reduced model and its edit operations
//! - [`query`] - brace and newline queries
//! - [`highlight`] - highlight runs and keyword classification
//! - [`document`] - rope-backed source document
//! - [`error`] - document error type
//!
//! Contract violations on [`ReducedModel`] (moving outside the document, deleting past either
//! end, querying a range outside the document) panic. [`SourceDocument`] validates its arguments
//! and returns [`DocumentError`] instead.

mod cursor;
pub mod document;
pub mod error;
pub mod highlight;
mod lexer;
pub mod model;
pub mod propagate;
pub mod query;
mod stream;
pub mod token;

pub use document::SourceDocument;
pub use error::{DocumentError, DocumentResult};
pub use highlight::{
    HighlightCategory, HighlightStatus, KeywordClassifier, RunBuilder, category_of, is_word_char,
};
pub use model::{ReducedModel, TokenSpan};
pub use propagate::transition;
pub use query::{EnclosingBrace, IndentInfo};
pub use token::{BraceType, Escaped, LexState, Token, TokenKind};

pub use reduced_model_lang::{CommentConfig, HighlightConfig, IndentConfig, LanguageConfig};
