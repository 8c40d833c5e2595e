//! Shared building blocks for the email reply composer.
//!
//! # Public API Overview
//! - Render reply bodies written in a small markdown subset with [`render`];
//!   each input line becomes one [`MarkdownBlock`].
//! - Split inline `**bold**` emphasis with [`split_bold`].
//! - Read process configuration with [`EnvConfig::from_env`] and install
//!   tracing output with [`logging::init`].

pub mod config;
pub mod logging;
pub mod markdown;
pub mod text;

pub use crate::config::EnvConfig;
pub use crate::markdown::{classify_line, inline_runs, render, split_bold, InlineRun, MarkdownBlock};
pub use crate::text::{preview, take_graphemes};
