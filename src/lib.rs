//! Votdub - Automated YouTube Voice-over Translation Workflow
//!
//! A workflow for producing a translated-audio rendition of a YouTube video
//! using yt-dlp, vot-cli, and ffmpeg.

pub mod cleanup;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod fetch;
pub mod media;
pub mod pipeline;
pub mod translate;
