//! Compass — client-side conversation pipeline for guidance chat services.
//!
//! Provides the message pipeline of a guidance-assistant client: input
//! validation, strictly serialized dispatch to a remote guidance service,
//! transcript rendering with sanitize-first formatting, and crisis-resource
//! presentation. The rendering surface, crisis overlay, and service
//! transport are pluggable collaborators.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use compass::prelude::*;
//! use compass::auth::{CookieToken, FormToken, MetaTagToken, TokenChain};
//! use compass::render::TranscriptRenderer;
//! use compass::service::HttpGuidanceService;
//!
//! # fn surface() -> Arc<dyn compass::render::TranscriptSurface> { unimplemented!() }
//! # fn presenter() -> Arc<dyn compass::render::CrisisPresenter> { unimplemented!() }
//! # async fn example() {
//! let config = CompassConfig::from_env();
//! let tokens = TokenChain::standard(
//!     FormToken::new(Some("token-from-form".into())),
//!     MetaTagToken::new(None),
//!     CookieToken::default(),
//! );
//! let service = Arc::new(HttpGuidanceService::new("https://guidance.example", tokens));
//! let renderer = TranscriptRenderer::new(surface(), presenter(), config.auto_scroll_defer);
//! let controller = ConversationController::new(config, service, renderer);
//!
//! controller.submit("When do applications open?").await;
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod prelude;
pub mod render;
pub mod service;
pub mod types;
