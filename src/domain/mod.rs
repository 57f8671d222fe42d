//! Domain layer containing the redirect resource model.
//!
//! The domain is deliberately small: a redirect is a `from` → `to` path
//! mapping whose identity is derived from `from`, and a page is a
//! response-only aggregate over a backend scan. Nothing here touches the
//! backend; data access contracts live in
//! [`crate::infrastructure::backend`] and orchestration in
//! [`crate::application::services`].

pub mod entities;
