//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (CacheEntry, CacheStats)
//! - Domain value objects (CacheKey, ContentChange)
//! - Domain services (cacheability and key derivation)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
