//! Declarative attribute schemas for provider resources.
//!
//! The host runtime asks the provider for one [`ResourceSchema`] per resource
//! type and uses it to validate configuration, apply defaults and decide when
//! a change needs the resource to be replaced.
//!
//! # Key Types
//!
//! - [`ResourceSchema`] - Named set of attribute definitions
//! - [`AttributeDefinition`] - Type, default, validator and mutability of one attribute
//!
//! # Examples
//!
//! ```rust
//! use azuredevops_provider::schema::{AttributeDefinition, ResourceSchema};
//! use serde_json::json;
//!
//! let schema = ResourceSchema::new("example", "Example resource")
//!     .with_attribute(AttributeDefinition::string("name").required().non_empty())
//!     .with_attribute(AttributeDefinition::boolean("enabled").with_default(true));
//!
//! let mut config = json!({"name": "pool"});
//! schema.validate(&config).unwrap();
//! schema.apply_defaults(&mut config);
//! assert_eq!(config["enabled"], json!(true));
//! ```

pub mod types;
pub mod validation;


pub use types::{AttributeDefinition, AttributeType, Mutability, ResourceSchema};
