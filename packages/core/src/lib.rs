//! Static LDP pod network generator.
//!
//! Turns a declarative [`Blueprint`] of people hosted across servers into a
//! filesystem mirror of a Linked Data Platform network: one container tree
//! per server, one sub-tree per person, holding a WebID profile, an inbox,
//! and optionally a sensor document, all serialized as Turtle.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Blueprint declarations and the resolved [`Person`] record |
//! | [`validation`] | Blueprint decoding and checks via [`validate_blueprint`] |
//! | [`layout`] | Container paths on disk |
//! | [`graph`] | The person [`Registry`] and friend graph resolution |
//! | [`rdf`] | Terms, triples, graphs and vocabularies |
//! | [`documents`] | Profile, inbox and sensor graphs for a person |
//! | [`render`] | The [`GraphSerializer`] seam and the Turtle writer |
//! | [`plan`] | Pure planning of every directory and document |
//! | [`writer`] | Applying a plan; the [`Generator`] |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use soliddata::{parse_blueprint, BlueprintFormat, Generator, GeneratorConfig};
//!
//! let blueprint = parse_blueprint(&text, BlueprintFormat::Json)?;
//! let generator = Generator::new(GeneratorConfig::new("out").flatten(false));
//!
//! // Dry run:
//! print!("{}", generator.plan(&blueprint)?);
//!
//! // Real run:
//! let summary = generator.run(&blueprint)?;
//! ```

pub mod documents;
pub mod error;
pub mod graph;
pub mod layout;
pub mod plan;
pub mod rdf;
pub mod render;
pub mod types;
pub mod validation;
pub mod writer;

pub use error::GenerateError;
pub use graph::{ReferenceError, Registry};
pub use layout::{Layout, PersonLayout};
pub use plan::{build_plan, Plan, PlanSummary};
pub use render::{GraphSerializer, SerializeError, TurtleSerializer};
pub use types::{Blueprint, DocumentKind, Person, PersonDecl, SensorPresence, ServerDecl};
pub use validation::{parse_blueprint, validate_blueprint, BlueprintFormat, ParseError, ValidationError};
pub use writer::{apply, Generator, GeneratorConfig};
