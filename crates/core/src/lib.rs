//! servicerec-core: decision logic behind the service recommendation actions
//!
//! Turns loosely typed dialogue slots into a validated recommender request,
//! and reorders returned results with simple keyword hints. Everything here
//! is synchronous and holds no state beyond the code tables loaded at start-up.

pub mod codes;
pub mod error;
pub mod filter;
pub mod meters;
pub mod output;
pub mod params;
pub mod request;
pub mod rerank;
pub mod results;
pub mod slot;
pub mod transfer;
pub mod validate;

pub use codes::{CodeTable, CodeTables};
pub use error::{CodeTableError, TokenError, ValidationError};
pub use filter::{ClassificationFilter, FilterDomain, FilterRegistry};
pub use meters::{LifeSituationFeature, LifeSituationMeters};
pub use output::{Button, Layout, OutputSink};
pub use params::{IntoParam, ParamValue, ParameterSet};
pub use request::{RecommendMethod, RecommendationRequest};
pub use results::{InfoKind, ResultItem, ResultSet, ServiceChannel};
pub use slot::{SlotSource, SlotValue};
pub use validate::SlotValidator;
