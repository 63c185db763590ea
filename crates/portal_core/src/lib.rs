//! View logic for the agricultural portal: the updates listing with category
//! filtering, and the NDVI analysis flow from region selection to a classified
//! vegetation reading.

pub mod catalog;
pub mod ndvi;
pub mod retrieval;
pub mod updates;
pub mod vegetation;

pub use catalog::{default_catalog, load_catalog};
pub use ndvi::{Generation, MetricTicket, NdviController, NdviState, NdviView, Resolution};
pub use retrieval::{
    fetch_with_policy, MetricRetriever, RetrievalError, RetryPolicy, SimulatedRetriever,
};
pub use updates::{filter_items, UpdatesView};
pub use vegetation::{classify, classify_value, color_band};
