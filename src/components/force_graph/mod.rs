//! Force-directed knowledge graph component.
//!
//! Renders documents and their metadata tags as an interactive graph on an
//! HTML canvas with:
//! - A physics-based layout that keeps node positions across data updates
//! - Freeze/resume without losing velocities
//! - Per-group visibility layers and label search highlighting
//! - Hover and click reporting through callbacks
//!
//! # Example
//!
//! ```ignore
//! use pratejra_graph::{GraphData, KnowledgeGraphCanvas, VisibilityFilter};
//!
//! let data = RwSignal::new(GraphData::from_documents(&docs, &mut rng));
//! let filters = RwSignal::new(VisibilityFilter::default());
//!
//! view! {
//!     <KnowledgeGraphCanvas
//!         data=data
//!         frozen=Signal::stored(false)
//!         filters=filters
//!         search=Signal::stored(String::new())
//!         height=Signal::stored(500.0)
//!         on_node_click={move |node: Option<GraphNode>| log::info!("{node:?}")}
//!     />
//! }
//! ```

mod animation;
mod builder;
mod component;
pub mod config;
pub mod frame;
mod render;
pub mod simulation;
pub mod state;
pub mod theme;
mod types;

pub use builder::metadata_node_id;
pub use component::KnowledgeGraphCanvas;
pub use config::{GraphConfig, HitPolicy, InteractionConfig, SimulationConfig};
pub use simulation::{SimNode, Simulation};
pub use state::{ForceGraphState, Layer, SearchQuery, VisibilityFilter};
pub use theme::Theme;
pub use types::{Document, GraphData, GraphLink, GraphNode, NodeGroup};
