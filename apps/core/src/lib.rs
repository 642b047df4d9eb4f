// Core pipeline for the belly button biodiversity dashboard:
// raw dataset -> subject index (ranked once) -> selection -> chart specs

pub mod charts;
pub mod dataset;
pub mod error;
pub mod index;
pub mod ranking;
pub mod selection;
pub mod surface;

pub use charts::{BarSpec, BubbleSpec, Colorscale, DemographicPanel, GaugeSpec};
pub use dataset::{Demographic, Identifier, RawDataset, SampleSet, SubjectId};
pub use error::{DashboardError, Result};
pub use index::{SubjectIndex, SubjectRecord};
pub use ranking::{rank_samples, RankedSampleSet};
pub use selection::{
    RenderCommand, RenderCommands, RenderTarget, Renderer, SelectionController, SelectionState,
    DEFAULT_SUBJECT,
};
pub use surface::ChartSurface;
