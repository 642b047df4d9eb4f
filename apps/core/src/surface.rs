use crate::charts::{BarSpec, BubbleSpec, GaugeSpec};
use crate::dataset::SubjectId;
use crate::selection::{RenderCommand, Renderer};

/// Retained drawing targets: the last spec drawn into each of the four
/// targets. Terminal and browser frontends paint their frames from this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSurface {
    pub subject: Option<SubjectId>,
    pub bar: Option<BarSpec>,
    pub bubble: Option<BubbleSpec>,
    pub gauge: Option<GaugeSpec>,
    panel: Vec<String>,
}

impl ChartSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines currently shown in the sample metadata panel.
    pub fn panel_lines(&self) -> &[String] {
        &self.panel
    }

    pub const fn is_blank(&self) -> bool {
        self.subject.is_none()
    }
}

impl Renderer for ChartSurface {
    fn begin(&mut self, subject: &SubjectId) {
        self.subject = Some(subject.clone());
    }

    fn draw(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::Bar(spec) => self.bar = Some(spec),
            RenderCommand::Bubble(spec) => self.bubble = Some(spec),
            RenderCommand::Gauge(spec) => self.gauge = Some(spec),
            RenderCommand::SampleMetadata(panel) => {
                self.panel.clear();
                self.panel.extend(panel.lines);
            }
        }
    }
}
