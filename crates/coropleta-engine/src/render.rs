use crate::pipeline::MapFrame;

/// The rendering seam.
///
/// Renderers are external collaborators (plotting toolkits, web canvases,
/// test doubles). The contract is the [`MapFrame`] shape: bindings carry
/// `(region, derived-or-error, ordinal bucket)`, the legend ascends with the
/// buckets, and a `None` bucket must be drawn as a distinguishable "no data"
/// category. Palette lookup by ordinal index is the renderer's business.
pub trait MapRenderer {
    type Artifact;
    type Error;

    fn render(&mut self, frame: &MapFrame) -> Result<Self::Artifact, Self::Error>;
}
