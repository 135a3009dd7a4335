use scene::LayerKind;

/// A snapshot extractor for one of the scene's drawable layers.
pub trait Layer {
    fn kind(&self) -> LayerKind;
}
