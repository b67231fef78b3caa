pub mod annotate;
pub mod correlator;
pub mod media;
pub mod recipients;
pub mod simulate;
pub mod window;
