mod facets;
mod privileged;

pub use facets::Facets;
pub use privileged::Privileged;
