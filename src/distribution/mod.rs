mod aligned;

pub use aligned::AlignedPmf;
