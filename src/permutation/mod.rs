mod config;
mod result;
mod tester;

pub use config::PermutationConfig;
pub use result::PermutationResult;
pub use tester::{
    PermutationTester,
    cddl_permutation_values,
    class_imbalance_permutation_values,
    dpl_permutation_values,
    kl_divergence_permutation_values,
    ks_permutation_values,
};
