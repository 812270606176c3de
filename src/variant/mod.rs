pub mod chromosome;
pub mod snp;

pub use chromosome::{Chromosome, DensityWindow, DensityWindows};
pub use snp::{Snp, Substitution};
