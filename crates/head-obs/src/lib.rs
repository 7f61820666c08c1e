//! Head observation merging.
//!
//! A model run leaves two text files behind: an observation metadata file
//! (well, location and time step per observation) and a values file with the
//! simulated and observed head per observation. [`merge_head_observations`]
//! inner-joins them on the observation name.
//!
//! # Example
//!
//! ```ignore
//! use head_obs::{merge_head_observations, MergeOptions};
//!
//! let table = merge_head_observations("obs_meta.txt", "model_os.txt", &MergeOptions::default())?;
//! for row in table.iter() {
//!     println!("{} t={} residual={:.3}", row.name, row.time, row.residual());
//! }
//! table.write_csv("merged_heads.csv")?;
//! ```

pub mod merge;
pub mod metadata;
pub mod values;

pub use merge::{merge_head_observations, merge_records, MergeOptions, MergedObservation, MergedTable};
pub use metadata::{parse_metadata, read_metadata_file, ObservationMetadata, WellId};
pub use values::{parse_values, read_values_file, ObservationValue};
