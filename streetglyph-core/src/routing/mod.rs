//! Turning matched segments into one continuous route of the right length

pub mod regulate;
pub mod stitch;

pub use regulate::{
    DistanceRegulator, Heading, HeadingSource, LegStatus, RandomHeading, Regulated,
    RegulationAction, shorten_path,
};
pub use stitch::{ConnectorGap, StitchOutcome, stitch_segments};
