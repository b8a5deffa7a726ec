//! Chemistry lookups
//!
//! Pure, stateless helpers shared by the store and the experiment machines:
//!
//! - [`ph_to_color`]: universal-indicator color for a pH value
//! - [`ph_to_classification`] / [`ph_to_description`]: coarse and fine labels
//! - [`random_ph`]: realistic-looking pH samples for fixture variety
//! - [`lerp_color`]: channel-wise RGB interpolation used by every animation

mod color;
mod ph;

pub use color::{lerp_color, Color};
pub use ph::{
    ph_to_classification, ph_to_color, ph_to_description, random_ph, PhClass, PhDescription,
    PH_MAX, PH_MIN, PH_NEUTRAL, SAMPLE_RANGES,
};
