//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric inputs, making them straightforward to unit-test.

/// Maps a noise value from the standard `[-1, 1]` range into `[min, max]`.
///
/// Noise generators (e.g. `Fbm<Perlin>`) produce values centred around zero.
/// This linearly rescales to an arbitrary output range.
///
/// # Examples
/// ```
/// # use hex_map_editor::math::map_noise_to_range;
/// assert_eq!(map_noise_to_range(-1.0, 0.0, 10.0), 0.0);
/// assert_eq!(map_noise_to_range( 1.0, 0.0, 10.0), 10.0);
/// assert_eq!(map_noise_to_range( 0.0, 2.0, 6.0),  4.0);
/// ```
pub fn map_noise_to_range(noise_val: f64, min: f32, max: f32) -> f32 {
    min + ((noise_val as f32 + 1.0) / 2.0) * (max - min)
}

/// Maps a `[0, 1]` noise channel to a signed `[-strength, strength]` offset.
///
/// # Examples
/// ```
/// # use hex_map_editor::math::signed_perturbation;
/// assert_eq!(signed_perturbation(0.5, 1.5), 0.0);
/// assert_eq!(signed_perturbation(1.0, 1.5), 1.5);
/// assert_eq!(signed_perturbation(0.0, 1.5), -1.5);
/// ```
pub fn signed_perturbation(sample: f32, strength: f32) -> f32 {
    (sample * 2.0 - 1.0) * strength
}
