
/// The set array as a whole.
pub mod cache_array;
