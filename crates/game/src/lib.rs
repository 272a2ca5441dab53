pub mod plugins;
pub mod character;
pub mod camera;
pub mod audio;
pub mod encounter_asset;
pub mod wave;
