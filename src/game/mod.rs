// Game modules: the level, the samurai and everything around them

pub mod animation;
pub mod camera;
pub mod effects;
pub mod player;
pub mod tilemap;
pub mod world;
