pub mod annotation;
pub mod button_group;
pub mod project;
pub mod series;
pub mod video;
