pub mod activity;
pub mod equipment;
pub mod point;
pub mod project;
pub mod user;
