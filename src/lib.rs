pub mod controller;
pub mod entities;
pub mod logger;
pub mod model;
