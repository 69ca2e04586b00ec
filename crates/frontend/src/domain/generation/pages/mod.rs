pub mod generate;
pub mod home;
pub mod my_models;
pub mod preview;
pub mod refine;
