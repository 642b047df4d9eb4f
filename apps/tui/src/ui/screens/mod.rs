pub mod dashboard;
pub mod loading;
