//! Coinchart GUI - egui front end over the engine session

pub mod app;
pub mod chart;
pub mod settings;
pub mod theme;

pub use app::CoinchartApp;
pub use settings::Settings;
pub use theme::Theme;
