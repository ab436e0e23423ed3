// App module for climate_dashboard
// Owns every controller and applies UI events and finished flows to them

pub mod actions;
pub mod input;
pub mod state;

pub use state::{
    BootStep, Dashboard, DashboardOptions, DashboardSnapshot, Hooks, NotificationLine,
};
