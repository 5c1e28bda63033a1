//! Client SDK for the dashboard frontend.

mod client;

pub use client::{DashboardClient, Health, NewUser, SdkError};
